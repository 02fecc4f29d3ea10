//! Hex coordinate geometry: [`Offset`], [`Axial`] and [`Cube`] coordinates.
//!
//! Offset coordinates are how a rectangular map stores its cells, axial
//! coordinates are the compact two-axis form, and cube coordinates are what
//! distance, rounding and neighbor arithmetic are done in. All conversions go
//! through cube space and are orientation-aware:
//!
//! - [`Orientation::FlatTop`] uses "odd-q" offsets (odd columns shoved down).
//! - [`Orientation::PointyTop`] uses "odd-r" offsets (odd rows shoved right).

use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Smallest hex size accepted by the world-space conversions.
pub const MIN_HEX_SIZE: f32 = 1e-4;

const SQRT_3: f32 = 1.732_050_8;

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Which way the hexes on a map are rotated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Flat edge on top, columns stagger vertically ("odd-q").
    FlatTop,
    /// Corner on top, rows stagger horizontally ("odd-r").
    #[default]
    PointyTop,
}

// ---------------------------------------------------------------------------
// Offset / Axial
// ---------------------------------------------------------------------------

/// Column/row storage coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub col: i32,
    pub row: i32,
}

impl Offset {
    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.col, self.row)
    }
}

/// Two-axis hex coordinates. `q` matches cube `x`, `r` matches cube `z`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

impl Axial {
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }
}

// ---------------------------------------------------------------------------
// Cube
// ---------------------------------------------------------------------------

/// Three-axis hex coordinates with the invariant `x + y + z == 0`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// The six unit steps in cube space, in rotational order.
pub const CUBE_DIRECTIONS: [Cube; 6] = [
    Cube { x: 1, y: -1, z: 0 },
    Cube { x: 1, y: 0, z: -1 },
    Cube { x: 0, y: 1, z: -1 },
    Cube { x: -1, y: 1, z: 0 },
    Cube { x: -1, y: 0, z: 1 },
    Cube { x: 0, y: -1, z: 1 },
];

impl Cube {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a cube coordinate. The three components must sum to zero.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        debug_assert!(x + y + z == 0, "cube coordinates must sum to zero");
        Self { x, y, z }
    }

    /// Build from the two independent axes, deriving `y`.
    #[inline]
    pub const fn from_xz(x: i32, z: i32) -> Self {
        Self { x, y: -x - z, z }
    }

    /// Number of single-hex steps between `self` and `other`.
    #[inline]
    pub fn distance(self, other: Cube) -> i32 {
        cube_distance(self, other)
    }

    /// The adjacent cube in `CUBE_DIRECTIONS[dir % 6]`.
    #[inline]
    pub fn neighbor(self, dir: usize) -> Cube {
        self + CUBE_DIRECTIONS[dir % 6]
    }

    /// All six adjacent cubes.
    pub fn neighbors(self) -> [Cube; 6] {
        CUBE_DIRECTIONS.map(|d| self + d)
    }

    /// Cubes at exactly `radius` steps, walked around the ring.
    pub fn ring(self, radius: i32) -> Vec<Cube> {
        if radius <= 0 {
            return vec![self];
        }
        let mut out = Vec::with_capacity(6 * radius as usize);
        let mut hex = self + CUBE_DIRECTIONS[4] * radius;
        for dir in 0..6 {
            for _ in 0..radius {
                out.push(hex);
                hex = hex.neighbor(dir);
            }
        }
        out
    }

    /// Cubes within `radius` steps, centre first, then ring by ring.
    pub fn spiral(self, radius: i32) -> Vec<Cube> {
        let mut out = vec![self];
        for k in 1..=radius {
            out.extend(self.ring(k));
        }
        out
    }
}

impl Add for Cube {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Cube {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for Cube {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Offset → cube for the given orientation.
pub fn offset_to_cube(offset: Offset, orientation: Orientation) -> Cube {
    let Offset { col, row } = offset;
    match orientation {
        Orientation::FlatTop => Cube::from_xz(col, row - (col - (col & 1)) / 2),
        Orientation::PointyTop => Cube::from_xz(col - (row - (row & 1)) / 2, row),
    }
}

/// Cube → offset for the given orientation.
pub fn cube_to_offset(cube: Cube, orientation: Orientation) -> Offset {
    match orientation {
        Orientation::FlatTop => Offset::new(cube.x, cube.z + (cube.x - (cube.x & 1)) / 2),
        Orientation::PointyTop => Offset::new(cube.x + (cube.z - (cube.z & 1)) / 2, cube.z),
    }
}

#[inline]
pub fn axial_to_cube(axial: Axial) -> Cube {
    Cube::from_xz(axial.q, axial.r)
}

#[inline]
pub fn cube_to_axial(cube: Cube) -> Axial {
    Axial::new(cube.x, cube.z)
}

/// Hex distance: `(|dx| + |dy| + |dz|) / 2`.
#[inline]
pub fn cube_distance(a: Cube, b: Cube) -> i32 {
    ((a.x - b.x).abs() + (a.y - b.y).abs() + (a.z - b.z).abs()) / 2
}

/// Round fractional cube coordinates to the nearest valid cube.
///
/// Each component is rounded independently; the one with the largest
/// rounding error is then recomputed from the other two so the result
/// satisfies `x + y + z == 0` exactly.
pub fn cube_round(x: f32, y: f32, z: f32) -> Cube {
    let mut rx = x.round();
    let mut ry = y.round();
    let mut rz = z.round();

    let dx = (rx - x).abs();
    let dy = (ry - y).abs();
    let dz = (rz - z).abs();

    if dx > dy && dx > dz {
        rx = -ry - rz;
    } else if dy > dz {
        ry = -rx - rz;
    } else {
        rz = -rx - ry;
    }
    Cube::new(rx as i32, ry as i32, rz as i32)
}

/// World-space point (on the X/Z ground plane) → containing hex, in axial
/// coordinates. `size` is the centre-to-corner radius of a hex.
pub fn world_to_axial(world_x: f32, world_z: f32, size: f32, orientation: Orientation) -> Axial {
    let size = size.max(MIN_HEX_SIZE);
    let (q, r) = match orientation {
        Orientation::PointyTop => (
            (SQRT_3 / 3.0 * world_x - world_z / 3.0) / size,
            (2.0 / 3.0 * world_z) / size,
        ),
        Orientation::FlatTop => (
            (2.0 / 3.0 * world_x) / size,
            (-world_x / 3.0 + SQRT_3 / 3.0 * world_z) / size,
        ),
    };
    cube_to_axial(cube_round(q, -q - r, r))
}

/// Centre of an axial hex in world space (X/Z ground plane).
pub fn axial_to_world(axial: Axial, size: f32, orientation: Orientation) -> (f32, f32) {
    let size = size.max(MIN_HEX_SIZE);
    let q = axial.q as f32;
    let r = axial.r as f32;
    match orientation {
        Orientation::PointyTop => (size * SQRT_3 * (q + r / 2.0), size * 1.5 * r),
        Orientation::FlatTop => (size * 1.5 * q, size * SQRT_3 * (r + q / 2.0)),
    }
}

// ---------------------------------------------------------------------------
// HexCoordinate
// ---------------------------------------------------------------------------

/// A cell position held in all three representations at once.
///
/// Always built through one canonical conversion, so the three forms can
/// never disagree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoordinate {
    offset: Offset,
    axial: Axial,
    cube: Cube,
}

impl HexCoordinate {
    pub fn from_offset(offset: Offset, orientation: Orientation) -> Self {
        let cube = offset_to_cube(offset, orientation);
        Self {
            offset,
            axial: cube_to_axial(cube),
            cube,
        }
    }

    pub fn from_cube(cube: Cube, orientation: Orientation) -> Self {
        Self {
            offset: cube_to_offset(cube, orientation),
            axial: cube_to_axial(cube),
            cube,
        }
    }

    pub fn from_axial(axial: Axial, orientation: Orientation) -> Self {
        Self::from_cube(axial_to_cube(axial), orientation)
    }

    #[inline]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    #[inline]
    pub fn axial(&self) -> Axial {
        self.axial
    }

    #[inline]
    pub fn cube(&self) -> Cube {
        self.cube
    }

    /// Hex distance to another coordinate.
    #[inline]
    pub fn distance(&self, other: &HexCoordinate) -> i32 {
        cube_distance(self.cube, other.cube)
    }
}

impl fmt::Display for HexCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const BOTH: [Orientation; 2] = [Orientation::FlatTop, Orientation::PointyTop];

    #[test]
    fn offset_round_trip_exhaustive_window() {
        for orientation in BOTH {
            for col in -20..20 {
                for row in -20..20 {
                    let o = Offset::new(col, row);
                    let c = offset_to_cube(o, orientation);
                    assert_eq!(c.x + c.y + c.z, 0);
                    assert_eq!(cube_to_offset(c, orientation), o, "{orientation:?} {o}");
                }
            }
        }
    }

    #[test]
    fn offset_round_trip_random() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let o = Offset::new(
                rng.random_range(-100_000..100_000),
                rng.random_range(-100_000..100_000),
            );
            for orientation in BOTH {
                assert_eq!(cube_to_offset(offset_to_cube(o, orientation), orientation), o);
            }
        }
    }

    #[test]
    fn axial_round_trip() {
        let a = Axial::new(-3, 5);
        let c = axial_to_cube(a);
        assert_eq!(c, Cube::new(-3, -2, 5));
        assert_eq!(cube_to_axial(c), a);
    }

    #[test]
    fn odd_q_shoves_odd_columns_down() {
        // Column 1 row 0 sits below column 0 row 0, so its cube z is 0.
        let c = offset_to_cube(Offset::new(1, 0), Orientation::FlatTop);
        assert_eq!(c, Cube::new(1, -1, 0));
        let c = offset_to_cube(Offset::new(1, 1), Orientation::FlatTop);
        assert_eq!(c, Cube::new(1, -2, 1));
    }

    #[test]
    fn odd_r_shoves_odd_rows_right() {
        let c = offset_to_cube(Offset::new(0, 1), Orientation::PointyTop);
        assert_eq!(c, Cube::new(0, -1, 1));
        let c = offset_to_cube(Offset::new(0, 2), Orientation::PointyTop);
        assert_eq!(c, Cube::new(-1, -1, 2));
    }

    #[test]
    fn neighbors_are_at_distance_one() {
        let c = Cube::new(2, -5, 3);
        let ns = c.neighbors();
        for n in ns {
            assert_eq!(c.distance(n), 1);
            assert_eq!(n.x + n.y + n.z, 0);
        }
        // All distinct.
        for i in 0..6 {
            for j in (i + 1)..6 {
                assert_ne!(ns[i], ns[j]);
            }
        }
    }

    #[test]
    fn distance_is_half_manhattan() {
        assert_eq!(cube_distance(Cube::ZERO, Cube::new(3, -1, -2)), 3);
        assert_eq!(cube_distance(Cube::new(1, -1, 0), Cube::new(-2, 0, 2)), 3);
        assert_eq!(cube_distance(Cube::ZERO, Cube::ZERO), 0);
    }

    #[test]
    fn ring_and_spiral_sizes() {
        let centre = Cube::new(1, 1, -2);
        assert_eq!(centre.ring(0), vec![centre]);
        for radius in 1..5 {
            let ring = centre.ring(radius);
            assert_eq!(ring.len(), 6 * radius as usize);
            assert!(ring.iter().all(|c| centre.distance(*c) == radius));
        }
        let spiral = centre.spiral(3);
        assert_eq!(spiral.len(), 1 + 3 * 3 * 4);
        assert_eq!(spiral[0], centre);
    }

    #[test]
    fn cube_round_keeps_invariant() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1_000 {
            let x: f32 = rng.random_range(-50.0..50.0);
            let z: f32 = rng.random_range(-50.0..50.0);
            let c = cube_round(x, -x - z, z);
            assert_eq!(c.x + c.y + c.z, 0);
        }
    }

    #[test]
    fn cube_round_picks_largest_error_component() {
        // x has the largest error and is rebuilt from y and z.
        assert_eq!(cube_round(0.4, -0.1, -0.3), Cube::new(0, 0, 0));
        // y has the largest error.
        assert_eq!(cube_round(0.6, -0.45, -0.15), Cube::new(1, -1, 0));
    }

    #[test]
    fn world_centres_map_back_to_their_hex() {
        for orientation in BOTH {
            for q in -6..6 {
                for r in -6..6 {
                    let a = Axial::new(q, r);
                    let (x, z) = axial_to_world(a, 2.5, orientation);
                    assert_eq!(world_to_axial(x, z, 2.5, orientation), a);
                    // Nudge slightly off-centre, still the same hex.
                    assert_eq!(world_to_axial(x + 0.3, z - 0.3, 2.5, orientation), a);
                }
            }
        }
    }

    #[test]
    fn zero_size_is_clamped() {
        let a = world_to_axial(0.0, 0.0, 0.0, Orientation::PointyTop);
        assert_eq!(a, Axial::new(0, 0));
        let (x, z) = axial_to_world(Axial::new(1, 0), -1.0, Orientation::FlatTop);
        assert!(x.is_finite() && z.is_finite());
    }

    #[test]
    fn hex_coordinate_forms_agree() {
        for orientation in BOTH {
            let h = HexCoordinate::from_offset(Offset::new(3, 4), orientation);
            assert_eq!(HexCoordinate::from_cube(h.cube(), orientation), h);
            assert_eq!(HexCoordinate::from_axial(h.axial(), orientation), h);
            assert_eq!(h.distance(&h), 0);
        }
    }
}

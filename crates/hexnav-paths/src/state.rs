use hexnav_core::CellId;

/// Sentinel g-cost of a cell no search has reached.
pub const UNVISITED: i32 = i32::MAX;

/// Transient per-cell bookkeeping for one search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchState {
    /// Accumulated cost from the start, [`UNVISITED`] until reached.
    pub g_cost: i32,
    /// Heuristic estimate to the goal, 0 until reached.
    pub h_cost: i32,
    pub in_open_set: bool,
    pub in_closed_set: bool,
    /// Cell this one was reached from.
    pub predecessor: Option<CellId>,
}

impl SearchState {
    /// `g_cost + h_cost`, saturating at [`UNVISITED`].
    #[inline]
    pub fn f_cost(&self) -> i32 {
        self.g_cost.saturating_add(self.h_cost)
    }

    /// Neither queued nor finalized.
    #[inline]
    pub fn is_unvisited(&self) -> bool {
        !self.in_open_set && !self.in_closed_set
    }

    /// Return every field to its unvisited baseline.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            g_cost: UNVISITED,
            h_cost: 0,
            in_open_set: false,
            in_closed_set: false,
            predecessor: None,
        }
    }
}

/// One [`SearchState`] per cell of a graph, indexed by [`CellId`].
///
/// Owned by a single algorithm instance, so the grid itself is only ever
/// borrowed immutably and separate instances can search the same grid in
/// parallel.
#[derive(Clone, Debug, Default)]
pub struct SearchSpace {
    states: Vec<SearchState>,
}

impl SearchSpace {
    /// Create a space for `len` cells, all unvisited.
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![SearchState::default(); len],
        }
    }

    /// Reset every state and size the space to `len` cells.
    ///
    /// Existing storage is reused when it is large enough.
    pub fn reset(&mut self, len: usize) {
        for s in self.states.iter_mut() {
            s.reset();
        }
        self.states.resize(len, SearchState::default());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State of a cell.
    ///
    /// # Panics
    ///
    /// If `id` is outside the space; that means the handle belongs to a
    /// different graph.
    #[inline]
    pub fn get(&self, id: CellId) -> &SearchState {
        &self.states[id.index()]
    }

    /// Mutable state of a cell. Panics like [`get`](SearchSpace::get).
    #[inline]
    pub fn get_mut(&mut self, id: CellId) -> &mut SearchState {
        &mut self.states[id.index()]
    }

    /// Cells that received a g-cost in the last search, with their state.
    pub fn visited(&self) -> impl Iterator<Item = (CellId, &SearchState)> {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.g_cost != UNVISITED)
            .map(|(i, s)| (CellId(i), s))
    }
}

//! Triangular value grid.
//!
//! Level `i` of an `n`-step lattice has `i + 1` nodes, so the grid is stored
//! flat with level `i` starting at offset `i(i+1)/2`. Total storage is
//! `(n+1)(n+2)/2` cells.

/// Dense triangular storage indexed by `(step, ups)`.
///
/// # Examples
/// ```
/// use lattice_models::lattice::ValueGrid;
///
/// let mut grid = ValueGrid::filled(3, 0.0_f64);
/// grid.set(2, 1, 4.5);
/// assert_eq!(grid.get(2, 1), 4.5);
/// assert_eq!(grid.level(3).len(), 4);
/// assert_eq!(grid.len(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValueGrid<V: Copy> {
    steps: usize,
    cells: Vec<V>,
}

#[inline]
fn offset(step: usize) -> usize {
    step * (step + 1) / 2
}

impl<V: Copy> ValueGrid<V> {
    /// Creates a grid of `steps + 1` levels with every cell set to `value`.
    pub fn filled(steps: usize, value: V) -> Self {
        Self {
            steps,
            cells: vec![value; offset(steps + 1)],
        }
    }

    /// Number of steps `n` (the grid has `n + 1` levels).
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least the root cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Value at node `(step, ups)`.
    ///
    /// # Panics
    /// If `ups > step` or `step > n`.
    #[inline]
    pub fn get(&self, step: usize, ups: usize) -> V {
        debug_assert!(ups <= step && step <= self.steps);
        self.cells[offset(step) + ups]
    }

    /// Overwrites node `(step, ups)`.
    #[inline]
    pub fn set(&mut self, step: usize, ups: usize, value: V) {
        debug_assert!(ups <= step && step <= self.steps);
        self.cells[offset(step) + ups] = value;
    }

    /// All nodes at one level, ordered by up-count.
    #[inline]
    pub fn level(&self, step: usize) -> &[V] {
        &self.cells[offset(step)..offset(step + 1)]
    }

    /// Mutable view of one level.
    #[inline]
    pub fn level_mut(&mut self, step: usize) -> &mut [V] {
        &mut self.cells[offset(step)..offset(step + 1)]
    }

    /// Splits out level `step` (mutable) and level `step + 1` (shared).
    ///
    /// Used by backward induction, which writes level `i` from level `i+1`.
    pub fn level_pair_mut(&mut self, step: usize) -> (&mut [V], &[V]) {
        let (head, tail) = self.cells.split_at_mut(offset(step + 1));
        let next_len = step + 2;
        (&mut head[offset(step)..], &tail[..next_len])
    }

    /// Root node `(0, 0)`.
    #[inline]
    pub fn root(&self) -> V {
        self.cells[0]
    }
}

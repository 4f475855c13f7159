//! Square and value selection policies for the branching engines.
//!
//! The search and uniqueness engines are generic over a policy, the same
//! way a solver is generic over its variable-selection heuristic: the
//! policy decides which unsolved square to branch on and in which order to
//! try its candidates.

use crate::sudoku::candidates::{Candidates, Value};
use crate::sudoku::grid::CandidateGrid;
use crate::sudoku::topology::Square;
use smallvec::SmallVec;

/// The candidate values of a square in the order a policy wants them tried.
pub type ValueOrder = SmallVec<[Value; 16]>;

/// Chooses the square to branch on and the order of its candidate values.
pub trait SquareSelection {
    /// Picks an unsolved square of `grid`, or `None` when every square is
    /// solved.
    fn pick(&mut self, grid: &CandidateGrid) -> Option<Square>;

    /// The order in which to try the candidates of the picked square.
    fn value_order(&mut self, candidates: Candidates) -> ValueOrder;
}

/// Deterministic minimum-remaining-values selection: the unsolved square
/// with the fewest candidates, ties broken by first occurrence in square
/// enumeration order; values tried in ascending order.
///
/// This minimises the branching factor and is the default policy for both
/// solving and uniqueness checking: whenever a two-candidate square exists
/// it is picked outright (two is the smallest possible count, so the scan
/// stops at the first one), which is exactly the split that exposes a
/// second solution fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FewestCandidates;

impl SquareSelection for FewestCandidates {
    fn pick(&mut self, grid: &CandidateGrid) -> Option<Square> {
        let mut best: Option<(Square, usize)> = None;
        for square in 0..grid.cell_count() {
            let len = grid[square].len();
            if len > 1 && best.is_none_or(|(_, fewest)| len < fewest) {
                best = Some((square, len));
                if len == 2 {
                    break;
                }
            }
        }
        best.map(|(square, _)| square)
    }

    fn value_order(&mut self, candidates: Candidates) -> ValueOrder {
        candidates.iter().collect()
    }
}

/// Uniformly random selection: a random unsolved square, its candidates in
/// shuffled order.
///
/// Used for puzzle generation so that repeated runs produce different
/// grids; seedable for reproducibility.
#[derive(Debug, Clone)]
pub struct RandomOrder {
    rng: fastrand::Rng,
}

impl RandomOrder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl SquareSelection for RandomOrder {
    fn pick(&mut self, grid: &CandidateGrid) -> Option<Square> {
        let unsolved: Vec<Square> = grid.unsolved().collect();
        if unsolved.is_empty() {
            None
        } else {
            Some(unsolved[self.rng.usize(..unsolved.len())])
        }
    }

    fn value_order(&mut self, candidates: Candidates) -> ValueOrder {
        let mut order: ValueOrder = candidates.iter().collect();
        self.rng.shuffle(&mut order);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::topology::BoardSize;

    fn grid_with(cells: &[(Square, &[Value])]) -> CandidateGrid {
        let mut grid = CandidateGrid::full(BoardSize::Nine);
        for &(square, values) in cells {
            let mut set = Candidates::EMPTY;
            for &value in values {
                set.insert(value);
            }
            grid[square] = set;
        }
        grid
    }

    #[test]
    fn test_fewest_candidates_prefers_smallest() {
        let grid = grid_with(&[(5, &[0, 1, 2]), (7, &[3, 4])]);
        assert_eq!(FewestCandidates.pick(&grid), Some(7));
    }

    #[test]
    fn test_fewest_candidates_breaks_ties_by_first_occurrence() {
        let grid = grid_with(&[(3, &[0, 1, 2]), (8, &[3, 4, 5])]);
        assert_eq!(FewestCandidates.pick(&grid), Some(3));
    }

    #[test]
    fn test_pick_on_complete_grid() {
        let mut grid = CandidateGrid::full(BoardSize::Four);
        for square in 0..16 {
            grid.set_clue(square, 0);
        }
        assert_eq!(FewestCandidates.pick(&grid), None);
        assert_eq!(RandomOrder::with_seed(1).pick(&grid), None);
    }

    #[test]
    fn test_random_order_is_reproducible() {
        let grid = CandidateGrid::full(BoardSize::Nine);
        let mut a = RandomOrder::with_seed(99);
        let mut b = RandomOrder::with_seed(99);
        assert_eq!(a.pick(&grid), b.pick(&grid));
        assert_eq!(
            a.value_order(Candidates::full(9)),
            b.value_order(Candidates::full(9))
        );
    }

    #[test]
    fn test_random_value_order_is_a_permutation() {
        let mut policy = RandomOrder::with_seed(5);
        let mut order = policy.value_order(Candidates::full(9));
        order.sort_unstable();
        assert_eq!(order.to_vec(), (0..9).collect::<Vec<_>>());
    }
}

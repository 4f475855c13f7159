//! The backtracking search engine.
//!
//! Search starts from the fixed point reached by clue saturation and then
//! branches depth-first: pick an unsolved square through the selection
//! policy, and for each of its candidates clone the grid, assign the
//! candidate and recurse. The first complete grid found is the solution;
//! exhausting every branch means the puzzle is unsolvable, which is a
//! normal result rather than an error.
//!
//! Each recursive call exclusively owns its working copy of the grid.
//! Cloning on every branch is what keeps sibling branches independent: a
//! failed branch is simply dropped, and backtracking needs no undo log.

use crate::sudoku::grid::CandidateGrid;
use crate::sudoku::propagation;
use crate::sudoku::selection::{FewestCandidates, SquareSelection};
use crate::sudoku::topology::Topology;

/// Counters accumulated over one run of the search or uniqueness engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Squares branched on.
    pub decisions: u64,
    /// Candidate assignments tried across all decisions.
    pub branches: u64,
    /// Branches abandoned because propagation found a contradiction.
    pub contradictions: u64,
}

/// A depth-first solver over candidate grids, generic over the selection
/// policy.
#[derive(Debug, Clone)]
pub struct Search<'t, S = FewestCandidates> {
    topology: &'t Topology,
    selector: S,
    stats: SearchStats,
}

impl<'t> Search<'t> {
    /// A solver with the deterministic fewest-candidates policy.
    #[must_use]
    pub fn new(topology: &'t Topology) -> Self {
        Self::with_selector(topology, FewestCandidates)
    }
}

impl<'t, S: SquareSelection> Search<'t, S> {
    #[must_use]
    pub fn with_selector(topology: &'t Topology, selector: S) -> Self {
        Self {
            topology,
            selector,
            stats: SearchStats::default(),
        }
    }

    /// Counters for the runs performed so far.
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Solves the puzzle given as a clue grid.
    ///
    /// Returns the first solution found, or `None` when the clues are
    /// contradictory or the search space is exhausted without a solution.
    pub fn solve(&mut self, clues: &CandidateGrid) -> Option<CandidateGrid> {
        match propagation::saturate(self.topology, clues) {
            Ok(grid) => self.search(grid),
            Err(_) => {
                self.stats.contradictions += 1;
                None
            }
        }
    }

    fn search(&mut self, grid: CandidateGrid) -> Option<CandidateGrid> {
        if grid.is_complete() {
            return Some(grid);
        }

        let square = self.selector.pick(&grid)?;
        self.stats.decisions += 1;

        for value in self.selector.value_order(grid[square]) {
            self.stats.branches += 1;
            let mut branch = grid.clone();
            match propagation::assign(&mut branch, self.topology, square, value) {
                Ok(()) => {
                    if let Some(solution) = self.search(branch) {
                        return Some(solution);
                    }
                }
                Err(_) => self.stats.contradictions += 1,
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::codec::decode_grid;
    use crate::sudoku::selection::RandomOrder;
    use crate::sudoku::topology::BoardSize;

    const HARD: &str =
        "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......";

    fn assert_solves(topology: &Topology, clues: &CandidateGrid) -> CandidateGrid {
        let mut search = Search::new(topology);
        let solution = search.solve(clues).expect("puzzle should be solvable");
        assert!(solution.is_valid(topology));
        for square in topology.squares() {
            if let Some(clue) = clues.solved_value(square) {
                assert_eq!(solution.solved_value(square), Some(clue));
            }
        }
        solution
    }

    #[test]
    fn test_solve_blank_grid() {
        let topology = Topology::new(BoardSize::Nine);
        assert_solves(&topology, &CandidateGrid::full(BoardSize::Nine));
    }

    #[test]
    fn test_solve_hard_puzzle() {
        let topology = Topology::new(BoardSize::Nine);
        let clues = decode_grid(HARD, &topology).unwrap();
        assert_solves(&topology, &clues);

        let mut search = Search::new(&topology);
        search.solve(&clues);
        assert!(search.stats().decisions > 0);
    }

    #[test]
    fn test_solve_small_board() {
        let topology = Topology::new(BoardSize::Four);
        let clues = decode_grid("1.......2.....3.", &topology).unwrap();
        assert_solves(&topology, &clues);
    }

    #[test]
    fn test_contradictory_clues_are_unsolvable() {
        let topology = Topology::new(BoardSize::Nine);
        let text = format!("55{}", ".".repeat(79));
        let clues = decode_grid(&text, &topology).unwrap();
        let mut search = Search::new(&topology);
        assert_eq!(search.solve(&clues), None);
        assert!(search.stats().contradictions > 0);
    }

    #[test]
    fn test_randomized_policy_finds_valid_grids() {
        let topology = Topology::new(BoardSize::Nine);
        let blank = CandidateGrid::full(BoardSize::Nine);

        let mut a = Search::with_selector(&topology, RandomOrder::with_seed(1));
        let mut b = Search::with_selector(&topology, RandomOrder::with_seed(2));
        let first = a.solve(&blank).unwrap();
        let second = b.solve(&blank).unwrap();
        assert!(first.is_valid(&topology));
        assert!(second.is_valid(&topology));
        assert_ne!(first, second);
    }
}

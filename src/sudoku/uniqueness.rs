//! The uniqueness checker: does a puzzle have exactly one solution?
//!
//! The checker branches exactly like the search engine but does not stop at
//! the first solution: it records it and keeps exploring the remaining
//! branches at every level. The moment a second solution turns up the whole
//! search unwinds, since two is all it takes to disprove uniqueness; no
//! further branch is entered.
//!
//! Solutions reached from different branches of one decision differ in the
//! value of the branched square, and every clue square is fixed across the
//! whole tree, so any two recorded solutions are distinct by construction.

use crate::sudoku::grid::CandidateGrid;
use crate::sudoku::propagation;
use crate::sudoku::search::SearchStats;
use crate::sudoku::selection::{FewestCandidates, SquareSelection};
use crate::sudoku::topology::Topology;

/// The multiplicity of a puzzle's solution set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Uniqueness {
    /// Exactly one solution exists.
    Unique(CandidateGrid),
    /// No assignment satisfies the clues.
    None,
    /// At least two distinct solutions exist.
    Multiple,
}

/// A dual-solution searcher proving or disproving solution uniqueness.
#[derive(Debug, Clone)]
pub struct UniquenessChecker<'t, S = FewestCandidates> {
    topology: &'t Topology,
    selector: S,
    stats: SearchStats,
}

impl<'t> UniquenessChecker<'t> {
    /// A checker with the deterministic fewest-candidates policy, which
    /// branches on a two-candidate square whenever one exists: the split
    /// most likely to expose a second solution early.
    #[must_use]
    pub fn new(topology: &'t Topology) -> Self {
        Self::with_selector(topology, FewestCandidates)
    }
}

impl<'t, S: SquareSelection> UniquenessChecker<'t, S> {
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

    /// Classifies the puzzle given as a clue grid.
    pub fn check(&mut self, clues: &CandidateGrid) -> Uniqueness {
        let mut found = self.first_two(clues);
        match found.len() {
            0 => Uniqueness::None,
            1 => Uniqueness::Unique(found.remove(0)),
            _ => Uniqueness::Multiple,
        }
    }

    /// The first solutions encountered, at most two: an empty vector for an
    /// unsolvable puzzle, one solution for a unique puzzle, and two distinct
    /// solutions as soon as uniqueness is disproved.
    ///
    /// The generator uses the pair of solutions to locate a square
    /// implicated in the ambiguity.
    pub fn first_two(&mut self, clues: &CandidateGrid) -> Vec<CandidateGrid> {
        let mut found = Vec::with_capacity(2);
        match propagation::saturate(self.topology, clues) {
            Ok(grid) => self.explore(grid, &mut found),
            Err(_) => self.stats.contradictions += 1,
        }
        found
    }

    fn explore(&mut self, grid: CandidateGrid, found: &mut Vec<CandidateGrid>) {
        if grid.is_complete() {
            found.push(grid);
            return;
        }

        let Some(square) = self.selector.pick(&grid) else {
            return;
        };
        self.stats.decisions += 1;

        for value in self.selector.value_order(grid[square]) {
            if found.len() >= 2 {
                return;
            }
            self.stats.branches += 1;
            let mut branch = grid.clone();
            match propagation::assign(&mut branch, self.topology, square, value) {
                Ok(()) => self.explore(branch, found),
                Err(_) => self.stats.contradictions += 1,
            }
        }
    }
}

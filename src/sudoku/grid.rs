//! The candidate grid: one candidate set per square.
//!
//! A grid is a plain value. The search and uniqueness engines clone it on
//! every branch so that sibling branches never observe each other's
//! mutations; nothing in the engine ever shares a mutable grid between
//! branches.

use crate::sudoku::candidates::{Candidates, Value};
use crate::sudoku::topology::{BoardSize, Square, Topology};
use core::ops::{Index, IndexMut};

/// A mapping from every square to its remaining candidate values.
///
/// A square is *solved* when its set is a singleton, and the grid is
/// *complete* when every square is solved. A freshly built grid holds the
/// full alphabet everywhere; clue grids mark known squares as singletons and
/// leave the rest full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGrid {
    size: BoardSize,
    cells: Vec<Candidates>,
}

impl Index<Square> for CandidateGrid {
    type Output = Candidates;

    fn index(&self, square: Square) -> &Self::Output {
        &self.cells[square]
    }
}

impl IndexMut<Square> for CandidateGrid {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self.cells[square]
    }
}

impl CandidateGrid {
    /// A grid with the full alphabet in every square.
    #[must_use]
    pub fn full(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![Candidates::full(size.side()); size.square_count()],
        }
    }

    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.size
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The square's value if it is solved.
    #[must_use]
    pub fn solved_value(&self, square: Square) -> Option<Value> {
        self.cells[square].sole()
    }

    #[must_use]
    pub fn is_solved(&self, square: Square) -> bool {
        self.cells[square].is_single()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_single())
    }

    #[must_use]
    pub fn solved_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_single()).count()
    }

    /// Fixes `square` to `value` without propagating.
    pub fn set_clue(&mut self, square: Square, value: Value) {
        self.cells[square] = Candidates::single(value);
    }

    /// Resets `square` to the full alphabet (an unknown square).
    pub fn clear(&mut self, square: Square) {
        self.cells[square] = Candidates::full(self.size.side());
    }

    /// The squares that are not yet solved, in enumeration order.
    pub fn unsolved(&self) -> impl Iterator<Item = Square> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_single())
            .map(|(square, _)| square)
    }

    /// Whether the grid is complete and every unit holds each alphabet value
    /// exactly once.
    ///
    /// The engine never calls this itself (a solution produced by
    /// propagation and search satisfies it by construction); callers such
    /// as the CLI's `--verify` flag and tests use it as an independent
    /// check.
    #[must_use]
    pub fn is_valid(&self, topology: &Topology) -> bool {
        if !self.is_complete() {
            return false;
        }
        let alphabet = Candidates::full(self.size.side());
        topology.units().iter().all(|unit| {
            let mut seen = Candidates::EMPTY;
            for &square in unit {
                if let Some(value) = self.solved_value(square) {
                    seen.insert(value);
                }
            }
            seen == alphabet
        })
    }
}

//! This crate provides a Sudoku solving, uniqueness-checking and puzzle-generation
//! engine built on constraint propagation combined with backtracking search.

/// The `sudoku` module implements the engine: board topology, candidate grids,
/// the propagation rules, the backtracking search, the uniqueness checker and
/// the puzzle generator.
pub mod sudoku;

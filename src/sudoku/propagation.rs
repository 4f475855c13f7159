#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Constraint propagation: `assign`, `eliminate` and clue saturation.
//!
//! Propagation shrinks candidate sets in place and detects contradictions.
//! Two rules drive it, and they are mutually recursive:
//!
//! 1. **Naked single**: when a square is cut down to a single candidate,
//!    that value is eliminated from every peer of the square.
//! 2. **Hidden single**: when a unit has exactly one square left that can
//!    hold a value, that square is assigned the value; when no square can
//!    hold it, the branch is contradicted.
//!
//! One elimination can therefore cascade across the whole grid; the
//! functions return only once no further forced move is reachable from the
//! triggering change. The rules are deliberately incomplete (no pairs,
//! triples or other subset techniques), so some grids propagate to a fixed
//! point that still has unsolved squares, and the search engine branches
//! from there.
//!
//! A contradiction is not an error: the search layers consume it to unwind
//! the current branch, and it never escapes a top-level call.

use crate::sudoku::candidates::Value;
use crate::sudoku::grid::CandidateGrid;
use crate::sudoku::topology::{Square, Topology};

/// The signal that a branch has no remaining legal completion: some square
/// or unit ran out of places for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Contradiction;

/// Constrains `square` to `value` by eliminating every other candidate of
/// the square, cascading through the propagation rules.
///
/// # Errors
///
/// Returns [`Contradiction`] if any elimination empties a square or a unit
/// loses its last place for a value. The grid must then be discarded; it is
/// left in the partially-propagated state in which the contradiction was
/// found.
pub fn assign(
    grid: &mut CandidateGrid,
    topology: &Topology,
    square: Square,
    value: Value,
) -> Result<(), Contradiction> {
    let others = grid[square];
    for other in others.iter() {
        if other != value {
            eliminate(grid, topology, square, other)?;
        }
    }
    Ok(())
}

/// Removes `value` from the candidates of `square`, cascading through the
/// propagation rules. A no-op if the value is already absent.
///
/// # Errors
///
/// Returns [`Contradiction`] if the square's candidate set becomes empty or
/// some unit containing the square no longer has a place for `value`.
pub fn eliminate(
    grid: &mut CandidateGrid,
    topology: &Topology,
    square: Square,
    value: Value,
) -> Result<(), Contradiction> {
    if !grid[square].contains(value) {
        return Ok(());
    }
    grid[square].remove(value);

    let remaining = grid[square];
    if remaining.is_empty() {
        return Err(Contradiction);
    }
    if let Some(forced) = remaining.sole() {
        for &peer in topology.peers_of(square) {
            eliminate(grid, topology, peer, forced)?;
        }
    }

    for &id in topology.units_of(square) {
        let mut places = 0;
        let mut place = None;
        for &candidate in topology.unit(id) {
            if grid[candidate].contains(value) {
                places += 1;
                place = Some(candidate);
                if places > 1 {
                    break;
                }
            }
        }
        match (places, place) {
            (0, _) => return Err(Contradiction),
            (1, Some(only)) => assign(grid, topology, only, value)?,
            _ => {}
        }
    }
    Ok(())
}

/// Builds a fresh full grid and assigns every clue of `clues` into it,
/// propagating to a fixed point.
///
/// Only solved squares of `clues` count as clues; everything else is treated
/// as unconstrained. This is the initial propagation every solve,
/// uniqueness check or generation run starts from.
///
/// # Errors
///
/// Returns [`Contradiction`] if the clues are mutually inconsistent.
pub fn saturate(topology: &Topology, clues: &CandidateGrid) -> Result<CandidateGrid, Contradiction> {
    let mut grid = CandidateGrid::full(topology.size());
    for square in topology.squares() {
        if let Some(value) = clues.solved_value(square) {
            assign(&mut grid, topology, square, value)?;
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::codec::{decode_grid, encode_grid};
    use crate::sudoku::topology::BoardSize;

    const EASY: &str =
        "003020600900305001001806400008102900700000008006708200002609500800203009005010300";
    const EASY_SOLVED: &str =
        "483921657967345821251876493548132976729564138136798245372689514814253769695417382";

    #[test]
    fn test_eliminate_is_idempotent() {
        let topology = Topology::new(BoardSize::Nine);
        let clues = decode_grid(EASY, &topology).unwrap();
        let mut grid = saturate(&topology, &clues).unwrap();

        let before = grid.clone();
        let absent = (0..9).find(|&v| !grid[0].contains(v)).unwrap();
        assert_eq!(eliminate(&mut grid, &topology, 0, absent), Ok(()));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_saturation_solves_easy_grid() {
        let topology = Topology::new(BoardSize::Nine);
        let clues = decode_grid(EASY, &topology).unwrap();
        let grid = saturate(&topology, &clues).unwrap();
        assert!(grid.is_complete());
        assert_eq!(encode_grid(&grid), EASY_SOLVED);
        assert!(grid.is_valid(&topology));
    }

    #[test]
    fn test_duplicate_clue_in_row_contradicts() {
        let topology = Topology::new(BoardSize::Nine);
        let text = format!("55{}", ".".repeat(79));
        let clues = decode_grid(&text, &topology).unwrap();
        assert_eq!(saturate(&topology, &clues), Err(Contradiction));
    }

    #[test]
    fn test_naked_single_cascade() {
        let topology = Topology::new(BoardSize::Four);
        // Three clues in the top row force the fourth square.
        let clues = decode_grid("123.............", &topology).unwrap();
        let grid = saturate(&topology, &clues).unwrap();
        assert_eq!(grid.solved_value(3), Some(3));
    }

    #[test]
    fn test_hidden_single() {
        let topology = Topology::new(BoardSize::Nine);
        // Fours placed so that row 0 retains a single place for a 4, at
        // column 0, without ever reducing that square to one candidate.
        let mut text = vec!['.'; 81];
        for square in [13, 25, 28, 56] {
            text[square] = '4';
        }
        let clues = decode_grid(&text.iter().collect::<String>(), &topology).unwrap();
        let grid = saturate(&topology, &clues).unwrap();
        assert_eq!(grid.solved_value(0), Some(3));
        assert!(grid[0].contains(3));
    }

    #[test]
    fn test_propagation_soundness() {
        // After any successful saturation, no unit holds the same solved
        // value twice.
        let topology = Topology::new(BoardSize::Nine);
        let clues = decode_grid(EASY, &topology).unwrap();
        let grid = saturate(&topology, &clues).unwrap();
        for unit in topology.units() {
            let solved: Vec<_> = unit.iter().filter_map(|&s| grid.solved_value(s)).collect();
            let mut deduped = solved.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(solved.len(), deduped.len());
        }
    }
}

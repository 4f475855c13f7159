#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A codec for the plain-text grid format.
//!
//! A puzzle is written as one character per square in row-major order:
//! `'1'`–`'9'` followed by `'A'`–`'P'` for the alphabet (so a 9×9 board uses
//! `'1'`–`'9'` and a 25×25 board runs up to `'P'`), with `'.'` or `'0'`
//! marking an empty square. Whitespace is ignored, so both a single 81-char
//! line and a 9-line block decode identically.
//!
//! Decoding records clues as singleton candidate sets and leaves every other
//! square holding the full alphabet; it performs no propagation, which is
//! what makes `decode_grid`/`encode_grid` inverses of each other for clue
//! grids and complete solutions alike.

use crate::sudoku::candidates::Value;
use crate::sudoku::grid::CandidateGrid;
use crate::sudoku::topology::Topology;
use itertools::Itertools;
use std::fmt;

/// A malformed textual grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// The text holds the wrong number of squares for the board size.
    TokenCount { expected: usize, found: usize },
    /// A character is neither an empty marker nor an alphabet symbol of the
    /// board.
    Symbol { symbol: char, position: usize },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenCount { expected, found } => {
                write!(f, "expected {expected} squares, found {found}")
            }
            Self::Symbol { symbol, position } => {
                write!(f, "unrecognised symbol '{symbol}' at square {position}")
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// The display symbol for an alphabet value.
#[must_use]
pub const fn symbol_for(value: Value) -> char {
    if value < 9 {
        (b'1' + value) as char
    } else {
        (b'A' + value - 9) as char
    }
}

/// The alphabet value written as `symbol`, if it belongs to an
/// `alphabet`-sized board.
#[must_use]
pub fn value_for(symbol: char, alphabet: usize) -> Option<Value> {
    let value = match symbol {
        '1'..='9' => symbol as u8 - b'1',
        'A'..='P' => symbol as u8 - b'A' + 9,
        _ => return None,
    };
    (usize::from(value) < alphabet).then_some(value)
}

/// Decodes a textual puzzle into a clue grid.
///
/// # Errors
///
/// Returns [`FormatError::TokenCount`] if the non-whitespace character count
/// differs from the board's square count, and [`FormatError::Symbol`] for a
/// character outside the board's alphabet and the empty markers.
pub fn decode_grid(text: &str, topology: &Topology) -> Result<CandidateGrid, FormatError> {
    let size = topology.size();
    let symbols = text.chars().filter(|c| !c.is_whitespace()).collect_vec();

    if symbols.len() != size.square_count() {
        return Err(FormatError::TokenCount {
            expected: size.square_count(),
            found: symbols.len(),
        });
    }

    let mut grid = CandidateGrid::full(size);
    for (square, &symbol) in symbols.iter().enumerate() {
        if symbol == '.' || symbol == '0' {
            continue;
        }
        match value_for(symbol, size.side()) {
            Some(value) => grid.set_clue(square, value),
            None => {
                return Err(FormatError::Symbol {
                    symbol,
                    position: square,
                })
            }
        }
    }
    Ok(grid)
}

/// Encodes a grid as one character per square, rendering every unresolved
/// square as `'.'`.
#[must_use]
pub fn encode_grid(grid: &CandidateGrid) -> String {
    (0..grid.cell_count())
        .map(|square| grid.solved_value(square).map_or('.', symbol_for))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::topology::BoardSize;

    const EASY: &str =
        "003020600900305001001806400008102900700000008006708200002609500800203009005010300";

    #[test]
    fn test_decode_clues() {
        let topology = Topology::new(BoardSize::Nine);
        let grid = decode_grid(EASY, &topology).unwrap();
        // '3' at square 2 is the zero-based value 2.
        assert_eq!(grid.solved_value(2), Some(2));
        assert_eq!(grid.solved_value(0), None);
        assert_eq!(grid.solved_count(), EASY.chars().filter(|&c| c != '0').count());
    }

    #[test]
    fn test_round_trip() {
        let topology = Topology::new(BoardSize::Nine);
        let text: String = EASY.chars().map(|c| if c == '0' { '.' } else { c }).collect();
        let grid = decode_grid(&text, &topology).unwrap();
        assert_eq!(encode_grid(&grid), text);
        assert_eq!(decode_grid(&encode_grid(&grid), &topology).unwrap(), grid);

        // A complete grid round-trips too.
        let solved =
            "483921657967345821251876493548132976729564138136798245372689514814253769695417382";
        let grid = decode_grid(solved, &topology).unwrap();
        assert_eq!(encode_grid(&grid), solved);
        assert_eq!(decode_grid(&encode_grid(&grid), &topology).unwrap(), grid);
    }

    #[test]
    fn test_empty_markers_agree() {
        let topology = Topology::new(BoardSize::Nine);
        let dots: String = EASY.chars().map(|c| if c == '0' { '.' } else { c }).collect();
        assert_eq!(
            decode_grid(EASY, &topology).unwrap(),
            decode_grid(&dots, &topology).unwrap()
        );
    }

    #[test]
    fn test_whitespace_ignored() {
        let topology = Topology::new(BoardSize::Four);
        let grid = decode_grid("12.. \n..3.\n.. 4.\n....", &topology).unwrap();
        assert_eq!(grid.solved_value(0), Some(0));
        assert_eq!(grid.solved_value(6), Some(2));
    }

    #[test]
    fn test_token_count_error() {
        let topology = Topology::new(BoardSize::Nine);
        assert_eq!(
            decode_grid(&EASY[..80], &topology),
            Err(FormatError::TokenCount {
                expected: 81,
                found: 80
            })
        );
    }

    #[test]
    fn test_symbol_error() {
        let topology = Topology::new(BoardSize::Nine);
        let mut text = String::from(EASY);
        text.replace_range(5..6, "X");
        assert_eq!(
            decode_grid(&text, &topology),
            Err(FormatError::Symbol {
                symbol: 'X',
                position: 5
            })
        );

        // 'A' is a valid symbol only on boards wider than nine.
        text.replace_range(5..6, "A");
        assert!(decode_grid(&text, &topology).is_err());
    }

    #[test]
    fn test_wide_alphabet() {
        assert_eq!(value_for('A', 16), Some(9));
        assert_eq!(value_for('G', 16), Some(15));
        assert_eq!(value_for('H', 16), None);
        assert_eq!(symbol_for(15), 'G');
        assert_eq!(symbol_for(24), 'P');
    }
}

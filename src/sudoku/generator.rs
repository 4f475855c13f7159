//! The puzzle generator.
//!
//! Generation runs the other engines in a loop: solve a blank grid with the
//! randomized policy to get a full solution, dig clues out at random until
//! the difficulty's clue target is reached, then prove uniqueness. While
//! the dug puzzle admits a second solution, one clue goes back in at a
//! square where the two found solutions diverge. Every restored clue
//! shrinks the ambiguity, and a fully restored grid is its own unique
//! solution, so the loop always terminates with a verified puzzle.

use crate::sudoku::grid::CandidateGrid;
use crate::sudoku::search::Search;
use crate::sudoku::selection::RandomOrder;
use crate::sudoku::topology::{BoardSize, Square, Topology};
use crate::sudoku::uniqueness::UniquenessChecker;
use std::fmt;
use std::str::FromStr;

/// How sparse a generated puzzle should be: a lower clue target makes a
/// harder puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// The clue count the generator digs down to, scaled by board area.
    ///
    /// For a 9×9 board: 36, 30, 24 and 20 clues respectively. The restore
    /// loop may leave a few more clues than the target when uniqueness
    /// demands it.
    #[must_use]
    pub const fn clue_target(self, size: BoardSize) -> usize {
        let squares = size.square_count();
        match self {
            Self::Easy => squares * 4 / 9,
            Self::Medium => squares * 3 / 8,
            Self::Hard => squares * 3 / 10,
            Self::Expert => squares / 4,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "expert" => Ok(Self::Expert),
            _ => Err(format!("unknown difficulty '{s}'")),
        }
    }
}

/// Produces minimally-specified puzzles with a verified unique solution.
#[derive(Debug, Clone)]
pub struct Generator<'t> {
    topology: &'t Topology,
    rng: fastrand::Rng,
}

impl<'t> Generator<'t> {
    #[must_use]
    pub fn new(topology: &'t Topology) -> Self {
        Self {
            topology,
            rng: fastrand::Rng::new(),
        }
    }

    /// A generator with a fixed seed, producing the same puzzle sequence on
    /// every run.
    #[must_use]
    pub fn with_seed(topology: &'t Topology, seed: u64) -> Self {
        Self {
            topology,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Generates a puzzle as a clue grid: dug squares hold the full
    /// alphabet, the remaining clues are singletons, and the clue set
    /// admits exactly one solution.
    pub fn generate(&mut self, difficulty: Difficulty) -> CandidateGrid {
        let solution = self.solved_grid();
        let target = difficulty.clue_target(self.topology.size());

        let mut clues = solution.clone();
        let mut order: Vec<Square> = self.topology.squares().collect();
        self.rng.shuffle(&mut order);

        let mut blanked: Vec<Square> = Vec::new();
        for &square in &order {
            if clues.solved_count() <= target {
                break;
            }
            clues.clear(square);
            blanked.push(square);
        }

        loop {
            let mut checker = UniquenessChecker::new(self.topology);
            let found = checker.first_two(&clues);
            if found.len() == 1 {
                return clues;
            }
            let square = self.ambiguous_square(&blanked, &found);
            if let Some(value) = solution.solved_value(square) {
                clues.set_clue(square, value);
            }
            blanked.retain(|&s| s != square);
        }
    }

    /// A full random solution, from the randomized search policy over a
    /// blank grid.
    fn solved_grid(&mut self) -> CandidateGrid {
        let blank = CandidateGrid::full(self.topology.size());
        loop {
            let selector = RandomOrder::with_seed(self.rng.u64(..));
            let mut search = Search::with_selector(self.topology, selector);
            if let Some(solution) = search.solve(&blank) {
                return solution;
            }
        }
    }

    /// A blanked square to restore as a clue. When two solutions are in
    /// hand, the restored square is one where they diverge; the solutions
    /// agree on every clue square, so a divergent square is always blanked.
    fn ambiguous_square(&mut self, blanked: &[Square], found: &[CandidateGrid]) -> Square {
        if let [first, second] = found {
            let divergent: Vec<Square> = blanked
                .iter()
                .copied()
                .filter(|&square| first[square] != second[square])
                .collect();
            if !divergent.is_empty() {
                return divergent[self.rng.usize(..divergent.len())];
            }
        }
        blanked[self.rng.usize(..blanked.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::uniqueness::Uniqueness;

    #[test]
    fn test_generated_puzzle_is_unique() {
        let topology = Topology::new(BoardSize::Nine);
        let mut generator = Generator::with_seed(&topology, 7);
        let puzzle = generator.generate(Difficulty::Medium);

        let mut checker = UniquenessChecker::new(&topology);
        match checker.check(&puzzle) {
            Uniqueness::Unique(solution) => {
                assert!(solution.is_valid(&topology));
                for square in topology.squares() {
                    if let Some(clue) = puzzle.solved_value(square) {
                        assert_eq!(solution.solved_value(square), Some(clue));
                    }
                }
            }
            other => panic!("expected a unique puzzle, got {other:?}"),
        }
    }

    #[test]
    fn test_clue_count_reaches_target() {
        let topology = Topology::new(BoardSize::Nine);
        let mut generator = Generator::with_seed(&topology, 11);
        let puzzle = generator.generate(Difficulty::Easy);
        let target = Difficulty::Easy.clue_target(BoardSize::Nine);
        assert!(puzzle.solved_count() >= target);
        assert!(puzzle.solved_count() < 81);
    }

    #[test]
    fn test_generation_is_reproducible() {
        let topology = Topology::new(BoardSize::Nine);
        let first = Generator::with_seed(&topology, 42).generate(Difficulty::Hard);
        let second = Generator::with_seed(&topology, 42).generate(Difficulty::Hard);
        assert_eq!(first, second);
    }

    #[test]
    fn test_small_board_generation() {
        let topology = Topology::new(BoardSize::Four);
        let mut generator = Generator::with_seed(&topology, 3);
        let puzzle = generator.generate(Difficulty::Easy);
        let mut checker = UniquenessChecker::new(&topology);
        assert!(matches!(checker.check(&puzzle), Uniqueness::Unique(_)));
    }

    #[test]
    fn test_clue_targets_scale() {
        assert_eq!(Difficulty::Easy.clue_target(BoardSize::Nine), 36);
        assert_eq!(Difficulty::Medium.clue_target(BoardSize::Nine), 30);
        assert_eq!(Difficulty::Hard.clue_target(BoardSize::Nine), 24);
        assert_eq!(Difficulty::Expert.clue_target(BoardSize::Nine), 20);
        assert!(
            Difficulty::Expert.clue_target(BoardSize::TwentyFive)
                < Difficulty::Easy.clue_target(BoardSize::TwentyFive)
        );
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("easy".parse(), Ok(Difficulty::Easy));
        assert_eq!("EXPERT".parse(), Ok(Difficulty::Expert));
        assert!("impossible".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }
}

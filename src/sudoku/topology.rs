//! Fixed structural facts about a board: squares, units and peers.
//!
//! A unit is a row, a column or a box: a group of n² squares that must
//! jointly contain every alphabet value exactly once. Every square belongs to
//! exactly three units, and its peers are the other squares of those units.
//! The topology is derived once per board size and never mutated afterwards;
//! every engine operation borrows it immutably, so it is safe to share
//! across threads or long-running sessions.

use itertools::Itertools;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// A square of the board, as an index in row-major enumeration order.
pub type Square = usize;

/// The supported board sizes, named by their side length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BoardSize {
    Four = 4,
    Nine = 9,
    Sixteen = 16,
    TwentyFive = 25,
}

impl TryFrom<usize> for BoardSize {
    type Error = ();

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::Four),
            9 => Ok(Self::Nine),
            16 => Ok(Self::Sixteen),
            25 => Ok(Self::TwentyFive),
            _ => Err(()),
        }
    }
}

impl BoardSize {
    /// The box dimension n (the board is n²×n²).
    #[must_use]
    pub const fn box_size(self) -> usize {
        match self {
            Self::Four => 2,
            Self::Nine => 3,
            Self::Sixteen => 4,
            Self::TwentyFive => 5,
        }
    }

    /// The side length n², which is also the alphabet size.
    #[must_use]
    pub const fn side(self) -> usize {
        self as usize
    }

    /// The number of squares, n⁴.
    #[must_use]
    pub const fn square_count(self) -> usize {
        self.side() * self.side()
    }

    /// The size whose box dimension is `n`, for n in `[2, 5]`.
    #[must_use]
    pub const fn from_box_size(n: usize) -> Option<Self> {
        match n {
            2 => Some(Self::Four),
            3 => Some(Self::Nine),
            4 => Some(Self::Sixteen),
            5 => Some(Self::TwentyFive),
            _ => None,
        }
    }
}

/// The unit and peer structure of a board of a given size.
///
/// Units are ordered rows first, then columns, then boxes; each unit lists
/// its squares in enumeration order. Peer lists are sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    size: BoardSize,
    units: Vec<Vec<Square>>,
    units_of: Vec<[usize; 3]>,
    peers_of: Vec<SmallVec<[Square; 20]>>,
}

impl Topology {
    #[must_use]
    pub fn new(size: BoardSize) -> Self {
        let side = size.side();
        let n = size.box_size();

        let mut units: Vec<Vec<Square>> = Vec::with_capacity(3 * side);
        for row in 0..side {
            units.push((0..side).map(|col| row * side + col).collect());
        }
        for col in 0..side {
            units.push((0..side).map(|row| row * side + col).collect());
        }
        for (band, stack) in (0..side).step_by(n).cartesian_product((0..side).step_by(n)) {
            let mut cells = Vec::with_capacity(side);
            for row in band..band + n {
                for col in stack..stack + n {
                    cells.push(row * side + col);
                }
            }
            units.push(cells);
        }

        let mut units_of = vec![[0; 3]; size.square_count()];
        let mut filled = vec![0; size.square_count()];
        for (id, unit) in units.iter().enumerate() {
            for &square in unit {
                units_of[square][filled[square]] = id;
                filled[square] += 1;
            }
        }

        let peers_of = (0..size.square_count())
            .map(|square| {
                let mut set = FxHashSet::default();
                for &id in &units_of[square] {
                    set.extend(units[id].iter().copied());
                }
                set.remove(&square);
                let mut peers: SmallVec<[Square; 20]> = set.into_iter().collect();
                peers.sort_unstable();
                peers
            })
            .collect();

        Self {
            size,
            units,
            units_of,
            peers_of,
        }
    }

    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.size
    }

    /// All squares, in enumeration order.
    pub fn squares(&self) -> std::ops::Range<Square> {
        0..self.size.square_count()
    }

    #[must_use]
    pub fn units(&self) -> &[Vec<Square>] {
        &self.units
    }

    #[must_use]
    pub fn unit(&self, id: usize) -> &[Square] {
        &self.units[id]
    }

    /// The ids of the three units containing `square`.
    #[must_use]
    pub fn units_of(&self, square: Square) -> &[usize; 3] {
        &self.units_of[square]
    }

    /// Every square sharing a unit with `square`, excluding `square` itself.
    #[must_use]
    pub fn peers_of(&self, square: Square) -> &[Square] {
        &self.peers_of[square]
    }

    #[must_use]
    pub const fn square_at(&self, row: usize, col: usize) -> Square {
        row * self.size.side() + col
    }

    /// The `(row, col)` coordinates of `square`.
    #[must_use]
    pub const fn coords(&self, square: Square) -> (usize, usize) {
        (square / self.size.side(), square % self.size.side())
    }
}

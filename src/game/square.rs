//! Board cells addressed by (row, col), as the board is displayed.
//!
//! Row 0 is the far rank (rank 8, black's home rank) and column 0 is the
//! a-file, so `Cell { row: 6, col: 4 }` is e2.
use thiserror::Error;

/// Number of rows (and columns) of the board.
pub const BOARD_SIZE: u8 = 8;

const FILES: &[u8; 8] = b"abcdefgh";
const RANKS: &[u8; 8] = b"87654321";

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum CellParseError {
    #[error("Expected a file and a rank, got {0} characters")]
    BadLength(usize),
    #[error("Unknown file: {0}")]
    UnknownFile(char),
    #[error("Unknown rank: {0}")]
    UnknownRank(char),
}

/// A cell of the board.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    row: u8,
    col: u8,
}
impl Cell {
    /// A cell from a row and column.
    ///
    /// Fails if either index is more than 7.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// A cell from signed coordinates, as obtained from pointer geometry.
    #[inline]
    pub fn from_signed(row: i64, col: i64) -> Option<Self> {
        let row = u8::try_from(row).ok()?;
        let col = u8::try_from(col).ok()?;
        Self::new(row, col)
    }

    #[inline(always)]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline(always)]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// File letter, 'a' for column 0.
    #[inline]
    pub const fn file_char(self) -> char {
        FILES[self.col as usize] as char
    }

    /// Rank digit, '8' for row 0.
    #[inline]
    pub const fn rank_char(self) -> char {
        RANKS[self.row as usize] as char
    }

    /// Zero-based rank index as used by the rules engine (rank 1 is 0, at row 7).
    #[inline]
    pub const fn rank_index(self) -> u8 {
        BOARD_SIZE - 1 - self.row
    }

    /// Builds a cell back from an engine file index and rank index.
    #[inline]
    pub const fn from_file_rank(file: u8, rank: u8) -> Option<Self> {
        if rank < BOARD_SIZE {
            Self::new(BOARD_SIZE - 1 - rank, file)
        } else {
            None
        }
    }

    /// Iterator over every cell, row by row from the top-left corner.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Self { row, col }))
    }
}
impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}
impl std::str::FromStr for Cell {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        let [file, rank] = chars[..] else {
            return Err(CellParseError::BadLength(chars.len()));
        };
        let col = FILES
            .iter()
            .position(|&f| f as char == file.to_ascii_lowercase())
            .ok_or(CellParseError::UnknownFile(file))?;
        let row = RANKS
            .iter()
            .position(|&r| r as char == rank)
            .ok_or(CellParseError::UnknownRank(rank))?;
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn row_zero_is_rank_eight() {
        let a8 = Cell::new(0, 0).unwrap();
        assert_eq!(a8.to_string(), "a8");
        let e2 = Cell::new(6, 4).unwrap();
        assert_eq!(e2.to_string(), "e2");
        assert_eq!(e2.rank_index(), 1);
        assert_eq!(Cell::from_file_rank(4, 1), Some(e2));
    }

    #[test]
    fn out_of_bounds() {
        assert_eq!(Cell::new(8, 0), None);
        assert_eq!(Cell::new(0, 8), None);
        assert_eq!(Cell::from_signed(-1, 3), None);
        assert_eq!(Cell::from_signed(3, 300), None);
    }

    #[test]
    fn parse_cells() {
        assert_eq!("h1".parse(), Ok(Cell::new(7, 7).unwrap()));
        assert_eq!("E4".parse(), Ok(Cell::new(4, 4).unwrap()));
        assert_eq!("i1".parse::<Cell>(), Err(CellParseError::UnknownFile('i')));
        assert_eq!("a9".parse::<Cell>(), Err(CellParseError::UnknownRank('9')));
        assert_eq!("e".parse::<Cell>(), Err(CellParseError::BadLength(1)));
    }

    #[test]
    fn iterates_all_cells() {
        assert_eq!(Cell::iter().count(), 64);
        assert_eq!(Cell::iter().next(), Cell::new(0, 0));
        assert_eq!(Cell::iter().last(), Cell::new(7, 7));
    }
}

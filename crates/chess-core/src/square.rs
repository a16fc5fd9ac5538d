//! Board square representation.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// A square on the chess board.
///
/// Rows run from 0 (rank 1) to 7 (rank 8) and columns from 0 (file a) to
/// 7 (file h). Squares order by row, then column, which is the scan order
/// used throughout the engine.
///
/// Deserialization rejects coordinates outside the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square, or `None` when either coordinate is off the board.
    #[inline]
    pub const fn new(row: i8, col: i8) -> Option<Self> {
        if row >= 0 && row < 8 && col >= 0 && col < 8 {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Creates a square from index (0-63), a1 = 0 and h8 = 63.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square {
                row: index / 8,
                col: index % 8,
            })
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Square::new((rank - b'1') as i8, (file - b'a') as i8)
    }

    /// Iterates over all 64 squares in scan order (a1, b1, ..., h8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(|i| Square {
            row: i / 8,
            col: i % 8,
        })
    }

    /// Returns the row (0 = rank 1).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0 = file a).
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.row * 8 + self.col
    }

    /// Returns the square shifted by the given deltas, if still on the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Square::new(self.row as i8 + d_row, self.col as i8 + d_col)
    }

    /// Returns the file letter ('a'-'h').
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    /// Returns the rank digit ('1'-'8').
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'1' + self.row) as char
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RawSquare {
            row: u8,
            col: u8,
        }

        let raw = RawSquare::deserialize(deserializer)?;
        if raw.row < 8 && raw.col < 8 {
            Ok(Square {
                row: raw.row,
                col: raw.col,
            })
        } else {
            Err(de::Error::custom(format!(
                "square out of range: row {}, col {}",
                raw.row, raw.col
            )))
        }
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_new() {
        let e4 = Square::new(3, 4).unwrap();
        assert_eq!(e4.row(), 3);
        assert_eq!(e4.col(), 4);
        assert_eq!(e4.index(), 28);
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::new(0, -1), None);
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Square::new(0, 0));
        assert_eq!(Square::from_algebraic("e4"), Square::new(3, 4));
        assert_eq!(Square::from_algebraic("H8"), Square::new(7, 7));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn square_to_algebraic() {
        assert_eq!(Square::new(0, 0).unwrap().to_algebraic(), "a1");
        assert_eq!(Square::new(7, 7).unwrap().to_algebraic(), "h8");
        assert_eq!(Square::new(3, 4).unwrap().to_string(), "e4");
    }

    #[test]
    fn offset_stays_on_board() {
        let a1 = Square::new(0, 0).unwrap();
        assert_eq!(a1.offset(1, 2), Square::new(1, 2));
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, 8), None);
    }

    #[test]
    fn scan_order() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0].to_algebraic(), "a1");
        assert_eq!(squares[8].to_algebraic(), "a2");
        assert!(squares.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Square::from_index(63), Square::new(7, 7));
        assert_eq!(Square::from_index(64), None);
    }

    #[test]
    fn serde_rejects_off_board_coordinates() {
        let e4 = Square::new(3, 4).unwrap();
        let json = serde_json::to_string(&e4).unwrap();
        assert_eq!(json, r#"{"row":3,"col":4}"#);
        assert_eq!(serde_json::from_str::<Square>(&json).unwrap(), e4);

        assert!(serde_json::from_str::<Square>(r#"{"row":9,"col":4}"#).is_err());
        assert!(serde_json::from_str::<Square>(r#"{"row":0,"col":8}"#).is_err());
        assert!(serde_json::from_str::<Square>(r#"{"row":-1,"col":0}"#).is_err());
    }
}

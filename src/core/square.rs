use std::fmt;
use std::str::FromStr;

use crate::core::coord::Coord;

/// Number of files and ranks.
pub const BOARD_SIZE: i32 = 8;

/// A square that is known to lie on the board.
///
/// `x` is the file (0 = a), `y` is the rank counted from White's side (0 = White's back rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    x: u8,
    y: u8,
}

impl Square {
    /// `None` if `(x, y)` is off the board.
    pub fn new(x: i32, y: i32) -> Option<Square> {
        if (0..BOARD_SIZE).contains(&x) && (0..BOARD_SIZE).contains(&y) {
            Some(Square {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    pub fn from_coord(c: Coord) -> Option<Square> {
        Square::new(c.x, c.y)
    }

    #[inline]
    pub fn x(self) -> i32 {
        self.x as i32
    }

    #[inline]
    pub fn y(self) -> i32 {
        self.y as i32
    }

    #[inline]
    pub fn coord(self) -> Coord {
        Coord::new(self.x(), self.y())
    }

    #[inline]
    pub fn offset(self, delta: Coord) -> Option<Square> {
        Square::from_coord(self.coord() + delta)
    }

    /// All 64 squares, file by file (a1, a2, ..., h8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|x| (0..BOARD_SIZE).map(move |y| Square { x: x as u8, y: y as u8 }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.x) as char, self.y + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSquareError(pub String);

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid square '{}': expected a file a-h and a rank 1-8", self.0)
    }
}

impl std::error::Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    /// Algebraic notation, e.g. `e2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSquareError(s.to_string());
        let mut chars = s.trim().chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(err());
        };
        let file = file.to_ascii_lowercase();
        if !file.is_ascii_lowercase() {
            return Err(err());
        }
        let x = file as i32 - 'a' as i32;
        let y = rank.to_digit(10).ok_or_else(err)? as i32 - 1;
        Square::new(x, y).ok_or_else(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_off_board_coordinates() {
        assert!(Square::new(0, 0).is_some());
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, -1).is_none());
    }

    #[test]
    fn parses_algebraic_names() {
        let sq: Square = "e2".parse().unwrap();
        assert_eq!((sq.x(), sq.y()), (4, 1));
        assert_eq!(sq.to_string(), "e2");
        assert_eq!("H8".parse::<Square>().unwrap(), Square::new(7, 7).unwrap());
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a10".parse::<Square>().is_err());
        assert!("".parse::<Square>().is_err());
    }

    #[test]
    fn all_visits_every_square_once() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::new(0, 0).unwrap());
        assert_eq!(squares[1], Square::new(0, 1).unwrap());
        assert_eq!(squares[63], Square::new(7, 7).unwrap());
    }
}

use std::fmt;

use crate::chess::layout::standard_setup;
use crate::chess::piece::{Piece, PieceKind, Team};
use crate::core::square::Square;

/// The 8x8 grid, indexed `[x][y]`.
///
/// Pure data: every piece on the board is owned by exactly one square, and nothing here fires
/// notifications. The game controller layers events on top.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A board holding the opening position.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (piece, sq) in standard_setup() {
            board.set(sq, Some(piece));
        }
        board
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<&Piece> {
        self.squares[sq.x() as usize][sq.y() as usize].as_ref()
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.get(sq).is_some()
    }

    /// Overwrite a square, returning whatever was there.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[sq.x() as usize][sq.y() as usize], piece)
    }

    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.set(sq, None)
    }

    pub fn clear(&mut self) {
        self.squares = Default::default();
    }

    /// Occupied squares, file by file.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    pub fn count(&self) -> usize {
        self.pieces().count()
    }

    /// First king of `team` found scanning file by file.
    pub fn find_king(&self, team: Team) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.kind() == PieceKind::King && p.team() == team)
            .map(|(sq, _)| sq)
    }
}

impl fmt::Display for Board {
    /// Text diagram with rank 8 at the top; empty squares are `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..8).rev() {
            write!(f, "{} ", y + 1)?;
            for x in 0..8 {
                let c = Square::new(x, y)
                    .and_then(|sq| self.get(sq))
                    .map(|p| p.symbol())
                    .unwrap_or('.');
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

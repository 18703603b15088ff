use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    White,
    Black,
}

impl Team {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    /// Rank direction pawns of this team advance in.
    #[inline]
    pub fn forward(self) -> i32 {
        match self {
            Team::White => 1,
            Team::Black => -1,
        }
    }

    /// The rank a pawn of this team promotes on.
    #[inline]
    pub fn far_rank(self) -> i32 {
        match self {
            Team::White => 7,
            Team::Black => 0,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::White => write!(f, "White"),
            Team::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds whose first move is remembered (pawn double step, and the castling
    /// rights this engine does not implement).
    #[inline]
    pub fn tracks_first_move(self) -> bool {
        matches!(self, PieceKind::Pawn | PieceKind::Rook | PieceKind::King)
    }

    /// Kinds a pawn may be promoted to.
    #[inline]
    pub fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    pub fn letter(self) -> char {
        use PieceKind::*;
        match self {
            Pawn => 'P',
            Knight => 'N',
            Bishop => 'B',
            Rook => 'R',
            Queen => 'Q',
            King => 'K',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        use PieceKind::*;
        match c.to_ascii_uppercase() {
            'P' => Some(Pawn),
            'N' => Some(Knight),
            'B' => Some(Bishop),
            'R' => Some(Rook),
            'Q' => Some(Queen),
            'K' => Some(King),
            _ => None,
        }
    }
}

/// A piece on (or about to be put on) the board.
///
/// `team` and `kind` never change; `has_moved` flips once, on the piece's first committed move,
/// and only for the kinds in [`PieceKind::tracks_first_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    team: Team,
    kind: PieceKind,
    has_moved: bool,
}

impl Piece {
    pub fn new(team: Team, kind: PieceKind) -> Self {
        Self {
            team,
            kind,
            has_moved: false,
        }
    }

    /// Rebuild a piece from persisted state. The flag is dropped for kinds that do not track it.
    pub fn with_moved(team: Team, kind: PieceKind, has_moved: bool) -> Self {
        Self {
            team,
            kind,
            has_moved: has_moved && kind.tracks_first_move(),
        }
    }

    #[inline]
    pub fn team(&self) -> Team {
        self.team
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Hook run right before a committed move places this piece on its destination.
    pub fn on_moved(&mut self) {
        if self.kind.tracks_first_move() {
            self.has_moved = true;
        }
    }

    /// Hook run when this piece is captured. Returns `true` if the capture ends the game.
    pub fn on_destroyed(&self) -> bool {
        self.kind == PieceKind::King
    }

    /// Upper case for White, lower case for Black.
    pub fn symbol(&self) -> char {
        let c = self.kind.letter();
        match self.team {
            Team::White => c,
            Team::Black => c.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.team, self.kind)
    }
}

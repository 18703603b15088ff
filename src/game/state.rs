use crate::chess::board::Board;
use crate::chess::piece::Team;

/// Everything needed to resume a game: the position and the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub current_team: Team,
}

impl GameState {
    pub fn new(board: Board, current_team: Team) -> Self {
        Self {
            board,
            current_team,
        }
    }

    /// Opening position, White to move.
    pub fn standard() -> Self {
        Self::new(Board::standard(), Team::White)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Board::empty(), Team::White)
    }
}

use thiserror::Error;
use tracing::debug;

use crate::chess::board::Board;
use crate::chess::layout::standard_setup;
use crate::chess::piece::{Piece, Team};
use crate::core::square::Square;
use crate::rules::attacks::is_in_check;
use crate::rules::movement::can_move;

use super::events::{BoardEvent, GameObserver, ObserverId, Observers};
use super::state::GameState;

/// Why a move was refused. The board is untouched whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("square is off the board")]
    OutOfBounds,
    #[error("cannot capture a piece of your own team")]
    SelfCapture,
    #[error("no piece on the starting square")]
    EmptySource,
    #[error("that piece belongs to the other team")]
    WrongTeam,
    #[error("that piece cannot move there")]
    PieceRule,
    #[error("move would leave your king in check")]
    LeavesKingInCheck,
    #[error("the game is over")]
    GameOver,
    #[error("a pawn promotion must be chosen first")]
    PromotionPending,
}

/// What a committed move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// The mover as it now stands on `to`.
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    /// Set when the move captured a king.
    pub winner: Option<Team>,
}

/// Tentatively applied move. Dropping it puts both squares back exactly as they were.
struct Trial<'a> {
    board: &'a mut Board,
    from: Square,
    to: Square,
    moved: Option<Piece>,
    displaced: Option<Piece>,
}

impl<'a> Trial<'a> {
    fn apply(board: &'a mut Board, from: Square, to: Square) -> Self {
        let moved = board.take(from);
        let displaced = board.set(to, moved);
        Self {
            board,
            from,
            to,
            moved,
            displaced,
        }
    }

    fn board(&self) -> &Board {
        &*self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        self.board.set(self.to, self.displaced.take());
        self.board.set(self.from, self.moved.take());
    }
}

/// The authoritative game: board, side to move, and the observers watching it.
///
/// All mutation goes through here so that every change to the board is announced.
#[derive(Debug, Default)]
pub struct Game {
    state: GameState,
    winner: Option<Team>,
    observers: Observers,
}

impl Game {
    /// An empty board with White to move. Call [`Game::start_new_game`] for the opening position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a saved state without firing anything.
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            winner: None,
            observers: Observers::default(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    #[inline]
    pub fn current_team(&self) -> Team {
        self.state.current_team
    }

    /// Hand the move to `team`. Used by the promotion workflow to hold the turn.
    pub fn set_current_team(&mut self, team: Team) {
        self.state.current_team = team;
    }

    /// The team that captured the other's king, if that has happened.
    #[inline]
    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    /// Piece at `(x, y)`; `None` for empty or off-board squares.
    pub fn get_piece(&self, x: i32, y: i32) -> Option<&Piece> {
        Square::new(x, y).and_then(|sq| self.state.board.get(sq))
    }

    /// Whether `team`'s king is attacked right now; `None` if it has no king.
    pub fn is_in_check(&self, team: Team) -> Option<bool> {
        is_in_check(&self.state.board, team)
    }

    /// Clear the board and set up the opening position, White to move.
    pub fn start_new_game(&mut self) {
        self.state.current_team = Team::White;
        self.winner = None;
        self.clear_board();
        for (piece, sq) in standard_setup() {
            self.place_piece(piece, sq);
        }
        debug!("new game set up");
    }

    /// Replace the whole position and announce it with a single [`BoardEvent::Loaded`].
    pub fn load_state(&mut self, state: GameState) {
        self.state = state;
        self.winner = None;
        self.observers.notify(&BoardEvent::Loaded);
    }

    /// Empty every square, announced as one [`BoardEvent::Cleared`].
    pub fn clear_board(&mut self) {
        self.state.board.clear();
        self.observers.notify(&BoardEvent::Cleared);
    }

    /// Put `piece` on `sq`, capturing whatever stood there.
    ///
    /// Fires a removal for the captured piece, runs its destroyed hook (a captured king ends the
    /// game), then fires the placement. Returns the captured piece.
    pub fn place_piece(&mut self, piece: Piece, sq: Square) -> Option<Piece> {
        let captured = self.destroy_piece(sq);
        self.state.board.set(sq, Some(piece));
        self.observers.notify(&BoardEvent::Placed { piece, square: sq });
        captured
    }

    /// Clear `sq`, firing a removal if something was there. Never runs the destroyed hook.
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        let removed = self.state.board.take(sq);
        if let Some(piece) = removed {
            self.observers.notify(&BoardEvent::Removed { piece, square: sq });
        }
        removed
    }

    fn destroy_piece(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.state.board.take(sq)?;
        self.observers.notify(&BoardEvent::Removed { piece, square: sq });
        if piece.on_destroyed() {
            let winner = piece.team().other();
            debug!(loser = %piece.team(), %winner, square = %sq, "king captured");
            self.winner = Some(winner);
            self.observers.notify(&BoardEvent::KingCaptured {
                team: piece.team(),
                square: sq,
            });
        }
        Some(piece)
    }

    /// `true` iff the move was made. See [`Game::try_move`].
    pub fn try_move_piece(&mut self, from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> bool {
        self.try_move_xy(from_x, from_y, to_x, to_y).is_ok()
    }

    /// Coordinate form of [`Game::try_move`].
    pub fn try_move_xy(
        &mut self,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
    ) -> Result<MoveReport, IllegalMove> {
        match (Square::new(from_x, from_y), Square::new(to_x, to_y)) {
            (Some(from), Some(to)) => self.try_move(from, to),
            _ => Err(IllegalMove::OutOfBounds),
        }
    }

    /// Move the piece on `from` to `to` for the side to move.
    ///
    /// On success the turn passes to the other side. On failure nothing changed.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<MoveReport, IllegalMove> {
        let result = self.check_and_commit(from, to);
        if let Err(reason) = result {
            debug!(%from, %to, %reason, "move rejected");
        }
        result
    }

    fn check_and_commit(&mut self, from: Square, to: Square) -> Result<MoveReport, IllegalMove> {
        if self.winner.is_some() {
            return Err(IllegalMove::GameOver);
        }
        let team = self.state.current_team;

        if self.state.board.get(to).is_some_and(|p| p.team() == team) {
            return Err(IllegalMove::SelfCapture);
        }
        let mut piece = *self.state.board.get(from).ok_or(IllegalMove::EmptySource)?;
        if piece.team() != team {
            return Err(IllegalMove::WrongTeam);
        }
        if !can_move(&piece, &self.state.board, from, to) {
            return Err(IllegalMove::PieceRule);
        }

        let exposes_king = {
            let trial = Trial::apply(&mut self.state.board, from, to);
            is_in_check(trial.board(), team)
                .unwrap_or_else(|| panic!("{team} king missing from the board"))
        };
        if exposes_king {
            return Err(IllegalMove::LeavesKingInCheck);
        }

        piece.on_moved();
        let captured = self.place_piece(piece, to);
        self.remove_piece(from);
        self.state.current_team = team.other();

        debug!(%piece, %from, %to, captured = captured.is_some(), "move committed");
        Ok(MoveReport {
            piece,
            from,
            to,
            captured,
            winner: self.winner,
        })
    }
}

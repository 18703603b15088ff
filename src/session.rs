//! The "current game": a [`Game`] bound to a save name, with the promotion workflow attached.

use thiserror::Error;
use tracing::info;

use crate::chess::piece::{Piece, PieceKind, Team};
use crate::core::square::Square;
use crate::game::{Game, IllegalMove, MoveReport};
use crate::promotion::{PendingPromotion, Promotion, PromotionError};
use crate::save::{validate_name, SaveError, SaveStore};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error(transparent)]
    Promotion(#[from] PromotionError),
    #[error("a game named '{0}' already exists")]
    NameTaken(String),
    #[error("cannot save while a pawn promotion is pending")]
    PromotionPending,
    #[error("the game is over")]
    Finished,
}

#[derive(Debug)]
pub struct Session {
    name: String,
    store: SaveStore,
    game: Game,
    promotion: Promotion,
    /// Winner declared by [`Session::end_game`].
    declared_winner: Option<Team>,
}

impl Session {
    /// Resume the game saved as `name`, or start a fresh one if there is no such save.
    ///
    /// A save that exists but cannot be read is an error; nothing is replaced in that case and
    /// the caller should fall back to its menu.
    pub fn open(store: SaveStore, name: &str) -> Result<Self, SessionError> {
        let mut session = Self::blank(store, name)?;
        match session.store.load(name)? {
            Some(state) => session.game.load_state(state),
            None => session.game.start_new_game(),
        }
        info!(game = name, "session opened");
        Ok(session)
    }

    /// Start a new game under a name that is not in use yet.
    pub fn create(store: SaveStore, name: &str) -> Result<Self, SessionError> {
        validate_name(name)?;
        if store.exists(name) {
            return Err(SessionError::NameTaken(name.to_string()));
        }
        let mut session = Self::blank(store, name)?;
        session.game.start_new_game();
        info!(game = name, "session created");
        Ok(session)
    }

    fn blank(store: SaveStore, name: &str) -> Result<Self, SessionError> {
        validate_name(name)?;
        let mut game = Game::new();
        let promotion = Promotion::attach(&mut game);
        Ok(Self {
            name: name.to_string(),
            store,
            game,
            promotion,
            declared_winner: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Direct access for collaborators that subscribe observers or place pieces themselves.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.promotion.pending()
    }

    /// The winner, by king capture or by [`Session::end_game`].
    pub fn winner(&self) -> Option<Team> {
        self.declared_winner.or(self.game.winner())
    }

    pub fn is_finished(&self) -> bool {
        self.winner().is_some()
    }

    /// Play a move. A pawn reaching its far rank keeps the turn with the mover until
    /// [`Session::promote`] is called.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<MoveReport, IllegalMove> {
        if self.declared_winner.is_some() {
            return Err(IllegalMove::GameOver);
        }
        if self.promotion.pending().is_some() {
            return Err(IllegalMove::PromotionPending);
        }

        let report = self.game.try_move(from, to)?;
        if report.winner.is_some() {
            self.promotion.cancel();
        } else {
            self.promotion.hold_turn(&mut self.game);
        }
        Ok(report)
    }

    pub fn promote(&mut self, kind: PieceKind) -> Result<Piece, SessionError> {
        Ok(self.promotion.promote(&mut self.game, kind)?)
    }

    pub fn save(&self) -> Result<(), SessionError> {
        if self.promotion.pending().is_some() {
            return Err(SessionError::PromotionPending);
        }
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        self.store.save(&self.name, self.game.state())?;
        Ok(())
    }

    /// Throw the current position away and set up a new game under the same name.
    pub fn restart(&mut self) {
        self.declared_winner = None;
        self.promotion.cancel();
        self.game.start_new_game();
        info!(game = %self.name, "game restarted");
    }

    /// End the game: the side not to move wins, and the save file is deleted.
    pub fn end_game(&mut self) -> Result<Team, SessionError> {
        let winner = self.game.current_team().other();
        self.promotion.cancel();
        self.game.set_current_team(winner);
        self.declared_winner = Some(winner);
        self.store.delete(&self.name)?;
        info!(game = %self.name, %winner, "game ended");
        Ok(winner)
    }
}

//! Pawn promotion, built on top of the controller's public surface.
//!
//! The controller has no promotion state of its own. A [`PromotionWatcher`] listens for pawns
//! landing on their far rank; the owner then holds the turn for the mover until a replacement
//! kind is chosen, places the new piece over the pawn and only then passes the turn on.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::chess::piece::{Piece, PieceKind, Team};
use crate::core::square::Square;
use crate::game::{BoardEvent, Game, GameObserver, ObserverId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub square: Square,
    pub team: Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PromotionError {
    #[error("no pawn is waiting to be promoted")]
    NothingPending,
    #[error("a pawn cannot be promoted to a {0:?}")]
    InvalidKind(PieceKind),
}

/// Observer that notices pawns reaching their far rank.
#[derive(Debug, Default)]
pub struct PromotionWatcher {
    pending: Option<PendingPromotion>,
}

impl PromotionWatcher {
    pub fn pending(&self) -> Option<PendingPromotion> {
        self.pending
    }
}

impl GameObserver for PromotionWatcher {
    fn on_event(&mut self, event: &BoardEvent) {
        match *event {
            BoardEvent::Placed { piece, square }
                if piece.kind() == PieceKind::Pawn && square.y() == piece.team().far_rank() =>
            {
                self.pending = Some(PendingPromotion {
                    square,
                    team: piece.team(),
                });
            }
            BoardEvent::Cleared | BoardEvent::Loaded => self.pending = None,
            _ => {}
        }
    }
}

/// A watcher subscribed to a particular [`Game`].
#[derive(Debug)]
pub struct Promotion {
    watcher: Rc<RefCell<PromotionWatcher>>,
    id: ObserverId,
}

impl Promotion {
    pub fn attach(game: &mut Game) -> Self {
        let watcher = Rc::new(RefCell::new(PromotionWatcher::default()));
        let id = game.subscribe(Box::new(Rc::clone(&watcher)));
        Self { watcher, id }
    }

    pub fn detach(self, game: &mut Game) {
        game.unsubscribe(self.id);
    }

    pub fn pending(&self) -> Option<PendingPromotion> {
        self.watcher.borrow().pending()
    }

    /// Drop any pending promotion without acting on it.
    pub fn cancel(&self) {
        self.watcher.borrow_mut().pending = None;
    }

    /// Called after a committed move. If the move put a pawn on its far rank, hand the turn back
    /// to the mover so nobody else can play until [`Promotion::promote`] is called.
    pub fn hold_turn(&self, game: &mut Game) -> Option<PendingPromotion> {
        let pending = self.pending()?;
        game.set_current_team(pending.team);
        debug!(square = %pending.square, team = %pending.team, "promotion pending");
        Some(pending)
    }

    /// Replace the waiting pawn with a new `kind` piece and end the mover's turn.
    pub fn promote(&self, game: &mut Game, kind: PieceKind) -> Result<Piece, PromotionError> {
        let pending = self.pending().ok_or(PromotionError::NothingPending)?;
        if !kind.is_promotion_target() {
            return Err(PromotionError::InvalidKind(kind));
        }

        let piece = Piece::new(pending.team, kind);
        game.place_piece(piece, pending.square);
        self.cancel();
        game.set_current_team(pending.team.other());
        debug!(square = %pending.square, %piece, "pawn promoted");
        Ok(piece)
    }
}

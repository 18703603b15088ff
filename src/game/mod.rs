//! The game controller: turn order, the self-check rule, and board notifications.

pub mod controller;
pub mod events;
pub mod state;

pub use controller::{Game, IllegalMove, MoveReport};
pub use events::{BoardEvent, EventLog, GameObserver, ObserverId};
pub use state::GameState;

//! A two-player chess rules engine: board state, per-piece move legality, the self-check rule,
//! turn order, board notifications for a UI layer, and named save games.
//!
//! Not implemented: checkmate/stalemate detection, castling, en passant and draw rules.

pub mod chess;
pub mod config;
pub mod core;
pub mod game;
pub mod logging;
pub mod promotion;
pub mod rules;
pub mod save;
pub mod session;

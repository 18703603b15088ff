//! Chess data model: pieces, the board, and the opening layout.

pub mod board;
pub mod layout;
pub mod piece;

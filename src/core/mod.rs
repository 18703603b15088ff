//! Low-level board geometry.
//!
//! - [`coord`]: signed offsets used for move deltas and ray walking.
//! - [`square`]: a coordinate known to be on the 8x8 board, with algebraic parsing/printing.

pub mod coord;
pub mod square;

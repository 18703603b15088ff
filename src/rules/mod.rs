//! Move legality: per-kind movement predicates and check detection.

pub mod attacks;
pub mod movement;

//! Position evaluation for Hex

pub mod distance;
pub mod heuristic;

pub use distance::{connection_distance, unreachable_distance};
pub use heuristic::evaluate;

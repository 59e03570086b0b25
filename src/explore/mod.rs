//! Tree-walking helpers for drivers.
//!
//! These only traverse the legal-move graph; choosing good moves is left to
//! the caller.
//!
//! - `perft`: count every line of play to a fixed depth
//! - `random_playout`: play uniformly random legal moves to the end

mod perft;
mod playout;

pub use perft::{perft, PerftStats};
pub use playout::{random_playout, Playout};

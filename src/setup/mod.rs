//! Opening positions.
//!
//! - `GameRng`: deterministic, forkable ChaCha8 stream
//! - `GameSetup`: builder that deals a seeded starting position

mod builder;
mod rng;

pub use builder::{GameSetup, SUPPORTED_KINDS};
pub use rng::{GameRng, GameRngState};

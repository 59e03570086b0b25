//! Rule engine.
//!
//! - `generate`: legal effects for a position, per phase and per kind
//! - `apply`: the position an effect leads to
//! - `result`: final standings
//!
//! Both entry points are pure functions of a `Snapshot`. Only generation is
//! public: transitions are reached through [`Action::next_state`], so every
//! applied effect is one the position actually offers.
//!
//! ```compile_fail
//! use oriflamme::rules::apply;
//! ```
//!
//! [`Action::next_state`]: crate::core::Action::next_state

mod apply;
mod generate;
mod result;

pub(crate) use apply::apply;
pub use generate::{legal_effects, Effects};
pub use result::GameResult;

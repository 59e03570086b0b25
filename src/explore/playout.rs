//! Uniformly random play to the end of the game.

use tracing::debug;

use crate::core::{Effect, GameState, Result};
use crate::setup::GameRng;

/// A finished (or capped) random line of play.
#[derive(Clone, Debug)]
pub struct Playout {
    /// Last state reached.
    pub state: GameState,
    /// Effects chosen, in order.
    pub effects: Vec<Effect>,
}

impl Playout {
    #[must_use]
    pub fn steps(&self) -> usize {
        self.effects.len()
    }

    /// Check whether the playout reached the end of the game.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.is_finished()
    }
}

/// Pick legal actions uniformly at random until END or `max_steps`.
pub fn random_playout(start: &GameState, rng: &mut GameRng, max_steps: usize) -> Result<Playout> {
    let mut state = start.clone();
    let mut effects = Vec::new();

    while !state.is_finished() && effects.len() < max_steps {
        let next = {
            let actions = state.actions()?;
            let Some(action) = rng.choose(actions) else {
                break;
            };
            effects.push(*action.effect());
            action.next_state()?.clone()
        };
        state = next;
    }

    debug!(steps = effects.len(), finished = state.is_finished(), "playout done");
    Ok(Playout { state, effects })
}

//! Exhaustive move-tree counting.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EffectKind, GameState, Result};

/// Counts gathered by [`perft`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerftStats {
    /// Nodes reached at each ply; entry 0 is the root.
    pub nodes_per_ply: Vec<u64>,

    /// Finished games met along the way.
    pub terminal: u64,

    /// Edges traversed, by effect.
    pub effects: FxHashMap<EffectKind, u64>,
}

impl PerftStats {
    /// Nodes at the deepest ply explored.
    #[must_use]
    pub fn leaves(&self) -> u64 {
        self.nodes_per_ply.last().copied().unwrap_or(0)
    }

    /// Edges traversed for one effect.
    #[must_use]
    pub fn count(&self, effect: EffectKind) -> u64 {
        self.effects.get(&effect).copied().unwrap_or(0)
    }
}

/// Walk every line of play `depth` plies deep from `root`.
///
/// Visited states keep their children cached, so memory grows with the tree
/// for as long as `root` is alive.
pub fn perft(root: &GameState, depth: usize) -> Result<PerftStats> {
    let mut stats = PerftStats {
        nodes_per_ply: vec![0; depth + 1],
        ..PerftStats::default()
    };
    walk(root, 0, depth, &mut stats)?;
    Ok(stats)
}

fn walk(state: &GameState, ply: usize, depth: usize, stats: &mut PerftStats) -> Result<()> {
    stats.nodes_per_ply[ply] += 1;
    if state.is_finished() {
        stats.terminal += 1;
        return Ok(());
    }
    if ply == depth {
        return Ok(());
    }
    for action in state.actions()? {
        *stats.effects.entry(action.effect().kind()).or_insert(0) += 1;
        walk(action.next_state()?, ply + 1, depth, stats)?;
    }
    Ok(())
}

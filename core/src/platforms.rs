use serde::{Deserialize, Serialize};

use crate::constants::STANDING_TOLERANCE;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlatformState {
    pub key: String,
    pub def: Platform,
    pub active: bool,
    /// Countdown in ms; only meaningful once `triggered`.
    pub remaining_ms: f64,
    pub triggered: bool,
}

/// Tracks which platforms still exist. Platforms with a vanish timer start
/// counting down the first time the player stands on them.
#[derive(Clone, Debug, Default)]
pub struct PlatformSystem {
    states: Vec<PlatformState>,
}

impl PlatformSystem {
    pub fn new(stage: &Stage) -> Self {
        let mut system = PlatformSystem::default();
        system.reset(stage);
        system
    }

    pub fn reset(&mut self, stage: &Stage) {
        self.states = stage
            .platforms
            .iter()
            .enumerate()
            .map(|(index, def)| PlatformState {
                key: def
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("{}-platform-{}", stage.id, index)),
                def: def.clone(),
                active: true,
                remaining_ms: def.vanish_on_stand_ms.unwrap_or(0.0),
                triggered: false,
            })
            .collect();
    }

    pub fn update(&mut self, dt: f64, player: &Player) {
        let dt_ms = dt * 1000.0;
        for state in &mut self.states {
            if !state.active {
                continue;
            }
            let Some(vanish_ms) = state.def.vanish_on_stand_ms else {
                continue;
            };
            if !state.triggered && is_standing(player, &state.def) {
                state.triggered = true;
                state.remaining_ms = vanish_ms;
            }
            if state.triggered {
                state.remaining_ms -= dt_ms;
                if state.remaining_ms <= 0.0 {
                    tracing::debug!(key = %state.key, "platform vanished");
                    state.active = false;
                }
            }
        }
    }

    /// Platforms physics and hazards should collide with this tick.
    pub fn active_platforms(&self) -> Vec<Platform> {
        self.states
            .iter()
            .filter(|s| s.active)
            .map(|s| s.def.clone())
            .collect()
    }

    pub fn states(&self) -> &[PlatformState] {
        &self.states
    }
}

/// Feet on the top surface, not rising, and overlapping horizontally.
fn is_standing(player: &Player, platform: &Platform) -> bool {
    let on_top = (player.bottom() - platform.y).abs() <= STANDING_TOLERANCE && player.vy >= 0.0;
    let overlaps_x = player.right() > platform.x && player.x < platform.x + platform.width;
    on_top && overlaps_x
}

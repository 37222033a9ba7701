use serde::{Deserialize, Serialize};

use crate::types::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyState {
    pub id: String,
    /// Ms accumulated toward the next shot.
    pub timer_ms: f64,
    pub facing: Facing,
}

/// Turret enemies: face the player every tick and fire on a fixed cadence.
#[derive(Clone, Debug, Default)]
pub struct EnemySystem {
    states: Vec<EnemyState>,
}

impl EnemySystem {
    pub fn new(stage: &Stage) -> Self {
        let mut system = EnemySystem::default();
        system.reset(stage);
        system
    }

    /// Timers start full so every enemy fires on the first tick.
    pub fn reset(&mut self, stage: &Stage) {
        self.states = stage
            .enemies
            .iter()
            .map(|enemy| EnemyState {
                id: enemy.id.clone(),
                timer_ms: enemy.shoot_interval_ms,
                facing: enemy.facing,
            })
            .collect();
    }

    /// Re-aim and advance fire timers. `on_shoot` runs once per shot, so a
    /// long tick can fire several times.
    pub fn update<F>(&mut self, dt: f64, stage: &Stage, player: &Player, mut on_shoot: F)
    where
        F: FnMut(&Enemy, Facing),
    {
        let dt_ms = dt * 1000.0;
        for (enemy, state) in stage.enemies.iter().zip(self.states.iter_mut()) {
            state.facing = if player.x < enemy.x {
                Facing::Left
            } else {
                Facing::Right
            };

            state.timer_ms += dt_ms;
            // A non-positive interval would never drain the timer.
            if enemy.shoot_interval_ms <= 0.0 {
                continue;
            }
            while state.timer_ms >= enemy.shoot_interval_ms {
                tracing::trace!(id = %enemy.id, facing = ?state.facing, "enemy fired");
                on_shoot(enemy, state.facing);
                state.timer_ms -= enemy.shoot_interval_ms;
            }
        }
    }

    pub fn states(&self) -> &[EnemyState] {
        &self.states
    }
}

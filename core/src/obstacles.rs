use crate::types::*;

/// Falling-spike hazards: idle until the player enters the trigger zone, then
/// fall until they hit the player, land on a platform, or reach the ground.
#[derive(Clone, Debug, Default)]
pub struct ObstacleSystem {
    obstacles: Vec<ObstacleState>,
}

impl ObstacleSystem {
    pub fn new(stage: &Stage) -> Self {
        let mut system = ObstacleSystem::default();
        system.reset(stage);
        system
    }

    pub fn reset(&mut self, stage: &Stage) {
        self.obstacles = stage
            .obstacles
            .iter()
            .map(|spike| ObstacleState {
                spike: spike.clone(),
                phase: HazardPhase::Idle,
            })
            .collect();
    }

    /// Advance every hazard. Returns true if any falling hazard touches the
    /// player this tick.
    pub fn update(
        &mut self,
        dt: f64,
        player: &Player,
        stage: &Stage,
        platforms: &[Platform],
    ) -> bool {
        let player_rect = player.rect();
        let mut hit = false;

        for obstacle in &mut self.obstacles {
            match obstacle.phase {
                HazardPhase::Gone => continue,
                HazardPhase::Idle => {
                    if !player_rect.intersects(&obstacle.spike.trigger) {
                        continue;
                    }
                    tracing::debug!(id = %obstacle.spike.id, "hazard triggered");
                    obstacle.phase = HazardPhase::Falling;
                }
                HazardPhase::Falling => {}
            }

            obstacle.spike.y += obstacle.spike.fall_speed * dt;
            if player_rect.intersects(&obstacle.rect()) {
                hit = true;
                continue;
            }
            if lands_on_platform(&obstacle.rect(), platforms) {
                tracing::debug!(id = %obstacle.spike.id, "hazard landed on a platform");
                obstacle.phase = HazardPhase::Gone;
                continue;
            }
            if obstacle.spike.y >= stage.ground_y - obstacle.spike.height {
                tracing::debug!(id = %obstacle.spike.id, "hazard reached the ground");
                obstacle.phase = HazardPhase::Gone;
            }
        }

        hit
    }

    /// All hazards, including ones that are gone.
    pub fn obstacles(&self) -> &[ObstacleState] {
        &self.obstacles
    }

    /// Hazards that still render and collide.
    pub fn live_obstacles(&self) -> impl Iterator<Item = &ObstacleState> {
        self.obstacles.iter().filter(|o| o.phase != HazardPhase::Gone)
    }
}

/// Spike's bottom edge has reached a platform top it spans horizontally.
fn lands_on_platform(spike: &Rect, platforms: &[Platform]) -> bool {
    platforms.iter().any(|platform| {
        let within_x = spike.right() > platform.x && spike.x < platform.x + platform.width;
        within_x && spike.bottom() >= platform.y && spike.y <= platform.y
    })
}

use crate::animation::{AnimationSystem, Sample};
use crate::enemies::EnemySystem;
use crate::obstacles::ObstacleSystem;
use crate::physics::PhysicsSystem;
use crate::platforms::PlatformSystem;
use crate::projectiles::BulletSystem;
use crate::types::*;

/// One play-through of a stage with a fixed move selection.
///
/// Owns every runtime system and advances them together, one tick per
/// `step` call. `reset` rewinds to the spawn point with the same moves.
#[derive(Clone, Debug)]
pub struct Attempt {
    stage: Stage,
    config: SimConfig,
    player: Player,
    visuals: VisualState,
    animation: AnimationSystem,
    physics: PhysicsSystem,
    obstacles: ObstacleSystem,
    platforms: PlatformSystem,
    enemies: EnemySystem,
    bullets: BulletSystem,
    status: AttemptStatus,
    time_ms: f64,
    ticks: u32,
    direction: Facing,
    last_reverse_ms: Option<f64>,
    pending_ms: f64,
}

impl Attempt {
    pub fn new(stage: Stage, clips: Vec<Clip>, config: SimConfig) -> Self {
        let player = Player::new(stage.player_start);
        Attempt {
            visuals: VisualState::merged(&player.base_color, &VisualPartial::default()),
            player,
            animation: AnimationSystem::new(clips),
            physics: PhysicsSystem::new(config.gravity),
            obstacles: ObstacleSystem::new(&stage),
            platforms: PlatformSystem::new(&stage),
            enemies: EnemySystem::new(&stage),
            bullets: BulletSystem::new(),
            status: AttemptStatus::Playing,
            time_ms: 0.0,
            ticks: 0,
            direction: Facing::Right,
            last_reverse_ms: None,
            pending_ms: 0.0,
            stage,
            config,
        }
    }

    /// Back to the spawn point with every system rebuilt from the stage.
    pub fn reset(&mut self) {
        self.player.reset(self.stage.player_start);
        self.visuals = VisualState::merged(&self.player.base_color, &VisualPartial::default());
        self.animation.reset();
        self.obstacles.reset(&self.stage);
        self.platforms.reset(&self.stage);
        self.enemies.reset(&self.stage);
        self.bullets.reset();
        self.status = AttemptStatus::Playing;
        self.time_ms = 0.0;
        self.ticks = 0;
        self.direction = Facing::Right;
        self.last_reverse_ms = None;
        self.pending_ms = 0.0;
    }

    /// Advance the attempt by `dt` seconds.
    ///
    /// Sub-step order:
    ///  1. Pending failure grace countdown (nothing else moves)
    ///  2. Advance timeline and sample effects
    ///  3. Travel direction and horizontal velocity
    ///  4. Physics (crush ⇒ pending)
    ///  5. Platform lifecycle
    ///  6. Goal line
    ///  7. Falling hazards
    ///  8. Enemies and bullets (hit ⇒ pending)
    ///  9. Out of bounds
    pub fn step(&mut self, dt: f64) -> AttemptStatus {
        // 1. Grace period after a crush or hit
        match self.status {
            AttemptStatus::Playing => {}
            AttemptStatus::CrushPending | AttemptStatus::HitPending => {
                self.ticks += 1;
                self.pending_ms += dt * 1000.0;
                if self.pending_ms >= self.config.failure_grace_ms {
                    let cause = if self.status == AttemptStatus::CrushPending {
                        FailureCause::Crushed
                    } else {
                        FailureCause::Shot
                    };
                    self.fail(cause);
                }
                return self.status;
            }
            AttemptStatus::Cleared | AttemptStatus::GameOver(_) => return self.status,
        }
        self.ticks += 1;

        // 2. Timeline
        self.time_ms += dt * 1000.0;
        let Sample {
            visuals,
            mut effects,
        } = self.animation.sample(self.time_ms);
        self.visuals = VisualState::merged(&self.player.base_color, &visuals);
        self.player.dash_shape = flag(effects.dash_shape);
        self.player.is_defending = flag(effects.is_defending);

        // 3. Direction
        self.apply_direction(&mut effects);

        // 4. Physics
        let active = self.platforms.active_platforms();
        let crushed = self
            .physics
            .update(dt, &mut self.player, &effects, &self.stage, &active);
        if crushed {
            tracing::debug!(time_ms = self.time_ms, "player crushed");
            self.begin_pending(AttemptStatus::CrushPending);
            return self.status;
        }

        // 5. Platforms
        self.platforms.update(dt, &self.player);

        // 6. Goal
        if self.touches_goal() {
            tracing::info!(stage = %self.stage.id, time_ms = self.time_ms, "stage cleared");
            self.status = AttemptStatus::Cleared;
            return self.status;
        }

        // 7. Hazards
        let active = self.platforms.active_platforms();
        if self
            .obstacles
            .update(dt, &self.player, &self.stage, &active)
        {
            self.fail(FailureCause::Hazard);
            return self.status;
        }

        // 8. Enemies and bullets
        let bullets = &mut self.bullets;
        self.enemies
            .update(dt, &self.stage, &self.player, |enemy, facing| {
                bullets.spawn_bullet(enemy, facing)
            });
        if self.bullets.update(dt, &self.player, &self.stage) {
            self.begin_pending(AttemptStatus::HitPending);
            return self.status;
        }

        // 9. Out of bounds
        if self.out_of_bounds() {
            self.fail(FailureCause::FellOut);
        }
        self.status
    }

    /// Reverse impulses flip travel direction (debounced); every horizontal
    /// velocity ends up pointing the current way.
    fn apply_direction(&mut self, effects: &mut EffectState) {
        let base_speed = self.config.base_move_speed;
        let reverse_triggered = effects.direction_flip.is_some();
        let window = self.config.reverse_debounce_ms;
        let debounced = self
            .last_reverse_ms
            .is_some_and(|last| self.time_ms - last <= window);

        if reverse_triggered && !debounced {
            self.direction = self.direction.flipped();
            self.last_reverse_ms = Some(self.time_ms);
            tracing::trace!(direction = ?self.direction, "direction reversed");
            // Rising turns into falling on a flip.
            if self.player.vy < 0.0 {
                self.player.vy = self.player.vy.abs();
            }
            effects.velocity_override.x = Some(base_speed * self.direction.sign());
        }

        match effects.velocity_override.x {
            Some(vx) if !reverse_triggered && vx != 0.0 => {
                effects.velocity_override.x = Some(vx.abs() * self.direction.sign());
            }
            Some(_) => {}
            None => {
                effects.velocity_override.x = Some(base_speed * self.direction.sign());
            }
        }
    }

    fn touches_goal(&self) -> bool {
        let goal = &self.stage.goal;
        self.player.x <= goal.x
            && self.player.right() >= goal.x
            && self.player.bottom() >= goal.y
            && self.player.y <= goal.y + goal.height
    }

    fn out_of_bounds(&self) -> bool {
        let p = &self.player;
        p.x > self.stage.size.width + p.width
            || p.right() < 0.0
            || p.y > self.stage.size.height + self.config.fall_out_margin
    }

    fn begin_pending(&mut self, status: AttemptStatus) {
        self.status = status;
        self.pending_ms = 0.0;
        self.player.dead_eyes = true;
    }

    fn fail(&mut self, cause: FailureCause) {
        tracing::info!(stage = %self.stage.id, ?cause, time_ms = self.time_ms, "attempt failed");
        self.status = AttemptStatus::GameOver(cause);
    }

    pub fn status(&self) -> AttemptStatus {
        self.status
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn visuals(&self) -> &VisualState {
        &self.visuals
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Timeline time; stops advancing once the attempt leaves `Playing`.
    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn direction(&self) -> Facing {
        self.direction
    }

    pub fn animation(&self) -> &AnimationSystem {
        &self.animation
    }

    pub fn obstacles(&self) -> &ObstacleSystem {
        &self.obstacles
    }

    pub fn platforms(&self) -> &PlatformSystem {
        &self.platforms
    }

    pub fn bullets(&self) -> &[Bullet] {
        self.bullets.bullets()
    }
}

fn flag(value: Option<f64>) -> bool {
    value.is_some_and(|v| v != 0.0)
}

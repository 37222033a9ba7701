use crate::constants::*;
use crate::types::*;

/// Integrates the player and resolves it against platforms and the ground.
///
/// The only writer of player position, velocity and height.
#[derive(Clone, Copy, Debug)]
pub struct PhysicsSystem {
    pub gravity: f64,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        PhysicsSystem { gravity: GRAVITY }
    }
}

impl PhysicsSystem {
    pub fn new(gravity: f64) -> Self {
        PhysicsSystem { gravity }
    }

    /// Advance the player by `dt` seconds. Returns true when a height increase
    /// had no room (crushed); the height change is applied either way.
    pub fn update(
        &self,
        dt: f64,
        player: &mut Player,
        effects: &EffectState,
        stage: &Stage,
        platforms: &[Platform],
    ) -> bool {
        let desired_height = effects.height_override.unwrap_or(player.base_height);
        let mut crushed = false;
        if desired_height > player.height {
            let gap = vertical_gap(player, stage, platforms);
            if gap < MIN_CLEARANCE || gap < desired_height {
                tracing::debug!(gap, desired_height, "no room to stand up");
                crushed = true;
            }
        }
        if desired_height != player.height {
            // Feet stay put; the box grows or shrinks from the bottom.
            player.y += player.height - desired_height;
            player.height = desired_height;
        }

        let previous_x = player.x;
        let previous_y = player.y;

        if let Some(x) = effects.position_override.x {
            player.x = x;
        }
        if let Some(y) = effects.position_override.y {
            player.y = y;
        }
        if let Some(vx) = effects.velocity_override.x {
            player.vx = vx;
        }
        if let Some(vy) = effects.velocity_override.y {
            player.vy = vy;
        }

        let gravity_scale = effects.gravity_scale.unwrap_or(1.0);
        player.vy += self.gravity * gravity_scale * dt;
        player.x += player.vx * dt;
        player.y += player.vy * dt;

        resolve_platforms(previous_x, previous_y, player, platforms);
        resolve_ground(previous_y, player, stage);
        crushed
    }
}

/// Push the player out of every overlapping platform.
///
/// The axis with the smaller penetration decides whether this is a floor /
/// ceiling hit or a wall hit; the previous position decides which side.
fn resolve_platforms(
    previous_x: f64,
    previous_y: f64,
    player: &mut Player,
    platforms: &[Platform],
) {
    let previous_left = previous_x;
    let previous_right = previous_x + player.width;
    let previous_top = previous_y;
    let previous_bottom = previous_y + player.height;

    for platform in platforms {
        let plat = platform.rect();
        if !player.rect().intersects(&plat) {
            continue;
        }

        let overlap_left = player.right() - plat.x;
        let overlap_right = plat.right() - player.x;
        let overlap_top = player.bottom() - plat.y;
        let overlap_bottom = plat.bottom() - player.y;

        let min_x = overlap_left.min(overlap_right);
        let min_y = overlap_top.min(overlap_bottom);

        if min_y <= min_x {
            if previous_bottom <= plat.y {
                player.y = plat.y - player.height;
                player.vy = 0.0;
            } else if previous_top >= plat.bottom() {
                player.y = plat.bottom();
                if player.vy < 0.0 {
                    player.vy = 0.0;
                }
            }
        } else if previous_right <= plat.x {
            player.x = plat.x - player.width;
            if player.vx > 0.0 {
                player.vx = 0.0;
            }
        } else if previous_left >= plat.right() {
            player.x = plat.right();
            if player.vx < 0.0 {
                player.vx = 0.0;
            }
        }
    }
}

/// True when the player's whole horizontal extent is over a pit.
pub fn over_hole(player: &Player, stage: &Stage) -> bool {
    stage
        .holes
        .iter()
        .any(|hole| player.x >= hole.x && player.right() <= hole.right())
}

fn resolve_ground(previous_y: f64, player: &mut Player, stage: &Stage) {
    let floor = stage.ground_y - player.height;
    if !over_hole(player, stage) && player.y > floor && previous_y <= floor {
        player.y = floor;
        if player.vy > 0.0 {
            player.vy = 0.0;
        }
    }
}

/// Free vertical span around the player: nearest floor below the feet minus
/// nearest ceiling above the head, among platforms sharing its x-extent.
fn vertical_gap(player: &Player, stage: &Stage, platforms: &[Platform]) -> f64 {
    let mut floor_y = stage.ground_y;
    let mut ceiling_y: f64 = 0.0;

    for platform in platforms {
        let overlaps_x = player.right() > platform.x && player.x < platform.x + platform.width;
        if !overlaps_x {
            continue;
        }
        if platform.y >= player.bottom() {
            floor_y = floor_y.min(platform.y);
        }
        let platform_bottom = platform.y + platform.height;
        if platform_bottom <= player.y {
            ceiling_y = ceiling_y.max(platform_bottom);
        }
    }

    floor_y - ceiling_y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_stage(holes: Vec<Hole>) -> Stage {
        Stage {
            id: "test".into(),
            name: "Test".into(),
            size: StageSize {
                width: 800.0,
                height: 450.0,
            },
            ground_y: 400.0,
            holes,
            max_selection_count: 3,
            animation_choices: Vec::new(),
            new_animation_ids: Vec::new(),
            player_start: Vec2 { x: 0.0, y: 360.0 },
            goal: GoalLine {
                x: 700.0,
                y: 300.0,
                height: 100.0,
            },
            platforms: Vec::new(),
            obstacles: Vec::new(),
            enemies: Vec::new(),
        }
    }

    fn player_at(x: f64, y: f64) -> Player {
        Player::new(Vec2 { x, y })
    }

    #[test]
    fn gravity_integrates_velocity_then_position() {
        let physics = PhysicsSystem::new(1000.0);
        let stage = flat_stage(Vec::new());
        let mut p = player_at(100.0, 100.0);
        p.vx = 50.0;
        physics.update(0.5, &mut p, &EffectState::default(), &stage, &[]);
        assert_eq!(p.vy, 500.0);
        assert_eq!(p.x, 125.0);
        assert_eq!(p.y, 350.0);
    }

    #[test]
    fn gravity_scale_zero_holds_altitude() {
        let physics = PhysicsSystem::default();
        let stage = flat_stage(Vec::new());
        let mut p = player_at(100.0, 100.0);
        let effects = EffectState {
            gravity_scale: Some(0.0),
            velocity_override: AxisOverride {
                x: Some(360.0),
                y: Some(0.0),
            },
            ..EffectState::default()
        };
        physics.update(0.1, &mut p, &effects, &stage, &[]);
        assert_eq!(p.y, 100.0);
        assert_eq!(p.x, 136.0);
    }

    #[test]
    fn position_override_teleports_before_integration() {
        let physics = PhysicsSystem::new(0.0);
        let stage = flat_stage(Vec::new());
        let mut p = player_at(10.0, 10.0);
        let effects = EffectState {
            position_override: AxisOverride {
                x: Some(200.0),
                y: None,
            },
            velocity_override: AxisOverride {
                x: Some(10.0),
                y: None,
            },
            ..EffectState::default()
        };
        physics.update(1.0, &mut p, &effects, &stage, &[]);
        assert_eq!(p.x, 210.0);
        assert_eq!(p.y, 10.0);
    }

    #[test]
    fn falling_player_snaps_onto_platform_top() {
        let physics = PhysicsSystem::default();
        let stage = flat_stage(Vec::new());
        let platforms = vec![Platform::solid(0.0, 300.0, 200.0, 20.0)];
        let mut p = player_at(50.0, 255.0); // feet at 295, above the top
        p.vy = 300.0;
        physics.update(0.1, &mut p, &EffectState::default(), &stage, &platforms);
        assert_eq!(p.y, 300.0 - p.height);
        assert_eq!(p.vy, 0.0);
    }

    #[test]
    fn rising_player_bumps_ceiling() {
        let physics = PhysicsSystem::default();
        let stage = flat_stage(Vec::new());
        let platforms = vec![Platform::solid(0.0, 200.0, 200.0, 20.0)];
        let mut p = player_at(50.0, 225.0); // head just below the bottom at 220
        p.vy = -400.0;
        physics.update(0.05, &mut p, &EffectState::default(), &stage, &platforms);
        assert_eq!(p.y, 220.0);
        assert_eq!(p.vy, 0.0);
    }

    #[test]
    fn wall_stops_horizontal_travel() {
        let physics = PhysicsSystem::new(0.0);
        let stage = flat_stage(Vec::new());
        let platforms = vec![Platform::solid(100.0, 200.0, 20.0, 200.0)];
        let mut p = player_at(70.0, 300.0); // right edge at 98
        p.vx = 100.0;
        physics.update(0.05, &mut p, &EffectState::default(), &stage, &platforms);
        assert_eq!(p.x, 100.0 - p.width);
        assert_eq!(p.vx, 0.0);
    }

    #[test]
    fn ground_catches_player_outside_holes() {
        let physics = PhysicsSystem::default();
        let stage = flat_stage(vec![Hole {
            x: 100.0,
            width: 100.0,
        }]);
        // Straddling the left edge of the hole.
        let mut p = player_at(90.0, 355.0);
        p.vy = 200.0;
        physics.update(0.1, &mut p, &EffectState::default(), &stage, &[]);
        assert_eq!(p.y, 360.0);
        assert_eq!(p.vy, 0.0);
    }

    #[test]
    fn player_inside_hole_falls_through_ground() {
        let physics = PhysicsSystem::default();
        let stage = flat_stage(vec![Hole {
            x: 100.0,
            width: 100.0,
        }]);
        let mut p = player_at(120.0, 355.0);
        p.vy = 200.0;
        for _ in 0..5 {
            physics.update(0.1, &mut p, &EffectState::default(), &stage, &[]);
        }
        assert!(p.bottom() > stage.ground_y);
        assert!(p.vy > 0.0);
    }

    #[test]
    fn crouch_shrinks_from_the_feet() {
        let physics = PhysicsSystem::new(0.0);
        let stage = flat_stage(Vec::new());
        let mut p = player_at(50.0, 360.0);
        let effects = EffectState {
            height_override: Some(CROUCH_HEIGHT),
            ..EffectState::default()
        };
        let crushed = physics.update(0.016, &mut p, &effects, &stage, &[]);
        assert!(!crushed);
        assert_eq!(p.height, CROUCH_HEIGHT);
        assert_eq!(p.bottom(), 400.0);
    }

    /// Crouched player resting on the ground with a ceiling `clearance` above
    /// its head, so the free span is `CROUCH_HEIGHT + clearance`.
    fn crouched_under(clearance: f64) -> (Player, Stage, Vec<Platform>) {
        let stage = flat_stage(Vec::new());
        let head_y = stage.ground_y - CROUCH_HEIGHT;
        let ceiling_bottom = head_y - clearance;
        let platforms = vec![Platform::solid(0.0, ceiling_bottom - 20.0, 200.0, 20.0)];
        let mut p = player_at(50.0, head_y);
        p.height = CROUCH_HEIGHT;
        p.base_height = PLAYER_HEIGHT;
        (p, stage, platforms)
    }

    fn stand_up(p: &mut Player, stage: &Stage, platforms: &[Platform]) -> bool {
        PhysicsSystem::default().update(0.016, p, &EffectState::default(), stage, platforms)
    }

    #[test]
    fn standing_up_with_15_above_the_head_crushes() {
        // 18 + 15 = 33, short of the 40 needed to stand.
        let (mut p, stage, platforms) = crouched_under(15.0);
        assert_eq!(vertical_gap(&p, &stage, &platforms), 33.0);
        assert!(stand_up(&mut p, &stage, &platforms));
        // The height change is still applied.
        assert_eq!(p.height, PLAYER_HEIGHT);
    }

    #[test]
    fn standing_up_with_25_above_the_head_does_not_crush() {
        // 18 + 25 = 43 leaves room for the full 40.
        let (mut p, stage, platforms) = crouched_under(25.0);
        assert_eq!(vertical_gap(&p, &stage, &platforms), 43.0);
        assert!(!stand_up(&mut p, &stage, &platforms));
        assert_eq!(p.height, PLAYER_HEIGHT);
        assert_eq!(p.bottom(), 400.0);
    }

    #[test]
    fn span_under_minimum_clearance_crushes_short_players() {
        let (mut p, stage, platforms) = crouched_under(2.0);
        p.base_height = 19.0;
        // 20 would fit a 19-unit player but is under the 21 minimum.
        assert_eq!(vertical_gap(&p, &stage, &platforms), 20.0);
        assert!(stand_up(&mut p, &stage, &platforms));
    }

    #[test]
    fn open_sky_does_not_crush() {
        let stage = flat_stage(Vec::new());
        let mut p = player_at(50.0, 382.0);
        p.height = CROUCH_HEIGHT;
        assert!(!stand_up(&mut p, &stage, &[]));
        assert_eq!(p.height, PLAYER_HEIGHT);
    }

    #[test]
    fn gap_ignores_platforms_beside_the_player() {
        let stage = flat_stage(Vec::new());
        let p = player_at(50.0, 390.0);
        let platforms = vec![Platform::solid(300.0, 370.0, 50.0, 20.0)];
        assert_eq!(vertical_gap(&p, &stage, &platforms), 400.0);
    }
}

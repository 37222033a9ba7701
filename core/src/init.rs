use crate::clips::{build_animation_clips, BuildOptions};
use crate::error::CoreResult;
use crate::stages::stages;
use crate::step::Attempt;
use crate::types::*;

/// Default tuning: 1500 px/s² gravity, 110 px/s walk, 1 s failure grace.
pub fn default_config() -> SimConfig {
    SimConfig::default()
}

/// Build the clips for `move_ids` and start a fresh attempt on `stage`.
pub fn create_attempt<S: AsRef<str>>(
    stage: Stage,
    move_ids: &[S],
    start_delay_override_ms: Option<f64>,
    config: SimConfig,
) -> CoreResult<Attempt> {
    let options = BuildOptions {
        start_delay_override_ms,
        gravity: config.gravity,
    };
    let clips = build_animation_clips(move_ids, &options)?;
    tracing::debug!(
        stage = %stage.id,
        moves = move_ids.len(),
        clips = clips.len(),
        "attempt created"
    );
    Ok(Attempt::new(stage, clips, config))
}

/// Stage shown before the player picks one.
pub fn first_stage() -> Option<Stage> {
    stages().into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn attempt_starts_at_spawn() {
        let stage = first_stage().unwrap();
        let attempt = create_attempt(stage.clone(), &["jump"], None, default_config()).unwrap();
        assert_eq!(attempt.status(), AttemptStatus::Playing);
        assert_eq!(attempt.time_ms(), 0.0);
        assert_eq!(attempt.player().x, stage.player_start.x);
        assert_eq!(attempt.player().y, stage.player_start.y);
        assert_eq!(attempt.animation().clips().len(), 1);
    }

    #[test]
    fn unknown_move_fails_creation() {
        let stage = first_stage().unwrap();
        let err = create_attempt(stage, &["moonwalk"], None, default_config()).unwrap_err();
        assert_eq!(err, CoreError::UnknownMove("moonwalk".into()));
    }

    #[test]
    fn config_gravity_reaches_the_builder() {
        let stage = first_stage().unwrap();
        let config = SimConfig {
            gravity: 1000.0,
            ..default_config()
        };
        let attempt = create_attempt(stage, &["jump"], None, config).unwrap();
        let vy = attempt.animation().clips()[0].effects[0].keyframes[0].value;
        assert_eq!(vy, -1000.0 * 0.35);
    }

    #[test]
    fn default_config_matches_constants() {
        let config = default_config();
        assert_eq!(config.gravity, crate::constants::GRAVITY);
        assert_eq!(config.base_move_speed, 110.0);
        assert_eq!(config.failure_grace_ms, 1000.0);
    }
}

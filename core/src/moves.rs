use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// What a move does to the player while its clip is live.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MoveEffect {
    /// Ballistic hop whose apex lands near half the move duration.
    Jump { power: f64 },
    DoubleJump,
    Stop,
    MoveRight { speed: f64 },
    Reverse,
    Crouch,
    GrowShrink,
    Defend,
    /// Flat horizontal burst with gravity suspended.
    Dash { speed: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveDefinition {
    pub id: String,
    pub name: String,
    pub effect: MoveEffect,
    pub duration_ms: f64,
    /// Authored cadence shown by the selection screen; the timeline lays
    /// moves out once each.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_interval_ms: Option<f64>,
    pub start_delay_ms: f64,
    pub priority: i32,
}

fn def(
    id: &str,
    name: &str,
    effect: MoveEffect,
    duration_ms: f64,
    start_delay_ms: f64,
    priority: i32,
) -> MoveDefinition {
    MoveDefinition {
        id: id.to_string(),
        name: name.to_string(),
        effect,
        duration_ms,
        repeat_interval_ms: None,
        start_delay_ms,
        priority,
    }
}

/// Every move the stages can offer, in selection-screen order.
#[rustfmt::skip]
pub fn move_catalogue() -> Vec<MoveDefinition> {
    vec![
        def("jump", "Jump", MoveEffect::Jump { power: 1.0 }, 700.0, 300.0, 2),
        def("double-jump", "Double Jump", MoveEffect::DoubleJump, 1000.0, 300.0, 2),
        def("stop", "Stop", MoveEffect::Stop, 800.0, 200.0, 1),
        def("move", "Move", MoveEffect::MoveRight { speed: 180.0 }, 1000.0, 0.0, 1),
        def("reverse", "Reverse", MoveEffect::Reverse, 16.0, 200.0, 3),
        def("crouch", "Crouch", MoveEffect::Crouch, 900.0, 200.0, 1),
        def("dash", "Dash", MoveEffect::Dash { speed: 360.0 }, 300.0, 200.0, 3),
        def("grow", "Grow", MoveEffect::GrowShrink, 800.0, 0.0, 1),
        def("defend", "Defend", MoveEffect::Defend, 1000.0, 200.0, 2),
    ]
}

/// Look up a catalogue move by id.
pub fn get_move(id: &str) -> CoreResult<MoveDefinition> {
    move_catalogue()
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| CoreError::UnknownMove(id.to_string()))
}

/// Look up several moves, preserving order. Fails on the first unknown id.
pub fn get_moves<S: AsRef<str>>(ids: &[S]) -> CoreResult<Vec<MoveDefinition>> {
    ids.iter().map(|id| get_move(id.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::stages;

    #[test]
    fn catalogue_ids_are_unique() {
        let catalogue = move_catalogue();
        for (i, a) in catalogue.iter().enumerate() {
            for b in &catalogue[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn unknown_move_is_an_error() {
        assert_eq!(
            get_move("teleport"),
            Err(CoreError::UnknownMove("teleport".to_string()))
        );
        assert!(get_moves(&["jump", "nope", "stop"]).is_err());
    }

    #[test]
    fn every_stage_choice_is_registered() {
        for stage in stages() {
            for id in &stage.animation_choices {
                assert!(get_move(id).is_ok(), "stage {} offers {}", stage.id, id);
            }
        }
    }

    #[test]
    fn reverse_is_an_impulse() {
        let reverse = get_move("reverse").unwrap();
        assert!(reverse.duration_ms <= crate::constants::IMPULSE_MAX_MS);
    }
}

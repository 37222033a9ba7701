use crate::constants::*;
use crate::double_jump;
use crate::error::CoreResult;
use crate::keyframe::constant;
use crate::moves::{get_moves, MoveDefinition, MoveEffect};
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildOptions {
    /// Replaces every move's own start delay when set.
    pub start_delay_override_ms: Option<f64>,
    pub gravity: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            start_delay_override_ms: None,
            gravity: GRAVITY,
        }
    }
}

/// Compile selected moves into one back-to-back timeline.
///
/// Each move advances the cursor by its start delay, emits its clips at the
/// cursor, then advances by its duration.
pub fn build_animation_clips<S: AsRef<str>>(
    move_ids: &[S],
    options: &BuildOptions,
) -> CoreResult<Vec<Clip>> {
    let moves = get_moves(move_ids)?;
    Ok(build_from_definitions(&moves, options))
}

pub fn build_from_definitions(moves: &[MoveDefinition], options: &BuildOptions) -> Vec<Clip> {
    let mut clips = Vec::new();
    let mut cursor_ms = 0.0;
    for def in moves {
        cursor_ms += options.start_delay_override_ms.unwrap_or(def.start_delay_ms);
        emit_move(&mut clips, def, cursor_ms, options.gravity);
        cursor_ms += def.duration_ms;
    }
    clips
}

fn clip(def: &MoveDefinition, start_ms: f64, duration_ms: f64) -> Clip {
    Clip {
        id: def.id.clone(),
        target: EntityId::Player,
        start_ms,
        duration_ms,
        priority: def.priority,
        visuals: Vec::new(),
        effects: Vec::new(),
    }
}

fn hold(property: EffectProperty, value: f64) -> EffectTrack {
    EffectTrack {
        property,
        keyframes: constant(value),
    }
}

fn emit_move(clips: &mut Vec<Clip>, def: &MoveDefinition, start_ms: f64, gravity: f64) {
    let duration_ms = def.duration_ms;
    match def.effect {
        MoveEffect::MoveRight { speed } => {
            let mut c = clip(def, start_ms, duration_ms);
            c.effects.push(hold(EffectProperty::Vx, speed));
            clips.push(c);
        }
        MoveEffect::Stop => {
            let mut c = clip(def, start_ms, duration_ms);
            c.effects.push(hold(EffectProperty::Vx, 0.0));
            clips.push(c);
        }
        MoveEffect::Crouch => {
            let mut c = clip(def, start_ms, duration_ms);
            c.effects.push(hold(EffectProperty::Height, CROUCH_HEIGHT));
            clips.push(c);
        }
        MoveEffect::GrowShrink => {
            let mut c = clip(def, start_ms, duration_ms);
            c.visuals.push(VisualTrack {
                property: VisualProperty::Scale,
                keyframes: vec![
                    Keyframe {
                        time: 0.0,
                        value: TrackValue::Number(1.0),
                    },
                    Keyframe {
                        time: 0.5,
                        value: TrackValue::Number(GROW_PEAK_SCALE),
                    },
                    Keyframe {
                        time: 1.0,
                        value: TrackValue::Number(1.0),
                    },
                ],
            });
            clips.push(c);
        }
        MoveEffect::Reverse => {
            let mut c = clip(def, start_ms, IMPULSE_DURATION_MS);
            c.effects.push(hold(EffectProperty::Dir, 1.0));
            clips.push(c);
        }
        MoveEffect::Jump { power } => {
            let vy = -gravity * (duration_ms / 1000.0 / 2.0) * power;
            let mut c = clip(def, start_ms, IMPULSE_DURATION_MS);
            c.effects.push(hold(EffectProperty::Vy, vy));
            clips.push(c);
        }
        MoveEffect::DoubleJump => {
            let plan = double_jump::solve(duration_ms / 1000.0, gravity);
            let mut first = clip(def, start_ms, IMPULSE_DURATION_MS);
            first.effects.push(hold(EffectProperty::Vy, -plan.first_velocity));
            clips.push(first);

            let second_ms = start_ms + plan.second_start_sec * 1000.0;
            let mut second = clip(def, second_ms, IMPULSE_DURATION_MS);
            second.effects.push(hold(EffectProperty::Vy, -plan.second_velocity));
            clips.push(second);
        }
        MoveEffect::Defend => {
            let mut c = clip(def, start_ms, duration_ms);
            c.effects.push(hold(EffectProperty::IsDefending, 1.0));
            c.visuals.push(VisualTrack {
                property: VisualProperty::Color,
                keyframes: constant(TrackValue::Text(DEFEND_COLOR.to_string())),
            });
            clips.push(c);
        }
        MoveEffect::Dash { speed } => {
            let mut c = clip(def, start_ms, duration_ms);
            c.effects.push(hold(EffectProperty::Vx, speed));
            c.effects.push(hold(EffectProperty::Vy, 0.0));
            c.effects.push(hold(EffectProperty::GravityScale, 0.0));
            c.effects.push(hold(EffectProperty::DashShape, 1.0));
            clips.push(c);
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::keyframe::sample_track;
use crate::types::*;

/// Merged output of one `sample` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub visuals: VisualPartial,
    pub effects: EffectState,
}

/// Highest priority seen per property during a single sample call.
/// Equal priority overwrites, so the later clip wins ties.
#[derive(Clone, Copy, Debug)]
struct PriorityTable<const N: usize> {
    slots: [Option<i32>; N],
}

impl<const N: usize> PriorityTable<N> {
    fn new() -> Self {
        PriorityTable { slots: [None; N] }
    }

    /// Claim slot `index` at `priority`; false if a higher priority holds it.
    fn claim(&mut self, index: usize, priority: i32) -> bool {
        match self.slots[index] {
            Some(held) if priority < held => false,
            _ => {
                self.slots[index] = Some(priority);
                true
            }
        }
    }
}

/// Effect timeline sampler over a fixed set of compiled clips.
///
/// Built once per move selection. The only state it carries between calls is
/// the previous sample time, which bounds the window impulse clips fire in.
#[derive(Clone, Debug)]
pub struct AnimationSystem {
    clips: Vec<Clip>,
    /// `None` until the first sample and after a rewind; the arming window is
    /// then closed at 0 so clips starting at 0 still fire.
    previous_ms: Option<f64>,
}

impl AnimationSystem {
    pub fn new(clips: Vec<Clip>) -> Self {
        AnimationSystem {
            clips,
            previous_ms: None,
        }
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Forget the previous sample time so impulse clips re-arm from 0.
    pub fn reset(&mut self) {
        self.previous_ms = None;
    }

    pub fn sample(&mut self, time_ms: f64) -> Sample {
        let mut out = Sample::default();
        let mut visual_priority = PriorityTable::<{ VisualProperty::COUNT }>::new();
        let mut effect_priority = PriorityTable::<{ EffectProperty::COUNT }>::new();

        let previous = match self.previous_ms {
            Some(prev) if prev <= time_ms => Some(prev),
            _ => None,
        };

        for clip in &self.clips {
            if clip.duration_ms <= 0.0 {
                continue;
            }
            let impulse = clip.is_impulse();
            let active = if impulse {
                let after_previous = match previous {
                    Some(prev) => clip.start_ms > prev,
                    None => clip.start_ms >= 0.0,
                };
                after_previous && clip.start_ms <= time_ms
            } else {
                time_ms >= clip.start_ms && time_ms <= clip.end_ms()
            };
            if !active {
                continue;
            }

            let local_t = if impulse {
                0.0
            } else {
                (time_ms - clip.start_ms) / clip.duration_ms
            };

            for track in &clip.visuals {
                if !visual_priority.claim(track.property.index(), clip.priority) {
                    continue;
                }
                let value = sample_track(&track.keyframes, local_t);
                match track.property {
                    VisualProperty::Color => out.visuals.color = Some(value.into_text()),
                    VisualProperty::Scale => out.visuals.scale = Some(value.as_number()),
                }
            }

            for track in &clip.effects {
                if !effect_priority.claim(track.property.index(), clip.priority) {
                    continue;
                }
                let value = sample_track(&track.keyframes, local_t);
                apply_effect(&mut out.effects, track.property, value);
            }
        }

        self.previous_ms = Some(time_ms);
        out
    }
}

fn apply_effect(effects: &mut EffectState, property: EffectProperty, value: f64) {
    match property {
        EffectProperty::X => effects.position_override.x = Some(value),
        EffectProperty::Y => effects.position_override.y = Some(value),
        EffectProperty::Vx => effects.velocity_override.x = Some(value),
        EffectProperty::Vy => effects.velocity_override.y = Some(value),
        EffectProperty::Dir => effects.direction_flip = Some(value),
        EffectProperty::Height => effects.height_override = Some(value),
        EffectProperty::GravityScale => effects.gravity_scale = Some(value),
        EffectProperty::DashShape => effects.dash_shape = Some(value),
        EffectProperty::IsDefending => effects.is_defending = Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframe::constant;

    fn effect_clip(
        id: &str,
        start_ms: f64,
        duration_ms: f64,
        priority: i32,
        property: EffectProperty,
        value: f64,
    ) -> Clip {
        Clip {
            id: id.to_string(),
            target: EntityId::Player,
            start_ms,
            duration_ms,
            priority,
            visuals: Vec::new(),
            effects: vec![EffectTrack {
                property,
                keyframes: constant(value),
            }],
        }
    }

    #[test]
    fn higher_priority_wins_regardless_of_order() {
        let low = effect_clip("low", 0.0, 1000.0, 1, EffectProperty::Vx, 50.0);
        let high = effect_clip("high", 0.0, 1000.0, 2, EffectProperty::Vx, 200.0);

        let mut forward = AnimationSystem::new(vec![low.clone(), high.clone()]);
        let sample = forward.sample(500.0);
        assert_eq!(sample.effects.velocity_override.x, Some(200.0));

        let mut backward = AnimationSystem::new(vec![high, low]);
        let sample = backward.sample(500.0);
        assert_eq!(sample.effects.velocity_override.x, Some(200.0));
    }

    #[test]
    fn equal_priority_later_clip_wins() {
        let first = effect_clip("first", 0.0, 1000.0, 1, EffectProperty::Vx, 50.0);
        let second = effect_clip("second", 0.0, 1000.0, 1, EffectProperty::Vx, 75.0);
        let mut anim = AnimationSystem::new(vec![first, second]);
        assert_eq!(anim.sample(10.0).effects.velocity_override.x, Some(75.0));
    }

    #[test]
    fn priority_is_tracked_per_property() {
        let a = effect_clip("a", 0.0, 1000.0, 5, EffectProperty::Vx, 1.0);
        let b = effect_clip("b", 0.0, 1000.0, 1, EffectProperty::Vy, 2.0);
        let mut anim = AnimationSystem::new(vec![a, b]);
        let effects = anim.sample(100.0).effects;
        assert_eq!(effects.velocity_override.x, Some(1.0));
        assert_eq!(effects.velocity_override.y, Some(2.0));
    }

    #[test]
    fn impulse_fires_once_and_rearms_after_rewind() {
        let clip = effect_clip("hop", 500.0, 16.0, 2, EffectProperty::Vy, -300.0);
        let mut anim = AnimationSystem::new(vec![clip]);

        let mut fired = Vec::new();
        for t in [0.0, 100.0, 200.0, 300.0, 400.0, 500.0, 600.0] {
            if anim.sample(t).effects.velocity_override.y.is_some() {
                fired.push(t);
            }
        }
        assert_eq!(fired, vec![500.0]);

        // Rewind to the start of a new attempt.
        assert!(anim.sample(0.0).effects.velocity_override.y.is_none());
        let mut refired = 0;
        for t in [250.0, 500.0, 750.0] {
            if anim.sample(t).effects.velocity_override.y.is_some() {
                refired += 1;
            }
        }
        assert_eq!(refired, 1);
    }

    #[test]
    fn impulse_at_zero_fires_on_first_sample() {
        let clip = effect_clip("flip", 0.0, 16.0, 3, EffectProperty::Dir, 1.0);
        let mut anim = AnimationSystem::new(vec![clip]);
        assert_eq!(anim.sample(16.0).effects.direction_flip, Some(1.0));
        assert_eq!(anim.sample(32.0).effects.direction_flip, None);
    }

    #[test]
    fn standard_clip_bounds_are_inclusive() {
        let clip = effect_clip("crouch", 100.0, 200.0, 1, EffectProperty::Height, 18.0);
        let mut anim = AnimationSystem::new(vec![clip]);
        assert_eq!(anim.sample(99.0).effects.height_override, None);
        assert_eq!(anim.sample(100.0).effects.height_override, Some(18.0));
        assert_eq!(anim.sample(300.0).effects.height_override, Some(18.0));
        assert_eq!(anim.sample(301.0).effects.height_override, None);
    }

    #[test]
    fn zero_duration_clips_are_skipped() {
        let clip = effect_clip("empty", 0.0, 0.0, 9, EffectProperty::Vx, 1.0);
        let mut anim = AnimationSystem::new(vec![clip]);
        assert_eq!(anim.sample(0.0), Sample::default());
    }

    #[test]
    fn visual_tracks_sample_color_and_scale() {
        let clip = Clip {
            id: "grow".into(),
            target: EntityId::Player,
            start_ms: 0.0,
            duration_ms: 1000.0,
            priority: 1,
            visuals: vec![
                VisualTrack {
                    property: VisualProperty::Scale,
                    keyframes: vec![
                        Keyframe {
                            time: 0.0,
                            value: TrackValue::Number(1.0),
                        },
                        Keyframe {
                            time: 0.5,
                            value: TrackValue::Number(1.25),
                        },
                        Keyframe {
                            time: 1.0,
                            value: TrackValue::Number(1.0),
                        },
                    ],
                },
                VisualTrack {
                    property: VisualProperty::Color,
                    keyframes: constant(TrackValue::Text("#7bdff2".into())),
                },
            ],
            effects: Vec::new(),
        };
        let mut anim = AnimationSystem::new(vec![clip]);
        let visuals = anim.sample(500.0).visuals;
        assert_eq!(visuals.scale, Some(1.25));
        assert_eq!(visuals.color.as_deref(), Some("#7bdff2"));
    }

    #[test]
    fn empty_timeline_yields_empty_sample() {
        let mut anim = AnimationSystem::new(Vec::new());
        assert_eq!(anim.sample(1234.0), Sample::default());
    }
}

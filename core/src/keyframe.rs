//! Keyframe track evaluation over normalized clip time.
//!
//! Numbers interpolate linearly between the two bracketing keyframes. Strings
//! (colors) hold the earlier keyframe's value until the next one is reached.
//! Times outside the track clamp to the first/last keyframe.

use crate::types::{Keyframe, TrackValue};

/// Values a keyframe track can interpolate between.
pub trait Interpolate: Clone {
    /// Value of an empty track.
    fn empty() -> Self;
    fn interpolate(a: &Keyframe<Self>, b: &Keyframe<Self>, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn empty() -> Self {
        0.0
    }

    fn interpolate(a: &Keyframe<f64>, b: &Keyframe<f64>, t: f64) -> f64 {
        lerp_frames(a.time, a.value, b.time, b.value, t)
    }
}

impl Interpolate for TrackValue {
    fn empty() -> Self {
        TrackValue::Number(0.0)
    }

    fn interpolate(a: &Keyframe<TrackValue>, b: &Keyframe<TrackValue>, t: f64) -> TrackValue {
        match (&a.value, &b.value) {
            (TrackValue::Number(va), TrackValue::Number(vb)) => {
                TrackValue::Number(lerp_frames(a.time, *va, b.time, *vb, t))
            }
            _ => a.value.clone(),
        }
    }
}

fn lerp_frames(ta: f64, va: f64, tb: f64, vb: f64, t: f64) -> f64 {
    let span = tb - ta;
    // Coincident keyframes: avoid dividing by zero.
    let span = if span == 0.0 { 1.0 } else { span };
    let ratio = (t - ta) / span;
    va + (vb - va) * ratio
}

/// Evaluate a track at normalized time `t` (clamped to `[0, 1]`).
pub fn sample_track<T: Interpolate>(frames: &[Keyframe<T>], t: f64) -> T {
    let Some(first) = frames.first() else {
        return T::empty();
    };
    let clamped = t.clamp(0.0, 1.0);
    let mut previous = first;
    for next in &frames[1..] {
        if clamped <= next.time {
            return T::interpolate(previous, next, clamped);
        }
        previous = next;
    }
    previous.value.clone()
}

impl TrackValue {
    pub fn as_number(&self) -> f64 {
        match self {
            TrackValue::Number(v) => *v,
            TrackValue::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            TrackValue::Number(v) => v.to_string(),
            TrackValue::Text(s) => s,
        }
    }
}

/// Two keyframes holding `value` for the whole clip.
pub fn constant<T: Clone>(value: T) -> Vec<Keyframe<T>> {
    vec![
        Keyframe {
            time: 0.0,
            value: value.clone(),
        },
        Keyframe { time: 1.0, value },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kf<T>(time: f64, value: T) -> Keyframe<T> {
        Keyframe { time, value }
    }

    #[test]
    fn numbers_interpolate_linearly() {
        let frames = vec![kf(0.0, 0.0), kf(0.5, 10.0), kf(1.0, 0.0)];
        assert_eq!(sample_track(&frames, 0.25), 5.0);
        assert_eq!(sample_track(&frames, 0.5), 10.0);
        assert_eq!(sample_track(&frames, 0.75), 5.0);
    }

    #[test]
    fn phase_is_clamped() {
        let frames = vec![kf(0.0, 2.0), kf(1.0, 4.0)];
        assert_eq!(sample_track(&frames, -3.0), 2.0);
        assert_eq!(sample_track(&frames, 7.0), 4.0);
    }

    #[test]
    fn last_keyframe_holds_past_end() {
        let frames = vec![kf(0.0, 1.0), kf(0.5, 3.0)];
        assert_eq!(sample_track(&frames, 0.9), 3.0);
    }

    #[test]
    fn empty_track_is_zero() {
        let frames: Vec<Keyframe<f64>> = Vec::new();
        assert_eq!(sample_track(&frames, 0.5), 0.0);
    }

    #[test]
    fn colors_hold_until_next_keyframe() {
        let frames = vec![
            kf(0.0, TrackValue::Text("#ffd166".into())),
            kf(0.5, TrackValue::Text("#06d6a0".into())),
            kf(1.0, TrackValue::Text("#ffd166".into())),
        ];
        assert_eq!(
            sample_track(&frames, 0.4),
            TrackValue::Text("#ffd166".into())
        );
        assert_eq!(
            sample_track(&frames, 0.6),
            TrackValue::Text("#06d6a0".into())
        );
    }

    #[test]
    fn coincident_keyframes_do_not_divide_by_zero() {
        let frames = vec![kf(0.5, 1.0), kf(0.5, 9.0)];
        assert_eq!(sample_track(&frames, 0.5), 1.0);
    }
}

//! Double-jump timing solver.
//!
//! Finds when the second impulse should fire and how hard both impulses push
//! so the pair lands back on the launch height after `T` seconds. It is a
//! bounded sweep over the second-jump start ratio, not a closed-form solve:
//! the accepted plan is the *last* ratio in the sweep that satisfies every
//! constraint, which fixes the arc shape players see.

use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoubleJumpPlan {
    /// Seconds after the first impulse that the second one fires.
    pub second_start_sec: f64,
    /// Upward speed of the first impulse (positive = up).
    pub first_velocity: f64,
    /// Upward speed of the second impulse (positive = up).
    pub second_velocity: f64,
    /// True when no swept ratio satisfied the constraints.
    pub fallback: bool,
}

struct Candidate {
    second_start: f64,
    v1: f64,
    v2: f64,
    apex_time: f64,
    height_at_second: f64,
    first_apex: f64,
    second_apex: f64,
}

fn candidate(total_sec: f64, ratio: f64, gravity: f64) -> Candidate {
    let s = total_sec * ratio;
    let apex_time = (0.5 * s + 0.02).max(0.7 * s).max(0.05);
    let v1 = gravity * apex_time;
    let height_at_second = v1 * s - 0.5 * gravity * s * s;
    let remaining = (total_sec - s).max(0.05);
    let v2 = (0.5 * gravity * remaining * remaining - height_at_second) / remaining;
    let first_apex = v1 * v1 / (2.0 * gravity);
    let second_apex = height_at_second + v2 * v2 / (2.0 * gravity);
    Candidate {
        second_start: s,
        v1,
        v2,
        apex_time,
        height_at_second,
        first_apex,
        second_apex,
    }
}

impl Candidate {
    fn acceptable(&self) -> bool {
        self.second_start < 2.0 * self.apex_time
            && self.v2 > 0.0
            && self.second_apex > 1.2 * self.first_apex
            && self.height_at_second >= 0.6 * self.first_apex
    }
}

/// Solve for a move lasting `total_sec` seconds under `gravity` (px/s²).
pub fn solve(total_sec: f64, gravity: f64) -> DoubleJumpPlan {
    let mut accepted = None;
    for step in 0..=DOUBLE_JUMP_RATIO_STEPS {
        let ratio = DOUBLE_JUMP_RATIO_MIN + DOUBLE_JUMP_RATIO_STEP * f64::from(step);
        let c = candidate(total_sec, ratio, gravity);
        if c.acceptable() {
            accepted = Some(c);
        }
    }

    match accepted {
        Some(c) => DoubleJumpPlan {
            second_start_sec: c.second_start,
            first_velocity: c.v1,
            second_velocity: c.v2,
            fallback: false,
        },
        None => {
            let c = candidate(total_sec, DOUBLE_JUMP_FALLBACK_RATIO, gravity);
            tracing::debug!(total_sec, "double-jump sweep found no plan; using fallback");
            DoubleJumpPlan {
                second_start_sec: c.second_start,
                first_velocity: c.v1,
                second_velocity: c.v2.max(0.0),
                fallback: true,
            }
        }
    }
}

use crate::error::{CoreError, CoreResult};
use crate::hash::TrajectoryHasher;
use crate::init::create_attempt;
use crate::stages::stage_by_id;
use crate::types::*;

/// Run one attempt headlessly over the given frame deltas.
///
/// Stops early once the attempt is cleared or lost. Every frame delta is
/// validated before the first tick runs.
pub fn replay(input: &RunInput) -> CoreResult<RunOutput> {
    let stage = match &input.custom_stage {
        Some(stage) => stage.clone(),
        None => stage_by_id(&input.stage)?,
    };
    let deltas = frame_deltas(&input.frames)?;
    let mut attempt = create_attempt(
        stage,
        input.moves.as_slice(),
        input.start_delay_override_ms,
        input.config,
    )?;

    let mut hasher = TrajectoryHasher::new();
    let mut elapsed_ms = 0.0;
    for dt in deltas {
        if attempt.status().is_finished() {
            break;
        }
        attempt.step(dt);
        elapsed_ms += dt * 1000.0;
        hasher.record(attempt.player());
    }

    tracing::debug!(
        status = ?attempt.status(),
        ticks = attempt.ticks(),
        elapsed_ms,
        "replay finished"
    );

    Ok(RunOutput {
        status: attempt.status(),
        ticks: attempt.ticks(),
        elapsed_ms,
        player: attempt.player().clone(),
        trajectory_hash: hasher.finalize(),
    })
}

/// Validate every frame delta up front, then yield them lazily so a huge
/// fixed tick count never allocates.
fn frame_deltas(frames: &FrameTiming) -> CoreResult<Box<dyn Iterator<Item = f64> + '_>> {
    match frames {
        FrameTiming::Fixed { dt, ticks } => {
            check_frame_time(*dt)?;
            Ok(Box::new(std::iter::repeat(*dt).take(*ticks as usize)))
        }
        FrameTiming::Recorded(deltas) => {
            deltas.iter().try_for_each(|dt| check_frame_time(*dt))?;
            Ok(Box::new(deltas.iter().copied()))
        }
    }
}

fn check_frame_time(dt: f64) -> CoreResult<()> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(CoreError::InvalidFrameTime(dt));
    }
    Ok(())
}

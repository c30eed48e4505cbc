use std::thread;

use lineart::Contour;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, error, warn};

use crate::{
    device::PointerDevice,
    error::{PlaybackError, Result},
    session::PlaybackSession,
    status::StatusSink,
};

/// Terminal state of one playback run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// All strokes were drawn without interruption
    Completed,
    /// Cancellation was observed at a checkpoint
    Stopped,
    /// A device fault interrupted the run
    Failed(String),
}

enum RunStatus {
    Finished,
    Cancelled,
}

/// Drives a pointer device through a sequence of simplified strokes.
///
/// For each stroke: position at the first point (offset by the session
/// origin), press, move through the remaining points while held, release.
/// The cancellation flag is re-checked before engaging and before every
/// intermediate move. All three terminal states converge to the same
/// cleanup: button released, original pacing and failsafe restored, pointer
/// returned to where it started, status sink notified.
pub struct PlaybackEngine;

impl PlaybackEngine {
    pub fn play(
        device: &mut dyn PointerDevice,
        strokes: &[Contour],
        session: &PlaybackSession,
        sink: &dyn StatusSink,
    ) -> Outcome {
        // A cancellation that raced the trigger wins outright: no pointer
        // state has been touched yet, so there is nothing to clean up.
        if session.cancelled() {
            sink.status("Playback cancelled before the first stroke.");
            return Outcome::Stopped;
        }

        let original_position = match device.position() {
            Ok(p) => p,
            Err(e) => {
                let reason = e.to_string();
                sink.status(&format!("Playback failed: {reason}"));
                return Outcome::Failed(reason);
            }
        };
        let original_pacing = device.pacing();
        device.set_failsafe(false);
        device.set_pacing(session.pacing());

        let result = Self::run(device, strokes, session);

        if result.is_err() {
            // never leave the button held after a device fault
            let _ = device.release();
        }
        device.set_pacing(original_pacing);
        device.set_failsafe(true);
        let _ = device.move_to(original_position);

        match result {
            Ok(RunStatus::Finished) => {
                debug!(strokes = strokes.len(), "playback completed");
                sink.status("Drawing completed.");
                Outcome::Completed
            }
            Ok(RunStatus::Cancelled) => {
                warn!("playback stopped by cancellation");
                sink.status("Drawing stopped.");
                Outcome::Stopped
            }
            Err(e) => {
                let reason = e.to_string();
                error!(%reason, "playback failed");
                sink.status(&format!("Drawing failed: {reason}"));
                Outcome::Failed(reason)
            }
        }
    }

    fn run(
        device: &mut dyn PointerDevice,
        strokes: &[Contour],
        session: &PlaybackSession,
    ) -> std::result::Result<RunStatus, PlaybackError> {
        let [ox, oy] = session.origin();
        let total = strokes.len();

        for (index, stroke) in strokes.iter().enumerate() {
            if session.cancelled() {
                return Ok(RunStatus::Cancelled);
            }
            // fewer than two points cannot form a drag
            if stroke.points.len() < 2 {
                continue;
            }

            let mut points = stroke.points.iter().map(|&[x, y]| [x + ox, y + oy]);
            let Some(first) = points.next() else {
                continue;
            };
            device.move_to(first)?;
            if session.cancelled() {
                return Ok(RunStatus::Cancelled);
            }
            device.press()?;

            let mut released = false;
            for point in points {
                if session.cancelled() {
                    device.release()?;
                    released = true;
                    break;
                }
                device.move_to(point)?;
            }
            // release exactly once per held drag, wherever cancellation lands
            if !released {
                device.release()?;
            }
            if session.cancelled() {
                return Ok(RunStatus::Cancelled);
            }

            debug!(stroke = index + 1, total, "stroke drawn");
            let delay = session.stroke_delay();
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }

        Ok(RunStatus::Finished)
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lineart::Point;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Playback parameters supplied by the GUI collaborator.
///
/// Every field has a defined default matching the original control panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Pause after each finished stroke, in milliseconds.
    #[schemars(range(min = 0, max = 100))]
    pub stroke_delay_ms: u64,

    /// Keep every nth contour point; values below 1 behave as 1.
    #[schemars(range(min = 1, max = 10))]
    pub point_stride: i32,

    /// Minimum delay between injected pointer events, in seconds.
    #[schemars(range(min = 0.0, max = 0.1))]
    pub pacing_secs: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            stroke_delay_ms: 0,
            point_stride: 1,
            pacing_secs: 0.0,
        }
    }
}

impl PlaybackConfig {
    pub fn stroke_delay(&self) -> Duration {
        Duration::from_millis(self.stroke_delay_ms)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_secs_f64(self.pacing_secs.max(0.0))
    }
}

/// Cloneable handle for requesting cancellation from any thread.
///
/// Cancellation is cooperative: the engine observes the flag at the start of
/// each point move, so worst-case latency is one point-to-point drag.
#[derive(Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub(crate) fn new(flag: Arc<AtomicBool>) -> Self {
        Self(flag)
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Ephemeral state for a single trigger-to-completion playback run.
///
/// Owns the origin translation and the cancellation flag for its duration;
/// destroyed when the run completes, is cancelled, or fails.
pub struct PlaybackSession {
    origin: Point,
    stroke_delay: Duration,
    pacing: Duration,
    cancel: Arc<AtomicBool>,
}

impl PlaybackSession {
    pub fn new(origin: Point, config: &PlaybackConfig, cancel: Arc<AtomicBool>) -> Self {
        Self {
            origin,
            stroke_delay: config.stroke_delay(),
            pacing: config.pacing(),
            cancel,
        }
    }

    /// Additive offset translating mask coordinates into the destination
    /// coordinate space. No scaling, no rotation.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn stroke_delay(&self) -> Duration {
        self.stroke_delay
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    pub fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }
}

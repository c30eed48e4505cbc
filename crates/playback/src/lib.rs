//! Mouse-drag playback of line art produced by the `lineart` crate.
//!
//! The crate is organised around a small set of seams:
//!
//! - [`PointerDevice`]: the boundary to the OS pointer. Tests and dry runs
//!   use [`RecordingPointer`]; real injection lives behind the
//!   `enigo-driver` feature as [`EnigoPointer`].
//! - [`PlaybackEngine`]: drives a device through press/drag/release
//!   choreography for a batch of strokes, with cooperative cancellation
//!   and save/restore of pointer state.
//! - [`PlaybackController`]: owns the worker thread and the cancellation
//!   flag; guarantees at most one session runs at a time.
//! - [`StatusSink`] and [`ConfirmGate`]: the collaborator-facing surfaces
//!   for progress lines and the pre-run confirmation step.

pub mod controller;
pub mod device;
pub mod engine;
pub mod error;
pub mod session;
pub mod status;

#[cfg(feature = "enigo-driver")]
pub use device::EnigoPointer;
pub use controller::{PlaybackController, TriggerOutcome};
pub use device::{PointerDevice, PointerEvent, RecordingLog, RecordingPointer};
pub use engine::{Outcome, PlaybackEngine};
pub use error::{PlaybackError, Result};
pub use session::{CancelHandle, PlaybackConfig, PlaybackSession};
pub use status::{AlwaysConfirm, ConfirmGate, MemoryStatusSink, StatusSink, TracingStatusSink};

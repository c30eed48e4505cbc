use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use lineart::{algorithms::StrideSimplifier, Contour, EdgeMask, Point, StrokeSimplifier};
use strum::Display;
use tracing::{debug, info};

use crate::{
    device::PointerDevice,
    engine::{Outcome, PlaybackEngine},
    error::Result,
    session::{CancelHandle, PlaybackConfig, PlaybackSession},
    status::{ConfirmGate, StatusSink},
};

/// How a trigger request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TriggerOutcome {
    /// A playback session was started on a worker thread
    Started,
    /// A session is already running; the request was ignored
    AlreadyRunning,
    /// The line art decomposed to nothing drawable
    NoStrokes,
    /// The confirmation gate rejected the session
    Declined,
}

/// Owns the playback thread lifecycle and the cancellation flag.
///
/// At most one session runs at a time: a trigger while a session is running
/// is a reported no-op, never a second thread. Cancellation is cooperative
/// and can be requested from any thread via [`CancelHandle`].
pub struct PlaybackController {
    cancel: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<Outcome>>,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self {
            cancel: Arc::new(AtomicBool::new(false)),
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Handle for requesting cancellation from another thread (e.g. a
    /// hotkey listener).
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle::new(Arc::clone(&self.cancel))
    }

    /// Request cooperative cancellation of the running session, if any.
    pub fn cancel(&self) {
        if self.is_running() {
            info!("cancellation requested");
        }
        self.cancel.store(true, Ordering::SeqCst);
    }

    /// Set up and start a playback session from the current line art.
    ///
    /// Decomposes the mask, thins the contours with the configured stride,
    /// blocks on the confirmation gate, then hands the strokes to a worker
    /// thread. The device is moved into the worker for the session's
    /// lifetime.
    pub fn trigger<D>(
        &mut self,
        mut device: D,
        mask: &EdgeMask,
        origin: Point,
        config: &PlaybackConfig,
        confirm: &dyn ConfirmGate,
        sink: Arc<dyn StatusSink>,
    ) -> Result<TriggerOutcome>
    where
        D: PointerDevice + 'static,
    {
        if self.is_running() {
            debug!("trigger ignored: a session is already running");
            return Ok(TriggerOutcome::AlreadyRunning);
        }
        // reap a finished worker so repeated triggers do not leak handles
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }

        let contours = lineart::decompose(mask)?;
        if contours.is_empty() {
            sink.status("No drawable contours in the current line art.");
            return Ok(TriggerOutcome::NoStrokes);
        }

        let simplifier = StrideSimplifier {
            stride: config.point_stride,
        };
        let strokes: Vec<Contour> = contours
            .iter()
            .map(|c| simplifier.simplify(c))
            .filter(|c| c.points.len() >= 2)
            .collect();
        if strokes.is_empty() {
            sink.status("No drawable contours remain after simplification.");
            return Ok(TriggerOutcome::NoStrokes);
        }

        let prompt = format!(
            "Draw {} strokes starting at ({}, {})? Playback can be cancelled mid-run.",
            strokes.len(),
            origin[0],
            origin[1]
        );
        if !confirm.confirm(&prompt) {
            sink.status("Playback declined.");
            return Ok(TriggerOutcome::Declined);
        }

        self.cancel.store(false, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);
        let session = PlaybackSession::new(origin, config, Arc::clone(&self.cancel));
        let running = Arc::clone(&self.running);

        sink.status(&format!("Drawing {} strokes...", strokes.len()));
        let spawned = thread::Builder::new()
            .name("playback".into())
            .spawn(move || {
                let outcome = PlaybackEngine::play(&mut device, &strokes, &session, sink.as_ref());
                running.store(false, Ordering::SeqCst);
                outcome
            });

        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                Ok(TriggerOutcome::Started)
            }
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                Err(e.into())
            }
        }
    }

    /// Block until the current session ends, yielding its outcome.
    pub fn wait(&mut self) -> Option<Outcome> {
        self.worker.take().map(|handle| {
            handle.join().unwrap_or_else(|_| {
                self.running.store(false, Ordering::SeqCst);
                Outcome::Failed("playback thread panicked".into())
            })
        })
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::device::{PointerEvent, RecordingPointer};
    use crate::status::{AlwaysConfirm, MemoryStatusSink};
    use image::{GrayImage, Luma};
    use lineart::{LineartConfig, Pipeline};

    fn square_mask() -> EdgeMask {
        let mut img = GrayImage::new(20, 20);
        for y in 5..15 {
            for x in 5..15 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        EdgeMask::new(img, false)
    }

    fn blank_mask() -> EdgeMask {
        EdgeMask::new(GrayImage::new(20, 20), false)
    }

    #[test]
    fn blank_mask_reports_no_strokes_without_starting() {
        let mut controller = PlaybackController::new();
        let device = RecordingPointer::new();
        let log = device.log();
        let sink = Arc::new(MemoryStatusSink::new());

        let outcome = controller
            .trigger(
                device,
                &blank_mask(),
                [0, 0],
                &PlaybackConfig::default(),
                &AlwaysConfirm,
                Arc::clone(&sink) as Arc<dyn StatusSink>,
            )
            .unwrap();

        assert_eq!(outcome, TriggerOutcome::NoStrokes);
        assert!(!controller.is_running());
        assert!(log.is_empty());
        assert!(sink
            .messages()
            .iter()
            .any(|m| m.contains("No drawable contours")));
    }

    #[test]
    fn completed_run_reports_back_through_the_sink() {
        let mut controller = PlaybackController::new();
        let device = RecordingPointer::new();
        let log = device.log();
        let sink = Arc::new(MemoryStatusSink::new());

        let outcome = controller
            .trigger(
                device,
                &square_mask(),
                [50, 60],
                &PlaybackConfig::default(),
                &AlwaysConfirm,
                Arc::clone(&sink) as Arc<dyn StatusSink>,
            )
            .unwrap();
        assert_eq!(outcome, TriggerOutcome::Started);

        assert_eq!(controller.wait(), Some(Outcome::Completed));
        assert!(!controller.is_running());
        assert!(log.events().contains(&PointerEvent::Press));
        assert!(sink.messages().iter().any(|m| m.contains("completed")));
    }

    struct DeclineAll;
    impl ConfirmGate for DeclineAll {
        fn confirm(&self, _prompt: &str) -> bool {
            false
        }
    }

    #[test]
    fn declined_gate_never_enters_running() {
        let mut controller = PlaybackController::new();
        let device = RecordingPointer::new();
        let log = device.log();
        let sink = Arc::new(MemoryStatusSink::new());

        let outcome = controller
            .trigger(
                device,
                &square_mask(),
                [0, 0],
                &PlaybackConfig::default(),
                &DeclineAll,
                sink as Arc<dyn StatusSink>,
            )
            .unwrap();

        assert_eq!(outcome, TriggerOutcome::Declined);
        assert!(!controller.is_running());
        assert!(log.is_empty());
    }

    /// Pointer whose first move blocks until the test releases it, keeping
    /// the session observably running.
    struct BlockingPointer {
        inner: RecordingPointer,
        gate: Mutex<Option<Receiver<()>>>,
    }

    impl PointerDevice for BlockingPointer {
        fn position(&mut self) -> crate::error::Result<Point> {
            self.inner.position()
        }
        fn move_to(&mut self, point: Point) -> crate::error::Result<()> {
            if let Ok(mut gate) = self.gate.lock() {
                if let Some(rx) = gate.take() {
                    let _ = rx.recv_timeout(Duration::from_secs(5));
                }
            }
            self.inner.move_to(point)
        }
        fn press(&mut self) -> crate::error::Result<()> {
            self.inner.press()
        }
        fn release(&mut self) -> crate::error::Result<()> {
            self.inner.release()
        }
        fn pacing(&self) -> Duration {
            self.inner.pacing()
        }
        fn set_pacing(&mut self, pacing: Duration) {
            self.inner.set_pacing(pacing);
        }
        fn set_failsafe(&mut self, enabled: bool) {
            self.inner.set_failsafe(enabled);
        }
        fn failsafe(&self) -> bool {
            self.inner.failsafe()
        }
    }

    #[test]
    fn retrigger_while_running_is_a_no_op_and_cancel_stops_the_run() {
        let mut controller = PlaybackController::new();
        let (tx, rx) = mpsc::channel();
        let inner = RecordingPointer::new();
        let log = inner.log();
        let device = BlockingPointer {
            inner,
            gate: Mutex::new(Some(rx)),
        };
        let sink = Arc::new(MemoryStatusSink::new());

        let first = controller
            .trigger(
                device,
                &square_mask(),
                [0, 0],
                &PlaybackConfig::default(),
                &AlwaysConfirm,
                Arc::clone(&sink) as Arc<dyn StatusSink>,
            )
            .unwrap();
        assert_eq!(first, TriggerOutcome::Started);
        assert!(controller.is_running());

        // a second trigger must not start a concurrent session
        let second = controller
            .trigger(
                RecordingPointer::new(),
                &square_mask(),
                [0, 0],
                &PlaybackConfig::default(),
                &AlwaysConfirm,
                Arc::clone(&sink) as Arc<dyn StatusSink>,
            )
            .unwrap();
        assert_eq!(second, TriggerOutcome::AlreadyRunning);

        controller.cancel();
        tx.send(()).unwrap();

        assert_eq!(controller.wait(), Some(Outcome::Stopped));
        assert!(!controller.is_running());
        // the held drag, if any, ended with a release
        let events = log.events();
        let presses = events.iter().filter(|e| **e == PointerEvent::Press).count();
        let releases = events
            .iter()
            .filter(|e| **e == PointerEvent::Release)
            .count();
        assert_eq!(presses, releases);
    }

    #[test]
    fn solid_capture_end_to_end_reports_no_strokes() {
        let capture = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            32,
            32,
            image::Rgb([120, 120, 120]),
        ));
        let pipeline = Pipeline::from_config(&LineartConfig::default());
        let mask = pipeline.render(&capture).unwrap();
        assert!(mask.is_blank());

        let mut controller = PlaybackController::new();
        let device = RecordingPointer::new();
        let log = device.log();
        let sink = Arc::new(MemoryStatusSink::new());

        let outcome = controller
            .trigger(
                device,
                &mask,
                [10, 10],
                &PlaybackConfig::default(),
                &AlwaysConfirm,
                sink as Arc<dyn StatusSink>,
            )
            .unwrap();

        assert_eq!(outcome, TriggerOutcome::NoStrokes);
        assert!(log.is_empty());
    }

    #[test]
    fn oversized_stride_that_leaves_single_points_reports_no_strokes() {
        let mut controller = PlaybackController::new();
        let device = RecordingPointer::new();
        let sink = Arc::new(MemoryStatusSink::new());

        // a filled square decomposes to 4 corner points; stride 10 keeps one
        let config = PlaybackConfig {
            point_stride: 10,
            ..PlaybackConfig::default()
        };
        let outcome = controller
            .trigger(
                device,
                &square_mask(),
                [0, 0],
                &config,
                &AlwaysConfirm,
                sink as Arc<dyn StatusSink>,
            )
            .unwrap();

        assert_eq!(outcome, TriggerOutcome::NoStrokes);
    }
}

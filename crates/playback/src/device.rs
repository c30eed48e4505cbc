use std::sync::{Arc, Mutex};
use std::time::Duration;

use lineart::Point;

use crate::error::{PlaybackError, Result};

/// Seam between the playback engine and the OS pointer.
///
/// Implementations inject real pointer events ([`EnigoPointer`], behind the
/// `enigo-driver` feature) or record them ([`RecordingPointer`], used by
/// tests and dry runs). A device owns two pieces of adjustable state the
/// engine saves and restores around every session: the pacing inserted after
/// each injected event, and the emergency-abort failsafe.
pub trait PointerDevice: Send {
    /// Current pointer position in destination coordinates.
    fn position(&mut self) -> Result<Point>;

    /// Position the pointer instantly, without intermediate animation.
    fn move_to(&mut self, point: Point) -> Result<()>;

    /// Hold the primary button down.
    fn press(&mut self) -> Result<()>;

    /// Let go of the primary button.
    fn release(&mut self) -> Result<()>;

    /// Minimum delay the device inserts after each injected event.
    fn pacing(&self) -> Duration;

    fn set_pacing(&mut self, pacing: Duration);

    /// Enable or disable the device's emergency-abort mechanism.
    fn set_failsafe(&mut self, enabled: bool);

    fn failsafe(&self) -> bool;
}

/// One injected pointer action, as observed by [`RecordingPointer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    MoveTo(i32, i32),
    Press,
    Release,
}

/// Shared view of the events a [`RecordingPointer`] has injected.
///
/// The log stays readable after the device itself has been moved into the
/// playback thread.
#[derive(Clone, Default)]
pub struct RecordingLog(Arc<Mutex<Vec<PointerEvent>>>);

impl RecordingLog {
    pub fn events(&self) -> Vec<PointerEvent> {
        self.0.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, event: PointerEvent) -> Result<()> {
        self.0
            .lock()
            .map(|mut e| e.push(event))
            .map_err(|_| PlaybackError::Device("recording log poisoned".into()))
    }
}

/// Pointer device that records events instead of injecting them.
pub struct RecordingPointer {
    log: RecordingLog,
    position: Point,
    pacing: Duration,
    failsafe: bool,
}

impl RecordingPointer {
    pub fn new() -> Self {
        Self::at([0, 0])
    }

    /// Start with the pointer resting at the given position.
    pub fn at(position: Point) -> Self {
        Self {
            log: RecordingLog::default(),
            position,
            pacing: Duration::ZERO,
            failsafe: true,
        }
    }

    /// Handle onto the event log; clone it before handing the device off.
    pub fn log(&self) -> RecordingLog {
        self.log.clone()
    }
}

impl Default for RecordingPointer {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerDevice for RecordingPointer {
    fn position(&mut self) -> Result<Point> {
        Ok(self.position)
    }

    fn move_to(&mut self, point: Point) -> Result<()> {
        self.log.push(PointerEvent::MoveTo(point[0], point[1]))?;
        self.position = point;
        Ok(())
    }

    fn press(&mut self) -> Result<()> {
        self.log.push(PointerEvent::Press)
    }

    fn release(&mut self) -> Result<()> {
        self.log.push(PointerEvent::Release)
    }

    fn pacing(&self) -> Duration {
        self.pacing
    }

    fn set_pacing(&mut self, pacing: Duration) {
        self.pacing = pacing;
    }

    fn set_failsafe(&mut self, enabled: bool) {
        self.failsafe = enabled;
    }

    fn failsafe(&self) -> bool {
        self.failsafe
    }
}

/// Real pointer injection via the `enigo` crate.
#[cfg(feature = "enigo-driver")]
pub struct EnigoPointer {
    enigo: enigo::Enigo,
    pacing: Duration,
    failsafe: bool,
}

#[cfg(feature = "enigo-driver")]
impl EnigoPointer {
    pub fn new() -> Result<Self> {
        let enigo = enigo::Enigo::new(&enigo::Settings::default())
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        Ok(Self {
            enigo,
            pacing: Duration::ZERO,
            failsafe: true,
        })
    }

    fn pace(&self) {
        if !self.pacing.is_zero() {
            std::thread::sleep(self.pacing);
        }
    }
}

#[cfg(feature = "enigo-driver")]
impl PointerDevice for EnigoPointer {
    fn position(&mut self) -> Result<Point> {
        use enigo::Mouse;
        let (x, y) = self
            .enigo
            .location()
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        Ok([x, y])
    }

    fn move_to(&mut self, point: Point) -> Result<()> {
        use enigo::Mouse;
        self.enigo
            .move_mouse(point[0], point[1], enigo::Coordinate::Abs)
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        self.pace();
        Ok(())
    }

    fn press(&mut self) -> Result<()> {
        use enigo::Mouse;
        self.enigo
            .button(enigo::Button::Left, enigo::Direction::Press)
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        self.pace();
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        use enigo::Mouse;
        self.enigo
            .button(enigo::Button::Left, enigo::Direction::Release)
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        self.pace();
        Ok(())
    }

    fn pacing(&self) -> Duration {
        self.pacing
    }

    fn set_pacing(&mut self, pacing: Duration) {
        self.pacing = pacing;
    }

    // enigo exposes no OS-level abort mechanism; the flag is tracked so the
    // engine's save/restore contract still holds.
    fn set_failsafe(&mut self, enabled: bool) {
        self.failsafe = enabled;
    }

    fn failsafe(&self) -> bool {
        self.failsafe
    }
}

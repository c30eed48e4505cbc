use image::DynamicImage;
use tracing::info;

use crate::{
    config::LineartConfig,
    error::{LineartError, Result},
    pipeline::Pipeline,
    types::EdgeMask,
};

/// Owns the current capture and the line art derived from it.
///
/// This is the session/context object shared between the capture side and
/// playback setup: a new capture discards the previous one along with any
/// stale line art, and regeneration (e.g. after toggling inversion) always
/// reprocesses the capture that is currently held.
pub struct SketchManager {
    capture: Option<DynamicImage>,
    lineart: Option<EdgeMask>,
}

impl SketchManager {
    pub fn new() -> Self {
        Self {
            capture: None,
            lineart: None,
        }
    }

    /// Replace the held capture, discarding the previous capture and its
    /// derived line art.
    pub fn set_capture(&mut self, capture: DynamicImage) {
        info!(
            width = capture.width(),
            height = capture.height(),
            "capture replaced"
        );
        self.capture = Some(capture);
        self.lineart = None;
    }

    /// Load a capture from disk.
    pub fn load_capture(&mut self, path: &std::path::Path) -> Result<()> {
        let img = image::open(path)?;
        self.set_capture(img);
        Ok(())
    }

    pub fn capture(&self) -> Option<&DynamicImage> {
        self.capture.as_ref()
    }

    pub fn lineart(&self) -> Option<&EdgeMask> {
        self.lineart.as_ref()
    }

    /// Re-run edge extraction on the held capture with the given parameters.
    ///
    /// On failure the previous line art is cleared rather than kept, so a
    /// stale mask can never be played back after a failed regeneration.
    pub fn regenerate(&mut self, config: &LineartConfig) -> Result<&EdgeMask> {
        let capture = self.capture.as_ref().ok_or(LineartError::NoCapture)?;
        self.lineart = None;
        let mask = Pipeline::from_config(config).render(capture)?;
        Ok(self.lineart.insert(mask))
    }

    pub fn clear(&mut self) {
        self.capture = None;
        self.lineart = None;
    }
}

impl Default for SketchManager {
    fn default() -> Self {
        Self::new()
    }
}

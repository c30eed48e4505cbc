//! Screen capture for the `capture` command.
//!
//! Uses `xcap` for cross-platform screenshots of the primary display, with
//! an optional crop to the region that will later be traced. On macOS the
//! terminal needs Screen Recording permission before this works.

use image::DynamicImage;
use tracing::debug;
use xcap::Monitor;

use crate::SketchKitError;

/// Rectangular screen region in pixels.
#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Capture the primary monitor, optionally cropped to `region`.
pub fn capture_screen(region: Option<Region>) -> Result<DynamicImage, SketchKitError> {
    let monitors =
        Monitor::all().map_err(|e| SketchKitError::Capture(format!("monitor enumeration: {e}")))?;
    let primary = monitors
        .first()
        .cloned()
        .ok_or_else(|| SketchKitError::Capture("no monitors found".into()))?;

    let raw = primary
        .capture_image()
        .map_err(|e| SketchKitError::Capture(format!("capture: {e}")))?;
    let screenshot = DynamicImage::ImageRgba8(raw);
    let (screen_w, screen_h) = (screenshot.width(), screenshot.height());
    if screen_w == 0 || screen_h == 0 {
        return Err(SketchKitError::Capture(
            "captured empty screenshot; check display and permissions".into(),
        ));
    }
    debug!(screen_w, screen_h, "screen captured");

    let Some(region) = region else {
        return Ok(screenshot);
    };
    if region.width == 0
        || region.height == 0
        || region.x.saturating_add(region.width) > screen_w
        || region.y.saturating_add(region.height) > screen_h
    {
        return Err(SketchKitError::Capture(format!(
            "crop region {}x{}+{}+{} exceeds screen {}x{}",
            region.width, region.height, region.x, region.y, screen_w, screen_h
        )));
    }
    Ok(screenshot.crop_imm(region.x, region.y, region.width, region.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore = "requires graphical display and screen recording permissions"]
    fn captured_image_has_dimensions() {
        let img = capture_screen(None).expect("capture failed");
        assert!(img.width() > 0 && img.height() > 0);
    }
}

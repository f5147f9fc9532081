//! Screen pixel grab for a selected region, via xcap.

use anyhow::{bail, Context, Result};
use image::RgbaImage;
use xcap::Monitor;

use super::Region;

/// Capture the pixels of `region` from the primary monitor.
///
/// The selection overlay covers the primary monitor, so region coordinates are
/// relative to it. The region is clamped to the captured frame; platform
/// capture failures propagate as errors.
pub fn grab_region(region: &Region) -> Result<RgbaImage> {
    let mut monitors = Monitor::all().context("enumerate monitors")?;
    if monitors.is_empty() {
        bail!("no monitors detected");
    }
    let idx = monitors
        .iter()
        .position(|m| m.is_primary().unwrap_or(false))
        .unwrap_or(0);
    let monitor = monitors.swap_remove(idx);

    let frame = monitor.capture_image().context("capture screen")?;
    crop_region(&frame, region)
}

fn crop_region(frame: &RgbaImage, region: &Region) -> Result<RgbaImage> {
    let (fw, fh) = frame.dimensions();

    let left = (region.left.max(0) as u32).min(fw);
    let top = (region.top.max(0) as u32).min(fh);
    let right = (region.right.max(0) as u32).min(fw);
    let bottom = (region.bottom.max(0) as u32).min(fh);
    let width = right.saturating_sub(left);
    let height = bottom.saturating_sub(top);
    if width == 0 || height == 0 {
        bail!("selection lies outside the captured screen");
    }

    Ok(image::imageops::crop_imm(frame, left, top, width, height).to_image())
}

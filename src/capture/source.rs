//! Rasterizing backends — the infrastructure layer that talks to the OS.
//!
//! Everything above this module works against the [`SnapshotSource`] trait,
//! so tests (and embedders with their own renderer) can substitute a
//! synthetic source. The production implementation grabs the primary
//! monitor via `xcap` and crops to the requested region.

use image::RgbaImage;
use xcap::Monitor;

use super::target::Region;

/// A backend that can rasterize a screen region to RGBA pixels at native
/// resolution. Implementations must be callable from a blocking worker
/// thread; the capture service never invokes them on the async runtime.
pub trait SnapshotSource: Send + Sync {
    fn rasterize(&self, region: Region) -> Result<RgbaImage, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to enumerate monitors: {0}")]
    MonitorEnumeration(String),

    #[error("No primary monitor found")]
    NoPrimaryMonitor,

    #[error("Screen capture failed: {0}")]
    CaptureFailed(String),

    #[error(
        "Region ({},{},{},{}) exceeds screen bounds ({}x{})",
        region.x, region.y, region.width, region.height,
        screen.0, screen.1
    )]
    OutOfBounds { region: Region, screen: (u32, u32) },
}

/// Rasterizes regions of the primary monitor.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScreenSource;

impl SnapshotSource for ScreenSource {
    fn rasterize(&self, region: Region) -> Result<RgbaImage, SourceError> {
        let monitors =
            Monitor::all().map_err(|e| SourceError::MonitorEnumeration(e.to_string()))?;

        let primary = monitors
            .into_iter()
            .find(|m| m.is_primary().unwrap_or(false))
            .or_else(|| {
                // Fallback: if no monitor reports as primary, use the first one
                let all = Monitor::all().ok()?;
                all.into_iter().next()
            })
            .ok_or(SourceError::NoPrimaryMonitor)?;

        let screen = primary
            .capture_image()
            .map_err(|e| SourceError::CaptureFailed(e.to_string()))?;

        crop(&screen, region)
    }
}

/// Crops a full-screen capture down to `region`, validating bounds first.
fn crop(screen: &RgbaImage, region: Region) -> Result<RgbaImage, SourceError> {
    let (screen_w, screen_h) = (screen.width(), screen.height());

    let fits = region.width > 0
        && region.height > 0
        && region.x.checked_add(region.width).is_some_and(|r| r <= screen_w)
        && region.y.checked_add(region.height).is_some_and(|b| b <= screen_h);
    if !fits {
        return Err(SourceError::OutOfBounds {
            region,
            screen: (screen_w, screen_h),
        });
    }

    Ok(image::imageops::crop_imm(screen, region.x, region.y, region.width, region.height)
        .to_image())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_valid_region() {
        let screen = RgbaImage::new(100, 100);
        let out = crop(&screen, Region::new(10, 10, 50, 40)).unwrap();
        assert_eq!((out.width(), out.height()), (50, 40));
    }

    #[test]
    fn crop_out_of_bounds_fails() {
        let screen = RgbaImage::new(100, 100);
        let err = crop(&screen, Region::new(80, 80, 30, 30)).unwrap_err();
        assert!(matches!(err, SourceError::OutOfBounds { .. }));
    }

    #[test]
    fn crop_zero_dimension_fails() {
        let screen = RgbaImage::new(100, 100);
        assert!(crop(&screen, Region::new(0, 0, 0, 50)).is_err());
    }
}

//! Screen capture domain — public API.
//!
//! This module owns the path from a bound [`CaptureTarget`] to a PNG
//! [`Snapshot`]: resolve the handle, rasterize the region through a
//! [`SnapshotSource`], scale, encode. Every call performs a fresh capture;
//! the underlying surface may have changed between calls, so snapshots are
//! never cached or shared.

mod snapshot;
mod source;
mod target;

pub use snapshot::{encode_snapshot, EncodeError, Snapshot};
pub use source::{ScreenSource, SnapshotSource, SourceError};
pub use target::{CaptureTarget, Region, TargetBinding};

use std::sync::Arc;
use std::time::Instant;

/// Per-invocation capture settings.
#[derive(Clone, Copy, Debug)]
pub struct CaptureOptions {
    /// Resolution multiplier applied during rasterization. Trades output
    /// size for fidelity; must be non-zero.
    pub scale: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self { scale: 4 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The target handle had no live region attached at invocation time.
    /// Distinct from a failed capture: the surface may simply not be
    /// mounted yet.
    #[error("Element not found")]
    TargetUnbound,

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Turns capture targets into snapshots via a pluggable rasterizing backend.
///
/// Cheap to clone; clones share the backend. Stateless between calls, so
/// concurrent captures of the same target run independently.
#[derive(Clone)]
pub struct CaptureService {
    source: Arc<dyn SnapshotSource>,
}

impl CaptureService {
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self { source }
    }

    /// Captures the primary monitor through the production backend.
    pub fn screen() -> Self {
        Self::new(Arc::new(ScreenSource))
    }

    /// Captures `target` and encodes a fresh PNG snapshot at
    /// `options.scale`.
    ///
    /// Fails fast with [`CaptureError::TargetUnbound`] when no region is
    /// bound. Rasterization and encoding run on a blocking worker thread;
    /// the async runtime stays responsive for the duration.
    pub async fn snapshot(
        &self,
        target: &CaptureTarget,
        options: CaptureOptions,
    ) -> Result<Snapshot, CaptureError> {
        let region = target.current().ok_or(CaptureError::TargetUnbound)?;
        if options.scale == 0 {
            return Err(EncodeError::InvalidScale(0).into());
        }

        let source = Arc::clone(&self.source);
        let start = Instant::now();

        let result = tokio::task::spawn_blocking(move || {
            let pixels = source.rasterize(region)?;
            let rasterize_ms = start.elapsed().as_millis();

            let snap = encode_snapshot(pixels, options.scale)?;
            log::info!(
                "Captured {}x{} region at scale {} in {}ms ({}ms rasterize, {} bytes)",
                region.width,
                region.height,
                options.scale,
                start.elapsed().as_millis(),
                rasterize_ms,
                snap.as_bytes().len()
            );
            Ok::<Snapshot, CaptureError>(snap)
        })
        .await;

        match result {
            Ok(Ok(snap)) => Ok(snap),
            Ok(Err(e)) => {
                log::error!("Capture failed: {}", e);
                Err(e)
            }
            // The worker panicked; surface it as a capture failure rather
            // than unwinding into the caller.
            Err(join) => {
                log::error!("Capture worker panicked: {}", join);
                Err(SourceError::CaptureFailed(join.to_string()).into())
            }
        }
    }
}

impl std::fmt::Debug for CaptureService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureService").finish_non_exhaustive()
    }
}

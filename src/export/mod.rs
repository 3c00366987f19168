//! Export domain — public API.
//!
//! The [`ExportCoordinator`] is the piece UIs actually invoke: it asks the
//! capture service for a fresh snapshot and delivers it, either to a file
//! or onto the system clipboard. Both operations are stateless between
//! calls — no locking, no queueing — so concurrent invocations each run
//! their own capture to completion and the clipboard holds whichever
//! write committed last.

mod clipboard;
mod file;

pub use clipboard::{ClipboardImage, ClipboardSink, SystemClipboard};
pub use file::default_save_path;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::capture::{CaptureError, CaptureOptions, CaptureService, CaptureTarget};

/// A delivery step failed after the capture itself succeeded. Kept apart
/// from [`CaptureError`] so callers can tell "nothing was produced" from
/// "produced but not delivered".
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Failed to write {path}: {reason}")]
    File { path: PathBuf, reason: String },

    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    #[error("Snapshot decode failed: {0}")]
    Decode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Outcome of one export invocation, in the shape notification layers
/// want: success, or a single human-readable reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    Success,
    Failure(String),
}

impl<T> From<&Result<T, ExportError>> for ExportOutcome {
    fn from(result: &Result<T, ExportError>) -> Self {
        match result {
            Ok(_) => ExportOutcome::Success,
            Err(e) => ExportOutcome::Failure(e.to_string()),
        }
    }
}

/// Captures a target and delivers the snapshot. Cheap to clone; clones
/// share the capture backend and clipboard sink.
#[derive(Clone)]
pub struct ExportCoordinator {
    capture: CaptureService,
    clipboard: Arc<dyn ClipboardSink>,
}

impl ExportCoordinator {
    pub fn new(capture: CaptureService, clipboard: Arc<dyn ClipboardSink>) -> Self {
        Self { capture, clipboard }
    }

    /// Production wiring: primary-monitor capture, `arboard` clipboard.
    pub fn system() -> Self {
        Self::new(CaptureService::screen(), Arc::new(SystemClipboard))
    }

    /// Captures `target` and writes the PNG to `path`, defaulting to
    /// `download.png` in the platform downloads directory.
    ///
    /// On capture failure no file is produced. Each call performs its own
    /// capture, so sequential saves of the same target yield independent
    /// snapshots.
    pub async fn save_to_file(
        &self,
        target: &CaptureTarget,
        options: CaptureOptions,
        path: Option<&Path>,
    ) -> Result<PathBuf, ExportError> {
        let snapshot = self.capture.snapshot(target, options).await?;

        let dest = path.map_or_else(file::default_save_path, Path::to_path_buf);
        let bytes = snapshot.into_bytes();
        let write_dest = dest.clone();
        let written = tokio::task::spawn_blocking(move || file::write_png(&write_dest, &bytes))
            .await
            .map_err(|join| DeliveryError::File {
                path: dest.clone(),
                reason: join.to_string(),
            })?;

        match written {
            Ok(()) => Ok(dest),
            Err(e) => {
                log::error!("File delivery failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Captures `target` and places the image on the system clipboard as a
    /// single write.
    ///
    /// A clipboard rejection (permission denied, unsupported context) is a
    /// [`DeliveryError`], not a capture failure: the snapshot existed but
    /// never reached the clipboard.
    pub async fn copy_to_clipboard(
        &self,
        target: &CaptureTarget,
        options: CaptureOptions,
    ) -> Result<(), ExportError> {
        let snapshot = self.capture.snapshot(target, options).await?;
        let image = clipboard::decode_for_clipboard(&snapshot)?;

        let sink = Arc::clone(&self.clipboard);
        let delivered = tokio::task::spawn_blocking(move || sink.write_image(image))
            .await
            .map_err(|join| DeliveryError::Clipboard(join.to_string()))?;

        if let Err(e) = &delivered {
            log::error!("Clipboard delivery failed: {}", e);
        }
        delivered.map_err(ExportError::from)
    }
}

impl std::fmt::Debug for ExportCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportCoordinator").finish_non_exhaustive()
    }
}

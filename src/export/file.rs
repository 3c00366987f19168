//! File delivery — writes snapshot bytes to disk.
//!
//! The default destination is the platform downloads directory:
//!   macOS:   ~/Downloads/download.png
//!   Linux:   ~/Downloads/download.png (per XDG)
//!   Windows: %USERPROFILE%\Downloads\download.png

use std::path::{Path, PathBuf};

use super::DeliveryError;

pub(super) const DEFAULT_FILENAME: &str = "download.png";

/// Destination used when the caller does not name one.
pub fn default_save_path() -> PathBuf {
    dirs::download_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(DEFAULT_FILENAME)
}

pub(super) fn write_png(path: &Path, bytes: &[u8]) -> Result<(), DeliveryError> {
    std::fs::write(path, bytes).map_err(|e| DeliveryError::File {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    log::info!("Saved snapshot ({} bytes) to {}", bytes.len(), path.display());
    Ok(())
}

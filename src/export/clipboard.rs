//! Clipboard delivery — infrastructure layer.
//!
//! A snapshot's PNG bytes are decoded back to raw RGBA before the write
//! because the system clipboard takes pixel data, not an encoded file.
//! Clipboard access lives behind [`ClipboardSink`] so the export
//! coordinator (and its tests) never touch the real clipboard directly.

use image::RgbaImage;

use crate::capture::Snapshot;

use super::DeliveryError;

/// Raw RGBA pixels ready for a clipboard write.
#[derive(Clone, Debug)]
pub struct ClipboardImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// One-shot image clipboard writer. Implementations perform exactly one
/// write per call and never read existing clipboard contents; the system
/// clipboard is shared state and last writer wins.
pub trait ClipboardSink: Send + Sync {
    fn write_image(&self, image: ClipboardImage) -> Result<(), DeliveryError>;
}

/// The system clipboard, via `arboard`.
///
/// A fresh `arboard::Clipboard` is opened per write; holding one open for
/// the process lifetime keeps a connection to the windowing system alive
/// that short-lived exports don't need.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write_image(&self, image: ClipboardImage) -> Result<(), DeliveryError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| DeliveryError::Clipboard(e.to_string()))?;

        clipboard
            .set_image(arboard::ImageData {
                width: image.width as usize,
                height: image.height as usize,
                bytes: image.rgba.into(),
            })
            .map_err(|e| DeliveryError::Clipboard(e.to_string()))
    }
}

/// Decodes a snapshot's PNG bytes into the raw form clipboards accept.
pub(super) fn decode_for_clipboard(snapshot: &Snapshot) -> Result<ClipboardImage, DeliveryError> {
    let decoded: RgbaImage = image::load_from_memory(snapshot.as_bytes())
        .map_err(|e| DeliveryError::Decode(e.to_string()))?
        .into_rgba8();

    Ok(ClipboardImage {
        width: decoded.width(),
        height: decoded.height(),
        rgba: decoded.into_raw(),
    })
}

//! Snapshot encoding — functional core.
//!
//! Takes raw RGBA pixels in, returns PNG bytes out. No OS access, no
//! shared state; every capture produces a fresh `Snapshot` and nothing
//! here caches one.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{imageops::FilterType, DynamicImage, ImageFormat, RgbaImage};

/// A PNG-encoded raster of a capture target at a point in time.
#[derive(Clone, Debug)]
pub struct Snapshot {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl Snapshot {
    /// Pixel width of the encoded image (region width × scale).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height of the encoded image (region height × scale).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The PNG bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.png
    }

    /// Renders the snapshot as a `data:image/png;base64,` URI for hosts
    /// that hand images to a web view.
    pub fn to_data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Invalid scale: {0}")]
    InvalidScale(u32),

    #[error("Scaled dimensions overflow: {width}x{height} at scale {scale}")]
    DimensionOverflow { width: u32, height: u32, scale: u32 },

    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Scales `pixels` up by the integer factor `scale` and encodes the result
/// as PNG. PNG is lossless, so there is no quality knob to expose; `scale`
/// is the only fidelity/size trade-off.
pub fn encode_snapshot(pixels: RgbaImage, scale: u32) -> Result<Snapshot, EncodeError> {
    if scale == 0 {
        return Err(EncodeError::InvalidScale(scale));
    }

    let (src_w, src_h) = (pixels.width(), pixels.height());
    let width = src_w
        .checked_mul(scale)
        .ok_or(EncodeError::DimensionOverflow {
            width: src_w,
            height: src_h,
            scale,
        })?;
    let height = src_h
        .checked_mul(scale)
        .ok_or(EncodeError::DimensionOverflow {
            width: src_w,
            height: src_h,
            scale,
        })?;

    let scaled = if scale == 1 {
        DynamicImage::ImageRgba8(pixels)
    } else {
        DynamicImage::ImageRgba8(pixels).resize_exact(width, height, FilterType::Lanczos3)
    };

    let mut png: Vec<u8> = Vec::new();
    scaled
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(Snapshot { png, width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgba([0, 0, 0, 255])
            } else {
                image::Rgba([255, 255, 255, 255])
            }
        })
    }

    #[test]
    fn encodes_png_magic() {
        let snap = encode_snapshot(checkerboard(8, 8), 1).unwrap();
        assert_eq!(&snap.as_bytes()[..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn dimensions_scale_with_factor() {
        for scale in [1, 2, 4, 8] {
            let snap = encode_snapshot(checkerboard(10, 6), scale).unwrap();
            assert_eq!((snap.width(), snap.height()), (10 * scale, 6 * scale));

            // Decoded dimensions must agree with the advertised ones.
            let decoded = image::load_from_memory(snap.as_bytes()).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (10 * scale, 6 * scale));
        }
    }

    #[test]
    fn zero_scale_is_rejected() {
        let err = encode_snapshot(checkerboard(4, 4), 0).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidScale(0)));
    }

    #[test]
    fn overflow_scale_is_rejected() {
        let err = encode_snapshot(checkerboard(2, 2), u32::MAX).unwrap_err();
        assert!(matches!(err, EncodeError::DimensionOverflow { .. }));
    }

    #[test]
    fn data_uri_has_png_prefix() {
        let snap = encode_snapshot(checkerboard(4, 4), 1).unwrap();
        assert!(snap.to_data_uri().starts_with("data:image/png;base64,"));
    }
}

//! Upload ingest: validate → decode → size → center → palette → element.
//!
//! Browser hosts decode with the platform and hand over RGBA pixels via
//! [`DecodedImage::from_rgba`]; native hosts can pass the raw file bytes to
//! [`decode`] (behind the `decode` feature). Either way, an element only
//! exists once decoding has succeeded, so a failed upload leaves nothing
//! behind.

use crate::config::DesignerConfig;
use crate::id::ElementId;
use crate::model::{DesignElement, View, ZoneTag};
use crate::palette::extract_palette;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("not an image: {0}")]
    NotAnImage(String),
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("bad bitmap: {0}")]
    BadBitmap(String),
}

/// Decoded RGBA8 pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    rgba: Vec<u8>,
}

impl DecodedImage {
    /// Wrap an RGBA8 buffer. Rejects empty images and buffers whose length
    /// does not match `width × height × 4`.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, IngestError> {
        if width == 0 || height == 0 {
            return Err(IngestError::BadBitmap(format!(
                "zero-sized image {width}x{height}"
            )));
        }
        let expected = u64::from(width) * u64::from(height) * 4;
        if rgba.len() as u64 != expected {
            return Err(IngestError::BadBitmap(format!(
                "expected {expected} bytes for {width}x{height} RGBA, got {}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// RGBA of the pixel at `(x, y)`. Coordinates are clamped to the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let i = (y * self.width as usize + x) * 4;
        [
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ]
    }
}

/// Reject anything that isn't an `image/*` upload before spending time on it.
pub fn check_media_type(mime: &str) -> Result<(), IngestError> {
    if mime.trim().to_ascii_lowercase().starts_with("image/") {
        Ok(())
    } else {
        Err(IngestError::NotAnImage(mime.to_string()))
    }
}

/// Decode an encoded upload (PNG, JPEG, GIF, WebP) to RGBA.
#[cfg(feature = "decode")]
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, IngestError> {
    let img = image::load_from_memory(bytes).map_err(|e| IngestError::Decode(e.to_string()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    DecodedImage::from_rgba(width, height, rgba.into_raw())
}

/// Initial on-garment size: scale so the larger side equals `max_dimension`,
/// keeping the aspect ratio. Small images are scaled up as well.
pub fn initial_size(width: u32, height: u32, max_dimension: f32) -> (f32, f32) {
    let (w, h) = (width as f32, height as f32);
    // Pin the larger side to the cap exactly; derive the other from it.
    if w >= h {
        (max_dimension, h * max_dimension / w)
    } else {
        (w * max_dimension / h, max_dimension)
    }
}

/// Build a new element from a decoded upload, centered in the zone.
pub fn create_element(
    src: impl Into<String>,
    image: &DecodedImage,
    view: View,
    config: &DesignerConfig,
) -> DesignElement {
    let (width, height) = initial_size(image.width, image.height, config.max_initial_dimension);
    let colors = extract_palette(image, &config.palette);
    let element = DesignElement {
        id: ElementId::fresh(),
        src: src.into(),
        x: (config.zone.width - width) / 2.0,
        y: (config.zone.height - height) / 2.0,
        width,
        height,
        original_width: image.width as f32,
        original_height: image.height as f32,
        rotation: 0.0,
        colors,
        view,
        zone: ZoneTag::Center,
    };
    log::debug!(
        "ingest {}: {}x{} -> {:.1}x{:.1} at ({:.1}, {:.1}), {} colors",
        element.id,
        image.width,
        image.height,
        width,
        height,
        element.x,
        element.y,
        element.colors.len()
    );
    element
}

/// Full ingest path for encoded bytes: media-type check, decode, element.
#[cfg(feature = "decode")]
pub fn ingest_bytes(
    src: impl Into<String>,
    mime: &str,
    bytes: &[u8],
    view: View,
    config: &DesignerConfig,
) -> Result<DesignElement, IngestError> {
    check_media_type(mime)?;
    let image = decode(bytes)?;
    Ok(create_element(src, &image, view, config))
}

//! Image source decoding
//!
//! A source reference is either a `data:` URL or a filesystem path. Decoding
//! happens off the async runtime.

use std::future::Future;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::RgbaImage;

use crate::types::{CoverError, Result};

/// A decoded image, ready to composite
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: RgbaImage,
}

impl DecodedImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            width: pixels.width(),
            height: pixels.height(),
            pixels,
        }
    }
}

/// Resolves an image source reference into pixels
pub trait ImageDecoder {
    fn decode(&self, src: &str) -> impl Future<Output = Result<DecodedImage>> + Send;
}

/// Decodes `data:` URLs and image files
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceDecoder;

impl ImageDecoder for SourceDecoder {
    fn decode(&self, src: &str) -> impl Future<Output = Result<DecodedImage>> + Send {
        let src = src.to_string();
        async move {
            let bytes = match src.strip_prefix("data:") {
                Some(rest) => data_url_bytes(rest)?,
                None => tokio::fs::read(&src).await?,
            };
            decode_bytes(bytes).await
        }
    }
}

/// Decode encoded image bytes (PNG, JPEG) on a blocking thread
pub async fn decode_bytes(bytes: Vec<u8>) -> Result<DecodedImage> {
    let pixels =
        tokio::task::spawn_blocking(move || image::load_from_memory(&bytes).map(|img| img.to_rgba8()))
            .await??;
    Ok(DecodedImage::new(pixels))
}

/// Payload of a data URL, without the leading `data:`
fn data_url_bytes(rest: &str) -> Result<Vec<u8>> {
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| CoverError::Decode("data URL has no payload".to_string()))?;

    if meta.ends_with(";base64") {
        STANDARD
            .decode(payload.trim())
            .map_err(|e| CoverError::Decode(format!("invalid base64 payload: {}", e)))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

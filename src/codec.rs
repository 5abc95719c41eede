//! JPEG codec and resize operations
//!
//! Thin wrapper around the `image` crate so the rest of the pipeline can
//! treat encode/decode/resize as black boxes. A payload the decoder rejects
//! surfaces as [`Error::Codec`] and is dropped by the receive loop rather
//! than killing the connection.

use crate::error::{Error, Result};
use crate::frame::Frame;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ExtendedColorType, ImageFormat, RgbImage};

/// Default JPEG quality used by the camera daemon
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Encode a frame as JPEG
pub fn encode_jpeg(frame: &Frame, quality: u8) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .encode(
            &frame.pixels,
            frame.width,
            frame.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| Error::Codec(e.to_string()))?;
    Ok(out)
}

/// Decode a JPEG payload into an RGB frame
pub fn decode_jpeg(payload: &[u8]) -> Result<Frame> {
    let img = image::load_from_memory_with_format(payload, ImageFormat::Jpeg)
        .map_err(|e| Error::Codec(e.to_string()))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Frame {
        width,
        height,
        pixels: rgb.into_raw(),
    })
}

/// Produce a resized copy of a frame at `scale` in (0,1]
///
/// Uses linear interpolation, matching what the original-resolution boxes are
/// remapped against. Dimensions are clamped to at least one pixel.
pub fn resize(frame: &Frame, scale: f32) -> Result<Frame> {
    if !(scale > 0.0 && scale <= 1.0) {
        return Err(Error::InvalidParameter(format!(
            "scale factor {} outside (0, 1]",
            scale
        )));
    }
    let src = RgbImage::from_raw(frame.width, frame.height, frame.pixels.clone())
        .ok_or_else(|| Error::Codec("frame buffer does not match dimensions".to_string()))?;
    let new_w = ((frame.width as f32 * scale) as u32).max(1);
    let new_h = ((frame.height as f32 * scale) as u32).max(1);
    let resized = image::imageops::resize(&src, new_w, new_h, FilterType::Triangle);
    Ok(Frame {
        width: new_w,
        height: new_h,
        pixels: resized.into_raw(),
    })
}

//! Decoded raster frame

/// A decoded RGB raster image.
///
/// Pixels are tightly packed RGB8, row-major. Each pipeline stage owns the
/// frame it is currently holding; stages that need both the original and a
/// derived version (e.g. a downscaled copy for inference) clone explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// RGB8 pixel data, `width * height * 3` bytes
    pub pixels: Vec<u8>,
}

impl Frame {
    /// Create a frame from raw RGB8 pixel data.
    ///
    /// Returns `None` when the buffer length does not match the dimensions.
    pub fn from_rgb8(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) * 3 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a black frame of the given dimensions.
    pub fn black(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb8_rejects_mismatched_buffer() {
        assert!(Frame::from_rgb8(4, 4, vec![0u8; 48]).is_some());
        assert!(Frame::from_rgb8(4, 4, vec![0u8; 47]).is_none());
    }

    #[test]
    fn test_black_dimensions() {
        let f = Frame::black(8, 6);
        assert_eq!(f.pixels.len(), 8 * 6 * 3);
    }
}

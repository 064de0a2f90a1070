//! 8-bit RGB pixel buffer.
//!
//! [`PixelBuffer`] is the image container every swatch crate passes around:
//! a tightly packed, row-major grid of `[R, G, B]` byte triples.
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! There is no alpha channel and no stride padding. A buffer with zero
//! width or height is representable (it holds no bytes); operations that
//! need pixels reject it themselves.
//!
//! # Usage
//!
//! ```rust
//! use swatch_core::PixelBuffer;
//!
//! let mut img = PixelBuffer::filled(4, 2, [255, 255, 255]);
//! img.set_pixel(1, 1, [255, 0, 0]);
//! assert_eq!(img.pixel(1, 1), [255, 0, 0]);
//! assert_eq!(img.pixel(0, 0), [255, 255, 255]);
//! ```

use crate::{Error, Result};

/// Number of channels per pixel.
pub const CHANNELS: usize = 3;

/// Owned 8-bit RGB image buffer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Creates a black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0])
    }

    /// Creates an image with every pixel set to `rgb`.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * CHANNELS);
        for _ in 0..pixels {
            data.extend_from_slice(&rgb);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Wraps existing packed RGB bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * 3`, or if that product overflows.
    ///
    /// # Example
    ///
    /// ```rust
    /// use swatch_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::from_data(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(img.pixel(1, 0), [4, 5, 6]);
    /// assert!(PixelBuffer::from_data(2, 2, vec![0; 6]).is_err());
    /// ```
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "byte count overflows"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds an image from one `[R, G, B]` triple per pixel, row-major.
    pub fn from_pixels(width: u32, height: u32, pixels: &[[u8; 3]]) -> Result<Self> {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        Self::from_data(width, height, data)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// `true` when width or height is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Packed RGB bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable packed RGB bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds. Use
    /// [`checked_pixel`](Self::checked_pixel) for a fallible lookup.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Returns the pixel at `(x, y)` or [`Error::OutOfBounds`].
    pub fn checked_pixel(&self, x: u32, y: u32) -> Result<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok(self.pixel(x, y))
    }

    /// Overwrites the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        let i = self.index(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgb);
    }

    /// Iterates pixels in row-major order.
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = [u8; 3]> + '_ {
        self.data.chunks_exact(CHANNELS).map(|p| [p[0], p[1], p[2]])
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

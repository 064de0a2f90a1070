//! # swatch-io
//!
//! Image source and sink around the `image` crate.
//!
//! - [`read`] / [`decode`] - any supported file or byte stream to an RGB
//!   [`PixelBuffer`]; alpha is dropped
//! - [`placeholder`] - 600x400 white image for runs without an input
//! - [`fit_width`] - downscale images wider than [`MAX_WIDTH`]
//! - [`write`] / [`encode_png`] - RGB buffer to file or PNG bytes
//!
//! # Example
//!
//! ```rust
//! use swatch_io::{decode, encode_png, placeholder};
//!
//! let img = placeholder();
//! let png = encode_png(&img).unwrap();
//! assert_eq!(decode(&png).unwrap(), img);
//! ```

#![warn(missing_docs)]

mod error;

use std::io::Cursor;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, ImageReader, RgbImage};
use swatch_core::PixelBuffer;
use tracing::{debug, trace};

pub use error::{IoError, IoResult};

/// Widest image handed to the recolorer; wider inputs are scaled down.
pub const MAX_WIDTH: u32 = 1200;

/// Placeholder width.
pub const PLACEHOLDER_WIDTH: u32 = 600;

/// Placeholder height.
pub const PLACEHOLDER_HEIGHT: u32 = 400;

/// Reads an image file, format detected from its content.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    trace!(path = %path.display(), "read");
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let buffer = from_rgb_image(img.to_rgb8())?;
    debug!(path = %path.display(), width = buffer.width(), height = buffer.height(), "decoded");
    Ok(buffer)
}

/// Decodes an in-memory image.
pub fn decode(bytes: &[u8]) -> IoResult<PixelBuffer> {
    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;
    from_rgb_image(img.to_rgb8())
}

/// White 600x400 image.
pub fn placeholder() -> PixelBuffer {
    PixelBuffer::filled(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, [255, 255, 255])
}

/// Scales `image` down to `max_width`, keeping the aspect ratio.
///
/// The new height is `trunc(height * max_width / width)`, at least 1.
/// Images no wider than `max_width` come back unchanged.
pub fn fit_width(image: &PixelBuffer, max_width: u32) -> IoResult<PixelBuffer> {
    if image.width() <= max_width || max_width == 0 {
        return Ok(image.clone());
    }
    let ratio = max_width as f64 / image.width() as f64;
    let height = ((image.height() as f64 * ratio) as u32).max(1);
    debug!(
        from_w = image.width(),
        from_h = image.height(),
        to_w = max_width,
        to_h = height,
        "fit width"
    );

    let src = to_rgb_image(image)?;
    let resized = image::imageops::resize(&src, max_width, height, FilterType::CatmullRom);
    from_rgb_image(resized)
}

/// Writes `image`, format chosen by extension (`png`, `jpg`/`jpeg`, `bmp`,
/// `tif`/`tiff`). Paths without an extension are written as PNG.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    let format = output_format(path)?;
    trace!(path = %path.display(), ?format, "write");
    image::save_buffer_with_format(
        path,
        image.data(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
        format,
    )?;
    Ok(())
}

/// Encodes `image` as PNG bytes.
pub fn encode_png(image: &PixelBuffer) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        image.data(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(out)
}

fn output_format(path: &Path) -> IoResult<ImageFormat> {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return Ok(ImageFormat::Png),
    };
    match ext.as_str() {
        "png" => Ok(ImageFormat::Png),
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "bmp" => Ok(ImageFormat::Bmp),
        "tif" | "tiff" => Ok(ImageFormat::Tiff),
        other => Err(IoError::UnsupportedFormat(format!(".{other}"))),
    }
}

fn from_rgb_image(img: RgbImage) -> IoResult<PixelBuffer> {
    let (w, h) = img.dimensions();
    Ok(PixelBuffer::from_data(w, h, img.into_raw())?)
}

fn to_rgb_image(image: &PixelBuffer) -> IoResult<RgbImage> {
    RgbImage::from_raw(image.width(), image.height(), image.data().to_vec()).ok_or_else(|| {
        swatch_core::Error::invalid_dimensions(image.width(), image.height(), "buffer too small")
            .into()
    })
}

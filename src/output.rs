//! # Output Module
//!
//! Writes rendered images to disk:
//! - ASCII PPM (`P3`) for plain-text bitmaps
//! - PNG for everyday viewing
//!
//! The renderer hands over gamma-corrected but unclamped f32 values. This
//! module clamps each channel to [0, 1] and quantizes with `255.999 * x`, so
//! that a full-intensity channel maps to 255.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageBuffer, ImageEncoder, Rgb, RgbImage};
use log::info;
use thiserror::Error;

use crate::interval::Interval;
use crate::render::RenderedImage;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    /// The file extension does not name a supported format.
    #[error("unsupported file extension '{0}' (expected .ppm or .png)")]
    UnsupportedExtension(String),

    /// The output file could not be created or written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Destination path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Encoding failed.
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// ASCII portable pixmap
    Ppm,
    /// Portable network graphics
    Png,
}

impl ImageFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, OutputError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "ppm" => Ok(ImageFormat::Ppm),
            "png" => Ok(ImageFormat::Png),
            _ => Err(OutputError::UnsupportedExtension(extension)),
        }
    }
}

/// Quantize a channel value to 8 bits.
pub fn quantize(value: f32) -> u8 {
    (255.999 * Interval::UNIT.clamp(value)) as u8
}

/// Convert a rendered image to 8-bit RGB.
pub fn to_rgb8(image: &RenderedImage) -> RgbImage {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([quantize(pixel[0]), quantize(pixel[1]), quantize(pixel[2])])
    })
}

/// Save a rendered image, choosing the format from the extension.
pub fn save_image(image: &RenderedImage, path: &Path) -> Result<(), OutputError> {
    let format = ImageFormat::from_path(path)?;
    let rgb = to_rgb8(image);

    let io_error = |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);

    match format {
        ImageFormat::Ppm => {
            let encoder = PnmEncoder::new(&mut writer).with_subtype(PnmSubtype::Pixmap(SampleEncoding::Ascii));
            encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
        }
        ImageFormat::Png => {
            let encoder = image::codecs::png::PngEncoder::new(&mut writer);
            encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
        }
    }
    // Surface buffered write errors instead of losing them on drop
    writer.flush().map_err(io_error)?;

    info!("Image saved as {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("spherepath-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(0.5), 127);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(3.5), 255);
        assert_eq!(quantize(-1.0), 0);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ImageFormat::from_path(Path::new("a/result.ppm")).unwrap(), ImageFormat::Ppm);
        assert_eq!(ImageFormat::from_path(Path::new("out.PNG")).unwrap(), ImageFormat::Png);
        assert!(matches!(
            ImageFormat::from_path(Path::new("out.exr")),
            Err(OutputError::UnsupportedExtension(ext)) if ext == "exr"
        ));
        assert!(ImageFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_save_ppm_is_ascii() {
        let mut image: RenderedImage = ImageBuffer::new(2, 1);
        image.put_pixel(0, 0, Rgb([1.0, 0.0, 0.5]));
        image.put_pixel(1, 0, Rgb([2.0, 0.25, 0.0]));

        let path = scratch_path("ascii.ppm");
        save_image(&image, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(text.starts_with("P3"));
        let numbers: Vec<u32> = text
            .split_whitespace()
            .skip(1)
            .map(|token| token.parse().unwrap())
            .collect();
        assert_eq!(numbers, vec![2, 1, 255, 255, 0, 127, 255, 63, 0]);
    }

    #[test]
    fn test_save_png_round_trip() {
        let mut image: RenderedImage = ImageBuffer::new(3, 2);
        image.put_pixel(2, 1, Rgb([0.5, 1.0, 0.0]));

        let path = scratch_path("round.png");
        save_image(&image, &path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(2, 1).0, [127, 255, 0]);
        assert_eq!(loaded.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_save_ppm_writes_every_pixel() {
        // Larger than the writer's buffer, so the tail only lands on flush
        let image: RenderedImage = ImageBuffer::from_pixel(96, 64, Rgb([1.0, 1.0, 1.0]));

        let path = scratch_path("full.ppm");
        save_image(&image, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let samples: Vec<&str> = text.split_whitespace().skip(4).collect();
        assert_eq!(samples.len(), 96 * 64 * 3);
        assert!(samples.iter().all(|&s| s == "255"));
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let image: RenderedImage = ImageBuffer::new(1, 1);
        let path = scratch_path("missing-dir").join("out.png");
        assert!(matches!(save_image(&image, &path), Err(OutputError::Io { .. })));
    }
}

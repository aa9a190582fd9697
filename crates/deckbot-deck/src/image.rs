//! Raster images placed on slides
//!
//! Format and size come from the `image` crate's format guessing and header
//! decoding; the pixel data itself is never decoded. The size keeps the
//! aspect ratio when a picture is placed by height alone.

use crate::error::{DeckError, Result};
use ::image::ImageReader;
use std::io::Cursor;

/// Image encodings a slide can embed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    WebP,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::WebP => "webp",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::WebP => "image/webp",
        }
    }

    fn from_codec(format: ::image::ImageFormat) -> Option<Self> {
        match format {
            ::image::ImageFormat::Png => Some(ImageFormat::Png),
            ::image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
            ::image::ImageFormat::Gif => Some(ImageFormat::Gif),
            ::image::ImageFormat::Bmp => Some(ImageFormat::Bmp),
            ::image::ImageFormat::WebP => Some(ImageFormat::WebP),
            _ => None,
        }
    }
}

/// An encoded image with its pixel dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    bytes: Vec<u8>,
    format: ImageFormat,
    width_px: u32,
    height_px: u32,
}

impl Image {
    /// Detect format and dimensions from encoded bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let reader = ImageReader::new(Cursor::new(bytes.as_slice())).with_guessed_format()?;
        let codec = reader
            .format()
            .ok_or_else(|| DeckError::UnsupportedImage("unknown image format".to_string()))?;
        let format = ImageFormat::from_codec(codec).ok_or_else(|| {
            DeckError::UnsupportedImage(format!("{codec:?} cannot be embedded in a slide"))
        })?;

        let (width_px, height_px) = reader.into_dimensions()?;
        if width_px == 0 || height_px == 0 {
            return Err(DeckError::UnsupportedImage(format!(
                "empty {} image",
                format.extension()
            )));
        }

        Ok(Self {
            bytes,
            format,
            width_px,
            height_px,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width_px) / f64::from(self.height_px)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ::image::DynamicImage;

    /// Blank image of the given size, encoded in `format`
    pub(crate) fn encoded(format: ::image::ImageFormat, width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::new_rgb8(width, height)
            .write_to(&mut bytes, format)
            .unwrap();
        bytes.into_inner()
    }

    pub(crate) fn sample_png(width: u32, height: u32) -> Vec<u8> {
        encoded(::image::ImageFormat::Png, width, height)
    }

    #[test]
    fn test_png_dimensions() {
        let image = Image::from_bytes(sample_png(300, 150)).unwrap();
        assert_eq!(image.format(), ImageFormat::Png);
        assert_eq!(image.dimensions(), (300, 150));
        assert!((image.aspect_ratio() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_jpeg_and_gif_dimensions() {
        let jpeg = Image::from_bytes(encoded(::image::ImageFormat::Jpeg, 400, 200)).unwrap();
        assert_eq!(jpeg.format(), ImageFormat::Jpeg);
        assert_eq!(jpeg.dimensions(), (400, 200));
        assert_eq!(jpeg.format().content_type(), "image/jpeg");

        let gif = Image::from_bytes(encoded(::image::ImageFormat::Gif, 64, 48)).unwrap();
        assert_eq!(gif.format(), ImageFormat::Gif);
        assert_eq!(gif.dimensions(), (64, 48));
    }

    #[test]
    fn test_webp_logo() {
        let image = Image::from_bytes(encoded(::image::ImageFormat::WebP, 300, 100)).unwrap();
        assert_eq!(image.format(), ImageFormat::WebP);
        assert_eq!(image.format().extension(), "webp");
        assert_eq!(image.dimensions(), (300, 100));
        assert!((image.aspect_ratio() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_format() {
        let err = Image::from_bytes(b"<html>not found</html>".to_vec()).unwrap_err();
        assert!(matches!(err, DeckError::UnsupportedImage(_)));
    }

    #[test]
    fn test_truncated_png() {
        let mut bytes = sample_png(20, 10);
        bytes.truncate(12);
        let err = Image::from_bytes(bytes).unwrap_err();
        assert!(matches!(err, DeckError::Decode(_)));
    }
}

//! # Image Loading and Decoding
//!
//! Reads step screenshots and the cover logo from file paths or data URIs
//! and prepares them for PDF embedding. JPEG images pass through without
//! re-encoding (the PDF spec supports DCTDecode natively). PNG images are
//! decoded to RGB pixels with a separate alpha channel for SMask
//! transparency.

use std::io::Cursor;

use crate::error::ReportError;

/// A fully decoded/loaded image ready for PDF embedding.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub pixel_data: ImagePixelData,
    pub width_px: u32,
    pub height_px: u32,
}

/// The pixel data in a format the PDF serializer can consume directly.
#[derive(Debug, Clone)]
pub enum ImagePixelData {
    /// Raw JPEG bytes, embedded directly with DCTDecode.
    Jpeg {
        data: Vec<u8>,
        color_space: JpegColorSpace,
    },
    /// Decoded RGB pixels + optional alpha channel.
    Decoded {
        /// width * height * 3 bytes (RGB)
        rgb: Vec<u8>,
        /// width * height bytes (grayscale alpha). None if fully opaque.
        alpha: Option<Vec<u8>>,
    },
}

/// JPEG color space for the PDF /ColorSpace entry.
#[derive(Debug, Clone, Copy)]
pub enum JpegColorSpace {
    DeviceRGB,
    DeviceGray,
}

/// Where image bytes come from. The layout reads each image right before
/// the item that shows it is placed.
pub trait ImageSource {
    fn read_image_bytes(&self, src: &str) -> Result<Vec<u8>, ReportError>;
}

/// Reads `data:image/...;base64,` URIs and files on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImageSource;

impl ImageSource for FileImageSource {
    fn read_image_bytes(&self, src: &str) -> Result<Vec<u8>, ReportError> {
        // Data URI: data:image/png;base64,iVBOR...
        if src.starts_with("data:image/") {
            let comma_pos = src.find(',').ok_or_else(|| ReportError::ResourceNotFound {
                path: truncate_for_message(src),
                reason: "invalid data URI: missing comma".to_string(),
            })?;
            return base64_decode(&src[comma_pos + 1..]).map_err(|reason| {
                ReportError::ResourceNotFound {
                    path: truncate_for_message(src),
                    reason,
                }
            });
        }

        std::fs::read(src).map_err(|e| ReportError::ResourceNotFound {
            path: src.to_string(),
            reason: e.to_string(),
        })
    }
}

fn truncate_for_message(src: &str) -> String {
    src.chars().take(48).collect()
}

fn base64_decode(input: &str) -> Result<Vec<u8>, String> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(input.trim())
        .map_err(|e| format!("Base64 decode error: {}", e))
}

/// Read intrinsic pixel dimensions without decoding the pixels.
pub fn read_image_dimensions(data: &[u8]) -> Result<(u32, u32), ReportError> {
    let (width, height) = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ReportError::MeasurementFailure(format!("image format detection: {}", e)))?
        .into_dimensions()
        .map_err(|e| ReportError::MeasurementFailure(format!("image dimensions: {}", e)))?;
    if width == 0 || height == 0 {
        return Err(ReportError::MeasurementFailure(format!(
            "image has zero size ({}x{})",
            width, height
        )));
    }
    Ok((width, height))
}

/// Detect image format from magic bytes and decode accordingly.
pub fn decode_image_bytes(data: &[u8]) -> Result<LoadedImage, ReportError> {
    if data.len() < 4 {
        return Err(ReportError::MeasurementFailure(
            "Image data too short".to_string(),
        ));
    }

    let decoded = if is_jpeg(data) {
        decode_jpeg(data)
    } else if is_png(data) {
        decode_png(data)
    } else {
        Err("Unsupported image format (expected JPEG or PNG)".to_string())
    };
    decoded.map_err(ReportError::MeasurementFailure)
}

fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8
}

fn is_png(data: &[u8]) -> bool {
    data.len() >= 4 && data[0] == 0x89 && data[1] == 0x50 && data[2] == 0x4E && data[3] == 0x47
}

/// JPEG: read dimensions and color space without decoding pixels.
fn decode_jpeg(data: &[u8]) -> Result<LoadedImage, String> {
    let reader = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("JPEG format detection error: {}", e))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| format!("Failed to read JPEG dimensions: {}", e))?;

    Ok(LoadedImage {
        pixel_data: ImagePixelData::Jpeg {
            data: data.to_vec(),
            color_space: detect_jpeg_color_space(data),
        },
        width_px: width,
        height_px: height,
    })
}

/// Scan JPEG markers to find the SOF (Start of Frame) segment and read
/// the number of components to determine color space.
fn detect_jpeg_color_space(data: &[u8]) -> JpegColorSpace {
    let mut i = 2; // skip SOI marker (FF D8)
    while i + 1 < data.len() {
        if data[i] != 0xFF {
            break;
        }
        let marker = data[i + 1];
        // SOF markers: C0-C3, C5-C7, C9-CB, CD-CF
        let is_sof = matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF);
        if is_sof && i + 9 < data.len() {
            // length(2) + precision(1) + height(2) + width(2) + num_components(1)
            return if data[i + 9] == 1 {
                JpegColorSpace::DeviceGray
            } else {
                JpegColorSpace::DeviceRGB
            };
        }
        if i + 3 < data.len() {
            let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
            i += 2 + seg_len;
        } else {
            break;
        }
    }
    JpegColorSpace::DeviceRGB
}

/// PNG: decode to RGBA, split into RGB + alpha.
fn decode_png(data: &[u8]) -> Result<LoadedImage, String> {
    let img = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("PNG format detection error: {}", e))?
        .decode()
        .map_err(|e| format!("Failed to decode PNG: {}", e))?;

    let rgba = img.to_rgba8();
    let width = rgba.width();
    let height = rgba.height();

    let pixel_count = (width * height) as usize;
    let mut rgb = Vec::with_capacity(pixel_count * 3);
    let mut alpha = Vec::with_capacity(pixel_count);
    let mut has_transparency = false;

    for pixel in rgba.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel[3]);
        if pixel[3] != 255 {
            has_transparency = true;
        }
    }

    Ok(LoadedImage {
        pixel_data: ImagePixelData::Decoded {
            rgb,
            alpha: if has_transparency { Some(alpha) } else { None },
        },
        width_px: width,
        height_px: height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32, alpha: u8) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, alpha]));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(encoder, img.as_raw(), width, height, image::ColorType::Rgba8)
            .unwrap();
        buf
    }

    #[test]
    fn test_is_jpeg() {
        assert!(is_jpeg(&[0xFF, 0xD8, 0xFF, 0xE0]));
        assert!(!is_jpeg(&[0x89, 0x50, 0x4E, 0x47]));
        assert!(!is_jpeg(&[0xFF]));
    }

    #[test]
    fn test_is_png() {
        assert!(is_png(&[0x89, 0x50, 0x4E, 0x47]));
        assert!(!is_png(&[0xFF, 0xD8, 0xFF, 0xE0]));
        assert!(!is_png(&[0x89, 0x50]));
    }

    #[test]
    fn test_missing_file_is_resource_not_found() {
        let err = FileImageSource
            .read_image_bytes("./definitely/not/here.png")
            .unwrap_err();
        match err {
            ReportError::ResourceNotFound { path, .. } => {
                assert_eq!(path, "./definitely/not/here.png")
            }
            other => panic!("expected ResourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_data_uri() {
        let result = FileImageSource.read_image_bytes("data:image/png;base64");
        assert!(matches!(result, Err(ReportError::ResourceNotFound { .. })));
    }

    #[test]
    fn test_base64_data_uri() {
        use base64::Engine;
        let png = png_bytes(3, 2, 255);
        let b64 = base64::engine::general_purpose::STANDARD.encode(&png);
        let bytes = FileImageSource
            .read_image_bytes(&format!("data:image/png;base64,{}", b64))
            .unwrap();
        assert_eq!(bytes, png);
        assert_eq!(read_image_dimensions(&bytes).unwrap(), (3, 2));
    }

    #[test]
    fn test_too_short_data() {
        let result = decode_image_bytes(&[0x00, 0x01]);
        assert!(matches!(result, Err(ReportError::MeasurementFailure(_))));
    }

    #[test]
    fn test_unsupported_format() {
        assert!(decode_image_bytes(&[0x00, 0x01, 0x02, 0x03, 0x04]).is_err());
        assert!(read_image_dimensions(&[0x00, 0x01, 0x02, 0x03, 0x04]).is_err());
    }

    #[test]
    fn test_decode_opaque_png() {
        let loaded = decode_image_bytes(&png_bytes(1, 1, 255)).unwrap();
        assert_eq!((loaded.width_px, loaded.height_px), (1, 1));
        match &loaded.pixel_data {
            ImagePixelData::Decoded { rgb, alpha } => {
                assert_eq!(rgb, &[255, 0, 0]);
                assert!(alpha.is_none(), "Fully opaque should have no alpha");
            }
            _ => panic!("PNG should decode to Decoded variant"),
        }
    }

    #[test]
    fn test_decode_png_with_alpha() {
        let loaded = decode_image_bytes(&png_bytes(1, 1, 128)).unwrap();
        match &loaded.pixel_data {
            ImagePixelData::Decoded { alpha, .. } => {
                assert_eq!(alpha.as_ref().unwrap(), &[128]);
            }
            _ => panic!("PNG should decode to Decoded variant"),
        }
    }

    #[test]
    fn test_decode_minimal_jpeg() {
        let img = image::RgbImage::from_fn(2, 2, |_, _| image::Rgb([0, 128, 255]));
        let mut buf = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new(&mut buf);
        image::ImageEncoder::write_image(encoder, img.as_raw(), 2, 2, image::ColorType::Rgb8)
            .unwrap();

        let loaded = decode_image_bytes(&buf).unwrap();
        assert_eq!((loaded.width_px, loaded.height_px), (2, 2));
        match &loaded.pixel_data {
            ImagePixelData::Jpeg { data, color_space } => {
                assert!(data.starts_with(&[0xFF, 0xD8]));
                assert!(matches!(color_space, JpegColorSpace::DeviceRGB));
            }
            _ => panic!("JPEG should stay as Jpeg variant"),
        }
    }
}

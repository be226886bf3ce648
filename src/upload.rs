//! Image attachments for forms: URL or file, plus size-limited re-encoding

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::Path;
use tracing::{debug, warn};

use crate::api::Part;
use crate::config::UploadSettings;
use crate::error::{Error, Result};

const MIN_JPEG_QUALITY: u8 = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        Self {
            mime: guess_mime(&name).to_string(),
            name,
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(name, bytes))
    }

    pub fn into_part(self, field: &str) -> Part {
        Part::File {
            name: field.to_string(),
            file_name: self.name,
            mime: self.mime,
            bytes: self.bytes,
        }
    }
}

fn guess_mime(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// An image input that takes either a link or a picked file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageField {
    pub url: String,
    pub file: Option<UploadedFile>,
}

impl ImageField {
    pub fn from_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            file: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.url.trim().is_empty()
    }

    /// The file wins over the URL; nothing is sent when both are empty.
    pub fn to_part(&self, file_field: &str, url_field: &str) -> Option<Part> {
        match &self.file {
            Some(file) => Some(file.clone().into_part(file_field)),
            None if !self.url.trim().is_empty() => Some(Part::text(url_field, self.url.trim())),
            None => None,
        }
    }
}

/// Shrink an uploaded image to fit `limits`, re-encoding as JPEG.
///
/// Files already inside both limits are returned untouched. Anything that
/// cannot be decoded is sent as-is.
pub fn compress_image(file: UploadedFile, limits: &UploadSettings) -> UploadedFile {
    match try_compress(&file, limits) {
        Ok(Some(compressed)) => {
            debug!(
                "Compressed {} from {} to {} bytes",
                file.name,
                file.bytes.len(),
                compressed.bytes.len()
            );
            compressed
        }
        Ok(None) => file,
        Err(e) => {
            warn!("Sending {} uncompressed: {}", file.name, e);
            file
        }
    }
}

fn try_compress(file: &UploadedFile, limits: &UploadSettings) -> Result<Option<UploadedFile>> {
    let img = image::load_from_memory(&file.bytes).map_err(|e| Error::image(e.to_string()))?;
    let longest = img.width().max(img.height());
    if file.bytes.len() <= limits.max_bytes && longest <= limits.max_dimension {
        return Ok(None);
    }

    let img = if longest > limits.max_dimension {
        img.resize(limits.max_dimension, limits.max_dimension, FilterType::Lanczos3)
    } else {
        img
    };
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    let stem = file
        .name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(&file.name);
    let mut quality = 85u8;
    loop {
        let mut bytes = Vec::new();
        rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, quality))
            .map_err(|e| Error::image(e.to_string()))?;
        if bytes.len() <= limits.max_bytes || quality <= MIN_JPEG_QUALITY {
            return Ok(Some(UploadedFile {
                name: format!("{stem}.jpg"),
                mime: "image/jpeg".to_string(),
                bytes,
            }));
        }
        quality = quality.saturating_sub(15).max(MIN_JPEG_QUALITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 10]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(UploadedFile::new("a.PNG", vec![]).mime, "image/png");
        assert_eq!(UploadedFile::new("photo.jpeg", vec![]).mime, "image/jpeg");
        assert_eq!(UploadedFile::new("noext", vec![]).mime, "application/octet-stream");
    }

    #[test]
    fn test_file_takes_precedence_over_url() {
        let mut field = ImageField::from_url("https://cdn.example.com/a.png");
        assert!(matches!(
            field.to_part("image", "imageUrl"),
            Some(Part::Text { ref name, .. }) if name == "imageUrl"
        ));

        field.file = Some(UploadedFile::new("b.png", vec![1, 2]));
        assert!(matches!(
            field.to_part("image", "imageUrl"),
            Some(Part::File { ref name, ref file_name, .. }) if name == "image" && file_name == "b.png"
        ));
    }

    #[test]
    fn test_empty_field_sends_nothing() {
        let field = ImageField::from_url("   ");
        assert!(field.is_empty());
        assert!(field.to_part("image", "imageUrl").is_none());
    }

    #[test]
    fn test_small_image_is_untouched() {
        let file = UploadedFile::new("small.png", png(64, 32));
        let out = compress_image(file.clone(), &UploadSettings::default());
        assert_eq!(out, file);
    }

    #[test]
    fn test_wide_image_is_downscaled_to_jpeg() {
        let file = UploadedFile::new("wide.png", png(3000, 120));
        let out = compress_image(file, &UploadSettings::default());

        assert_eq!(out.name, "wide.jpg");
        assert_eq!(out.mime, "image/jpeg");
        let decoded = image::load_from_memory(&out.bytes).unwrap();
        assert_eq!(decoded.width(), 1920);
        assert!(out.bytes.len() <= 1024 * 1024);
    }

    #[test]
    fn test_undecodable_bytes_pass_through() {
        let file = UploadedFile::new("broken.png", vec![0, 1, 2, 3]);
        let out = compress_image(file.clone(), &UploadSettings::default());
        assert_eq!(out, file);
    }
}

//! # Image Processing Module
//!
//! Questo modulo incapsula il codec: decodifica, conversione a RGB,
//! ridimensionamento opzionale e codifica WebP.
//!
//! ## Pipeline di Conversione
//!
//! 1. **Decodifica**: formato rilevato dal contenuto (PNG, JPEG, WebP) con `image`
//! 2. **RGB**: alpha e palette vengono scartati, target a 3 canali
//! 3. **Resize**: solo se configurato e solo in riduzione, aspect ratio preservato (Lanczos3)
//! 4. **Codifica**: libwebp con `quality` e `method` configurati
//! 5. **Scrittura atomica**: file temporaneo nella stessa directory, poi rename sul target
//!
//! ## Gestione Errori
//!
//! - Ogni passo ritorna `ConvertError`, nessun panic
//! - Un encode fallito non lascia mai un `.webp` troncato
//!
//! ## Esempio:
//! ```rust,no_run
//! use std::path::Path;
//! use webp_converter::{ConversionSettings, ImageProcessor};
//!
//! let processor = ImageProcessor::new(&ConversionSettings::default());
//! processor.convert(Path::new("photo.jpg"), Path::new("photo.webp")).unwrap();
//! ```

use crate::config::{ConversionSettings, ResizeBound};
use crate::error::ConvertError;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Decodes, flattens, resizes and encodes images to WebP
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    quality: u8,
    method: u8,
    resize: Option<ResizeBound>,
}

impl ImageProcessor {
    pub fn new(settings: &ConversionSettings) -> Self {
        Self {
            quality: settings.quality,
            method: settings.method,
            resize: settings.resize,
        }
    }

    /// Convert `source` to WebP at `target`, returning the output dimensions
    pub fn convert(&self, source: &Path, target: &Path) -> Result<(u32, u32), ConvertError> {
        let decoded = Self::decode(source)?;
        let rgb = self.prepare(decoded);
        let encoded = self.encode(&rgb)?;
        Self::write_atomic(source, target, &encoded)?;
        Ok(rgb.dimensions())
    }

    /// Decode an image, sniffing the format from its content
    pub fn decode(path: &Path) -> Result<DynamicImage, ConvertError> {
        let image = image::io::Reader::open(path)?
            .with_guessed_format()?
            .decode()?;
        Ok(image)
    }

    /// Force 3 channels and apply the bounding box, if any
    pub fn prepare(&self, image: DynamicImage) -> RgbImage {
        let rgb = image.to_rgb8();

        let Some(bound) = self.resize else {
            return rgb;
        };

        let (width, height) = rgb.dimensions();
        let (new_width, new_height) = Self::fit_within(width, height, bound);
        if (new_width, new_height) == (width, height) {
            return rgb;
        }

        debug!(
            "Resizing {}x{} -> {}x{} (bound {}x{})",
            width, height, new_width, new_height, bound.width, bound.height
        );
        imageops::resize(&rgb, new_width, new_height, FilterType::Lanczos3)
    }

    /// Largest size fitting in `bound` with the same aspect ratio, never upscaling
    pub fn fit_within(width: u32, height: u32, bound: ResizeBound) -> (u32, u32) {
        if width <= bound.width && height <= bound.height {
            return (width, height);
        }

        let ratio = f64::min(
            bound.width as f64 / width as f64,
            bound.height as f64 / height as f64,
        );
        let new_width = ((width as f64 * ratio).round() as u32).clamp(1, bound.width);
        let new_height = ((height as f64 * ratio).round() as u32).clamp(1, bound.height);
        (new_width, new_height)
    }

    /// Encode an RGB buffer with libwebp
    pub fn encode(&self, rgb: &RgbImage) -> Result<Vec<u8>, ConvertError> {
        let (width, height) = rgb.dimensions();
        let encoder = webp::Encoder::from_rgb(rgb.as_raw(), width, height);

        let mut config = webp::WebPConfig::new()
            .map_err(|_| ConvertError::Encode("cannot initialize encoder configuration".to_string()))?;
        config.quality = self.quality as f32;
        config.method = self.method as i32;

        let memory = encoder
            .encode_advanced(&config)
            .map_err(|e| ConvertError::Encode(format!("{:?}", e)))?;
        Ok(memory.to_vec())
    }

    /// Write through a temporary file in the target directory, then rename over `target`
    fn write_atomic(source: &Path, target: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
        let dir = target
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp = tempfile::Builder::new()
            .prefix(".webp-converter-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;

        // Output keeps the source permissions, not the temp file's 0600
        let permissions = fs::metadata(source)?.permissions();
        fs::set_permissions(temp.path(), permissions)?;

        temp.persist(target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn webp_dimensions(path: &Path) -> (u32, u32) {
        let data = fs::read(path).unwrap();
        let decoded = webp::Decoder::new(&data).decode().expect("valid webp");
        (decoded.width(), decoded.height())
    }

    #[test]
    fn test_fit_within_never_upscales() {
        let bound = ResizeBound::new(800, 600);
        assert_eq!(ImageProcessor::fit_within(400, 300, bound), (400, 300));
        assert_eq!(ImageProcessor::fit_within(800, 600, bound), (800, 600));
    }

    #[test]
    fn test_fit_within_preserves_aspect_ratio() {
        let bound = ResizeBound::new(800, 600);
        assert_eq!(ImageProcessor::fit_within(1600, 1200, bound), (800, 600));
        assert_eq!(ImageProcessor::fit_within(2000, 1000, bound), (800, 400));
        assert_eq!(ImageProcessor::fit_within(1000, 3000, bound), (200, 600));
        // One side over the bound is enough to shrink
        assert_eq!(ImageProcessor::fit_within(900, 300, bound), (800, 267));
    }

    #[test]
    fn test_fit_within_extreme_ratio() {
        let bound = ResizeBound::new(100, 100);
        assert_eq!(ImageProcessor::fit_within(10_000, 10, bound), (100, 1));
    }

    #[test]
    fn test_prepare_drops_alpha() {
        let rgba = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 0]));
        let processor = ImageProcessor::new(&ConversionSettings::default());
        let rgb = processor.prepare(DynamicImage::ImageRgba8(rgba));
        assert_eq!(rgb.dimensions(), (4, 4));
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_prepare_resizes_within_bound() {
        let settings = ConversionSettings {
            resize: Some(ResizeBound::new(50, 50)),
            ..Default::default()
        };
        let processor = ImageProcessor::new(&settings);
        let rgb = processor.prepare(DynamicImage::ImageRgb8(RgbImage::new(200, 100)));
        assert_eq!(rgb.dimensions(), (50, 25));
    }

    #[test]
    fn test_convert_png_with_alpha() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("logo.png");
        let target = temp_dir.path().join("logo.webp");
        RgbaImage::from_pixel(32, 16, Rgba([200, 10, 10, 128]))
            .save(&source)
            .unwrap();

        let processor = ImageProcessor::new(&ConversionSettings::default());
        let dimensions = processor.convert(&source, &target).unwrap();

        assert_eq!(dimensions, (32, 16));
        assert_eq!(webp_dimensions(&target), (32, 16));
        assert!(source.exists());
    }

    #[test]
    fn test_convert_with_resize() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("wide.jpg");
        let target = temp_dir.path().join("wide.webp");
        RgbImage::from_pixel(300, 100, Rgb([0, 128, 255])).save(&source).unwrap();

        let settings = ConversionSettings {
            resize: Some(ResizeBound::new(120, 120)),
            quality: 50,
            method: 0,
            ..Default::default()
        };
        ImageProcessor::new(&settings).convert(&source, &target).unwrap();

        assert_eq!(webp_dimensions(&target), (120, 40));
    }

    #[test]
    fn test_reencode_own_output_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("photo.png");
        let target = temp_dir.path().join("photo.webp");
        RgbImage::from_pixel(20, 20, Rgb([50, 60, 70])).save(&source).unwrap();

        let processor = ImageProcessor::new(&ConversionSettings::default());
        processor.convert(&source, &target).unwrap();
        processor.convert(&target, &target).unwrap();

        assert_eq!(webp_dimensions(&target), (20, 20));
    }

    #[test]
    fn test_convert_corrupt_source_leaves_no_output() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("broken.jpg");
        let target = temp_dir.path().join("broken.webp");
        fs::write(&source, b"definitely not a jpeg").unwrap();

        let processor = ImageProcessor::new(&ConversionSettings::default());
        let result = processor.convert(&source, &target);

        assert!(matches!(result, Err(ConvertError::Image(_))));
        assert!(!target.exists());
        let leftovers = fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_convert_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let processor = ImageProcessor::new(&ConversionSettings::default());
        let result = processor.convert(&temp_dir.path().join("nope.png"), &temp_dir.path().join("nope.webp"));
        assert!(matches!(result, Err(ConvertError::Io(_))));
    }
}

//! Target image sources: load, resize and binarise.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use log::{debug, info};

use crate::schema::{ImageConfig, TargetImage};

use super::ImageError;
use super::format::{GrayImage, decode_netpbm};

/// Anything that can produce a binary target image.
pub trait ImageSource {
    fn load(&self) -> Result<TargetImage, ImageError>;
}

/// An in-memory target is its own source.
impl ImageSource for TargetImage {
    fn load(&self) -> Result<TargetImage, ImageError> {
        Ok(self.clone())
    }
}

/// Netpbm file resized to a fixed grid and thresholded to 0/1.
#[derive(Debug, Clone)]
pub struct NetpbmSource {
    path: PathBuf,
    width: usize,
    height: usize,
    threshold: u8,
}

impl NetpbmSource {
    pub fn new(path: impl Into<PathBuf>, width: usize, height: usize, threshold: u8) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            threshold,
        }
    }

    /// Source for `path` using the grid and threshold from `config`.
    pub fn from_config(path: impl Into<PathBuf>, config: &ImageConfig) -> Self {
        Self::new(path, config.width, config.height, config.threshold)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for NetpbmSource {
    fn load(&self) -> Result<TargetImage, ImageError> {
        let bytes = fs::read(&self.path).map_err(|source| ImageError::Io {
            path: self.path.clone(),
            source,
        })?;
        let image = decode_netpbm(&bytes)?;
        debug!(
            "Decoded {} as {}x{} grayscale",
            self.path.display(),
            image.width,
            image.height
        );

        let resized = resize_area(&image, self.width, self.height)?;
        binarise(&self.path, &resized, self.threshold)
    }
}

/// Any raster format the `image` crate decodes (PNG, JPEG, BMP, ...),
/// converted to 8-bit luma and resized with a bilinear filter.
#[derive(Debug, Clone)]
pub struct RasterSource {
    path: PathBuf,
    width: usize,
    height: usize,
    threshold: u8,
}

impl RasterSource {
    pub fn new(path: impl Into<PathBuf>, width: usize, height: usize, threshold: u8) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            threshold,
        }
    }

    /// Source for `path` using the grid and threshold from `config`.
    pub fn from_config(path: impl Into<PathBuf>, config: &ImageConfig) -> Self {
        Self::new(path, config.width, config.height, config.threshold)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for RasterSource {
    fn load(&self) -> Result<TargetImage, ImageError> {
        let invalid = || ImageError::InvalidDimensions {
            width: self.width,
            height: self.height,
        };
        let width = u32::try_from(self.width).map_err(|_| invalid())?;
        let height = u32::try_from(self.height).map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }

        let luma = image::open(&self.path)
            .map_err(|source| ImageError::Decode {
                path: self.path.clone(),
                source,
            })?
            .to_luma8();
        debug!(
            "Decoded {} as {}x{} grayscale",
            self.path.display(),
            luma.width(),
            luma.height()
        );

        let resized = imageops::resize(&luma, width, height, FilterType::Triangle);
        let gray = GrayImage {
            width: self.width,
            height: self.height,
            pixels: resized.into_raw(),
        };
        binarise(&self.path, &gray, self.threshold)
    }
}

/// File extensions read by [`NetpbmSource`]; everything else goes through
/// [`RasterSource`].
const NETPBM_EXTENSIONS: [&str; 4] = ["pbm", "pgm", "ppm", "pnm"];

/// Pick the source for `path` by its extension.
pub fn source_for(path: &Path, config: &ImageConfig) -> Box<dyn ImageSource> {
    let is_netpbm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            NETPBM_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        });

    if is_netpbm {
        Box::new(NetpbmSource::from_config(path, config))
    } else {
        Box::new(RasterSource::from_config(path, config))
    }
}

/// Threshold a resized image into a target and log what was loaded.
fn binarise(path: &Path, image: &GrayImage, level: u8) -> Result<TargetImage, ImageError> {
    let target = TargetImage::new(image.width, image.height, threshold(image, level))?;

    info!(
        "Loaded target {} ({}x{}, {} of {} bits set)",
        path.display(),
        target.width(),
        target.height(),
        target.bits().iter().filter(|&&b| b == 1).count(),
        target.len()
    );
    Ok(target)
}

/// Resize by averaging the source pixels covered by each output cell.
///
/// Every output cell covers at least one source pixel, so enlarging
/// degrades to nearest-neighbour sampling.
pub fn resize_area(image: &GrayImage, width: usize, height: usize) -> Result<GrayImage, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }

    let span = |i: usize, out: usize, src: usize| {
        let start = (i * src / out).min(src - 1);
        let end = ((i + 1) * src / out).clamp(start + 1, src);
        start..end
    };

    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        let ys = span(y, height, image.height);
        for x in 0..width {
            let xs = span(x, width, image.width);
            let count = (ys.len() * xs.len()) as u64;
            let sum: u64 = ys
                .clone()
                .flat_map(|sy| xs.clone().map(move |sx| (sx, sy)))
                .map(|(sx, sy)| image.get(sx, sy) as u64)
                .sum();
            pixels.push(((sum + count / 2) / count) as u8);
        }
    }

    Ok(GrayImage {
        width,
        height,
        pixels,
    })
}

/// Pixels strictly brighter than `level` become 1, the rest 0.
pub fn threshold(image: &GrayImage, level: u8) -> Vec<u8> {
    image.pixels.iter().map(|&p| u8::from(p > level)).collect()
}

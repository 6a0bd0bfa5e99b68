//! Target image loading and terminal rendering.
//!
//! Netpbm targets are decoded here, averaged down (or repeated up) to the
//! configured grid, and thresholded into 0/1 bits where 1 means a pixel
//! brighter than the threshold. Other raster formats (PNG, JPEG, ...) go
//! through the `image` crate with a bilinear resize; [`source_for`] picks
//! between the two by file extension.
//!
//! # Pipeline
//!
//! ```text
//! file bytes --decode_netpbm--> GrayImage (8-bit)
//!            --resize_area----> GrayImage (width x height)
//!            --threshold------> Vec<u8> of 0/1
//!            --TargetImage::new
//! ```
//!
//! The best chromosome of a run can be written back out with [`encode_pbm`].

mod format;
mod render;
mod source;

use std::io;
use std::path::PathBuf;

use crate::schema::TargetError;

pub use format::{GrayImage, decode_netpbm, encode_pbm};
pub use render::{TerminalRenderer, render_side_by_side};
pub use source::{ImageSource, NetpbmSource, RasterSource, resize_area, source_for, threshold};

/// Errors raised while loading a target image.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Unsupported image format {0:?}, expected Netpbm P1-P6")]
    UnsupportedFormat(String),
    #[error("Malformed image: {0}")]
    Malformed(String),
    #[error("Image data ended unexpectedly")]
    UnexpectedEof,
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Invalid target: {0}")]
    Target(#[from] TargetError),
}

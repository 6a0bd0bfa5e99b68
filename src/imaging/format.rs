//! Netpbm (PBM/PGM/PPM) decoding and PBM encoding.
//!
//! Supported magic numbers:
//!
//! ```text
//!   P1  ASCII bitmap      P4  binary bitmap (rows padded to whole bytes)
//!   P2  ASCII graymap     P5  binary graymap (1 or 2 bytes per sample)
//!   P3  ASCII pixmap      P6  binary pixmap  (1 or 2 bytes per sample)
//! ```
//!
//! Every format decodes to an 8-bit [`GrayImage`]. Bitmap black (1) maps to
//! gray 0, and pixmaps are converted with ITU-R BT.601 luma weights.

use super::ImageError;

/// An 8-bit grayscale raster, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl GrayImage {
    /// Gray value at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Bitmap,
    Graymap,
    Pixmap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Ascii,
    Binary,
}

/// Cursor over the raw file bytes.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Skip whitespace and `#` comments.
    fn skip_separators(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.bytes.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> Result<&'a [u8], ImageError> {
        self.skip_separators();
        let start = self.pos;
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || b == b'#' {
                break;
            }
            self.pos += 1;
        }
        if start == self.pos {
            return Err(ImageError::UnexpectedEof);
        }
        Ok(&self.bytes[start..self.pos])
    }

    fn number(&mut self, what: &str) -> Result<usize, ImageError> {
        let token = self.token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                ImageError::Malformed(format!(
                    "expected {what}, found {:?}",
                    String::from_utf8_lossy(token)
                ))
            })
    }

    /// Single ASCII bit for P1, which allows digits without separators.
    fn ascii_bit(&mut self) -> Result<u8, ImageError> {
        self.skip_separators();
        match self.bytes.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(0)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(1)
            }
            Some(&other) => Err(ImageError::Malformed(format!(
                "expected bitmap digit, found {:?}",
                other as char
            ))),
            None => Err(ImageError::UnexpectedEof),
        }
    }

    /// Consume the single whitespace byte that precedes a binary raster.
    fn raster_start(&mut self) -> Result<(), ImageError> {
        match self.bytes.get(self.pos) {
            Some(b) if b.is_ascii_whitespace() => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(ImageError::Malformed(
                "missing whitespace before raster".to_string(),
            )),
            None => Err(ImageError::UnexpectedEof),
        }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ImageError> {
        let end = self.pos.checked_add(len).ok_or(ImageError::UnexpectedEof)?;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(ImageError::UnexpectedEof)?;
        self.pos = end;
        Ok(slice)
    }
}

/// Decode a Netpbm file into an 8-bit grayscale image.
pub fn decode_netpbm(bytes: &[u8]) -> Result<GrayImage, ImageError> {
    let mut reader = Reader::new(bytes);

    let magic = reader.token()?;
    let (kind, encoding) = match magic {
        b"P1" => (Kind::Bitmap, Encoding::Ascii),
        b"P2" => (Kind::Graymap, Encoding::Ascii),
        b"P3" => (Kind::Pixmap, Encoding::Ascii),
        b"P4" => (Kind::Bitmap, Encoding::Binary),
        b"P5" => (Kind::Graymap, Encoding::Binary),
        b"P6" => (Kind::Pixmap, Encoding::Binary),
        other => {
            return Err(ImageError::UnsupportedFormat(
                String::from_utf8_lossy(other).into_owned(),
            ));
        }
    };

    let width = reader.number("width")?;
    let height = reader.number("height")?;
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    let pixel_count = width
        .checked_mul(height)
        .ok_or(ImageError::InvalidDimensions { width, height })?;

    let pixels: Vec<u8> = match kind {
        Kind::Bitmap => {
            let bits = match encoding {
                Encoding::Ascii => (0..pixel_count)
                    .map(|_| reader.ascii_bit())
                    .collect::<Result<Vec<_>, _>>()?,
                Encoding::Binary => {
                    reader.raster_start()?;
                    let row_bytes = width.div_ceil(8);
                    let raster = reader.take(row_bytes * height)?;
                    raster
                        .chunks(row_bytes)
                        .flat_map(|row| (0..width).map(move |x| (row[x / 8] >> (7 - x % 8)) & 1))
                        .collect()
                }
            };
            // Bitmap 1 is black.
            bits.into_iter()
                .map(|bit| if bit == 1 { 0 } else { 255 })
                .collect()
        }
        Kind::Graymap | Kind::Pixmap => {
            let maxval = reader.number("maxval")?;
            if maxval == 0 || maxval > u16::MAX as usize {
                return Err(ImageError::Malformed(format!(
                    "maxval {maxval} outside 1..=65535"
                )));
            }
            let channels = if kind == Kind::Pixmap { 3 } else { 1 };
            let sample_count = pixel_count
                .checked_mul(channels)
                .ok_or(ImageError::InvalidDimensions { width, height })?;
            let samples = read_samples(&mut reader, encoding, sample_count, maxval)?;
            let scaled: Vec<u8> = samples
                .into_iter()
                .map(|s| ((s * 255 + maxval / 2) / maxval) as u8)
                .collect();

            if kind == Kind::Pixmap {
                scaled
                    .chunks(3)
                    .map(|rgb| luma(rgb[0], rgb[1], rgb[2]))
                    .collect()
            } else {
                scaled
            }
        }
    };

    Ok(GrayImage {
        width,
        height,
        pixels,
    })
}

/// Read `count` samples in `0..=maxval`.
fn read_samples(
    reader: &mut Reader<'_>,
    encoding: Encoding,
    count: usize,
    maxval: usize,
) -> Result<Vec<usize>, ImageError> {
    let samples = match encoding {
        Encoding::Ascii => (0..count)
            .map(|_| reader.number("sample"))
            .collect::<Result<Vec<_>, _>>()?,
        Encoding::Binary => {
            reader.raster_start()?;
            if maxval < 256 {
                reader.take(count)?.iter().map(|&b| b as usize).collect()
            } else {
                let len = count.checked_mul(2).ok_or_else(|| {
                    ImageError::Malformed(format!("{count} samples overflow the raster size"))
                })?;
                reader
                    .take(len)?
                    .chunks(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]) as usize)
                    .collect()
            }
        }
    };

    if let Some(&bad) = samples.iter().find(|&&s| s > maxval) {
        return Err(ImageError::Malformed(format!(
            "sample {bad} exceeds maxval {maxval}"
        )));
    }
    Ok(samples)
}

/// BT.601 luma in integer arithmetic.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}

/// Encode 0/1 bits as a binary PBM (P4).
///
/// Bits use image polarity (1 = bright), so they are inverted on the way
/// out to match PBM's 1 = black convention.
pub fn encode_pbm(width: usize, height: usize, bits: &[u8]) -> Vec<u8> {
    let row_bytes = width.div_ceil(8);
    let mut out = format!("P4\n{width} {height}\n").into_bytes();
    out.reserve(row_bytes * height);

    for row in bits.chunks(width).take(height) {
        let mut packed = vec![0u8; row_bytes];
        for (x, &bit) in row.iter().enumerate() {
            if bit == 0 {
                packed[x / 8] |= 1 << (7 - x % 8);
            }
        }
        out.extend_from_slice(&packed);
    }
    out
}

/// Encode a grayscale image as a binary PGM (P5).
#[cfg(test)]
pub(crate) fn encode_pgm(image: &GrayImage) -> Vec<u8> {
    let mut out = format!("P5\n{} {}\n255\n", image.width, image.height).into_bytes();
    out.extend_from_slice(&image.pixels);
    out
}

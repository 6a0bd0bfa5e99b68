//! Target image type the population evolves toward.

/// A binary image flattened row-major into a bit-vector.
///
/// Every element of `bits` is 0 or 1 and `bits.len() == width * height`.
/// Read-only for the duration of a run. [`TargetImage::new`] is the only
/// constructor, so both invariants always hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetImage {
    width: usize,
    height: usize,
    bits: Vec<u8>,
}

/// Target construction errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("Target dimensions must be non-zero")]
    InvalidDimensions,
    #[error("Expected {expected} bits for the target, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Target bit {index} is {value}, expected 0 or 1")]
    InvalidBit { index: usize, value: u8 },
}

impl TargetImage {
    /// Create a target from row-major bits.
    pub fn new(width: usize, height: usize, bits: Vec<u8>) -> Result<Self, TargetError> {
        if width == 0 || height == 0 {
            return Err(TargetError::InvalidDimensions);
        }
        if bits.len() != width * height {
            return Err(TargetError::LengthMismatch {
                expected: width * height,
                actual: bits.len(),
            });
        }
        if let Some((index, &value)) = bits.iter().enumerate().find(|&(_, b)| *b > 1) {
            return Err(TargetError::InvalidBit { index, value });
        }
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Target of the given dimensions with every bit set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self, TargetError> {
        Self::new(width, height, vec![value; width * height])
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major bits.
    #[inline]
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Number of bits (the gene count a matching chromosome needs).
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterate over rows of the image.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.bits.chunks(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        assert!(TargetImage::new(2, 2, vec![0, 1, 1, 0]).is_ok());
        assert_eq!(
            TargetImage::new(0, 2, vec![]),
            Err(TargetError::InvalidDimensions)
        );
        assert_eq!(
            TargetImage::new(2, 2, vec![0, 1, 1]),
            Err(TargetError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            TargetImage::new(2, 1, vec![0, 2]),
            Err(TargetError::InvalidBit { index: 1, value: 2 })
        );
    }

    #[test]
    fn test_filled_goes_through_validation() {
        let target = TargetImage::filled(3, 2, 1).unwrap();
        assert_eq!(target.len(), 6);
        assert!(target.bits().iter().all(|&b| b == 1));
        assert_eq!(
            TargetImage::filled(2, 2, 2),
            Err(TargetError::InvalidBit { index: 0, value: 2 })
        );
        assert_eq!(
            TargetImage::filled(4, 0, 0),
            Err(TargetError::InvalidDimensions)
        );
    }

    #[test]
    fn test_rows() {
        let target = TargetImage::new(3, 2, vec![1, 0, 1, 0, 1, 0]).unwrap();
        let rows: Vec<&[u8]> = target.rows().collect();
        assert_eq!(rows, vec![&[1, 0, 1][..], &[0, 1, 0][..]]);
    }
}

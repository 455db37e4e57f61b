use thiserror::Error;

/// Errors produced by the transforms, convolutions and the correlation pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Transform length is zero or not a power of two.
    #[error("invalid transform length {0}: must be a non-zero power of two")]
    InvalidLength(usize),

    /// Two operands (or a raster and the requested matrix size) disagree in shape.
    #[error("dimensions don't agree: {left:?} vs {right:?}")]
    DimensionMismatch { left: Vec<usize>, right: Vec<usize> },

    #[error("channel {channel} out of range for a raster with {channels} channels")]
    InvalidChannel { channel: usize, channels: usize },

    #[error("peak threshold {0} must lie in (0, 1]")]
    InvalidThreshold(f64),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fails with [`Error::DimensionMismatch`] unless both shapes are identical.
pub(crate) fn ensure_same_shape(left: &[usize], right: &[usize]) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            left: left.to_vec(),
            right: right.to_vec(),
        })
    }
}

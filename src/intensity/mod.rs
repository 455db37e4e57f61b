//! Conversion of pixel grids into single-channel complex intensity matrices.
//!
//! Decoding images is left to the caller; anything that can report its size
//! and hand out 8-bit channel samples implements [`Raster`].

use ndarray::{Array2, ArrayBase, Data, Ix3};
use num::Complex;

use crate::{fft::CorrNum, Error, Result};

#[cfg(feature = "image")]
mod image_buffer;

/// Read access to an 8-bit, multi-channel pixel grid.
///
/// Pixel `(x, y)` is column `x`, row `y`, with `(0, 0)` at the upper left.
pub trait Raster {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn channels(&self) -> usize;

    /// Returns channel `channel` of pixel `(x, y)`. Callers stay in bounds.
    fn sample(&self, x: usize, y: usize, channel: usize) -> u8;
}

/// `(height, width, channels)` arrays, the layout used by ndarray image crates.
impl<S> Raster for ArrayBase<S, Ix3>
where
    S: Data<Elem = u8>,
{
    fn width(&self) -> usize {
        self.dim().1
    }

    fn height(&self) -> usize {
        self.dim().0
    }

    fn channels(&self) -> usize {
        self.dim().2
    }

    fn sample(&self, x: usize, y: usize, channel: usize) -> u8 {
        self[(y, x, channel)]
    }
}

/// Which channel of a pixel is taken as its intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channel {
    #[default]
    Red,
    Green,
    Blue,
    Index(usize),
}

impl Channel {
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Index(i) => i,
        }
    }
}

/// Extracts one channel of a `size`×`size` raster into a complex matrix.
///
/// Cell `(y, x)` holds `Complex::new(sample, 0)` with the sample in `[0, 255]`.
///
/// # Errors
///
/// * [`Error::DimensionMismatch`] unless the raster is exactly `size`×`size`.
/// * [`Error::InvalidChannel`] if the raster has no such channel.
pub fn to_intensity_matrix<T, R>(image: &R, channel: Channel, size: usize) -> Result<Array2<Complex<T>>>
where
    T: CorrNum,
    R: Raster + ?Sized,
{
    let (width, height) = (image.width(), image.height());
    if width != size || height != size {
        return Err(Error::DimensionMismatch {
            left: vec![height, width],
            right: vec![size, size],
        });
    }

    let channel = channel.index();
    let channels = image.channels();
    if channel >= channels {
        return Err(Error::InvalidChannel { channel, channels });
    }

    Ok(Array2::from_shape_fn((size, size), |(y, x)| {
        let value = T::from_u8(image.sample(x, y, channel)).unwrap_or_else(T::zero);
        Complex::new(value, T::zero())
    }))
}

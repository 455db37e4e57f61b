//! Circular and linear convolution of 1-D complex signals through the FFT.

use ndarray::{s, Array1, ArrayBase, Data, Ix1};
use num::Complex;

use crate::{
    complex,
    error::ensure_same_shape,
    fft::{self, radix2, CorrNum, Processor},
    Result,
};

#[cfg(test)]
mod tests;

/// Extension trait adding FFT-based convolution to 1-D complex arrays.
///
/// Both methods use the radix-2 engine; see [`circular_with`] and
/// [`linear_with`] to run on another [`Processor`].
pub trait ConvolveExt<T: CorrNum, S2: Data<Elem = Complex<T>>> {
    /// Circular convolution. The output has the same length as the inputs.
    fn circular_convolve(&self, other: &ArrayBase<S2, Ix1>) -> Result<Array1<Complex<T>>>;

    /// Linear convolution computed on zero-padded copies of both inputs.
    /// The output has twice the input length.
    fn linear_convolve(&self, other: &ArrayBase<S2, Ix1>) -> Result<Array1<Complex<T>>>;
}

impl<T, S, S2> ConvolveExt<T, S2> for ArrayBase<S, Ix1>
where
    T: CorrNum,
    S: Data<Elem = Complex<T>>,
    S2: Data<Elem = Complex<T>>,
{
    fn circular_convolve(&self, other: &ArrayBase<S2, Ix1>) -> Result<Array1<Complex<T>>> {
        circular_with(&radix2::Processor, self, other)
    }

    fn linear_convolve(&self, other: &ArrayBase<S2, Ix1>) -> Result<Array1<Complex<T>>> {
        linear_with(&radix2::Processor, self, other)
    }
}

/// `ifft(fft(x) ⊙ fft(y))`.
///
/// # Errors
///
/// * [`Error::DimensionMismatch`](crate::Error::DimensionMismatch) if `x` and `y` differ in length.
/// * [`Error::InvalidLength`](crate::Error::InvalidLength) if the common length is not a power of two.
pub fn circular_with<T, P, S1, S2>(
    processor: &P,
    x: &ArrayBase<S1, Ix1>,
    y: &ArrayBase<S2, Ix1>,
) -> Result<Array1<Complex<T>>>
where
    T: CorrNum,
    P: Processor<T> + ?Sized,
    S1: Data<Elem = Complex<T>>,
    S2: Data<Elem = Complex<T>>,
{
    ensure_same_shape(x.shape(), y.shape())?;

    let a = fft::forward_with(processor, x)?;
    let b = fft::forward_with(processor, y)?;
    let c = complex::hadamard(&a, &b)?;

    fft::backward_with(processor, &c)
}

/// Zero-pads both signals to `2 * len` and convolves them circularly, which
/// removes the wraparound terms.
///
/// # Errors
///
/// Same as [`circular_with`]; lengths are compared before padding.
pub fn linear_with<T, P, S1, S2>(
    processor: &P,
    x: &ArrayBase<S1, Ix1>,
    y: &ArrayBase<S2, Ix1>,
) -> Result<Array1<Complex<T>>>
where
    T: CorrNum,
    P: Processor<T> + ?Sized,
    S1: Data<Elem = Complex<T>>,
    S2: Data<Elem = Complex<T>>,
{
    ensure_same_shape(x.shape(), y.shape())?;

    circular_with(processor, &zero_pad(x), &zero_pad(y))
}

fn zero_pad<T, S>(x: &ArrayBase<S, Ix1>) -> Array1<Complex<T>>
where
    T: CorrNum,
    S: Data<Elem = Complex<T>>,
{
    let n = x.len();
    let mut padded = Array1::zeros(2 * n);
    padded.slice_mut(s![..n]).assign(x);
    padded
}

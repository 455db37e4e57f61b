//! One-dimensional complex FFT.
//!
//! Transforms are provided through the [`Processor`] trait so the 2-D layer,
//! the convolutions and the correlator can run on either the recursive
//! radix-2 engine ([`radix2::Processor`], the default) or the planned
//! `rustfft` backend ([`planned::Processor`]).

use ndarray::{Array1, ArrayBase, Data, Ix1};
use num::{
    traits::{FloatConst, NumAssign},
    Complex, Float,
};
use rustfft::FftNum;

use crate::{Error, Result};

pub mod planned;
pub mod radix2;


/// Marker trait for the sample types the transforms operate on.
///
/// Implemented for `f32` and `f64`.
pub trait CorrNum: FftNum + Float + FloatConst + NumAssign {}

macro_rules! impl_corr_num {
    ($($t:ty),*) => {
        $(impl CorrNum for $t {})*
    };
}

impl_corr_num!(f32, f64);

/// Trait for 1-D FFT processors.
///
/// Both directions take a signal whose length is a non-zero power of two and
/// return a freshly allocated sequence of the same length; the input is never
/// modified.
pub trait Processor<T: CorrNum>: Send + Sync {
    /// Forward transform with twiddle factors `exp(-2πik/n)`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] when the length is zero or not a power of two.
    fn forward(&self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>>;

    /// Inverse transform, normalized by `1/n` so that
    /// `backward(forward(x)) ≈ x`.
    ///
    /// The default conjugates the input, runs [`Processor::forward`],
    /// conjugates again and scales by `1/n`.
    fn backward(&self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>> {
        let conjugated: Vec<_> = input.iter().map(|v| v.conj()).collect();
        let spectrum = self.forward(&conjugated)?;

        let norm = T::one() / from_len::<T>(input.len());
        Ok(spectrum.into_iter().map(|v| v.conj().scale(norm)).collect())
    }
}

/// Fails with [`Error::InvalidLength`] unless `n` is a non-zero power of two.
pub fn check_len(n: usize) -> Result<()> {
    if n.is_power_of_two() {
        Ok(())
    } else {
        Err(Error::InvalidLength(n))
    }
}

#[inline]
pub(crate) fn from_len<T: CorrNum>(n: usize) -> T {
    T::from_usize(n).unwrap_or_else(T::infinity)
}

/// Forward FFT of a signal using the radix-2 engine.
///
/// # Example
///
/// ```rust
/// use ndarray::array;
/// use num::Complex;
///
/// let x = array![Complex::new(1.0f64, 0.0), Complex::new(0.0, 0.0)];
/// let y = phase_corr::fft(&x).unwrap();
/// assert_eq!(y, array![Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)]);
/// ```
pub fn fft<T, S>(x: &ArrayBase<S, Ix1>) -> Result<Array1<Complex<T>>>
where
    T: CorrNum,
    S: Data<Elem = Complex<T>>,
{
    forward_with(&radix2::Processor, x)
}

/// Inverse FFT of a spectrum using the radix-2 engine.
pub fn ifft<T, S>(x: &ArrayBase<S, Ix1>) -> Result<Array1<Complex<T>>>
where
    T: CorrNum,
    S: Data<Elem = Complex<T>>,
{
    backward_with(&radix2::Processor, x)
}

pub fn forward_with<T, P, S>(processor: &P, x: &ArrayBase<S, Ix1>) -> Result<Array1<Complex<T>>>
where
    T: CorrNum,
    P: Processor<T> + ?Sized,
    S: Data<Elem = Complex<T>>,
{
    let output = match x.as_slice() {
        Some(signal) => processor.forward(signal)?,
        None => processor.forward(&x.to_vec())?,
    };
    Ok(Array1::from(output))
}

pub fn backward_with<T, P, S>(processor: &P, x: &ArrayBase<S, Ix1>) -> Result<Array1<Complex<T>>>
where
    T: CorrNum,
    P: Processor<T> + ?Sized,
    S: Data<Elem = Complex<T>>,
{
    let output = match x.as_slice() {
        Some(signal) => processor.backward(signal)?,
        None => processor.backward(&x.to_vec())?,
    };
    Ok(Array1::from(output))
}

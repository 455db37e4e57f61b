//! Elementwise complex arithmetic over ndarray containers.
//!
//! The scalar primitive is [`num::Complex`]: `+`, `-` and `*` give the field
//! operations, `conj` negates the imaginary part, `scale` multiplies both
//! components by a real factor and `norm` is the Euclidean magnitude. The
//! helpers here lift those operations to whole signals and matrices, always
//! returning a fresh array.

use ndarray::{Array, ArrayBase, Data, Dimension, Zip};
use num::{Complex, Float};

use crate::error::{ensure_same_shape, Result};

pub fn conjugate<T, S, D>(a: &ArrayBase<S, D>) -> Array<Complex<T>, D>
where
    T: Float,
    S: Data<Elem = Complex<T>>,
    D: Dimension,
{
    a.mapv(|v| v.conj())
}

pub fn scale<T, S, D>(a: &ArrayBase<S, D>, k: T) -> Array<Complex<T>, D>
where
    T: Float,
    S: Data<Elem = Complex<T>>,
    D: Dimension,
{
    a.mapv(|v| v.scale(k))
}

pub fn magnitude<T, S, D>(a: &ArrayBase<S, D>) -> Array<T, D>
where
    T: Float,
    S: Data<Elem = Complex<T>>,
    D: Dimension,
{
    a.mapv(|v| v.norm())
}

pub fn real<T, S, D>(a: &ArrayBase<S, D>) -> Array<T, D>
where
    T: Float,
    S: Data<Elem = Complex<T>>,
    D: Dimension,
{
    a.mapv(|v| v.re)
}

pub fn imaginary<T, S, D>(a: &ArrayBase<S, D>) -> Array<T, D>
where
    T: Float,
    S: Data<Elem = Complex<T>>,
    D: Dimension,
{
    a.mapv(|v| v.im)
}

/// Lifts a real array into the complex plane with zero imaginary parts.
pub fn from_real<T, S, D>(a: &ArrayBase<S, D>) -> Array<Complex<T>, D>
where
    T: Float,
    S: Data<Elem = T>,
    D: Dimension,
{
    a.mapv(|v| Complex::new(v, T::zero()))
}

/// Elementwise product `a[i] * b[i]`.
///
/// # Errors
///
/// [`Error::DimensionMismatch`](crate::Error::DimensionMismatch) when the shapes differ.
pub fn hadamard<T, S1, S2, D>(a: &ArrayBase<S1, D>, b: &ArrayBase<S2, D>) -> Result<Array<Complex<T>, D>>
where
    T: Float,
    S1: Data<Elem = Complex<T>>,
    S2: Data<Elem = Complex<T>>,
    D: Dimension,
{
    ensure_same_shape(a.shape(), b.shape())?;
    Ok(Zip::from(a).and(b).map_collect(|&x, &y| x * y))
}

/// Cross-power spectrum `a[i] * conj(b[i])`.
///
/// # Errors
///
/// [`Error::DimensionMismatch`](crate::Error::DimensionMismatch) when the shapes differ.
pub fn cross_power<T, S1, S2, D>(
    a: &ArrayBase<S1, D>,
    b: &ArrayBase<S2, D>,
) -> Result<Array<Complex<T>, D>>
where
    T: Float,
    S1: Data<Elem = Complex<T>>,
    S2: Data<Elem = Complex<T>>,
    D: Dimension,
{
    ensure_same_shape(a.shape(), b.shape())?;
    Ok(Zip::from(a).and(b).map_collect(|&x, &y| x * y.conj()))
}

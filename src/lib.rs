//! FFT-based phase correlation for [`ndarray`].
//!
//! The crate is built bottom-up:
//!
//! * [`complex`]: elementwise complex arithmetic on arrays.
//! * [`fft`]: recursive radix-2 Cooley–Tukey FFT and its inverse, plus a
//!   `rustfft`-backed processor behind the same [`Processor`] trait.
//! * [`conv`]: circular and linear convolution through the FFT.
//! * [`fft_2d`]: row-then-column 2-D transforms.
//! * [`intensity`]: single-channel extraction from pixel grids.
//! * [`correlation`]: cross-power spectrum, correlation surface and peak
//!   extraction.
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array2;
//! use num::Complex;
//! use phase_corr::{CoordinateFlip, CorrelationConfig, PhaseCorrelator};
//!
//! let mut template = Array2::<Complex<f64>>::zeros((8, 8));
//! template[(0, 0)] = Complex::new(255.0, 0.0);
//! let mut reference = Array2::<Complex<f64>>::zeros((8, 8));
//! reference[(2, 3)] = Complex::new(255.0, 0.0);
//!
//! let correlator =
//!     PhaseCorrelator::new(CorrelationConfig::default().with_flip(CoordinateFlip::None)).unwrap();
//! let result = correlator.correlate(&reference, &template).unwrap();
//!
//! assert_eq!(result.peaks, vec![(2, 3)]);
//! assert_eq!(result.translation(), Some((2, 3)));
//! ```

pub mod complex;
pub mod conv;
pub mod correlation;
mod error;
pub mod fft;
pub mod fft_2d;
pub mod intensity;

pub use conv::ConvolveExt;
pub use correlation::{
    correlate, extract_peaks, Cell, CoordinateFlip, CorrelationConfig, CorrelationResult,
    PhaseCorrelator,
};
pub use error::{Error, Result};
pub use fft::{fft, ifft, CorrNum, Processor};
pub use fft_2d::{fft_2d, ifft_2d};
pub use intensity::{to_intensity_matrix, Channel, Raster};

//! Two-dimensional FFT built from 1-D passes: every row first, then every
//! column of the row-transformed intermediate.
//!
//! Forward and inverse share the same axis order, which keeps
//! `backward(forward(m)) ≈ m`. Rows are independent of each other (as are
//! columns), so each pass is spread over the rayon pool; results are collected
//! in index order and the output does not depend on scheduling.

use ndarray::{parallel::prelude::*, Array2, ArrayBase, Axis, Data, Ix2};
use num::Complex;

use crate::{
    fft::{check_len, radix2, CorrNum, Processor},
    Result,
};

/// Forward 2-D FFT using the radix-2 engine.
pub fn fft_2d<T, S>(matrix: &ArrayBase<S, Ix2>) -> Result<Array2<Complex<T>>>
where
    T: CorrNum,
    S: Data<Elem = Complex<T>>,
{
    forward(&radix2::Processor, matrix)
}

/// Inverse 2-D FFT using the radix-2 engine.
pub fn ifft_2d<T, S>(matrix: &ArrayBase<S, Ix2>) -> Result<Array2<Complex<T>>>
where
    T: CorrNum,
    S: Data<Elem = Complex<T>>,
{
    backward(&radix2::Processor, matrix)
}

/// Forward 2-D FFT through `processor`.
///
/// # Errors
///
/// [`Error::InvalidLength`](crate::Error::InvalidLength) when either dimension
/// is not a power of two.
pub fn forward<T, P, S>(processor: &P, matrix: &ArrayBase<S, Ix2>) -> Result<Array2<Complex<T>>>
where
    T: CorrNum,
    P: Processor<T> + ?Sized,
    S: Data<Elem = Complex<T>>,
{
    transform(matrix, |lane| processor.forward(lane))
}

/// Inverse 2-D FFT through `processor`, normalized by `1 / (rows * cols)`.
pub fn backward<T, P, S>(processor: &P, matrix: &ArrayBase<S, Ix2>) -> Result<Array2<Complex<T>>>
where
    T: CorrNum,
    P: Processor<T> + ?Sized,
    S: Data<Elem = Complex<T>>,
{
    transform(matrix, |lane| processor.backward(lane))
}

fn transform<T, S, F>(matrix: &ArrayBase<S, Ix2>, pass: F) -> Result<Array2<Complex<T>>>
where
    T: CorrNum,
    S: Data<Elem = Complex<T>>,
    F: Fn(&[Complex<T>]) -> Result<Vec<Complex<T>>> + Sync,
{
    let (rows, cols) = matrix.dim();
    check_len(rows)?;
    check_len(cols)?;

    log::trace!("2-D transform: row pass over {} rows of {}", rows, cols);
    let intermediate = along_axis(matrix, Axis(0), &pass)?;

    log::trace!("2-D transform: column pass over {} columns of {}", cols, rows);
    let transposed = along_axis(&intermediate, Axis(1), &pass)?;

    // the column pass produced one row per column
    Ok(transposed.reversed_axes().as_standard_layout().into_owned())
}

/// Applies `pass` to every lane obtained by iterating over `axis` and stacks
/// the results as the rows of a new matrix.
fn along_axis<T, S, F>(
    matrix: &ArrayBase<S, Ix2>,
    axis: Axis,
    pass: &F,
) -> Result<Array2<Complex<T>>>
where
    T: CorrNum,
    S: Data<Elem = Complex<T>>,
    F: Fn(&[Complex<T>]) -> Result<Vec<Complex<T>>> + Sync,
{
    let lanes = matrix.len_of(axis);
    let lane_len = matrix.len() / lanes;

    let transformed = matrix
        .axis_iter(axis)
        .into_par_iter()
        .map(|lane| match lane.as_slice() {
            Some(samples) => pass(samples),
            None => pass(&lane.to_vec()),
        })
        .collect::<Result<Vec<_>>>()?;

    let flat: Vec<_> = transformed.into_iter().flatten().collect();
    Ok(Array2::from_shape_vec((lanes, lane_len), flat)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{complex, fft::planned, Error};
    use ndarray::array;
    use ndarray_rand::{rand_distr::Uniform, RandomExt};

    const TOLERANCE_F64: f64 = 1e-9;

    fn random_matrix(n: usize) -> Array2<Complex<f64>> {
        let re = Array2::random((n, n), Uniform::new(-1f64, 1.));
        let im = Array2::random((n, n), Uniform::new(-1f64, 1.));
        ndarray::Zip::from(&re)
            .and(&im)
            .map_collect(|&re, &im| Complex::new(re, im))
    }

    fn assert_close(a: &Array2<Complex<f64>>, b: &Array2<Complex<f64>>) {
        assert_eq!(a.shape(), b.shape());
        for ((idx, x), y) in a.indexed_iter().zip(b.iter()) {
            assert!(
                (x - y).norm() < TOLERANCE_F64 * (1.0 + y.norm()),
                "Mismatch at {:?}: {} vs {}",
                idx,
                x,
                y
            );
        }
    }

    #[test]
    fn forward_of_inverse_round_trip() {
        for n in [4, 8] {
            let m = random_matrix(n);
            assert_close(&fft_2d(&ifft_2d(&m).unwrap()).unwrap(), &m);
            assert_close(&ifft_2d(&fft_2d(&m).unwrap()).unwrap(), &m);
        }
    }

    #[test]
    fn rows_then_columns() {
        let m = random_matrix(4);

        let mut expected = m.clone();
        for mut row in expected.rows_mut() {
            let t = crate::fft(&row).unwrap();
            row.assign(&t);
        }
        for mut col in expected.columns_mut() {
            let t = crate::fft(&col).unwrap();
            col.assign(&t);
        }

        assert_close(&fft_2d(&m).unwrap(), &expected);
    }

    #[test]
    fn rectangular_power_of_two() {
        let m = complex::from_real(&array![[1.0f64, 2., 3., 4.], [5., 6., 7., 8.]]);
        let spectrum = fft_2d(&m).unwrap();

        assert_eq!(spectrum.dim(), (2, 4));
        // DC term is the sum of all samples
        assert!((spectrum[(0, 0)] - Complex::new(36.0, 0.0)).norm() < TOLERANCE_F64);
        assert_close(&ifft_2d(&spectrum).unwrap(), &m);
    }

    #[test]
    fn constant_matrix_concentrates_at_dc() {
        let m = Array2::from_elem((8, 8), Complex::new(1.0f64, 0.0));
        let spectrum = fft_2d(&m).unwrap();

        let mut expected = Array2::zeros((8, 8));
        expected[(0, 0)] = Complex::new(64.0, 0.0);
        assert_close(&spectrum, &expected);
    }

    #[test]
    fn backends_agree() {
        let proc = planned::Processor::<f64>::default();
        let m = random_matrix(8);

        assert_close(&forward(&proc, &m).unwrap(), &fft_2d(&m).unwrap());
        assert_close(&backward(&proc, &m).unwrap(), &ifft_2d(&m).unwrap());
    }

    #[test]
    fn non_standard_layout_input() {
        let m = random_matrix(4);
        let t = m.t();
        assert_close(&fft_2d(&t).unwrap(), &fft_2d(&t.to_owned()).unwrap());
    }

    #[test]
    fn invalid_dimensions() {
        let m = Array2::<Complex<f64>>::zeros((4, 6));
        assert_eq!(fft_2d(&m), Err(Error::InvalidLength(6)));

        let m = Array2::<Complex<f64>>::zeros((3, 4));
        assert_eq!(ifft_2d(&m), Err(Error::InvalidLength(3)));
    }
}

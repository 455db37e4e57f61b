use super::*;
use crate::{fft::planned, Error};
use ndarray::{array, Array1};

const TOLERANCE_F64: f64 = 1e-9;

/// Direct O(n²) linear convolution, the trusted baseline.
fn naive_linear(x: &Array1<Complex<f64>>, y: &Array1<Complex<f64>>) -> Array1<Complex<f64>> {
    let mut out = Array1::zeros(x.len() + y.len() - 1);
    for (i, a) in x.iter().enumerate() {
        for (j, b) in y.iter().enumerate() {
            out[i + j] += a * b;
        }
    }
    out
}

/// Direct circular convolution with modular indexing.
fn naive_circular(x: &Array1<Complex<f64>>, y: &Array1<Complex<f64>>) -> Array1<Complex<f64>> {
    let n = x.len();
    Array1::from_shape_fn(n, |k| (0..n).map(|j| x[j] * y[(n + k - j) % n]).sum())
}

fn real(values: &[f64]) -> Array1<Complex<f64>> {
    values.iter().map(|&v| Complex::new(v, 0.0)).collect()
}

fn assert_matches(fft: &Array1<Complex<f64>>, baseline: &[Complex<f64>]) {
    fft.iter()
        .zip(baseline.iter())
        .enumerate()
        .for_each(|(idx, (fft_val, base_val))| {
            let diff = (fft_val - base_val).norm();
            assert!(
                diff < TOLERANCE_F64,
                "Mismatch at index {}: FFT={:.10}+{:.10}i, baseline={:.10}+{:.10}i, diff={:.10}",
                idx,
                fft_val.re,
                fft_val.im,
                base_val.re,
                base_val.im,
                diff
            );
        });
}

#[test]
fn circular_keeps_length() {
    let x = real(&[1., 2., 3., 4.]);
    let y = real(&[0., 1., 0.5, 0.]);

    let res = x.circular_convolve(&y).unwrap();
    assert_eq!(res.len(), x.len());
    assert_matches(&res, naive_circular(&x, &y).as_slice().unwrap());
}

#[test]
fn circular_wraps_around() {
    // shifting by one sample rotates the signal
    let x = real(&[1., 2., 3., 4.]);
    let shift = real(&[0., 1., 0., 0.]);

    let res = x.circular_convolve(&shift).unwrap();
    assert_matches(&res, real(&[4., 1., 2., 3.]).as_slice().unwrap());
}

#[test]
fn linear_matches_direct_n4() {
    let x = real(&[1., 2., 3., 4.]);
    let y = real(&[1., 1., 1., 0.]);

    let res = x.linear_convolve(&y).unwrap();
    let direct = naive_linear(&x, &y);

    assert_eq!(res.len(), 8);
    assert_matches(&res, direct.as_slice().unwrap());
    // the true convolution has 2n - 1 terms
    assert!(res[7].norm() < TOLERANCE_F64);
}

#[test]
fn linear_matches_direct_n8_complex() {
    let x = array![
        Complex::new(1.0, 0.5),
        Complex::new(-2.0, 0.0),
        Complex::new(0.0, 1.0),
        Complex::new(3.0, -1.0),
        Complex::new(0.5, 0.5),
        Complex::new(0.0, 0.0),
        Complex::new(-1.0, 2.0),
        Complex::new(4.0, 0.0)
    ];
    let y = x.mapv(|v| v.conj() * Complex::new(0.5, 0.0));

    let res = x.linear_convolve(&y).unwrap();
    assert_matches(&res, naive_linear(&x, &y).as_slice().unwrap());
}

#[test]
fn linear_with_planned_backend() {
    let proc = planned::Processor::<f64>::default();
    let x = real(&[2., 0., -1., 5.]);
    let y = real(&[1., 3., 0., 1.]);

    let res = linear_with(&proc, &x, &y).unwrap();
    assert_matches(&res, naive_linear(&x, &y).as_slice().unwrap());
}

#[test]
fn mismatched_lengths() {
    let x = real(&[1., 2., 3., 4.]);
    let y = real(&[1., 2.]);

    let expected = Err(Error::DimensionMismatch {
        left: vec![4],
        right: vec![2],
    });
    assert_eq!(x.circular_convolve(&y), expected);
    assert_eq!(x.linear_convolve(&y), expected);
}

#[test]
fn non_power_of_two() {
    let x = real(&[1., 2., 3.]);
    assert_eq!(x.circular_convolve(&x), Err(Error::InvalidLength(3)));
    // padded to six samples
    assert_eq!(x.linear_convolve(&x), Err(Error::InvalidLength(6)));
}

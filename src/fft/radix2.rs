use num::Complex;

use super::Processor as ProcessorTrait;
use super::{check_len, from_len, CorrNum};
use crate::Result;

/// Recursive radix-2 Cooley–Tukey FFT.
///
/// Every level allocates its own even/odd halves and output, so the input
/// slice is only ever read.
#[derive(Debug, Default, Clone, Copy)]
pub struct Processor;

impl<T: CorrNum> ProcessorTrait<T> for Processor {
    fn forward(&self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>> {
        check_len(input.len())?;
        Ok(transform(input))
    }
}

fn transform<T: CorrNum>(x: &[Complex<T>]) -> Vec<Complex<T>> {
    let n = x.len();
    if n == 1 {
        return x.to_vec();
    }

    let half = n / 2;
    let even: Vec<_> = x.iter().step_by(2).copied().collect();
    let odd: Vec<_> = x.iter().skip(1).step_by(2).copied().collect();
    let even = transform(&even);
    let odd = transform(&odd);

    let two = T::one() + T::one();
    let len = from_len::<T>(n);

    let mut y = vec![Complex::new(T::zero(), T::zero()); n];
    for k in 0..half {
        let kth = -(two * from_len::<T>(k) * T::PI()) / len;
        let wk = Complex::from_polar(T::one(), kth) * odd[k];
        y[k] = even[k] + wk;
        y[k + half] = even[k] - wk;
    }

    y
}

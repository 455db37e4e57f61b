use std::{collections::HashMap, sync::Arc};

use num::Complex;
use parking_lot::Mutex;
use rustfft::{Fft, FftDirection, FftPlanner};

use super::Processor as ProcessorTrait;
use super::{check_len, from_len, CorrNum};
use crate::Result;

type PlanCache<T> = HashMap<(usize, bool), Arc<dyn Fft<T>>>;

/// FFT processor backed by `rustfft` plans.
///
/// Plans are built once per (length, direction) and shared afterwards; the
/// cache lock is held only while looking a plan up, never while transforming.
pub struct Processor<T: CorrNum> {
    plans: Mutex<PlanCache<T>>,
}

impl<T: CorrNum> Default for Processor<T> {
    fn default() -> Self {
        Self {
            plans: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: CorrNum> std::fmt::Debug for Processor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor")
            .field("plans", &self.plans.lock().len())
            .finish()
    }
}

impl<T: CorrNum> Processor<T> {
    fn plan(&self, len: usize, direction: FftDirection) -> Arc<dyn Fft<T>> {
        let inverse = direction == FftDirection::Inverse;
        self.plans
            .lock()
            .entry((len, inverse))
            .or_insert_with(|| FftPlanner::new().plan_fft(len, direction))
            .clone()
    }

    fn run(&self, input: &[Complex<T>], direction: FftDirection) -> Result<Vec<Complex<T>>> {
        check_len(input.len())?;

        let fft = self.plan(input.len(), direction);
        let mut buffer = input.to_vec();
        fft.process(&mut buffer);

        Ok(buffer)
    }
}

impl<T: CorrNum> ProcessorTrait<T> for Processor<T> {
    fn forward(&self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>> {
        self.run(input, FftDirection::Forward)
    }

    fn backward(&self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>> {
        let mut output = self.run(input, FftDirection::Inverse)?;

        // rustfft leaves the inverse unnormalized
        let norm = T::one() / from_len::<T>(input.len());
        output.iter_mut().for_each(|v| *v = v.scale(norm));

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn reuses_plans() {
        let proc = Processor::<f64>::default();
        let x = vec![Complex::new(1.0, 0.0); 8];

        proc.forward(&x).unwrap();
        proc.forward(&x).unwrap();
        proc.backward(&x).unwrap();

        assert_eq!(proc.plans.lock().len(), 2);
    }

    #[test]
    fn rejects_invalid_lengths() {
        let proc = Processor::<f32>::default();
        let x = vec![Complex::new(1.0f32, 0.0); 6];

        assert_eq!(proc.forward(&x), Err(Error::InvalidLength(6)));
        assert_eq!(proc.backward(&x), Err(Error::InvalidLength(6)));
    }
}

//! Phase correlation of two equally sized intensity matrices.
//!
//! The reference and the template are transformed with the 2-D FFT, combined
//! into the cross-power spectrum `F ⊙ conj(G)` and transformed back. The real
//! part of the result is the correlation surface; cells reaching a fraction of
//! its maximum form the peak region whose centroid locates the template inside
//! the reference.

use ndarray::{Array2, ArrayBase, Data, Ix2};
use num::{Complex, ToPrimitive};

use crate::{
    complex,
    error::ensure_same_shape,
    fft::{radix2, CorrNum, Processor},
    fft_2d, Error, Result,
};


/// How surface indices map onto reported coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateFlip {
    /// Report surface indices as they are.
    None,
    /// Mirror both axes: `(i, j)` is reported as `(rows - 1 - i, cols - 1 - j)`.
    #[default]
    Mirror,
}

impl CoordinateFlip {
    pub fn apply(self, (i, j): (usize, usize), (rows, cols): (usize, usize)) -> (usize, usize) {
        match self {
            CoordinateFlip::None => (i, j),
            CoordinateFlip::Mirror => (rows - 1 - i, cols - 1 - j),
        }
    }
}

/// Classification of one cell of the rendered correlation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// At or above the peak threshold.
    Peak,
    /// Positive but below the threshold, as a grey level `value / max * 255`.
    Background(u8),
    /// Zero or negative.
    #[default]
    Zero,
}

impl Cell {
    /// Display color: red for peak cells, grey for background, black otherwise.
    pub fn to_rgb(self) -> [u8; 3] {
        match self {
            Cell::Peak => [255, 0, 0],
            Cell::Background(level) => [level; 3],
            Cell::Zero => [0, 0, 0],
        }
    }
}

/// Configuration for [`PhaseCorrelator`].
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationConfig {
    /// Fraction of the surface maximum a cell must reach to be a peak cell.
    pub peak_threshold: f64,
    /// Coordinate convention for peak cells, centroid and visualization.
    pub flip: CoordinateFlip,
    /// Whether to build the visualization grid.
    pub render: bool,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            peak_threshold: 0.9,
            flip: CoordinateFlip::Mirror,
            render: true,
        }
    }
}

impl CorrelationConfig {
    pub fn with_peak_threshold(mut self, peak_threshold: f64) -> Self {
        self.peak_threshold = peak_threshold;
        self
    }

    pub fn with_flip(mut self, flip: CoordinateFlip) -> Self {
        self.flip = flip;
        self
    }

    pub fn with_render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    /// # Errors
    ///
    /// [`Error::InvalidThreshold`] unless `0 < peak_threshold <= 1`.
    pub fn validate(&self) -> Result<()> {
        let t = self.peak_threshold;
        if t > 0.0 && t <= 1.0 {
            Ok(())
        } else {
            Err(Error::InvalidThreshold(t))
        }
    }
}

/// Output of one correlation run.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationResult<T> {
    /// Real part of the inverse transform, indexed `(row, column)` without flip.
    pub surface: Array2<T>,
    /// Largest surface value.
    pub maximum: T,
    /// First position (row-major) holding `maximum`, without flip.
    pub max_position: (usize, usize),
    /// Peak cells in reported coordinates.
    pub peaks: Vec<(usize, usize)>,
    /// Mean `(row, column)` of the peak cells; `None` for a degenerate surface.
    pub centroid: Option<(f64, f64)>,
    /// Per-cell classification in reported coordinates, when rendering is enabled.
    pub visualization: Option<Array2<Cell>>,
}

impl<T: CorrNum> CorrelationResult<T> {
    /// `true` when the surface had no positive maximum and no peak was found.
    pub fn is_degenerate(&self) -> bool {
        self.centroid.is_none()
    }

    /// Signed `(row, column)` shift of the reference relative to the template,
    /// read from the unflipped maximum with wraparound: positions past the
    /// midpoint are negative shifts.
    pub fn translation(&self) -> Option<(isize, isize)> {
        if self.is_degenerate() {
            return None;
        }

        let (rows, cols) = self.surface.dim();
        let (i, j) = self.max_position;
        Some((wrap(i, rows), wrap(j, cols)))
    }
}

fn wrap(p: usize, n: usize) -> isize {
    if p > n / 2 {
        p as isize - n as isize
    } else {
        p as isize
    }
}

/// Phase correlator running its transforms on `P`.
#[derive(Debug, Clone, Default)]
pub struct PhaseCorrelator<P = radix2::Processor> {
    config: CorrelationConfig,
    processor: P,
}

impl PhaseCorrelator {
    /// Correlator on the radix-2 engine.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidThreshold`] for an invalid configuration.
    pub fn new(config: CorrelationConfig) -> Result<Self> {
        Self::with_processor(config, radix2::Processor)
    }
}

impl<P> PhaseCorrelator<P> {
    pub fn with_processor(config: CorrelationConfig, processor: P) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, processor })
    }

    pub fn config(&self) -> &CorrelationConfig {
        &self.config
    }

    /// Correlates `reference` against `template`.
    ///
    /// # Errors
    ///
    /// * [`Error::DimensionMismatch`] if the two matrices differ in shape; no
    ///   transform is run in that case.
    /// * [`Error::InvalidLength`] if a dimension is not a power of two.
    ///
    /// A surface without a positive maximum is not an error: the result is
    /// [degenerate](CorrelationResult::is_degenerate).
    pub fn correlate<T, S1, S2>(
        &self,
        reference: &ArrayBase<S1, Ix2>,
        template: &ArrayBase<S2, Ix2>,
    ) -> Result<CorrelationResult<T>>
    where
        T: CorrNum,
        P: Processor<T>,
        S1: Data<Elem = Complex<T>>,
        S2: Data<Elem = Complex<T>>,
    {
        ensure_same_shape(reference.shape(), template.shape())?;
        log::debug!(
            "correlating {:?} matrices, flip {:?}",
            reference.dim(),
            self.config.flip
        );

        let f = fft_2d::forward(&self.processor, reference)?;
        let g = fft_2d::forward(&self.processor, template)?;
        let spectrum = complex::cross_power(&f, &g)?;
        let c = fft_2d::backward(&self.processor, &spectrum)?;

        extract_peaks(complex::real(&c), &self.config)
    }
}

/// Correlates with the default configuration on the radix-2 engine.
pub fn correlate<T, S1, S2>(
    reference: &ArrayBase<S1, Ix2>,
    template: &ArrayBase<S2, Ix2>,
) -> Result<CorrelationResult<T>>
where
    T: CorrNum,
    S1: Data<Elem = Complex<T>>,
    S2: Data<Elem = Complex<T>>,
{
    PhaseCorrelator::<radix2::Processor>::default().correlate(reference, template)
}

/// Thresholds a correlation surface and locates its peak region.
///
/// Cells `>= peak_threshold * max` are peak cells; other positive cells are
/// background, the rest zero. Empty surfaces and surfaces whose maximum is not
/// positive yield a degenerate result.
///
/// # Errors
///
/// [`Error::InvalidThreshold`] for an invalid configuration.
pub fn extract_peaks<T: CorrNum>(
    surface: Array2<T>,
    config: &CorrelationConfig,
) -> Result<CorrelationResult<T>> {
    config.validate()?;
    let threshold =
        T::from_f64(config.peak_threshold).ok_or(Error::InvalidThreshold(config.peak_threshold))?;

    let dim = surface.dim();
    let (maximum, max_position) = find_max(&surface);

    let mut visualization = config.render.then(|| Array2::from_elem(dim, Cell::Zero));

    if !(maximum > T::zero() && maximum.is_finite()) {
        log::warn!(
            "degenerate correlation surface (max {:?}), no peak found",
            maximum
        );
        return Ok(CorrelationResult {
            surface,
            maximum,
            max_position,
            peaks: Vec::new(),
            centroid: None,
            visualization,
        });
    }

    let cutoff = threshold * maximum;
    let mut peaks = Vec::new();
    let (mut sum_row, mut sum_col) = (0.0, 0.0);

    for (index, &value) in surface.indexed_iter() {
        let cell = if value >= cutoff {
            Cell::Peak
        } else if value > T::zero() {
            Cell::Background(grey_level(value / maximum))
        } else {
            Cell::Zero
        };

        let at = config.flip.apply(index, dim);
        if cell == Cell::Peak {
            sum_row += at.0 as f64;
            sum_col += at.1 as f64;
            peaks.push(at);
        }
        if let Some(grid) = visualization.as_mut() {
            grid[at] = cell;
        }
    }

    // the maximum itself always passes the cutoff
    let count = peaks.len() as f64;
    let centroid = Some((sum_row / count, sum_col / count));

    log::debug!(
        "surface max {:?} at {:?}, {} peak cells, centroid {:?}",
        maximum,
        max_position,
        peaks.len(),
        centroid
    );

    Ok(CorrelationResult {
        surface,
        maximum,
        max_position,
        peaks,
        centroid,
        visualization,
    })
}

fn find_max<T: CorrNum>(surface: &Array2<T>) -> (T, (usize, usize)) {
    surface
        .indexed_iter()
        .fold((T::neg_infinity(), (0, 0)), |(max, at), (index, &value)| {
            if value > max {
                (value, index)
            } else {
                (max, at)
            }
        })
}

fn grey_level<T: CorrNum>(ratio: T) -> u8 {
    (ratio * T::from_u8(u8::MAX).unwrap_or_else(T::zero))
        .to_u8()
        .unwrap_or(u8::MAX)
}

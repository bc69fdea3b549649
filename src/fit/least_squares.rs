use nalgebra::{DMatrix, DVector, SVD};

use super::degree::Degree;
use crate::data::model::Dataset;

/// Iteration cap for the SVD; the solver reports failure rather than spin.
const SVD_MAX_ITERATIONS: usize = 10_000;

/// Errors that can occur while fitting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Cannot fit because there are no points.
    #[error("No data available for fitting")]
    NoData,

    /// The points contain NaN or infinite values.
    #[error("Data contains a non-finite value at point {index}")]
    NonFinite { index: usize },

    /// The solve produced NaN or infinite coefficients or error.
    ///
    /// Usually the degree is far too high for the spread of the x values.
    #[error("Fit is ill-conditioned (degree {degree}, {n} points); try a lower degree")]
    IllConditioned { degree: usize, n: usize },

    /// The design matrix for this degree cannot be allocated.
    #[error("Degree {degree} over {n} points needs more memory than is available")]
    TooLarge { degree: usize, n: usize },

    /// The linear algebra backend failed.
    #[error("Failed to solve: {0}")]
    Solver(&'static str),
}

// ---------------------------------------------------------------------------
// FitResult
// ---------------------------------------------------------------------------

/// Coefficients and RMS error from one fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// Highest degree first.
    coefficients: Vec<f64>,
    rms_error: f64,
    degree: Degree,
}

impl FitResult {
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn rms_error(&self) -> f64 {
        self.rms_error
    }

    pub fn degree(&self) -> Degree {
        self.degree
    }

    /// Evaluate the polynomial at `x` (Horner's scheme).
    pub fn evaluate(&self, x: f64) -> f64 {
        evaluate(&self.coefficients, x)
    }

    /// The fitted curve sampled at the dataset's x values, ascending in x.
    pub fn curve(&self, dataset: &Dataset) -> Vec<[f64; 2]> {
        let mut xs: Vec<f64> = dataset.x().to_vec();
        xs.sort_by(f64::total_cmp);
        xs.into_iter().map(|x| [x, self.evaluate(x)]).collect()
    }

    /// Legend label for the curve.
    pub fn label(&self) -> String {
        format!("Degree {} polynomial fit", self.degree)
    }
}

/// Evaluate highest-first coefficients at `x`.
pub fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Ordinary least-squares polynomial fit.
///
/// # How it works
/// - Builds the Vandermonde matrix `A` (`n × (degree + 1)`, highest power in
///   the first column) and scales each column to unit norm.
/// - Solves `A * c = y` through the **SVD** of `A`, discarding singular
///   values below `n * ε * σ_max`.  This yields the minimum-norm solution,
///   so `degree >= n` still produces an (under-determined) fit.
/// - Undoes the column scaling and computes the RMS residual at the
///   original x values.
pub fn fit_polynomial(dataset: &Dataset, degree: Degree) -> Result<FitResult, FitError> {
    if dataset.is_empty() {
        return Err(FitError::NoData);
    }
    if let Some(index) = dataset
        .points()
        .position(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        return Err(FitError::NonFinite { index });
    }

    let x = dataset.x();
    let n = x.len();

    // Powers are taken with `powi`, so the degree must fit in an i32.
    let too_large = || FitError::TooLarge {
        degree: degree.get(),
        n,
    };
    if i32::try_from(degree.get()).is_err() {
        return Err(too_large());
    }
    let k = degree.coefficient_count();
    let cells = n.checked_mul(k).ok_or_else(too_large)?;
    let mut cells_buf: Vec<f64> = Vec::new();
    cells_buf.try_reserve_exact(cells).map_err(|_| too_large())?;

    // Column `col` holds x^(k - 1 - col).
    let power = |col: usize| (k - 1 - col) as i32;
    let scale: Vec<f64> = (0..k)
        .map(|col| {
            let norm = x.iter().map(|xi| xi.powi(power(col)).powi(2)).sum::<f64>().sqrt();
            if norm > 0.0 { norm } else { 1.0 }
        })
        .collect();
    // Column-major, as nalgebra stores it.
    for (col, s) in scale.iter().enumerate() {
        cells_buf.extend(x.iter().map(|xi| xi.powi(power(col)) / s));
    }
    let design = DMatrix::from_vec(n, k, cells_buf);

    let b = DVector::from_column_slice(dataset.y());
    let svd = SVD::try_new(design, true, true, f64::EPSILON, SVD_MAX_ITERATIONS)
        .ok_or(FitError::Solver("SVD did not converge"))?;

    let sigma_max = svd.singular_values.max();
    let cutoff = n as f64 * f64::EPSILON * sigma_max;
    let solution = svd.solve(&b, cutoff).map_err(FitError::Solver)?;

    let coefficients: Vec<f64> = solution
        .iter()
        .zip(&scale)
        .map(|(c, s)| c / s)
        .collect();

    let rms_error = rms_error(&coefficients, dataset);
    if !rms_error.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
        return Err(FitError::IllConditioned {
            degree: degree.get(),
            n,
        });
    }

    log::debug!("fit degree {degree} over {n} points: {coefficients:?}, rms {rms_error}");

    Ok(FitResult {
        coefficients,
        rms_error,
        degree,
    })
}

/// Root-mean-square residual of the polynomial over the dataset.
fn rms_error(coefficients: &[f64], dataset: &Dataset) -> f64 {
    let sum_sq: f64 = dataset
        .points()
        .map(|(x, y)| {
            let r = y - evaluate(coefficients, x);
            r * r
        })
        .sum();
    (sum_sq / dataset.len() as f64).sqrt()
}

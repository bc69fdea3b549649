/// Fitting layer: degree validation and the least-squares solve.
///
/// ```text
///   degree text ──▶ degree::Degree ─┐
///                                   ▼
///   Dataset ────────────▶ least_squares::fit_polynomial ──▶ FitResult
/// ```

pub mod degree;
pub mod least_squares;

pub use degree::{Degree, DegreeError};
pub use least_squares::{FitError, FitResult, fit_polynomial};

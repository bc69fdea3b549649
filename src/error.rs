use crate::export::ExportError;
use crate::fit::{DegreeError, FitError};

/// Every way a user action can fail.  Shown in the status line and logged;
/// the application state is left as it was before the action.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Missing, unreadable or malformed data file.
    #[error("Failed to load data: {0:#}")]
    Load(anyhow::Error),

    #[error(transparent)]
    Degree(#[from] DegreeError),

    #[error("No data loaded. Load data before fitting")]
    NoData,

    #[error("No plot to save. Load data first")]
    NoChart,

    #[error("No coefficients to save. Run a fit first")]
    NoFit,

    #[error(transparent)]
    Fit(#[from] FitError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

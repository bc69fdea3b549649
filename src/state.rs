use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::data::loader;
use crate::data::model::Dataset;
use crate::error::ActionError;
use crate::export;
use crate::fit::{Degree, FitResult, fit_polynomial};

// ---------------------------------------------------------------------------
// Actions and status
// ---------------------------------------------------------------------------

/// A user request, resolved to concrete inputs (dialogs already answered).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Load(PathBuf),
    Fit,
    SavePlot(PathBuf),
    SaveCoefficients(PathBuf),
    /// Read back a saved coefficients file and report what it holds.
    CheckCoefficients(PathBuf),
}

/// Where the workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing loaded yet.
    Idle,
    /// A dataset is loaded, no fit for it yet.
    Loaded,
    /// The loaded dataset has a fit.
    Fitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Outcome of the last action, shown in the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Loaded dataset (None until user loads a file).
    dataset: Option<Dataset>,

    /// Fit of the current dataset (None until a fit succeeds).
    fit: Option<FitResult>,

    /// Contents of the degree text entry.
    pub degree_text: String,

    /// Status / error message shown in the UI.
    pub status: Option<Status>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            dataset: None,
            fit: None,
            degree_text: String::new(),
            status: None,
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn fit(&self) -> Option<&FitResult> {
        self.fit.as_ref()
    }

    pub fn phase(&self) -> Phase {
        match (&self.dataset, &self.fit) {
            (None, _) => Phase::Idle,
            (Some(_), None) => Phase::Loaded,
            (Some(_), Some(_)) => Phase::Fitted,
        }
    }

    /// A chart is shown whenever data is loaded.
    pub fn has_chart(&self) -> bool {
        self.dataset.is_some()
    }

    /// Run an action and record its outcome in `status`.
    pub fn dispatch(&mut self, action: Action) {
        let result = match action {
            Action::Load(path) => self.load(&path),
            Action::Fit => self.run_fit(),
            Action::SavePlot(path) => self.save_plot(&path),
            Action::SaveCoefficients(path) => self.save_coefficients(&path),
            Action::CheckCoefficients(path) => self.check_coefficients(&path),
        };

        self.status = Some(match result {
            Ok(message) => {
                log::info!("{message}");
                Status {
                    kind: StatusKind::Info,
                    message,
                }
            }
            Err(e) => {
                log::error!("{e}");
                Status {
                    kind: StatusKind::Error,
                    message: format!("Error: {e}"),
                }
            }
        });
    }

    /// Report a failure that happened before an action could be built
    /// (e.g. a menu entry whose precondition does not hold).
    pub fn report_error(&mut self, error: ActionError) {
        log::warn!("{error}");
        self.status = Some(Status {
            kind: StatusKind::Error,
            message: format!("Error: {error}"),
        });
    }

    /// Replace the dataset.  Any previous fit belongs to the old data and is
    /// dropped.  On failure nothing changes.
    pub fn load(&mut self, path: &Path) -> Result<String, ActionError> {
        let dataset = loader::load_file(path).map_err(ActionError::Load)?;
        let message = format!("Loaded {} points from {}", dataset.len(), path.display());
        self.dataset = Some(dataset);
        self.fit = None;
        Ok(message)
    }

    /// Parse the degree entry and fit the loaded dataset.
    pub fn run_fit(&mut self) -> Result<String, ActionError> {
        let degree: Degree = self.degree_text.parse()?;
        let dataset = self.dataset.as_ref().ok_or(ActionError::NoData)?;
        if dataset.is_empty() {
            return Err(ActionError::NoData);
        }

        let fit = fit_polynomial(dataset, degree)?;
        let message = format!(
            "Fitted degree {degree} over {} points, RMS error {:.6}",
            dataset.len(),
            fit.rms_error()
        );
        self.fit = Some(fit);
        Ok(message)
    }

    pub fn save_plot(&self, path: &Path) -> Result<String, ActionError> {
        let dataset = self.dataset.as_ref().ok_or(ActionError::NoChart)?;
        export::save_plot(
            path,
            dataset,
            self.fit.as_ref(),
            &self.config.chart,
            self.config.export_size,
        )?;
        Ok(format!("Plot saved to {}", path.display()))
    }

    pub fn save_coefficients(&self, path: &Path) -> Result<String, ActionError> {
        let fit = self.fit.as_ref().ok_or(ActionError::NoFit)?;
        export::write_coefficients(path, fit)?;
        Ok(format!("Coefficients saved to {}", path.display()))
    }

    /// Works in any phase; the loaded dataset and fit are left alone.
    pub fn check_coefficients(&self, path: &Path) -> Result<String, ActionError> {
        let saved = export::read_coefficients(path)?;
        Ok(format!(
            "{} holds {} coefficients, RMS error {:.6}",
            path.display(),
            saved.coefficients.len(),
            saved.rms_error
        ))
    }
}

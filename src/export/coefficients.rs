use std::fmt::Write as _;
use std::path::Path;

use super::ExportError;
use crate::fit::FitResult;

pub const HEADER: &str = "# Polynomial coefficients";
pub const ERROR_PREFIX: &str = "# RMS error: ";

/// Coefficients and error as read back from a coefficients file.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedCoefficients {
    /// Highest degree first.
    pub coefficients: Vec<f64>,
    pub rms_error: f64,
}

/// Render a fit in the coefficients file format:
///
/// ```text
/// # Polynomial coefficients
/// 1.000000000000000000e0
/// -2.500000000000000000e-1
/// # RMS error: 0.012345
/// ```
pub fn format_coefficients(fit: &FitResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{HEADER}");
    for c in fit.coefficients() {
        let _ = writeln!(out, "{c:.18e}");
    }
    let _ = writeln!(out, "{ERROR_PREFIX}{:.6}", fit.rms_error());
    out
}

pub fn write_coefficients(path: &Path, fit: &FitResult) -> Result<(), ExportError> {
    std::fs::write(path, format_coefficients(fit)).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "wrote {} coefficients to {}",
        fit.coefficients().len(),
        path.display()
    );
    Ok(())
}

pub fn read_coefficients(path: &Path) -> Result<SavedCoefficients, ExportError> {
    let text = std::fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_coefficients(&text)
}

/// Parse the coefficients file format.  Comment lines other than the RMS
/// footer are skipped.
pub fn parse_coefficients(text: &str) -> Result<SavedCoefficients, ExportError> {
    let mut coefficients = Vec::new();
    let mut rms_error = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let value = match line.strip_prefix(ERROR_PREFIX) {
            Some(rest) => rest,
            None if line.starts_with('#') => continue,
            None => line,
        };
        let parsed: f64 = value.trim().parse().map_err(|_| ExportError::Parse {
            line: idx + 1,
            content: raw.to_string(),
        })?;
        if line.starts_with(ERROR_PREFIX) {
            rms_error = Some(parsed);
        } else {
            coefficients.push(parsed);
        }
    }

    let rms_error = rms_error.ok_or(ExportError::MissingError)?;
    Ok(SavedCoefficients {
        coefficients,
        rms_error,
    })
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;
    use crate::data::model::Dataset;
    use crate::fit::{Degree, fit_polynomial};

    fn sample_fit() -> FitResult {
        let ds = Dataset::new(vec![0.0, 1.0, 2.0, 3.0, 4.0], vec![1.1, 2.9, 9.2, 19.1, 32.8]).unwrap();
        fit_polynomial(&ds, Degree::new(2)).unwrap()
    }

    #[test]
    fn layout_has_header_coefficients_and_footer() {
        let fit = sample_fit();
        let text = format_coefficients(&fit);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), fit.coefficients().len() + 2);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines.last().copied(),
            Some(format!("{ERROR_PREFIX}{:.6}", fit.rms_error()).as_str())
        );
        let footer_digits = lines[lines.len() - 1].rsplit('.').next().unwrap();
        assert_eq!(footer_digits.len(), 6);
    }

    #[test]
    fn round_trip_through_file() {
        let dir = TempDir::new("coefficients").unwrap();
        let path = dir.path().join("fit.txt");
        let fit = sample_fit();

        write_coefficients(&path, &fit).unwrap();
        let saved = read_coefficients(&path).unwrap();

        assert_eq!(saved.coefficients.len(), fit.coefficients().len());
        for (a, b) in saved.coefficients.iter().zip(fit.coefficients()) {
            assert!((a - b).abs() < 1e-6, "{a} vs {b}");
        }
        assert!((saved.rms_error - fit.rms_error()).abs() < 1e-6);
    }

    #[test]
    fn parse_rejects_garbage_lines() {
        let err = parse_coefficients("# Polynomial coefficients\n1.0\nabc\n# RMS error: 0.1\n")
            .unwrap_err();
        assert!(matches!(err, ExportError::Parse { line: 3, .. }));
    }

    #[test]
    fn parse_requires_footer() {
        let err = parse_coefficients("# Polynomial coefficients\n1.0\n").unwrap_err();
        assert!(matches!(err, ExportError::MissingError));
    }

    #[test]
    fn unwritable_destination_is_reported() {
        let dir = TempDir::new("coefficients").unwrap();
        let path = dir.path().join("missing-dir").join("fit.txt");

        let err = write_coefficients(&path, &sample_fit()).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(!path.exists());
    }
}

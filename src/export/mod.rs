/// Export layer: plot images and coefficient files.

pub mod chart;
pub mod coefficients;

use std::path::{Path, PathBuf};

pub use chart::save_plot;
pub use coefficients::{read_coefficients, write_coefficients};

/// Errors raised while writing or reading exported files.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to draw chart: {0}")]
    Draw(String),

    #[error("Line {line} is not a number: '{content}'")]
    Parse { line: usize, content: String },

    #[error("Coefficients file has no RMS error footer")]
    MissingError,
}

/// Append `ext` when the user picked a destination without an extension.
pub fn with_default_extension(path: PathBuf, ext: &str) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(ext)
    }
}

/// Suggested file name for a save dialog, based on the loaded file.
pub fn suggested_name(source: Option<&Path>, suffix: &str, ext: &str) -> String {
    let stem = source
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("approximation");
    format!("{stem}_{suffix}.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_extension_only_when_missing() {
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/plot"), "png"),
            PathBuf::from("/tmp/plot.png")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/plot.jpeg"), "png"),
            PathBuf::from("/tmp/plot.jpeg")
        );
    }

    #[test]
    fn suggested_names() {
        assert_eq!(
            suggested_name(Some(Path::new("/data/run1.json")), "fit", "txt"),
            "run1_fit.txt"
        );
        assert_eq!(suggested_name(None, "plot", "png"), "approximation_plot.png");
    }
}

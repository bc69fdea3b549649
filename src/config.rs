use crate::color::SeriesColors;

// ---------------------------------------------------------------------------
// Compile-time application settings
// ---------------------------------------------------------------------------

/// Window, chart and export settings.  There is no config file; `main`
/// builds the defaults and hands the relevant parts to each component.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub chart: ChartStyle,
    /// Pixel size of exported plot images.
    pub export_size: (u32, u32),
}

/// Look of the chart, on screen and in exported images.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data_label: String,
    pub marker_radius: f32,
    pub line_width: f32,
    pub colors: SeriesColors,
}

/// Default raster size for Save Plot.
pub const DEFAULT_PLOT_SIZE: (u32, u32) = (1024, 768);

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: [1100.0, 720.0],
            min_window_size: [640.0, 420.0],
            chart: ChartStyle::default(),
            export_size: DEFAULT_PLOT_SIZE,
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "Data approximation".to_string(),
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
            data_label: "Experimental data".to_string(),
            marker_radius: 3.5,
            line_width: 2.0,
            colors: SeriesColors::default(),
        }
    }
}

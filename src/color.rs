use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting from `base_hue` degrees.
pub fn generate_palette(n: usize, base_hue: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (base_hue + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours shared by the on-screen plot and the exported image
// ---------------------------------------------------------------------------

/// Colours for the two chart series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesColors {
    pub data: Color32,
    pub curve: Color32,
}

impl Default for SeriesColors {
    fn default() -> Self {
        // Blue-ish markers, orange-ish curve.
        let palette = generate_palette(2, 210.0);
        SeriesColors {
            data: palette[0],
            curve: palette[1],
        }
    }
}

/// Convert an egui colour for use with plotters.
pub fn to_plotters(color: Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}

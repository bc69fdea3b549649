use eframe::egui::{RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Approximation plot (central panel)
// ---------------------------------------------------------------------------

/// Render the data points and, once fitted, the polynomial curve.
pub fn approximation_plot(ui: &mut Ui, state: &AppState) {
    let dataset = match state.dataset() {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Load a data file to begin  (File → Open…)");
            });
            return;
        }
    };

    let style = &state.config.chart;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&style.title).heading().strong());
    });

    Plot::new("approximation_plot")
        .legend(Legend::default())
        .x_axis_label(style.x_label.as_str())
        .y_axis_label(style.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let points: PlotPoints = dataset.points().map(|(x, y)| [x, y]).collect();
            plot_ui.points(
                Points::new(points)
                    .name(&style.data_label)
                    .color(style.colors.data)
                    .radius(style.marker_radius)
                    .filled(true),
            );

            if let Some(fit) = state.fit() {
                let curve: PlotPoints = fit.curve(dataset).into_iter().collect();
                plot_ui.line(
                    Line::new(curve)
                        .name(fit.label())
                        .color(style.colors.curve)
                        .width(style.line_width),
                );
            }
        });
}

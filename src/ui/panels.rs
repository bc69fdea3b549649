use eframe::egui::{self, Color32, Key, RichText, Ui};

use crate::error::ActionError;
use crate::export::{suggested_name, with_default_extension};
use crate::state::{Action, AppState, Phase, StatusKind};

// ---------------------------------------------------------------------------
// Left side panel – inputs and actions
// ---------------------------------------------------------------------------

/// Render the control panel: data file, degree entry, action buttons,
/// status and the current coefficients.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Approximation");
    ui.separator();

    // ---- Data file ----
    ui.strong("Data file");
    let file_label = state
        .dataset()
        .and_then(|ds| ds.source())
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "No file selected".to_string());
    ui.horizontal(|ui: &mut Ui| {
        ui.label(file_label);
        if ui.button("Load…").clicked() {
            open_file_dialog(state);
        }
    });
    if let Some(ds) = state.dataset() {
        ui.label(RichText::new(format!("{} points", ds.len())).small());
    }
    ui.separator();

    // ---- Degree entry ----
    ui.strong("Polynomial degree");
    let mut submit = false;
    ui.horizontal(|ui: &mut Ui| {
        let entry = ui.add(
            egui::TextEdit::singleline(&mut state.degree_text)
                .hint_text("e.g. 2")
                .desired_width(80.0),
        );
        if entry.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            submit = true;
        }
        if ui
            .add_enabled(state.phase() != Phase::Idle, egui::Button::new("Fit"))
            .clicked()
        {
            submit = true;
        }
    });
    if submit {
        state.dispatch(Action::Fit);
    }
    ui.separator();

    // ---- Export ----
    ui.strong("Export");
    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(state.has_chart(), egui::Button::new("Save plot…"))
            .clicked()
        {
            save_plot_dialog(state);
        }
        if ui
            .add_enabled(state.phase() == Phase::Fitted, egui::Button::new("Save coefficients…"))
            .clicked()
        {
            save_coefficients_dialog(state);
        }
    });
    ui.separator();

    // ---- Status ----
    if let Some(status) = &state.status {
        let color = match status.kind {
            StatusKind::Info => ui.visuals().text_color(),
            StatusKind::Error => Color32::RED,
        };
        ui.label(RichText::new(&status.message).color(color));
        ui.separator();
    }

    // ---- Current fit ----
    if let Some(fit) = state.fit() {
        ui.strong(format!("Coefficients (degree {})", fit.degree()));
        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .max_height(260.0)
            .show(ui, |ui: &mut Ui| {
                egui::Grid::new("coefficients")
                    .striped(true)
                    .show(ui, |ui: &mut Ui| {
                        let top = fit.coefficients().len().saturating_sub(1);
                        for (i, c) in fit.coefficients().iter().enumerate() {
                            ui.label(format!("x^{}", top - i));
                            ui.monospace(format!("{c:.6e}"));
                            ui.end_row();
                        }
                    });
            });
        ui.label(format!("RMS error: {:.6}", fit.rms_error()));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Save plot…").clicked() {
                save_plot_dialog(state);
                ui.close_menu();
            }
            if ui.button("Save coefficients…").clicked() {
                save_coefficients_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Check coefficients file…").clicked() {
                check_coefficients_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let phase = match state.phase() {
            Phase::Idle => "No data",
            Phase::Loaded => "Data loaded",
            Phase::Fitted => "Fitted",
        };
        ui.label(phase);
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open data file")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.dispatch(Action::Load(path));
    }
}

pub fn save_plot_dialog(state: &mut AppState) {
    if !state.has_chart() {
        state.report_error(ActionError::NoChart);
        return;
    }

    let source = state.dataset().and_then(|ds| ds.source());
    let file = rfd::FileDialog::new()
        .set_title("Save plot")
        .add_filter("PNG image", &["png"])
        .set_file_name(suggested_name(source, "plot", "png"))
        .save_file();

    if let Some(path) = file {
        state.dispatch(Action::SavePlot(with_default_extension(path, "png")));
    }
}

pub fn save_coefficients_dialog(state: &mut AppState) {
    if state.fit().is_none() {
        state.report_error(ActionError::NoFit);
        return;
    }

    let source = state.dataset().and_then(|ds| ds.source());
    let file = rfd::FileDialog::new()
        .set_title("Save coefficients")
        .add_filter("Text files", &["txt"])
        .set_file_name(suggested_name(source, "coefficients", "txt"))
        .save_file();

    if let Some(path) = file {
        state.dispatch(Action::SaveCoefficients(with_default_extension(path, "txt")));
    }
}

pub fn check_coefficients_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Check coefficients file")
        .add_filter("Text files", &["txt"])
        .pick_file();

    if let Some(path) = file {
        state.dispatch(Action::CheckCoefficients(path));
    }
}

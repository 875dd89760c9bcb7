use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader::DataSource;
use crate::data::stats::Summary;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selectors
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let current_year = state.selected_year();
    let current_month = state.selected_month();
    let mut new_year = None;
    let mut new_month = None;

    ui.strong("Select Year:");
    egui::ComboBox::from_id_salt("year_select")
        .selected_text(current_year.map(|y| y.to_string()).unwrap_or_default())
        .show_ui(ui, |ui: &mut Ui| {
            for &year in &state.year_options {
                if ui
                    .selectable_label(current_year == Some(year), year.to_string())
                    .clicked()
                {
                    new_year = Some(year);
                }
            }
        });
    ui.add_space(6.0);

    ui.strong("Select Month:");
    egui::ComboBox::from_id_salt("month_select")
        .selected_text(current_month.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for month in &state.month_options {
                if ui
                    .selectable_label(current_month == *month, month.to_string())
                    .clicked()
                {
                    new_month = Some(month.clone());
                }
            }
        });

    if let Some(year) = new_year {
        state.set_year(year);
    }
    if let Some(month) = new_month {
        state.set_month(month);
    }

    ui.separator();
    insights(ui);
}

/// Why each view is on the page.
fn insights(ui: &mut Ui) {
    egui::CollapsingHeader::new(RichText::new("Insights from the Data").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            for (title, text) in [
                ("Line chart", "Shows passenger trends over time, making seasonal swings easy to spot."),
                ("Bar chart", "Shows the year-on-year growth in total passengers."),
                ("Key metrics", "A quick overview without reading a chart."),
                ("Table", "The exact values behind the current selection."),
            ] {
                ui.label(RichText::new(title).strong());
                ui.label(text);
                ui.add_space(4.0);
            }
        });
}

// ---------------------------------------------------------------------------
// Central panel widgets
// ---------------------------------------------------------------------------

/// Highest / lowest / average cards plus the busiest and slowest month.
pub fn key_metrics(ui: &mut Ui, state: &AppState) {
    let (max, min, mean) = match state.summary {
        Some(Summary { max, min, mean, .. }) => {
            (max.to_string(), min.to_string(), format!("{mean:.2}"))
        }
        None => ("–".to_string(), "–".to_string(), "–".to_string()),
    };
    let (busiest, slowest) = match &state.extremes {
        Some(ex) => (ex.busiest.name, ex.slowest.name),
        None => ("–", "–"),
    };

    ui.horizontal_wrapped(|ui: &mut Ui| {
        metric(ui, "Highest Passengers", &max);
        metric(ui, "Lowest Passengers", &min);
        metric(ui, "Average Passengers", &mean);
        ui.separator();
        metric(ui, "Busiest Month", busiest);
        metric(ui, "Slowest Month", slowest);
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(130.0);
        ui.vertical(|ui: &mut Ui| {
            ui.label(label);
            ui.label(RichText::new(value).size(22.0).strong());
        });
    });
}

/// Shown instead of the dashboard when no dataset could be loaded.
pub fn load_failure(ui: &mut Ui, state: &AppState) {
    ui.centered_and_justified(|ui: &mut Ui| {
        let text = state
            .status_message
            .as_deref()
            .unwrap_or("Open a file to view passenger data  (File → Open…)");
        ui.label(RichText::new(text).color(Color32::RED));
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            ui.label(format!(
                "{} months loaded from {}, {} shown",
                ds.len(),
                ds.source(),
                view.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open passenger data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_from(&DataSource::Path(path));
    }
}

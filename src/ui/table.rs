use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Rows of the current selection, in source order.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let (Some(dataset), Some(view)) = (&state.dataset, &state.view) else {
        return;
    };
    if view.is_empty() {
        ui.label("No rows match this selection.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::remainder())
        .max_scroll_height(300.0)
        .header(20.0, |mut header| {
            for title in ["Month", "Year", "Month Name", "#Passengers"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, view.len(), |mut row| {
                let r = &dataset.records()[view.indices[row.index()]];
                row.col(|ui| {
                    ui.label(r.period_label());
                });
                row.col(|ui| {
                    ui.label(r.year.to_string());
                });
                row.col(|ui| {
                    ui.label(r.month_name);
                });
                row.col(|ui| {
                    ui.label(r.passengers.to_string());
                });
            });
        });
}

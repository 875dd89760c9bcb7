use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: year / month selectors ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                panels::load_failure(ui, &self.state);
                return;
            }

            ui.heading("Air Passenger Dashboard");
            panels::key_metrics(ui, &self.state);
            ui.separator();

            ui.columns(2, |cols| {
                cols[0].strong("Passenger Trends Over Time");
                plot::trend_plot(&mut cols[0], &self.state);
                cols[1].strong("Yearly Passenger Counts");
                plot::yearly_chart(&mut cols[1], &self.state);
            });
            ui.separator();

            ui.strong("Data Table");
            table::data_table(ui, &self.state);
        });
    }
}

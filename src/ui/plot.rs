use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Passenger trend (line + markers)
// ---------------------------------------------------------------------------

/// Passenger counts of the current selection over time.
pub fn trend_plot(ui: &mut Ui, state: &AppState) {
    Plot::new("trend_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Passengers")
        .label_formatter(|_name, point| {
            let year = point.x.floor();
            let month = ((point.x - year) * 12.0).round() as i32 + 1;
            format!("{year:.0}-{month:02}\n{:.0} passengers", point.y)
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let line = Line::new(PlotPoints::from(state.trend.clone()))
                .name("Passengers")
                .color(Color32::LIGHT_BLUE)
                .width(2.0);
            plot_ui.line(line);

            let markers = Points::new(PlotPoints::from(state.trend.clone()))
                .name("Passengers")
                .color(Color32::LIGHT_BLUE)
                .radius(3.5);
            plot_ui.points(markers);
        });
}

// ---------------------------------------------------------------------------
// Yearly totals (bars)
// ---------------------------------------------------------------------------

/// Total passengers per year over the whole dataset; the selected year is
/// highlighted.
pub fn yearly_chart(ui: &mut Ui, state: &AppState) {
    let selected = state.selected_year();

    let bars: Vec<Bar> = state
        .yearly_totals
        .iter()
        .map(|t| {
            let color = state
                .year_colors
                .as_ref()
                .map(|c| c.bar_color(t.year, selected))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(t.year as f64, t.total as f64)
                .width(0.7)
                .fill(color)
                .name(t.year.to_string())
        })
        .collect();

    Plot::new("yearly_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Total passengers")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Total Passengers Per Year"));
        });
}

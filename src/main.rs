use air_passenger_dashboard::app::DashboardApp;
use air_passenger_dashboard::config::Args;
use air_passenger_dashboard::report;
use air_passenger_dashboard::state::AppState;
use clap::Parser;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    if args.report {
        if let Err(e) = report::run(&args) {
            log::error!("Report failed: {e:#}");
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut state = AppState::new(args.load_options());
    state.load_from(&args.data_source());
    if let Some(year) = args.year.or(state.selected_year()) {
        state.select(year, args.month.clone());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Air Passenger Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
}

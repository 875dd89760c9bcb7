//! Air passenger dashboard: load a monthly passenger series, filter it by
//! year and month, and show metrics, charts and a table.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod report;
pub mod state;
pub mod ui;

use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{FromColor, Lch, Srgb};

/// Hue of the oldest year (blue); the newest lands on `NEWEST_HUE` (orange).
const OLDEST_HUE: f32 = 250.0;
const NEWEST_HUE: f32 = 30.0;
const LIGHTNESS: f32 = 65.0;
const CHROMA: f32 = 50.0;
const DIMMED: f32 = 0.35;

// ---------------------------------------------------------------------------
// Color mapping: year → Color32
// ---------------------------------------------------------------------------

/// One colour per year for the yearly bar chart.  Years run along a cool to
/// warm ramp in LCh so neighbouring bars differ by hue at equal lightness;
/// the selected year stays bright and the others are dimmed.
#[derive(Debug, Clone)]
pub struct YearColors {
    mapping: BTreeMap<i32, Color32>,
    default_color: Color32,
}

impl YearColors {
    pub fn new(years: &[i32]) -> Self {
        let steps = years.len().saturating_sub(1).max(1) as f32;
        let mapping = years
            .iter()
            .enumerate()
            .map(|(i, &year)| {
                let t = i as f32 / steps;
                let hue = OLDEST_HUE + (NEWEST_HUE - OLDEST_HUE) * t;
                let lch: Lch = Lch::new(LIGHTNESS, CHROMA, hue);
                let rgb: Srgb<u8> = Srgb::<f32>::from_color(lch).into_format();
                (year, Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
            })
            .collect();
        YearColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, year: i32) -> Color32 {
        self.mapping
            .get(&year)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Bar colour given the current selection.
    pub fn bar_color(&self, year: i32, selected: Option<i32>) -> Color32 {
        let base = self.color_for(year);
        match selected {
            Some(sel) if sel != year => base.gamma_multiply(DIMMED),
            _ => base,
        }
    }
}

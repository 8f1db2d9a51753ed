//per cell classification and styling of the heatmap layer
use crate::cell::Cell;
use crate::common_enums::{DisplayMode, Scenario, TravelMode};
use crate::selection::{ParkingTime, ViewSelection};
use serde::Serialize;
use std::collections::BTreeMap;

//travel time that saturates the intensity scale, minutes
pub const INTENSITY_SCALE_MINUTES: f64 = 40.0;
pub const INTENSITY_FACTOR: f64 = 0.8;

const BORDER_WEIGHT: f64 = 0.5;
const FASTEST_FILL: f64 = 0.6;
const SELECTED_FILL: f64 = 0.8;
const SELECTED_COLOR: &str = "#000";

//a missing time never wins a comparison
fn time_or_inf(cell: &Cell, mode: TravelMode, scenario: Scenario) -> f64 {
    cell.time(mode, scenario).unwrap_or(f64::INFINITY)
}

/// Picks the fastest mode for a cell.
///
/// Bike is weighed against car plus parking first, then transit and walking
/// each replace the current winner only when strictly faster than its raw
/// travel time. Ties therefore keep the earlier mode, and car is the
/// fallback when nothing beats it.
pub fn fastest_mode(cell: &Cell, scenario: Scenario, parking: ParkingTime) -> TravelMode {
    let car = time_or_inf(cell, TravelMode::Car, scenario);
    let bike = time_or_inf(cell, TravelMode::Bike, scenario);

    let mut fastest = if bike < car + parking.minutes() {
        TravelMode::Bike
    } else {
        TravelMode::Car
    };

    for challenger in [TravelMode::Pt, TravelMode::Walk] {
        if time_or_inf(cell, challenger, scenario) < time_or_inf(cell, fastest, scenario) {
            fastest = challenger;
        }
    }
    fastest
}

/// Heat value of a single mode: short trips are opaque, 50+ minutes fade out.
/// `Fastest` and `None` carry no intensity.
pub fn mode_intensity(
    cell: &Cell,
    mode: DisplayMode,
    scenario: Scenario,
    parking: ParkingTime,
) -> f64 {
    let mode = match mode {
        DisplayMode::Single(mode) => mode,
        DisplayMode::Fastest | DisplayMode::None => return 0.0,
    };
    let Some(time) = cell.time(mode, scenario) else {
        return 0.0;
    };

    let factor = time
        + match mode {
            TravelMode::Car => parking.minutes(),
            _ => 0.0,
        };
    let value = (factor / INTENSITY_SCALE_MINUTES).max(0.0) * INTENSITY_FACTOR;
    let intensity = if value > 0.0 { 1.0 - value } else { 0.0 };
    intensity.clamp(0.0, 1.0)
}

//leaflet path options for one feature
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<bool>,
    pub fill_opacity: f64,
}

impl FeatureStyle {
    fn filled(color: &'static str, fill_opacity: f64) -> Self {
        Self {
            weight: Some(BORDER_WEIGHT),
            opacity: Some(0.0),
            color: Some(color),
            dash: Some(false),
            fill_opacity,
        }
    }

    fn hidden() -> Self {
        Self {
            weight: None,
            opacity: None,
            color: None,
            dash: None,
            fill_opacity: 0.0,
        }
    }
}

pub fn cell_style(cell: &Cell, selection: &ViewSelection, selected_cell: Option<i64>) -> FeatureStyle {
    if selected_cell == Some(cell.cell_id) {
        return FeatureStyle::filled(SELECTED_COLOR, SELECTED_FILL);
    }

    match selection.mode {
        DisplayMode::Fastest => {
            let fastest = fastest_mode(cell, selection.scenario, selection.parking);
            FeatureStyle::filled(fastest.color(), FASTEST_FILL)
        }
        DisplayMode::None => FeatureStyle::hidden(),
        DisplayMode::Single(mode) => FeatureStyle::filled(
            mode.color(),
            mode_intensity(cell, selection.mode, selection.scenario, selection.parking),
        ),
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize)]
pub struct Share {
    pub cells: usize,
    pub population: f64,
}

//how many cells and residents each mode wins
#[derive(Debug, PartialEq, Clone, Default, Serialize)]
pub struct ModeShares {
    pub by_mode: BTreeMap<TravelMode, Share>,
}

impl ModeShares {
    pub fn get(&self, mode: TravelMode) -> Share {
        self.by_mode.get(&mode).copied().unwrap_or_default()
    }

    pub fn total_cells(&self) -> usize {
        self.by_mode.values().map(|s| s.cells).sum()
    }

    pub fn total_population(&self) -> f64 {
        self.by_mode.values().map(|s| s.population).sum()
    }
}

pub fn mode_shares<'a>(
    cells: impl IntoIterator<Item = &'a Cell>,
    scenario: Scenario,
    parking: ParkingTime,
) -> ModeShares {
    let mut shares = ModeShares::default();
    for cell in cells {
        let share = shares
            .by_mode
            .entry(fastest_mode(cell, scenario, parking))
            .or_default();
        share.cells += 1;
        share.population += cell.population();
    }
    shares
}

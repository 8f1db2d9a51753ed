//properties of one heatmap cell, as exported per city into heatmaps/<city>.geojson
use crate::common_enums::{Scenario, TravelMode};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};

/// Cell ids arrive as integers, as integral floats (`457.0`) from float typed
/// export columns, or as numeric strings.
mod lenient_id {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Float(f64),
        Text(String),
    }

    fn from_float(value: f64) -> Option<i64> {
        (value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64)
            .then_some(value as i64)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = match RawId::deserialize(d)? {
            RawId::Int(id) => Some(id),
            RawId::Float(value) => from_float(value),
            RawId::Text(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(from_float))
            }
        };
        id.ok_or_else(|| D::Error::custom("cell_id is not an integer"))
    }
}

#[serde_as]
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    #[serde(deserialize_with = "lenient_id::deserialize")]
    pub cell_id: i64,
    //straight line distance from the city centre, km
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub sky_d: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub cell_pop: Option<f64>,

    //travel times in minutes
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub car_r_t: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub car_m_t: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub pt_r_t: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub pt_m_t: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub bike_t: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub walk_t: Option<f64>,

    //route distances in km
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub car_r_d: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub car_m_d: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub pt_r_td: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub pt_m_td: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub bike_d: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub walk_d: Option<f64>,
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl Cell {
    pub fn new(cell_id: i64) -> Self {
        Self {
            cell_id,
            ..Default::default()
        }
    }

    //travel time for a mode, None when the exporter left it out
    pub fn time(&self, mode: TravelMode, scenario: Scenario) -> Option<f64> {
        finite(match (mode, scenario) {
            (TravelMode::Car, Scenario::RushHour) => self.car_r_t,
            (TravelMode::Car, Scenario::Midday) => self.car_m_t,
            (TravelMode::Pt, Scenario::RushHour) => self.pt_r_t,
            (TravelMode::Pt, Scenario::Midday) => self.pt_m_t,
            (TravelMode::Bike, _) => self.bike_t,
            (TravelMode::Walk, _) => self.walk_t,
        })
    }

    pub fn distance(&self, mode: TravelMode, scenario: Scenario) -> Option<f64> {
        finite(match (mode, scenario) {
            (TravelMode::Car, Scenario::RushHour) => self.car_r_d,
            (TravelMode::Car, Scenario::Midday) => self.car_m_d,
            (TravelMode::Pt, Scenario::RushHour) => self.pt_r_td,
            (TravelMode::Pt, Scenario::Midday) => self.pt_m_td,
            (TravelMode::Bike, _) => self.bike_d,
            (TravelMode::Walk, _) => self.walk_d,
        })
    }

    pub fn population(&self) -> f64 {
        finite(self.cell_pop).map(|p| p.max(0.0)).unwrap_or(0.0)
    }

    pub fn with_time(mut self, mode: TravelMode, scenario: Scenario, minutes: f64) -> Self {
        let slot = match (mode, scenario) {
            (TravelMode::Car, Scenario::RushHour) => &mut self.car_r_t,
            (TravelMode::Car, Scenario::Midday) => &mut self.car_m_t,
            (TravelMode::Pt, Scenario::RushHour) => &mut self.pt_r_t,
            (TravelMode::Pt, Scenario::Midday) => &mut self.pt_m_t,
            (TravelMode::Bike, _) => &mut self.bike_t,
            (TravelMode::Walk, _) => &mut self.walk_t,
        };
        *slot = Some(minutes);
        self
    }
}

pub fn dec_round(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct ModeFigures {
    pub mode: TravelMode,
    pub minutes: Option<f64>,
    pub km: Option<f64>,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ScenarioRow {
    pub scenario: Scenario,
    pub modes: Vec<ModeFigures>,
}

//the "cell properties" panel shown for the clicked cell
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct CellDetails {
    pub cell_id: i64,
    pub distance_from_center_km: Option<f64>,
    pub population: Option<i64>,
    pub rows: Vec<ScenarioRow>,
}

impl CellDetails {
    pub fn from_cell(cell: &Cell) -> Self {
        let rows = [Scenario::RushHour, Scenario::Midday]
            .into_iter()
            .map(|scenario| ScenarioRow {
                scenario,
                modes: TravelMode::ALL
                    .into_iter()
                    .map(|mode| ModeFigures {
                        mode,
                        minutes: cell.time(mode, scenario).map(dec_round),
                        km: cell.distance(mode, scenario).map(dec_round),
                    })
                    .collect(),
            })
            .collect();

        Self {
            cell_id: cell.cell_id,
            distance_from_center_km: finite(cell.sky_d).map(dec_round),
            population: finite(cell.cell_pop).map(|p| p.round() as i64),
            rows,
        }
    }
}

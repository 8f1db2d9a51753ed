//city listings: continent groups, the bike/car switch list and map addresses
use crate::common_enums::{Continent, SortDirection};
use geo::{point, Point};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DefaultOnError};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[serde_as]
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CityRecord {
    pub city: String,
    //raw continent code, EUR NAM SAM OCE ASI
    pub continent: String,
    //name of the centre the routes lead to, usually the town hall
    #[serde(default)]
    pub ctr_name: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub ctr_lat: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub ctr_lon: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CityRecord {
    pub fn new(city: &str, continent: &str) -> Self {
        Self {
            city: city.to_string(),
            continent: continent.to_string(),
            ctr_name: String::new(),
            ctr_lat: None,
            ctr_lon: None,
            extra: Map::new(),
        }
    }

    pub fn center(&self) -> Option<Point> {
        match (self.ctr_lat, self.ctr_lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some(point!(x: lon, y: lat))
            }
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct ContinentGroups {
    groups: BTreeMap<Continent, Vec<CityRecord>>,
}

impl ContinentGroups {
    pub fn get(&self, continent: Continent) -> Option<&[CityRecord]> {
        self.groups.get(&continent).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Continent, &[CityRecord])> {
        self.groups.iter().map(|(c, cities)| (*c, cities.as_slice()))
    }

    //full continent names in listing order
    pub fn by_name(&self) -> Vec<(&'static str, &[CityRecord])> {
        self.iter().map(|(c, cities)| (c.full_name(), cities)).collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn flatten(&self) -> Vec<CityRecord> {
        self.groups.values().flatten().cloned().collect()
    }
}

/// Groups cities by continent, each group sorted by city name (byte order).
/// Records with an unknown continent code are left out.
pub fn group_by_continent(records: &[CityRecord]) -> ContinentGroups {
    let mut groups: BTreeMap<Continent, Vec<CityRecord>> = BTreeMap::new();
    for record in records {
        match Continent::from_code(&record.continent) {
            Some(continent) => groups.entry(continent).or_default().push(record.clone()),
            None => debug!(
                city = %record.city,
                continent = %record.continent,
                "dropping city with unknown continent"
            ),
        }
    }
    for cities in groups.values_mut() {
        cities.sort_by(|a, b| a.city.cmp(&b.city));
    }
    ContinentGroups { groups }
}

//null, missing or non numeric switch points become NaN and sort last
mod point_or_nan {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn missing() -> f64 {
        f64::NAN
    }

    pub fn deserialize<'de, D>(d: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let point = match Value::deserialize(d)? {
            Value::String(text) => text.trim().parse().unwrap_or(f64::NAN),
            other => other.as_f64().unwrap_or(f64::NAN),
        };
        Ok(point)
    }
}

//distance in km up to which the bike beats the car
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SwitchCityRecord {
    pub city: String,
    #[serde(
        default = "point_or_nan::missing",
        deserialize_with = "point_or_nan::deserialize"
    )]
    pub point: f64,
}

//NaN points are kept at the end in both directions
fn cmp_points(a: f64, b: f64, descending: bool) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
    }
}

/// Returns a sorted copy; equal keys keep their input order.
pub fn sort_switch_cities(
    records: &[SwitchCityRecord],
    direction: SortDirection,
) -> Vec<SwitchCityRecord> {
    let mut sorted = records.to_vec();
    match direction {
        SortDirection::CityAsc => sorted.sort_by(|a, b| a.city.cmp(&b.city)),
        SortDirection::PtAsc => sorted.sort_by(|a, b| cmp_points(a.point, b.point, false)),
        SortDirection::PtDsc => sorted.sort_by(|a, b| cmp_points(a.point, b.point, true)),
    }
    sorted
}

pub const DEFAULT_SWITCH_SCALE: f64 = 9.5;
const MAX_RADIUS_FRACTION: f64 = 0.95;

//geometry of the switch point disc: inner circle is where the bike wins
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct SwitchCircle {
    pub point: f64,
    pub scale: f64,
    pub fraction: f64,
    //percent of the outer disc
    pub radius: f64,
    pub is_max: bool,
    pub show_house: bool,
    pub show_tree: bool,
}

impl SwitchCircle {
    pub fn new(point: f64, scale: Option<f64>) -> Self {
        let point = if point.is_finite() { point } else { 0.0 };
        let scale = scale
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(DEFAULT_SWITCH_SCALE);
        let fraction = point / scale;
        Self {
            point,
            scale,
            fraction,
            radius: fraction.min(MAX_RADIUS_FRACTION) / 2.0 * 100.0,
            is_max: point >= scale,
            show_house: fraction < 0.4,
            show_tree: fraction > 0.8,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum AddressError {
    #[error("not a map address: '{0}'")]
    NotAMapPath(String),
    #[error("expected /map/<city>/<townhall>/<lat>/<lon>, got '{0}'")]
    MissingSegment(String),
    #[error("invalid coordinate '{0}'")]
    BadCoordinate(String),
}

//address of a city's map view
#[derive(Debug, PartialEq, Clone)]
pub struct MapAddress {
    //city name with spaces replaced by underscores
    pub city: String,
    pub townhall: String,
    pub lat: f64,
    pub lon: f64,
}

impl MapAddress {
    pub fn for_city(record: &CityRecord) -> Option<Self> {
        let center = record.center()?;
        Some(Self {
            city: record.city.replace(' ', "_"),
            townhall: record.ctr_name.clone(),
            lat: center.y(),
            lon: center.x(),
        })
    }

    pub fn to_path(&self) -> String {
        format!(
            "/map/{}/{}/{}/{}/",
            self.city, self.townhall, self.lat, self.lon
        )
    }

    pub fn parse(path: &str) -> Result<Self, AddressError> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let start = segments
            .iter()
            .position(|s| *s == "map")
            .ok_or_else(|| AddressError::NotAMapPath(path.to_string()))?;
        let &[city, townhall, lat, lon] = &segments[start + 1..] else {
            return Err(AddressError::MissingSegment(path.to_string()));
        };
        let coord = |raw: &str| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| AddressError::BadCoordinate(raw.to_string()))
        };
        Ok(Self {
            city: city.to_string(),
            townhall: townhall.to_string(),
            lat: coord(lat)?,
            lon: coord(lon)?,
        })
    }

    pub fn city_friendly(&self) -> String {
        self.city.replace('_', " ")
    }

    pub fn center(&self) -> Point {
        point!(x: self.lon, y: self.lat)
    }
}

//data collection status per city, from cities.json
#[serde_as]
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub city_name: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub frac_req_ok: Option<f64>,
}

impl ProgressEntry {
    pub fn is_complete(&self) -> bool {
        self.frac_req_ok == Some(1.0)
    }
}

pub type ProgressByRegion = BTreeMap<String, Vec<ProgressEntry>>;

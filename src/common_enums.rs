use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Car,
    Bike,
    Pt,
    Walk,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Car,
        TravelMode::Bike,
        TravelMode::Pt,
        TravelMode::Walk,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Bike => "bike",
            TravelMode::Pt => "pt",
            TravelMode::Walk => "walk",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            TravelMode::Car => "#EC6A37",
            TravelMode::Bike => "#1481BA",
            TravelMode::Pt => "#3E8914",
            TravelMode::Walk => "#C33C54",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "car" => Some(TravelMode::Car),
            "bike" => Some(TravelMode::Bike),
            "pt" => Some(TravelMode::Pt),
            "walk" => Some(TravelMode::Walk),
            &_ => None,
        }
    }

    //bike and walk times do not depend on the departure time
    pub fn depends_on_scenario(self) -> bool {
        matches!(self, TravelMode::Car | TravelMode::Pt)
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Scenario {
    //departure at 8:00
    #[default]
    #[serde(rename = "r")]
    RushHour,
    //departure at 12:00
    #[serde(rename = "m")]
    Midday,
}

impl Scenario {
    pub fn tag(self) -> &'static str {
        match self {
            Scenario::RushHour => "r",
            Scenario::Midday => "m",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scenario::RushHour => "Rush Hour (8:00)",
            Scenario::Midday => "Mid-day (12:00)",
        }
    }
}

impl From<&str> for Scenario {
    fn from(read_val: &str) -> Self {
        match read_val {
            "m" => Scenario::Midday,
            "r" => Scenario::RushHour,
            &_ => Scenario::RushHour,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

//what the map layer is currently colouring cells by
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash, Default)]
pub enum DisplayMode {
    Single(TravelMode),
    #[default]
    Fastest,
    None,
}

impl From<&str> for DisplayMode {
    fn from(read_val: &str) -> Self {
        match read_val {
            "fastest" => DisplayMode::Fastest,
            "none" => DisplayMode::None,
            other => match TravelMode::from_tag(other) {
                Some(mode) => DisplayMode::Single(mode),
                None => DisplayMode::None,
            },
        }
    }
}

impl From<DisplayMode> for String {
    fn from(v: DisplayMode) -> String {
        match v {
            DisplayMode::Single(mode) => mode.tag().to_string(),
            DisplayMode::Fastest => "fastest".to_string(),
            DisplayMode::None => "none".to_string(),
        }
    }
}

#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash, Default)]
pub enum SortDirection {
    CityAsc,
    PtAsc,
    #[default]
    PtDsc,
}

impl From<&str> for SortDirection {
    fn from(read_val: &str) -> Self {
        match read_val {
            "city_asc" => SortDirection::CityAsc,
            "pt_asc" => SortDirection::PtAsc,
            "pt_dsc" => SortDirection::PtDsc,
            &_ => SortDirection::PtDsc,
        }
    }
}

impl From<SortDirection> for String {
    fn from(v: SortDirection) -> String {
        match v {
            SortDirection::CityAsc => "city_asc".to_string(),
            SortDirection::PtAsc => "pt_asc".to_string(),
            SortDirection::PtDsc => "pt_dsc".to_string(),
        }
    }
}

//declaration order is the order continent groups are listed in
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub enum Continent {
    Europe,
    NorthAmerica,
    SouthAmerica,
    Oceania,
    Asia,
}

impl Continent {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "EUR" => Some(Continent::Europe),
            "NAM" => Some(Continent::NorthAmerica),
            "SAM" => Some(Continent::SouthAmerica),
            "OCE" => Some(Continent::Oceania),
            "ASI" => Some(Continent::Asia),
            &_ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Continent::Europe => "EUR",
            Continent::NorthAmerica => "NAM",
            Continent::SouthAmerica => "SAM",
            Continent::Oceania => "OCE",
            Continent::Asia => "ASI",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Oceania => "Oceania",
            Continent::Asia => "Asia",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

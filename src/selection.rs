//display settings chosen by the user, passed by value into the classifier and aggregator
use crate::common_enums::{DisplayMode, Scenario, SortDirection, TravelMode};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const PARKING_COOKIE: &str = "ptime";
pub const MAX_PARKING_MINUTES: f64 = 15.0;
pub const DEFAULT_PARKING_MINUTES: f64 = 5.0;

//extra minutes a car trip costs for parking and walking to the car
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub struct ParkingTime(f64);

impl ParkingTime {
    pub fn new(minutes: f64) -> Self {
        if !minutes.is_finite() {
            return Self::default();
        }
        Self(minutes.clamp(0.0, MAX_PARKING_MINUTES))
    }

    pub fn minutes(self) -> f64 {
        self.0
    }

    pub fn to_set_cookie(self) -> String {
        format!("{PARKING_COOKIE}={}; Path=/", self.0)
    }
}

impl Default for ParkingTime {
    fn default() -> Self {
        Self(DEFAULT_PARKING_MINUTES)
    }
}

//reads ptime out of a Cookie header value such as "a=1; ptime=7"
pub fn parking_from_cookie_header(header: &str) -> Option<ParkingTime> {
    header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == PARKING_COOKIE)
        .and_then(|(_, value)| value.trim().parse::<f64>().ok())
        .filter(|minutes| minutes.is_finite())
        .map(ParkingTime::new)
}

#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct ViewSelection {
    pub mode: DisplayMode,
    pub scenario: Scenario,
    pub parking: ParkingTime,
    pub sort: SortDirection,
}

impl ViewSelection {
    //clicking the active mode button again turns the layer off
    pub fn toggle_mode(self, mode: DisplayMode) -> Self {
        let mode = if self.mode == mode {
            DisplayMode::None
        } else {
            mode
        };
        Self { mode, ..self }
    }

    pub fn with_mode(self, mode: DisplayMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_scenario(self, scenario: Scenario) -> Self {
        Self { scenario, ..self }
    }

    pub fn with_parking(self, parking: ParkingTime) -> Self {
        Self { parking, ..self }
    }

    pub fn with_sort(self, sort: SortDirection) -> Self {
        Self { sort, ..self }
    }

    //parking only counts against the car
    pub fn parking_for(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Car => self.parking.minutes(),
            _ => 0.0,
        }
    }
}

//file backed stand-in for the browser cookie jar, one cookie line per file
#[derive(Debug, Clone)]
pub struct CookieStore {
    path: PathBuf,
}

impl CookieStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read_parking(&self) -> Option<ParkingTime> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let parking = contents
                    .lines()
                    .find_map(|line| parking_from_cookie_header(set_cookie_pair(line)));
                debug!(path = %self.path.display(), ?parking, "read parking cookie");
                parking
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), "could not read cookie file: {e}");
                None
            }
        }
    }

    pub async fn write_parking(&self, parking: ParkingTime) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, format!("{}\n", parking.to_set_cookie())).await?;
        debug!(path = %self.path.display(), minutes = parking.minutes(), "stored parking cookie");
        Ok(())
    }
}

//"ptime=5; Path=/" -> "ptime=5"
fn set_cookie_pair(line: &str) -> &str {
    line.split(';').next().unwrap_or_default()
}

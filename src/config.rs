//command line and environment configuration
use crate::common_enums::{DisplayMode, Scenario, SortDirection};
use crate::selection::{ParkingTime, ViewSelection};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Database of Urban Transport Times", long_about = None)]
pub struct Config {
    /// Data root: an http(s) url or a directory holding citystats.json and heatmaps/
    #[arg(long, env = "DUTT_DATA", default_value = "data")]
    pub data: String,
    /// Departure time, r (rush hour) or m (midday)
    #[arg(long, default_value = "r")]
    pub scenario: String,
    /// car, bike, pt, walk, fastest or none
    #[arg(long, default_value = "fastest")]
    pub mode: String,
    /// Parking time for the car in minutes, 0 to 15
    #[arg(long)]
    pub parking: Option<f64>,
    /// city_asc, pt_asc or pt_dsc
    #[arg(long, default_value = "pt_dsc")]
    pub sort: String,
    /// Where the ptime cookie is kept between runs
    #[arg(long, env = "DUTT_COOKIE_FILE", default_value = ".dutt_cookies")]
    pub cookie_file: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List cities grouped by continent
    Cities,
    /// Data collection progress per region
    Progress,
    /// Distance up to which the bike beats the car, per city
    Switch {
        /// Departure time of the switch list, r or m
        #[arg(long, default_value = "m")]
        time: String,
        #[arg(long, default_value_t = 300)]
        car_parking: u32,
        #[arg(long, default_value_t = 0)]
        bike_parking: u32,
    },
    /// Fastest mode shares for one city, optionally writing the styled layer
    Map {
        city: String,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        selected: Option<i64>,
    },
    /// Details of a single cell, by id or by position
    Cell {
        city: String,
        #[arg(long, conflicts_with = "at")]
        id: Option<i64>,
        #[arg(long, num_args = 2, value_names = ["LON", "LAT"], allow_negative_numbers = true)]
        at: Option<Vec<f64>>,
    },
}

impl Config {
    //parking falls back to the stored cookie, then to the default
    pub fn selection(&self, stored_parking: Option<ParkingTime>) -> ViewSelection {
        let parking = self
            .parking
            .map(ParkingTime::new)
            .or(stored_parking)
            .unwrap_or_default();
        ViewSelection {
            mode: DisplayMode::from(self.mode.as_str()),
            scenario: Scenario::from(self.scenario.as_str()),
            parking,
            sort: SortDirection::from(self.sort.as_str()),
        }
    }
}

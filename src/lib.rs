// Copyright Chelsea Wen
// Cleaned up somewhat by Kyler Chin
#![deny(
    clippy::mutable_key_type,
    clippy::map_entry,
    clippy::boxed_local,
    clippy::let_unit_value,
    clippy::redundant_allocation,
    clippy::bool_comparison,
    clippy::bind_instead_of_map,
    clippy::vec_box,
    clippy::while_let_loop,
    clippy::useless_asref,
    clippy::repeat_once,
    clippy::deref_addrof,
    clippy::suspicious_map,
    clippy::arc_with_non_send_sync,
    clippy::single_char_pattern,
    clippy::for_kv_map,
    clippy::let_and_return,
    clippy::iter_nth,
    clippy::iter_cloned_collect,
    clippy::bytes_nth,
    clippy::deprecated_clippy_cfg_attr,
    clippy::match_result_ok,
    clippy::cmp_owned,
    clippy::cmp_null,
    clippy::op_ref,
    clippy::useless_vec,
    clippy::module_inception
)]
pub mod cell;
pub mod cities;
pub mod classifier;
pub mod common_enums;
pub mod config;
pub mod heatmap;
pub mod loader;
pub mod selection;

pub use crate::cell::{Cell, CellDetails};
pub use crate::cities::{
    group_by_continent, sort_switch_cities, CityRecord, ContinentGroups, MapAddress,
    SwitchCircle, SwitchCityRecord,
};
pub use crate::classifier::{cell_style, fastest_mode, mode_intensity, mode_shares};
pub use crate::common_enums::{Continent, DisplayMode, Scenario, SortDirection, TravelMode};
pub use crate::heatmap::Heatmap;
pub use crate::loader::{DataSource, LatestRequest, LoadError};
pub use crate::selection::{ParkingTime, ViewSelection};

//fetching the static data files, over http or from a local export directory
use crate::cities::{CityRecord, ProgressByRegion, SwitchCityRecord};
use crate::common_enums::Scenario;
use crate::heatmap::Heatmap;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CITY_LIST_JSON: &str = "citystats.json";
pub const CITY_LIST_CSV: &str = "citystats.csv";
pub const PROGRESS_JSON: &str = "cities.json";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("request to '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("'{url}' answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("heatmap is not a FeatureCollection")]
    NotAFeatureCollection,
}

pub fn heatmap_path(city: &str) -> String {
    format!("heatmaps/{}.geojson", city.replace(' ', "_"))
}

//the switch endpoint takes the net parking penalty of the car in seconds
pub fn switch_cities_path(scenario: Scenario, car_parking_secs: u32, bike_parking_secs: u32) -> String {
    format!(
        "api/switchcities/{}/{}",
        scenario.tag(),
        car_parking_secs.saturating_sub(bike_parking_secs)
    )
}

#[derive(Debug, Clone)]
pub enum DataSource {
    Http { client: reqwest::Client, base: String },
    Directory(PathBuf),
}

impl DataSource {
    //urls are fetched over http, anything else is read as a directory
    pub fn new(root: &str) -> Self {
        if root.starts_with("http://") || root.starts_with("https://") {
            DataSource::Http {
                client: reqwest::Client::new(),
                base: root.trim_end_matches('/').to_string(),
            }
        } else {
            DataSource::Directory(PathBuf::from(root))
        }
    }

    pub fn locate(&self, path: &str) -> String {
        match self {
            DataSource::Http { base, .. } => format!("{base}/{path}"),
            DataSource::Directory(dir) => dir.join(path).display().to_string(),
        }
    }

    //download link for the raw table, never parsed here
    pub fn csv_link(&self) -> String {
        self.locate(CITY_LIST_CSV)
    }

    async fn get_text(&self, path: &str) -> Result<String, LoadError> {
        match self {
            DataSource::Http { client, base } => {
                let url = format!("{base}/{path}");
                debug!(%url, "fetching");
                let response = client.get(&url).send().await.map_err(|source| LoadError::Http {
                    url: url.clone(),
                    source,
                })?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        url,
                        status: status.as_u16(),
                    });
                }
                response
                    .text()
                    .await
                    .map_err(|source| LoadError::Http { url, source })
            }
            DataSource::Directory(dir) => {
                let path = dir.join(path);
                debug!(path = %path.display(), "reading");
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| LoadError::Io { path, source })
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LoadError> {
        let text = self.get_text(path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn fetch_city_list(&self) -> Result<Vec<CityRecord>, LoadError> {
        let cities: Vec<CityRecord> = self.get_json(CITY_LIST_JSON).await?;
        info!("loaded {} cities", cities.len());
        Ok(cities)
    }

    pub async fn fetch_heatmap(&self, city: &str) -> Result<Heatmap, LoadError> {
        let text = self.get_text(&heatmap_path(city)).await?;
        let heatmap = Heatmap::from_geojson_str(&text)?;
        info!(city, "loaded heatmap with {} cells", heatmap.len());
        Ok(heatmap)
    }

    pub async fn fetch_switch_cities(
        &self,
        scenario: Scenario,
        car_parking_secs: u32,
        bike_parking_secs: u32,
    ) -> Result<Vec<SwitchCityRecord>, LoadError> {
        self.get_json(&switch_cities_path(scenario, car_parking_secs, bike_parking_secs))
            .await
    }

    pub async fn fetch_progress(&self) -> Result<ProgressByRegion, LoadError> {
        self.get_json(PROGRESS_JSON).await
    }
}

//a failed fetch leaves the view empty instead of failing the page
pub fn or_empty<T>(what: &str, result: Result<T, LoadError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{what} unavailable: {e}");
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket<K> {
    key: K,
    generation: u64,
}

impl<K> Ticket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }
}

#[derive(Debug)]
struct LatestState<K, V> {
    generation: u64,
    key: Option<K>,
    value: Option<V>,
}

/// Holds the result of the newest request only.
///
/// Every `begin` supersedes the requests before it; a response that arrives
/// for a superseded ticket is dropped instead of replacing what is shown.
#[derive(Debug)]
pub struct LatestRequest<K, V> {
    state: Arc<Mutex<LatestState<K, V>>>,
}

impl<K, V> Clone for LatestRequest<K, V> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<K, V> Default for LatestRequest<K, V> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(LatestState {
                generation: 0,
                key: None,
                value: None,
            })),
        }
    }
}

impl<K: Clone + PartialEq + std::fmt::Debug, V: Clone> LatestRequest<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, key: K) -> Ticket<K> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.generation += 1;
        if state.key.as_ref() != Some(&key) {
            state.value = None;
        }
        state.key = Some(key.clone());
        Ticket {
            key,
            generation: state.generation,
        }
    }

    //returns whether the value was applied
    pub fn complete(&self, ticket: Ticket<K>, value: Option<V>) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.generation != ticket.generation || state.key.as_ref() != Some(&ticket.key) {
            debug!(key = ?ticket.key, "discarding stale response");
            return false;
        }
        state.value = value;
        true
    }

    pub fn current(&self) -> Option<V> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.value.clone()
    }

    pub fn current_key(&self) -> Option<K> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.key.clone()
    }

    //begin, await and complete in one go; failures clear the view
    pub async fn track<F>(&self, key: K, what: &str, request: F) -> bool
    where
        F: Future<Output = Result<V, LoadError>>,
    {
        let ticket = self.begin(key);
        let value = or_empty(what, request.await);
        self.complete(ticket, value)
    }
}

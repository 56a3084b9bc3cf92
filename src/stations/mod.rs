//! Tide station metadata.
//!
//! Parses the NOAA CO-OPS metadata API (MDAPI) station catalog and
//! answers bounding-box queries over it. The catalog can be read from a
//! saved JSON payload, or (with the `noaa-api` feature) fetched live.
//!
//! # Example
//!
//! ```
//! use fetch_rs::stations::StationCatalog;
//!
//! let json = r#"{"count": 1, "stations": [
//!     {"id": "8638610", "name": "Sewells Point", "lat": 36.9467, "lng": -76.33, "state": "VA"}
//! ]}"#;
//! let catalog = StationCatalog::from_json(json).unwrap();
//! let ids = catalog.station_ids_in_bbox((36.0, 39.6), (-77.5, -75.5));
//! assert_eq!(ids, vec!["8638610"]);
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// CO-OPS MDAPI station catalog endpoint.
pub const COOPS_STATIONS_URL: &str =
    "https://api.tidesandcurrents.noaa.gov/mdapi/prod/webapi/stations.json";

/// Error type for station catalog operations.
#[derive(Debug, Error)]
pub enum StationError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON payload error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP retrieval error
    #[cfg(feature = "noaa-api")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Metadata for one tide station.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TideStation {
    /// Station identifier (e.g. "8638610").
    pub id: String,
    /// Station name.
    pub name: String,
    /// Latitude in degrees North.
    pub lat: f64,
    /// Longitude in degrees East.
    pub lng: f64,
    /// US state / territory code, when present.
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StationsPayload {
    stations: Vec<TideStation>,
}

/// A parsed station catalog.
#[derive(Clone, Debug, Default)]
pub struct StationCatalog {
    stations: Vec<TideStation>,
}

impl StationCatalog {
    /// Parse a catalog from an MDAPI JSON payload.
    pub fn from_json(json: &str) -> Result<Self, StationError> {
        let payload: StationsPayload = serde_json::from_str(json)?;
        Ok(Self {
            stations: payload.stations,
        })
    }

    /// Read a catalog from a saved JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StationError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Fetch the live catalog from the CO-OPS MDAPI.
    #[cfg(feature = "noaa-api")]
    pub fn fetch() -> Result<Self, StationError> {
        Self::fetch_from(COOPS_STATIONS_URL)
    }

    /// Fetch a catalog from a specific URL.
    #[cfg(feature = "noaa-api")]
    pub fn fetch_from(url: &str) -> Result<Self, StationError> {
        let payload: StationsPayload = reqwest::blocking::get(url)?.json()?;
        Ok(Self {
            stations: payload.stations,
        })
    }

    /// All stations in the catalog.
    pub fn stations(&self) -> &[TideStation] {
        &self.stations
    }

    /// Number of stations in the catalog.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True when the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Look a station up by id.
    pub fn get(&self, id: &str) -> Option<&TideStation> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Stations strictly inside a latitude/longitude box.
    ///
    /// Each coordinate pair is sorted before the comparison, so the
    /// bounds may be given in either order; stations exactly on a bound
    /// are excluded.
    pub fn stations_in_bbox(
        &self,
        lat_bounds: (f64, f64),
        lon_bounds: (f64, f64),
    ) -> Vec<&TideStation> {
        let (lat_lo, lat_hi) = sorted(lat_bounds);
        let (lon_lo, lon_hi) = sorted(lon_bounds);

        self.stations
            .iter()
            .filter(|s| {
                s.lng > lon_lo && s.lng < lon_hi && s.lat > lat_lo && s.lat < lat_hi
            })
            .collect()
    }

    /// Ids of the stations strictly inside a latitude/longitude box.
    pub fn station_ids_in_bbox(
        &self,
        lat_bounds: (f64, f64),
        lon_bounds: (f64, f64),
    ) -> Vec<String> {
        self.stations_in_bbox(lat_bounds, lon_bounds)
            .into_iter()
            .map(|s| s.id.clone())
            .collect()
    }
}

fn sorted(bounds: (f64, f64)) -> (f64, f64) {
    if bounds.0 <= bounds.1 {
        bounds
    } else {
        (bounds.1, bounds.0)
    }
}

//! Road network acquisition from OpenStreetMap.
//!
//! [`OverpassProvider`] geocodes a place name with Nominatim, downloads the
//! drivable ways inside the matching boundary from the Overpass API and turns
//! them into a [`RoadNetwork`]. [`OverpassFileProvider`] does the same from a
//! previously saved Overpass response.

mod overpass;

pub use overpass::{
    drive_query, is_drivable, network_from_overpass, OverpassElement, OverpassResponse,
};

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::network::RoadNetwork;

/// Offset Overpass adds to relation ids to form area ids.
const RELATION_AREA_OFFSET: i64 = 3_600_000_000;
/// Offset Overpass adds to way ids to form area ids.
const WAY_AREA_OFFSET: i64 = 2_400_000_000;
/// Geocoding results inspected for a boundary.
const GEOCODE_LIMIT: usize = 10;

/// Source of road networks for a place name such as `"Ottawa, Canada"`.
pub trait NetworkProvider {
    fn fetch(&self, place: &str) -> Result<RoadNetwork>;
}

/// Downloads road networks from the public OpenStreetMap services.
#[derive(Debug, Clone)]
pub struct OverpassProvider {
    client: Client,
    config: ProviderConfig,
}

impl OverpassProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| Error::acquisition("<client>", err))?;
        Ok(Self { client, config })
    }

    /// Provider configured from `CITYPATH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ProviderConfig::from_env())
    }

    fn geocode(&self, place: &str) -> Result<i64> {
        let url = format!("{}/search", self.config.nominatim_url);
        let limit = GEOCODE_LIMIT.to_string();
        let places: Vec<GeocodedPlace> = self
            .client
            .get(&url)
            .query(&[("q", place), ("format", "json"), ("limit", limit.as_str())])
            .header(ACCEPT, "application/json")
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
            .map_err(|err| Error::acquisition(place, err))?;

        select_area(place, &places)
    }
}

/// Area id of the first geocoding result that has a boundary.
fn select_area(place: &str, places: &[GeocodedPlace]) -> Result<i64> {
    let Some(first) = places.first() else {
        return Err(Error::acquisition(place, "place not found"));
    };
    for found in places {
        if let Some(area) = area_id(found) {
            debug!(
                place,
                osm_type = %found.osm_type,
                osm_id = found.osm_id,
                display_name = %found.display_name,
                "geocoded place"
            );
            return Ok(area);
        }
        debug!(
            place,
            osm_type = %found.osm_type,
            osm_id = found.osm_id,
            "skipping result without boundary"
        );
    }
    Err(Error::acquisition(
        place,
        format!("{} {} has no boundary", first.osm_type, first.osm_id),
    ))
}

/// Build the network and reject responses without a single drivable road.
fn checked_network(place: &str, response: &OverpassResponse) -> Result<RoadNetwork> {
    let network = network_from_overpass(response)?;
    if network.is_empty() {
        return Err(Error::acquisition(place, "no drivable roads found"));
    }
    Ok(network)
}

impl NetworkProvider for OverpassProvider {
    fn fetch(&self, place: &str) -> Result<RoadNetwork> {
        let area = self.geocode(place)?;
        let query = drive_query(area, self.config.timeout.as_secs());
        debug!(%query, "overpass query");

        info!(place, area, "downloading road network from Overpass API");
        let response: OverpassResponse = self
            .client
            .post(&self.config.overpass_url)
            .header(CONTENT_TYPE, "text/plain")
            .body(query)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
            .map_err(|err| Error::acquisition(place, err))?;

        info!(
            place,
            elements = response.elements.len(),
            "downloaded OSM elements"
        );
        checked_network(place, &response)
    }
}

/// Loads a saved Overpass JSON response instead of downloading one. The place
/// name is only used in log and error messages.
#[derive(Debug, Clone)]
pub struct OverpassFileProvider {
    path: PathBuf,
}

impl OverpassFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NetworkProvider for OverpassFileProvider {
    fn fetch(&self, place: &str) -> Result<RoadNetwork> {
        info!(place, path = %self.path.display(), "loading road network from file");
        let raw = fs::read_to_string(&self.path).map_err(|err| {
            Error::acquisition(place, format!("{}: {}", self.path.display(), err))
        })?;
        let response: OverpassResponse = serde_json::from_str(&raw).map_err(|err| {
            Error::acquisition(place, format!("{}: {}", self.path.display(), err))
        })?;
        checked_network(place, &response)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodedPlace {
    osm_type: String,
    osm_id: i64,
    #[serde(default)]
    display_name: String,
}

fn area_id(place: &GeocodedPlace) -> Option<i64> {
    match place.osm_type.as_str() {
        "relation" => Some(RELATION_AREA_OFFSET + place.osm_id),
        "way" => Some(WAY_AREA_OFFSET + place.osm_id),
        _ => None,
    }
}

use std::env;
use std::time::Duration;

use tracing::warn;

const NOMINATIM_URL_ENV: &str = "CITYPATH_NOMINATIM_URL";
const OVERPASS_URL_ENV: &str = "CITYPATH_OVERPASS_URL";
const TIMEOUT_ENV: &str = "CITYPATH_HTTP_TIMEOUT_SECS";
const USER_AGENT_ENV: &str = "CITYPATH_USER_AGENT";

const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Endpoints and HTTP settings for downloading road networks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL of the Nominatim geocoder (without `/search`).
    pub nominatim_url: String,
    /// Full URL of the Overpass interpreter endpoint.
    pub overpass_url: String,
    /// Request timeout, also forwarded to Overpass as the query timeout.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

impl ProviderConfig {
    /// Read overrides from `CITYPATH_*` environment variables, falling back to
    /// the public OpenStreetMap services.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let timeout = match non_empty(TIMEOUT_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, variable = TIMEOUT_ENV, "ignoring invalid timeout");
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };

        Self {
            nominatim_url: non_empty(NOMINATIM_URL_ENV)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.nominatim_url),
            overpass_url: non_empty(OVERPASS_URL_ENV).unwrap_or(defaults.overpass_url),
            timeout,
            user_agent: non_empty(USER_AGENT_ENV).unwrap_or(defaults.user_agent),
        }
    }
}

fn default_user_agent() -> String {
    format!(
        "citypath-lib/{version} ({repo})",
        version = env!("CARGO_PKG_VERSION"),
        repo = "https://github.com/scetrov/citypath-rs"
    )
}

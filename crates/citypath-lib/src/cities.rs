use once_cell::sync::Lazy;

use crate::error::{Error, Result};

/// Country appended to city names when geocoding.
pub const COUNTRY: &str = "Canada";

const SUGGESTION_LIMIT: usize = 3;
const SUGGESTION_THRESHOLD: f64 = 0.8;

const RAW_CITIES: &[&str] = &[
    "Toronto",
    "Montreal",
    "Vancouver",
    "Calgary",
    "Edmonton",
    "Ottawa",
    "Winnipeg",
    "Quebec City",
    "Hamilton",
    "Kitchener",
    "London",
    "Victoria",
    "Halifax",
    "Oshawa",
    "Windsor",
    "Saskatoon",
    "Regina",
    "St. John's",
    "Barrie",
    "Kelowna",
    "Sherbrooke",
    "Guelph",
    "Abbotsford",
    "Kingston",
    "Kanata",
    "Trois-Rivières",
    "Moncton",
    "Chicoutimi",
    "Milton",
    "Red Deer",
    "Brantford",
    "Thunder Bay",
    "White Rock",
    "Nanaimo",
    "Sudbury",
    "Lethbridge",
    "Saint John",
    "Peterborough",
    "Kamloops",
    "Sarnia",
    "Prince George",
    "Medicine Hat",
    "Drummondville",
    "New Westminster",
    "Chilliwack",
    "Saint-Jérôme",
    "Granby",
    "Fredericton",
    "North Bay",
    "Belleville",
    "Charlottetown",
    "Saint-Hyacinthe",
    "Cornwall",
    "Brockville",
    "Timmins",
    "Orillia",
    "Moose Jaw",
    "Lloydminster",
    "Penticton",
    "Prince Albert",
    "Grande Prairie",
    "Wood Buffalo",
    "Stratford",
    "Welland",
    "North Vancouver",
    "Vernon",
    "Courtenay",
    "Campbell River",
    "Fort McMurray",
    "Yellowknife",
    "Whitehorse",
    "Iqaluit",
];

static CITIES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut cities = RAW_CITIES.to_vec();
    cities.sort_unstable();
    cities.dedup();
    cities
});

/// Selectable cities, sorted and without duplicates.
pub fn canadian_cities() -> &'static [&'static str] {
    &CITIES
}

/// Geocodable place name for a city.
pub fn place_name(city: &str) -> String {
    format!("{city}, {COUNTRY}")
}

/// Find a catalog city by case-insensitive name.
pub fn resolve_city(name: &str) -> Result<&'static str> {
    let wanted = name.trim();
    if let Some(city) = CITIES
        .iter()
        .find(|city| city.to_lowercase() == wanted.to_lowercase())
    {
        return Ok(*city);
    }

    Err(Error::UnknownCity {
        name: wanted.to_string(),
        suggestions: suggest_cities(wanted, SUGGESTION_LIMIT),
    })
}

/// Catalog cities most similar to `name`, best match first.
pub fn suggest_cities(name: &str, limit: usize) -> Vec<String> {
    let wanted = name.to_lowercase();
    let mut scored: Vec<(f64, &str)> = CITIES
        .iter()
        .map(|city| (strsim::jaro_winkler(&wanted, &city.to_lowercase()), *city))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, city)| city.to_string())
        .collect()
}

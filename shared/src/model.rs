use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::capabilities::PlacesConfig;
use crate::machine::MainStateMachine;

/// Validated lat/lon
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self { latitude, longitude })
    }

    /// Both halves must be present; a half-known fix is no fix.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon),
            _ => None,
        }
    }

    /// The places API `ll` parameter.
    pub fn to_query_value(self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Icon {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

impl Icon {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), suffix: suffix.into() }
    }

    pub fn url(&self, size: u32) -> String {
        format!("{}{}{}", self.prefix, size, self.suffix)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Category {
    #[serde(deserialize_with = "id_as_text")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Icon,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: Icon) -> Self {
        Self { id: id.into(), name: name.into(), icon }
    }
}

// Foursquare v3 sends numeric category ids; older payloads send strings.
fn id_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct GeoCode {
    pub main: Coordinate,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Location {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub neighbourhood: Vec<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VenueResult {
    pub name: String,
    /// Meters from the queried coordinate.
    #[serde(default)]
    pub distance: u32,
    #[serde(rename = "geocodes", alias = "geocode")]
    pub geocode: GeoCode,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub location: Location,
}

impl VenueResult {
    pub fn has_category(&self, category_id: &str) -> bool {
        self.categories.iter().any(|c| c.id == category_id)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub enum MainState {
    #[default]
    Uninitialized,
    Loading,
    AwaitingLocation,
    PermissionDenied,
    ShowingVenues {
        list: Vec<VenueResult>,
        categories: Vec<Category>,
        selected_category_id: Option<String>,
    },
    Empty,
    ErrorGeneral,
    ErrorLocationUnavailable,
}

impl MainState {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::AwaitingLocation => "awaiting_location",
            Self::PermissionDenied => "permission_denied",
            Self::ShowingVenues { .. } => "showing_venues",
            Self::Empty => "empty",
            Self::ErrorGeneral => "error_general",
            Self::ErrorLocationUnavailable => "error_location_unavailable",
        }
    }
}

impl fmt::Display for MainState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Model {
    pub machine: MainStateMachine,
    pub config: PlacesConfig,

    /// Last permission answer from the shell; drives `Retry`.
    pub permission_granted: bool,

    /// Bumped when the screen is torn down. Fetches carry the session they
    /// were issued in and are dropped on mismatch.
    pub session: u64,
    pub fetches_in_flight: usize,
}

impl Model {
    pub fn state(&self) -> &MainState {
        self.machine.state()
    }
}

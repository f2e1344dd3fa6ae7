mod http;
mod kv;
mod location;

pub use self::http::{
    get_nearby_venues, parse_places_body, venues_from_response, ConfigError, FetchError,
    FetchResult, PlacesConfig, PlacesResponse, ValidatedUrl, VenueQuery,
    DEFAULT_PLACES_BASE_URL, MAX_RESULT_LIMIT, PLACES_SEARCH_PATH,
};
pub use self::kv::{
    decode_selection, encode_selection, load_selection, save_selection, KeyNamespace, KvError,
    KvKey,
};
pub use self::location::{
    DeviceLocation, LocationError, LocationOperation, LocationOutput, LocationResult,
};

// Crux's built-in Render capability covers view updates as is.
pub use crux_core::render::Render;
pub use crux_http::Http;
pub use crux_kv::KeyValue;

use crate::app::App;
use crate::event::Event;

#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Kv(#[from] KvError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),
}

// Effect variants are named after the capability types, so the fields use
// them directly rather than through aliases.
#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub http: Http<Event>,
    pub kv: KeyValue<Event>,
    pub render: Render<Event>,
    pub location: DeviceLocation<Event>,
}

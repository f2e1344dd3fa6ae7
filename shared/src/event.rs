use serde::{Deserialize, Serialize};

use crate::capabilities::{FetchResult, PlacesConfig};
use crate::model::Coordinate;

// --- Event enum: shell-facing variants first, capability callbacks skipped by serde ---

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    // Lifecycle
    Started,
    Configure(Box<PlacesConfig>),
    ScreenClosed,

    // Permission & location
    RequestLocationPermission,
    LocationPermissionResult {
        granted: bool,
    },
    FetchNearbyVenues {
        latitude: Option<f64>,
        longitude: Option<f64>,
    },
    Retry,

    // List
    SelectCategory {
        category_id: Option<String>,
    },

    // Capability responses (boxed to keep enum size small)
    #[serde(skip)]
    LastKnownLocation {
        fix: Option<Coordinate>,
    },
    #[serde(skip)]
    VenuesFetched {
        session: u64,
        result: Box<FetchResult>,
    },
    #[serde(skip)]
    SelectionRestored {
        category_id: Option<String>,
    },
    #[serde(skip)]
    SelectionPersisted {
        ok: bool,
    },
}

impl Event {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Configure(_) => "configure",
            Self::ScreenClosed => "screen_closed",
            Self::RequestLocationPermission => "request_location_permission",
            Self::LocationPermissionResult { .. } => "location_permission_result",
            Self::FetchNearbyVenues { .. } => "fetch_nearby_venues",
            Self::Retry => "retry",
            Self::SelectCategory { .. } => "select_category",
            Self::LastKnownLocation { .. } => "last_known_location",
            Self::VenuesFetched { .. } => "venues_fetched",
            Self::SelectionRestored { .. } => "selection_restored",
            Self::SelectionPersisted { .. } => "selection_persisted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_events_deserialize() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "FetchNearbyVenues": { "latitude": 1.1, "longitude": null }
        }))
        .unwrap();
        assert_eq!(event, Event::FetchNearbyVenues { latitude: Some(1.1), longitude: None });

        let event: Event = serde_json::from_value(serde_json::json!({
            "SelectCategory": { "category_id": "123" }
        }))
        .unwrap();
        assert_eq!(event, Event::SelectCategory { category_id: Some("123".into()) });
    }

    #[test]
    fn event_size_is_reasonable() {
        // Ensure boxing keeps the enum small.
        let size = std::mem::size_of::<Event>();
        assert!(
            size <= 64,
            "Event enum is {} bytes, box more variants",
            size
        );
    }
}

//! Display-ready projection of [`MainState`] for the shells.
//!
//! Everything here is derived; the shells only map it to widgets. Copy is
//! referenced by resource key so each platform keeps its own translations.

use serde::{Deserialize, Serialize};

use crate::model::{Category, MainState, VenueResult};
use crate::ICON_SIZE;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub screen: Screen,
    pub is_loading: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Screen {
    Blank,
    LocatingDevice,
    Loading,
    Venues {
        rows: Vec<VenueRow>,
        chips: Vec<CategoryChip>,
        selected_category_id: Option<String>,
    },
    Notice(Notice),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VenueRow {
    pub name: String,
    pub address: String,
    pub distance_m: u32,
    pub distance_text: String,
    pub icon_url: Option<String>,
}

impl From<&VenueResult> for VenueRow {
    fn from(venue: &VenueResult) -> Self {
        Self {
            name: venue.name.clone(),
            address: venue.location.formatted_address.clone().unwrap_or_default(),
            distance_m: venue.distance,
            distance_text: format_distance(venue.distance),
            icon_url: venue.categories.first().map(|c| c.icon.url(ICON_SIZE)),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryChip {
    pub id: String,
    pub name: String,
    pub icon_url: String,
    pub selected: bool,
}

impl CategoryChip {
    fn new(category: &Category, selected_category_id: Option<&str>) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            icon_url: category.icon.url(ICON_SIZE),
            selected: selected_category_id == Some(category.id.as_str()),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeAction {
    /// Send `Event::Retry`.
    Retry,
    /// Open the OS app settings; the core is not involved.
    OpenSettings,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub title_key: String,
    pub message_key: String,
    pub action: NoticeAction,
    pub action_key: String,
}

impl Notice {
    fn new(title_key: &str, message_key: &str, action: NoticeAction) -> Self {
        let action_key = match action {
            NoticeAction::Retry => "retry",
            NoticeAction::OpenSettings => "main_permission_denied_empty_cta",
        };
        Self {
            title_key: title_key.to_string(),
            message_key: message_key.to_string(),
            action,
            action_key: action_key.to_string(),
        }
    }
}

pub fn format_distance(meters: u32) -> String {
    format!("{meters}m")
}

impl ViewModel {
    pub fn from_state(state: &MainState) -> Self {
        let screen = match state {
            MainState::Uninitialized => Screen::Blank,
            MainState::AwaitingLocation => Screen::LocatingDevice,
            MainState::Loading => Screen::Loading,
            MainState::ShowingVenues { list, categories, selected_category_id } => {
                let selected = selected_category_id.as_deref();
                Screen::Venues {
                    rows: list.iter().map(VenueRow::from).collect(),
                    chips: categories.iter().map(|c| CategoryChip::new(c, selected)).collect(),
                    selected_category_id: selected_category_id.clone(),
                }
            }
            MainState::Empty => Screen::Notice(Notice::new(
                "main_permission_granted_empty_title",
                "main_permission_granted_empty_message",
                NoticeAction::Retry,
            )),
            MainState::PermissionDenied => Screen::Notice(Notice::new(
                "main_permission_denied_empty_title",
                "main_fine_location_permission_dialog_message",
                NoticeAction::OpenSettings,
            )),
            MainState::ErrorGeneral => Screen::Notice(Notice::new(
                "main_error_title",
                "main_error_message",
                NoticeAction::Retry,
            )),
            MainState::ErrorLocationUnavailable => Screen::Notice(Notice::new(
                "main_error_title",
                "main_error_get_current_location_message",
                NoticeAction::Retry,
            )),
        };

        Self {
            is_loading: matches!(screen, Screen::Loading | Screen::LocatingDevice),
            screen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::tests::venue;
    use crate::model::Icon;

    #[test]
    fn venues_project_rows_and_chips() {
        let mut cafe = venue("Cafe", 80, &["123"]);
        cafe.categories[0].icon = Icon::new("https://ss3.4sqi.net/img/cafe_", ".png");
        cafe.location.formatted_address = Some("Overtoom 1".into());

        let state = MainState::ShowingVenues {
            list: vec![cafe.clone()],
            categories: cafe.categories.clone(),
            selected_category_id: Some("123".into()),
        };

        let vm = ViewModel::from_state(&state);
        assert!(!vm.is_loading);
        match vm.screen {
            Screen::Venues { rows, chips, selected_category_id } => {
                assert_eq!(rows[0].distance_text, "80m");
                assert_eq!(rows[0].address, "Overtoom 1");
                assert_eq!(
                    rows[0].icon_url.as_deref(),
                    Some("https://ss3.4sqi.net/img/cafe_64.png")
                );
                assert!(chips[0].selected);
                assert_eq!(selected_category_id.as_deref(), Some("123"));
            }
            other => panic!("expected venues, got {other:?}"),
        }
    }

    #[test]
    fn location_error_has_its_own_message() {
        let general = ViewModel::from_state(&MainState::ErrorGeneral);
        let location = ViewModel::from_state(&MainState::ErrorLocationUnavailable);
        match (general.screen, location.screen) {
            (Screen::Notice(g), Screen::Notice(l)) => {
                assert_ne!(g.message_key, l.message_key);
                assert_eq!(l.action, NoticeAction::Retry);
            }
            other => panic!("expected notices, got {other:?}"),
        }
    }

    #[test]
    fn denied_offers_settings() {
        match ViewModel::from_state(&MainState::PermissionDenied).screen {
            Screen::Notice(notice) => assert_eq!(notice.action, NoticeAction::OpenSettings),
            other => panic!("expected notice, got {other:?}"),
        }
    }

    #[test]
    fn screen_serializes_with_type_tag() {
        let json = serde_json::to_value(ViewModel::from_state(&MainState::Loading)).unwrap();
        assert_eq!(json["screen"]["type"], "loading");
        assert_eq!(json["is_loading"], true);
    }
}

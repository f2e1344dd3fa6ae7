//! Shared core for the nearby venues screen.
//!
//! The shells (Android, iOS, web) forward UI and OS events as [`Event`]s and
//! render the [`ViewModel`]. Location, HTTP and key-value storage are
//! requested from the shell as effects.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod capabilities;
pub mod event;
pub mod filter;
pub mod gate;
pub mod machine;
pub mod model;
pub mod view;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use crux_core::{render::Render, App as CruxApp};
pub use event::Event;
pub use gate::{evaluate_permission, PermissionOutcome};
pub use machine::{MainStateMachine, SelectionRestore};
pub use model::{Category, Coordinate, Icon, MainState, Model, VenueResult};
pub use view::ViewModel;

/// Page size requested from the places search.
pub const VENUE_RESULT_LIMIT: u32 = 50;

/// Edge length, in px, of the category icons put in the view model.
pub const ICON_SIZE: u32 = 64;

/// Storage key, within the selection namespace, of the chosen category id.
pub const SELECTED_CATEGORY_KEY: &str = "selected_category_id";

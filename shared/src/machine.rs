//! The screen state machine.
//!
//! Owns the current [`MainState`] together with the unfiltered venue list and
//! the remembered category selection. Every transition replaces the state
//! value; nothing here performs I/O; the app layer turns the return values
//! into effects.

use tracing::{debug, info, instrument, warn};

use crate::capabilities::FetchError;
use crate::filter::{distinct_categories, filter_by_category, sort_by_distance};
use crate::gate::{evaluate_permission, PermissionOutcome};
use crate::model::{Coordinate, MainState, VenueResult};

/// What became of a selection read back from storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionRestore {
    /// Taken over as the remembered selection.
    Applied,
    /// Not among the categories on screen; the selection stays cleared.
    Stale,
    /// Nothing stored, or the user already picked a chip in this process.
    Skipped,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MainStateMachine {
    state: MainState,
    unfiltered: Vec<VenueResult>,
    selected_category_id: Option<String>,
    user_has_chosen: bool,
}

impl MainStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MainState {
        &self.state
    }

    pub fn selected_category_id(&self) -> Option<&str> {
        self.selected_category_id.as_deref()
    }

    pub fn set_location_permission_granted(&mut self, granted: bool) -> PermissionOutcome {
        let outcome = evaluate_permission(granted);
        match outcome {
            PermissionOutcome::ProceedToFetch => self.transition(MainState::AwaitingLocation),
            PermissionOutcome::Denied => self.transition(MainState::PermissionDenied),
        }
        outcome
    }

    /// Returns the coordinate to query when a request should be issued.
    /// A missing half of the fix ends in `ErrorLocationUnavailable` and
    /// returns `None`; no request is made for it.
    pub fn fetch_nearby_venues(
        &mut self,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Option<Coordinate> {
        match Coordinate::from_parts(latitude, longitude) {
            Some(coordinate) => {
                self.transition(MainState::Loading);
                Some(coordinate)
            }
            None => {
                warn!(?latitude, ?longitude, "no usable device location");
                self.transition(MainState::ErrorLocationUnavailable);
                None
            }
        }
    }

    #[instrument(skip_all, fields(ok = result.is_ok()))]
    pub fn complete_fetch(&mut self, result: Result<Vec<VenueResult>, FetchError>) {
        match result {
            Ok(venues) if venues.is_empty() => {
                info!("no venues around the current location");
                self.transition(MainState::Empty);
            }
            Ok(venues) => {
                info!(count = venues.len(), "venues fetched");
                self.unfiltered = sort_by_distance(venues);
                let categories = distinct_categories(&self.unfiltered);
                let still_listed = self
                    .selected_category_id
                    .as_deref()
                    .map_or(true, |id| categories.iter().any(|c| c.id == id));
                if !still_listed {
                    debug!(category_id = ?self.selected_category_id, "selection no longer listed");
                    self.selected_category_id = None;
                }
                let list =
                    filter_by_category(&self.unfiltered, self.selected_category_id.as_deref());
                self.transition(MainState::ShowingVenues {
                    list,
                    categories,
                    selected_category_id: self.selected_category_id.clone(),
                });
            }
            Err(error) => {
                warn!(%error, "venue fetch failed");
                self.transition(MainState::ErrorGeneral);
            }
        }
    }

    /// Records the selection. Only a visible list is re-filtered; in any
    /// other state the selection waits for the next successful fetch.
    pub fn select_category(&mut self, category_id: Option<String>) {
        self.user_has_chosen = true;
        self.selected_category_id = category_id;
        self.refilter();
    }

    /// Applies a selection saved by an earlier process. A choice made in
    /// this process, including clearing the chips, always wins. While venues
    /// are shown the id must name one of their categories.
    pub fn restore_selection(&mut self, category_id: Option<String>) -> SelectionRestore {
        let Some(id) = category_id else {
            return SelectionRestore::Skipped;
        };
        if self.user_has_chosen {
            return SelectionRestore::Skipped;
        }

        if let MainState::ShowingVenues { categories, .. } = &self.state {
            if !categories.iter().any(|c| c.id == id) {
                debug!(category_id = %id, "restored selection no longer listed");
                self.selected_category_id = None;
                return SelectionRestore::Stale;
            }
        }

        self.selected_category_id = Some(id);
        self.refilter();
        SelectionRestore::Applied
    }

    fn refilter(&mut self) {
        if let MainState::ShowingVenues { categories, .. } = &self.state {
            let next = MainState::ShowingVenues {
                list: filter_by_category(&self.unfiltered, self.selected_category_id.as_deref()),
                categories: categories.clone(),
                selected_category_id: self.selected_category_id.clone(),
            };
            self.transition(next);
        }
    }

    fn transition(&mut self, next: MainState) {
        debug!(from = self.state.name(), to = next.name(), "state transition");
        self.state = next;
    }
}

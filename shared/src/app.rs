use tracing::{debug, info, warn};

use crate::capabilities::{
    get_nearby_venues, load_selection, save_selection, CapabilityError, Capabilities, FetchError,
    VenueQuery,
};
use crate::event::Event;
use crate::machine::SelectionRestore;
use crate::model::Model;
use crate::view::ViewModel;

#[derive(Default)]
pub struct App;

impl App {
    fn report(error: &CapabilityError) {
        warn!(%error, "capability request not issued");
    }

    fn request_permission(caps: &Capabilities) {
        caps.location
            .request_permission(|granted| Event::LocationPermissionResult { granted });
    }

    fn request_last_known(caps: &Capabilities) {
        caps.location.last_known(|fix| Event::LastKnownLocation { fix });
    }

    fn fetch(
        latitude: Option<f64>,
        longitude: Option<f64>,
        model: &mut Model,
        caps: &Capabilities,
    ) {
        let Some(coordinate) = model.machine.fetch_nearby_venues(latitude, longitude) else {
            return;
        };

        let session = model.session;
        let query = VenueQuery::new(coordinate).with_limit(model.config.result_limit);
        let sent = get_nearby_venues(&caps.http, &model.config, &query, move |result| {
            Event::VenuesFetched { session, result: Box::new(result) }
        });

        match sent {
            Ok(()) => model.fetches_in_flight += 1,
            Err(error) => {
                Self::report(&CapabilityError::from(error.clone()));
                model.machine.complete_fetch(Err(FetchError::from(error)));
            }
        }
    }

    fn persist_selection(model: &Model, caps: &Capabilities) {
        let selected = model.machine.selected_category_id();
        if let Err(error) =
            save_selection(&caps.kv, selected, |ok| Event::SelectionPersisted { ok })
        {
            Self::report(&CapabilityError::from(error));
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(event = event.name(), state = model.state().name(), "update");

        match event {
            Event::Started => {
                load_selection(&caps.kv, |category_id| Event::SelectionRestored { category_id });
                Self::request_permission(caps);
                caps.render.render();
            }

            Event::Configure(config) => match config.validate() {
                Ok(base) => {
                    info!(host = base.host(), limit = config.result_limit, "places api configured");
                    model.config = *config;
                }
                Err(error) => Self::report(&CapabilityError::from(error)),
            },

            Event::ScreenClosed => {
                if model.fetches_in_flight > 0 {
                    info!(pending = model.fetches_in_flight, "screen closed, dropping fetches");
                }
                model.session = model.session.wrapping_add(1);
                model.fetches_in_flight = 0;
            }

            Event::RequestLocationPermission => Self::request_permission(caps),

            Event::LocationPermissionResult { granted } => {
                model.permission_granted = granted;
                if model.machine.set_location_permission_granted(granted).is_granted() {
                    Self::request_last_known(caps);
                }
                caps.render.render();
            }

            Event::LastKnownLocation { fix } => {
                Self::fetch(fix.map(|c| c.latitude), fix.map(|c| c.longitude), model, caps);
                caps.render.render();
            }

            Event::FetchNearbyVenues { latitude, longitude } => {
                Self::fetch(latitude, longitude, model, caps);
                caps.render.render();
            }

            Event::Retry => {
                if model.permission_granted {
                    model.machine.set_location_permission_granted(true);
                    Self::request_last_known(caps);
                } else {
                    Self::request_permission(caps);
                }
                caps.render.render();
            }

            Event::SelectCategory { category_id } => {
                model.machine.select_category(category_id);
                Self::persist_selection(model, caps);
                caps.render.render();
            }

            Event::VenuesFetched { session, result } => {
                if session != model.session {
                    debug!(session, current = model.session, "discarding fetch from closed screen");
                    return;
                }
                model.fetches_in_flight = model.fetches_in_flight.saturating_sub(1);

                let before = model.machine.selected_category_id().map(str::to_owned);
                model.machine.complete_fetch(*result);
                if model.machine.selected_category_id() != before.as_deref() {
                    Self::persist_selection(model, caps);
                }
                caps.render.render();
            }

            Event::SelectionRestored { category_id } => {
                match model.machine.restore_selection(category_id) {
                    SelectionRestore::Applied => {
                        debug!("category selection restored");
                        caps.render.render();
                    }
                    SelectionRestore::Stale => Self::persist_selection(model, caps),
                    SelectionRestore::Skipped => {}
                }
            }

            Event::SelectionPersisted { ok } => {
                if !ok {
                    warn!("category selection was not saved");
                }
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::from_state(model.state())
    }
}

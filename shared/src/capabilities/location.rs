use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::model::Coordinate;

/// Device location, provided by the shell.
///
/// The shell owns the OS permission dialog and the fused location client;
/// the core only ever sees a boolean answer and an optional last-known fix.
pub struct DeviceLocation<E> {
    context: CapabilityContext<LocationOperation, E>,
}

impl<Ev> Capability<Ev> for DeviceLocation<Ev> {
    type Operation = LocationOperation;
    type MappedSelf<MappedEv> = DeviceLocation<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static,
    {
        DeviceLocation::new(self.context.map_event(f))
    }
}

impl<E> DeviceLocation<E> {
    pub fn new(context: CapabilityContext<LocationOperation, E>) -> Self {
        Self { context }
    }
}

impl<E> DeviceLocation<E>
where
    E: Send + 'static,
{
    /// Asks the shell to show the permission prompt (or read the current
    /// grant). Anything but an explicit grant counts as denied.
    pub fn request_permission<F>(&self, make_event: F)
    where
        F: FnOnce(bool) -> E + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let granted = match ctx.request_from_shell(LocationOperation::RequestPermission).await {
                Ok(LocationOutput::Permission { granted }) => granted,
                Ok(other) => {
                    warn!(?other, "unexpected answer to permission request");
                    false
                }
                Err(error) => {
                    warn!(%error, "permission request failed");
                    false
                }
            };
            ctx.update_app(make_event(granted));
        });
    }

    /// Last known fix. Errors and absent fixes both come back as `None`.
    pub fn last_known<F>(&self, make_event: F)
    where
        F: FnOnce(Option<Coordinate>) -> E + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let fix = match ctx.request_from_shell(LocationOperation::LastKnownLocation).await {
                Ok(LocationOutput::LastKnown(fix)) => fix,
                Ok(other) => {
                    warn!(?other, "unexpected answer to location request");
                    None
                }
                Err(error) => {
                    warn!(%error, "location request failed");
                    None
                }
            };
            ctx.update_app(make_event(fix));
        });
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LocationOperation {
    RequestPermission,
    LastKnownLocation,
}

impl Operation for LocationOperation {
    type Output = LocationResult;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LocationOutput {
    Permission { granted: bool },
    LastKnown(Option<Coordinate>),
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum LocationError {
    #[error("location services are disabled")]
    ServicesDisabled,

    #[error("location permission was revoked")]
    PermissionRevoked,

    #[error("location provider failed: {message}")]
    Provider { message: String },
}

pub type LocationResult = Result<LocationOutput, LocationError>;

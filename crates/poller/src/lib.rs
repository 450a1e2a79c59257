//! Polls the hub for the sensors of a [`Layout`] and hands every reading to
//! a [`DisplaySink`].

pub mod display;
pub mod error;
pub mod layout;
pub mod poller;
pub mod reading;
mod supervisor;

#[doc(no_inline)]
pub use display::{DisplaySink, Status};
#[doc(no_inline)]
pub use error::{EntityError, HubError, PollerError};
#[doc(no_inline)]
pub use layout::{EntityKind, Layout, TrackedEntity};
#[doc(no_inline)]
pub use poller::{CycleReport, EntityOutcome, Poller, PollerOptions};
#[doc(no_inline)]
pub use reading::{DataError, SensorReading};
pub use supervisor::PollerHandle;

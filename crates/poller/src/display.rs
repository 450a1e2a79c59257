//! The surface the poller renders to.

use crate::{layout::TrackedEntity, reading::SensorReading};
use hass_comfort::{ComfortAssessment, Tween};
use std::fmt;

/// Message shown when no tracked entity produced a reading.
pub const FETCH_FAILED: &str = "data fetch failed";

/// Message shown when the startup configuration fetch failed.
pub const CONFIG_FAILED: &str = "failed to load configuration";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
	Updating,
	Connected,
	Error(String),
}

impl Status {
	pub fn error(message: impl Into<String>) -> Self {
		Status::Error(message.into())
	}

	pub fn is_error(&self) -> bool {
		matches!(self, Status::Error(_))
	}
}

impl fmt::Display for Status {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Status::Updating => f.write_str("updating"),
			Status::Connected => f.write_str("connected"),
			Status::Error(message) => f.write_str(message),
		}
	}
}

/// A presentation adapter.
///
/// Calls arrive from the task that owns the poller, one at a time.
pub trait DisplaySink: Send {
	/// A new value for `entity`. `tween` runs from the previously shown value
	/// to the new one.
	fn set_value(&mut self, entity: &TrackedEntity, reading: &SensorReading, tween: Tween);

	fn set_status(&mut self, status: Status);

	/// Comfort placement of a temperature reading.
	fn set_comfort(&mut self, entity: &TrackedEntity, assessment: &ComfortAssessment);
}

impl<T> DisplaySink for Box<T>
where
	T: DisplaySink + ?Sized,
{
	fn set_value(&mut self, entity: &TrackedEntity, reading: &SensorReading, tween: Tween) {
		(**self).set_value(entity, reading, tween)
	}

	fn set_status(&mut self, status: Status) {
		(**self).set_status(status)
	}

	fn set_comfort(&mut self, entity: &TrackedEntity, assessment: &ComfortAssessment) {
		(**self).set_comfort(entity, assessment)
	}
}

static_assertions::assert_obj_safe!(DisplaySink);

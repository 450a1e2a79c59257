use chrono::{DateTime, Utc};
use hass_hub_provider::{EntityId, EntityState};
use thiserror::Error;

/// Hub states that mean the sensor currently has no value.
const UNAVAILABLE_STATES: [&str; 2] = ["unavailable", "unknown"];

/// The sensor had no usable value. Logged and skipped; the display keeps
/// whatever it showed before.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DataError {
	#[error("sensor state: {state}")]
	Unavailable { state: String },

	#[error("sensor reported no state")]
	Missing,

	#[error("invalid reading: {state}")]
	Invalid { state: String },
}

/// One poll attempt's view of a sensor.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorReading {
	pub entity_id: EntityId,
	pub raw_state: String,
	pub numeric_value: Option<f64>,
	pub unit: Option<String>,
	pub observed_at: DateTime<Utc>,
}

impl SensorReading {
	pub fn from_state(entity_id: EntityId, state: &EntityState, observed_at: DateTime<Utc>) -> Self {
		let raw_state = state.state.clone().unwrap_or_default();
		let numeric_value = parse_numeric(&raw_state);

		SensorReading {
			entity_id,
			raw_state,
			numeric_value,
			unit: state.unit_of_measurement().map(str::to_owned),
			observed_at,
		}
	}

	/// The finite value of the reading, or why there is none.
	pub fn value(&self) -> Result<f64, DataError> {
		let state = self.raw_state.trim();
		if state.is_empty() {
			return Err(DataError::Missing);
		}

		if UNAVAILABLE_STATES.contains(&state) {
			return Err(DataError::Unavailable {
				state: state.to_owned(),
			});
		}

		self.numeric_value.ok_or_else(|| DataError::Invalid {
			state: state.to_owned(),
		})
	}
}

fn parse_numeric(state: &str) -> Option<f64> {
	state
		.trim()
		.parse::<f64>()
		.ok()
		.filter(|value| value.is_finite())
}

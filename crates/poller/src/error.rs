use crate::{display::CONFIG_FAILED, reading::DataError};
use hass_dyn_error::DynError;
use thiserror::Error;

/// A request to the hub failed outright.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HubError {
	#[error("{source}")]
	Transport { source: DynError },

	#[error("HTTP error! status: {status}")]
	Status { status: u16 },

	#[error("invalid document: {source}")]
	Document { source: DynError },
}

impl HubError {
	pub(crate) fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
		Self::Transport {
			source: DynError::new(source),
		}
	}

	pub(crate) fn status(status: u16) -> Self {
		Self::Status { status }
	}

	pub(crate) fn document(source: impl std::error::Error + Send + Sync + 'static) -> Self {
		Self::Document {
			source: DynError::new(source),
		}
	}
}

/// Why one entity produced no reading in a cycle.
#[derive(Debug, Error)]
pub enum EntityError {
	#[error(transparent)]
	Hub(#[from] HubError),

	#[error(transparent)]
	Data(#[from] DataError),
}

impl EntityError {
	/// Hub failures are hard; a sensor without a value is not.
	pub fn is_hard(&self) -> bool {
		matches!(self, EntityError::Hub(_))
	}
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PollerError {
	#[error("{}", CONFIG_FAILED)]
	Configuration { source: DynError },

	#[error("poller task failed: {source}")]
	Task { source: DynError },
}

impl PollerError {
	pub(crate) fn configuration(source: HubError) -> Self {
		Self::Configuration {
			source: DynError::new(source),
		}
	}

	pub(crate) fn task(source: impl std::error::Error + Send + Sync + 'static) -> Self {
		Self::Task {
			source: DynError::new(source),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::error::Error as _;

	#[test]
	fn data_errors_are_soft() {
		let err = EntityError::from(DataError::Missing);
		assert!(!err.is_hard());
		assert!(EntityError::from(HubError::status(503)).is_hard());
	}

	#[test]
	fn configuration_error_keeps_cause() {
		let err = PollerError::configuration(HubError::status(404));
		assert_eq!(err.to_string(), "failed to load configuration");
		assert_eq!(
			err.source().map(|source| source.to_string()),
			Some("HTTP error! status: 404".to_owned())
		);
	}
}

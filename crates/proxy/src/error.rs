use crate::{config::ConfigError, cors};
use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
};
use hass_dyn_error::DynError;
use serde_json::json;
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProxyError {
	#[error(transparent)]
	Configuration(#[from] ConfigError),

	/// The hub could not be reached, or the connection broke mid-response.
	#[error("{source}")]
	Transport { source: DynError },

	/// The hub answered with something that is not JSON.
	#[error("{source}")]
	UpstreamBody { status: StatusCode, source: DynError },

	#[error("failed to read request body: {source}")]
	RequestBody { source: DynError },

	#[error("failed to build response: {source}")]
	Response { source: DynError },
}

impl ProxyError {
	pub(crate) fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
		Self::Transport {
			source: DynError::new(source),
		}
	}

	pub(crate) fn upstream_body(
		status: StatusCode,
		source: impl std::error::Error + Send + Sync + 'static,
	) -> Self {
		Self::UpstreamBody {
			status,
			source: DynError::new(source),
		}
	}

	pub(crate) fn request_body(source: impl std::error::Error + Send + Sync + 'static) -> Self {
		Self::RequestBody {
			source: DynError::new(source),
		}
	}

	pub(crate) fn response(source: impl std::error::Error + Send + Sync + 'static) -> Self {
		Self::Response {
			source: DynError::new(source),
		}
	}

	pub fn status(&self) -> StatusCode {
		match self {
			ProxyError::RequestBody { .. } => StatusCode::BAD_REQUEST,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for ProxyError {
	fn into_response(self) -> Response {
		cors::json(self.status(), &json!({ "error": self.to_string() }))
	}
}

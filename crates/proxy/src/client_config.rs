//! `GET /config`: hands the hub host and credential to browser-side pollers
//! that have to attach the credential themselves.
//!
//! The endpoint is unauthenticated: anyone who can reach it can read the
//! credential.

use crate::{ProxyState, cors};
use axum::{extract::State, http::StatusCode, response::Response};
use tracing::debug;

pub async fn handler(State(state): State<ProxyState>) -> Response {
	debug!(
		host = state.config.host_name().unwrap_or_default(),
		token = state.config.has_token(),
		"serving client configuration"
	);
	cors::json(StatusCode::OK, &state.config.client_config())
}

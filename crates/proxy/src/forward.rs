//! The production `/api/` forwarder.
//!
//! Inbound headers are dropped; the hub only ever sees the configured bearer
//! credential and a JSON content type. The hub's status code is relayed as
//! is and its body is re-serialized, so anything but JSON is an error.

use crate::{API_PREFIX, ProxyState, cors, error::ProxyError};
use axum::{
	body,
	extract::{Request, State},
	http::{Method, Uri, header},
	response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::{Level, debug, error, instrument, warn};

/// Largest request body relayed to the hub.
pub const MAX_BODY: usize = 1024 * 1024;

#[instrument(
	level = Level::DEBUG,
	name = "forward",
	skip_all,
	fields(method = %request.method(), path = %request.uri().path())
)]
pub async fn handler(State(state): State<ProxyState>, request: Request) -> Response {
	if request.method() == Method::OPTIONS {
		debug!("answering preflight");
		return cors::preflight();
	}

	match forward(&state, request).await {
		Ok(response) => response,
		Err(err @ ProxyError::Configuration(_)) => {
			error!(error = %err, "hub is not configured");
			err.into_response()
		}
		Err(err) => {
			warn!(error = %err, "failed to forward request");
			err.into_response()
		}
	}
}

async fn forward(state: &ProxyState, request: Request) -> Result<Response, ProxyError> {
	let upstream = state.config.upstream()?;
	let url = upstream.api_url(&relative_path(request.uri()));
	let method = request.method().clone();
	let body = body::to_bytes(request.into_body(), MAX_BODY)
		.await
		.map_err(ProxyError::request_body)?;

	let mut outbound = state
		.http
		.request(method, &url)
		.header(header::AUTHORIZATION, upstream.credential().bearer())
		.header(header::CONTENT_TYPE, "application/json");

	if !body.is_empty() {
		outbound = outbound.body(body);
	}

	let response = outbound.send().await.map_err(ProxyError::transport)?;
	let status = response.status();
	let bytes = response.bytes().await.map_err(ProxyError::transport)?;
	let document = parse_document(&bytes).map_err(|e| ProxyError::upstream_body(status, e))?;

	debug!(status = status.as_u16(), "relaying hub response");
	Ok(cors::json(status, &document))
}

fn parse_document(bytes: &Bytes) -> Result<serde_json::Value, serde_json::Error> {
	serde_json::from_slice(bytes)
}

/// Path below `/api/`, with the query string kept.
pub(crate) fn relative_path(uri: &Uri) -> String {
	let path = uri.path();
	let relative = path
		.strip_prefix(API_PREFIX)
		.unwrap_or_else(|| path.trim_start_matches('/'));

	match uri.query() {
		Some(query) => format!("{relative}?{query}"),
		None => relative.to_owned(),
	}
}

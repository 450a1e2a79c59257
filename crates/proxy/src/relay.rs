//! Raw `/api/` relay used by the development server.
//!
//! Unlike [`crate::forward`], every inbound header except `Host` reaches the
//! hub, nothing is added, and the hub's response streams back untouched. The
//! browser is expected to send its own `Authorization` header.

use crate::{ProxyState, error::ProxyError, forward::MAX_BODY};
use axum::{
	body::{self, Body},
	extract::{Request, State},
	http::{StatusCode, header},
	response::{IntoResponse, Response},
};
use tracing::{Level, debug, error, instrument};

#[instrument(
	level = Level::DEBUG,
	name = "relay",
	skip_all,
	fields(method = %request.method(), path = %request.uri().path())
)]
pub async fn handler(State(state): State<ProxyState>, request: Request) -> Response {
	match relay(&state, request).await {
		Ok(response) => response,
		Err(err @ ProxyError::Configuration(_)) => {
			error!(error = %err, "hub is not configured");
			err.into_response()
		}
		Err(err @ ProxyError::RequestBody { .. }) => {
			debug!(error = %err, "rejected request body");
			err.into_response()
		}
		Err(err) => {
			error!(error = %err, "proxy error");
			(StatusCode::BAD_GATEWAY, "Bad Gateway").into_response()
		}
	}
}

async fn relay(state: &ProxyState, request: Request) -> Result<Response, ProxyError> {
	let base = state.config.base_url()?;
	let path_and_query = request
		.uri()
		.path_and_query()
		.map(|pq| pq.as_str())
		.unwrap_or("/");
	let url = format!("{base}{path_and_query}");

	let (parts, body) = request.into_parts();
	let body = body::to_bytes(body, MAX_BODY)
		.await
		.map_err(ProxyError::request_body)?;

	// reqwest derives `Host` from the url
	let mut headers = parts.headers;
	headers.remove(header::HOST);

	debug!(%url, "relaying to hub");
	let upstream = state
		.http
		.request(parts.method, &url)
		.headers(headers)
		.body(body)
		.send()
		.await
		.map_err(ProxyError::transport)?;

	let mut response = Response::builder().status(upstream.status());
	for (name, value) in upstream.headers() {
		if name != header::TRANSFER_ENCODING && name != header::CONNECTION {
			response = response.header(name, value);
		}
	}

	response
		.body(Body::from_stream(upstream.bytes_stream()))
		.map_err(ProxyError::response)
}

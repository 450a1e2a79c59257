use axum::{
	Json,
	http::{StatusCode, header},
	response::{IntoResponse, Response},
};
use serde::Serialize;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Answer to a CORS preflight. Never touches the hub.
pub fn preflight() -> Response {
	(
		StatusCode::NO_CONTENT,
		[
			(header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN),
			(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
			(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
		],
	)
		.into_response()
}

/// A JSON response that any origin may read.
pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Response {
	(
		status,
		[(header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN)],
		Json(body),
	)
		.into_response()
}

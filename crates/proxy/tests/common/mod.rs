#![allow(dead_code)]

use axum::{
	Json, Router,
	body::{self, Body},
	extract::{Request, State},
	http::{HeaderMap, Method, StatusCode},
	response::{IntoResponse, Response},
};
use hass_proxy::{HubConfig, ProxyState, Scheme};
use serde_json::{Value, json};
use std::{
	net::SocketAddr,
	sync::{Arc, Mutex},
};

/// A request as the fake hub received it.
#[derive(Clone, Debug)]
pub struct Seen {
	pub method: Method,
	pub uri: String,
	pub headers: HeaderMap,
	pub body: String,
}

impl Seen {
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}
}

/// A fake hub bound to a random local port.
#[derive(Clone, Default)]
pub struct FakeHub {
	seen: Arc<Mutex<Vec<Seen>>>,
}

impl FakeHub {
	pub async fn start() -> (Self, SocketAddr) {
		let hub = FakeHub::default();
		let router = Router::new().fallback(record).with_state(hub.clone());

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move {
			axum::serve(listener, router).await.unwrap();
		});

		(hub, addr)
	}

	pub fn seen(&self) -> Vec<Seen> {
		self.seen.lock().unwrap().clone()
	}
}

async fn record(State(hub): State<FakeHub>, request: Request) -> Response {
	let (parts, body) = request.into_parts();
	let body = body::to_bytes(body, usize::MAX).await.unwrap();
	hub.seen.lock().unwrap().push(Seen {
		method: parts.method.clone(),
		uri: parts.uri.to_string(),
		headers: parts.headers.clone(),
		body: String::from_utf8_lossy(&body).into_owned(),
	});

	match parts.uri.path() {
		"/api/states/sensor.living_room_temperature" => (
			[("x-upstream", "yes")],
			Json(json!({
				"entity_id": "sensor.living_room_temperature",
				"state": "21.4",
				"attributes": { "unit_of_measurement": "°C" }
			})),
		)
			.into_response(),
		"/api/states/sensor.missing" => (
			StatusCode::NOT_FOUND,
			Json(json!({ "message": "Entity not found." })),
		)
			.into_response(),
		"/api/plain" => (StatusCode::UNAUTHORIZED, "401: Unauthorized").into_response(),
		"/api/services/light/turn_on" => Json(json!([])).into_response(),
		_ => (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))).into_response(),
	}
}

pub fn state_for(addr: SocketAddr) -> ProxyState {
	ProxyState::new(
		HubConfig::new()
			.host(addr.to_string())
			.token("secret-token")
			.scheme(Scheme::Http),
	)
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	drop(listener);
	addr
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
	body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap()
		.to_vec()
}

pub async fn body_json(response: Response) -> Value {
	serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn get(uri: &str) -> Request {
	Request::builder().uri(uri).body(Body::empty()).unwrap()
}

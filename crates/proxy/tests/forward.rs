mod common;

use axum::{
	body::Body,
	extract::Request,
	http::{Method, StatusCode, header},
};
use common::{FakeHub, body_json, closed_addr, get, state_for};
use hass_proxy::{HubConfig, ProxyState, Scheme, router};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn forwards_with_configured_credential() {
	let (hub, addr) = FakeHub::start().await;
	let request = Request::builder()
		.uri("/api/states/sensor.living_room_temperature")
		.header(header::AUTHORIZATION, "Bearer from-the-browser")
		.header("x-custom", "1")
		.body(Body::empty())
		.unwrap();

	let response = router(state_for(addr)).oneshot(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
		"*"
	);
	assert_eq!(
		body_json(response).await,
		json!({
			"entity_id": "sensor.living_room_temperature",
			"state": "21.4",
			"attributes": { "unit_of_measurement": "°C" }
		})
	);

	let seen = hub.seen();
	assert_eq!(seen.len(), 1);
	assert_eq!(seen[0].method, Method::GET);
	assert_eq!(seen[0].uri, "/api/states/sensor.living_room_temperature");
	assert_eq!(seen[0].header("authorization"), Some("Bearer secret-token"));
	assert_eq!(seen[0].header("content-type"), Some("application/json"));
	assert_eq!(seen[0].header("x-custom"), None);
}

#[tokio::test]
async fn keeps_query_string() {
	let (hub, addr) = FakeHub::start().await;

	let response = router(state_for(addr))
		.oneshot(get("/api/history?filter_entity_id=sensor.t"))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert_eq!(hub.seen()[0].uri, "/api/history?filter_entity_id=sensor.t");
}

#[tokio::test]
async fn forwards_request_body() {
	let (hub, addr) = FakeHub::start().await;
	let request = Request::builder()
		.method(Method::POST)
		.uri("/api/services/light/turn_on")
		.body(Body::from(r#"{"entity_id":"light.kitchen"}"#))
		.unwrap();

	let response = router(state_for(addr)).oneshot(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_json(response).await, json!([]));

	let seen = hub.seen();
	assert_eq!(seen[0].method, Method::POST);
	assert_eq!(seen[0].body, r#"{"entity_id":"light.kitchen"}"#);
}

#[tokio::test]
async fn relays_hub_status() {
	let (_hub, addr) = FakeHub::start().await;

	let response = router(state_for(addr))
		.oneshot(get("/api/states/sensor.missing"))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert_eq!(
		response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
		"*"
	);
	assert_eq!(
		body_json(response).await,
		json!({ "message": "Entity not found." })
	);
}

#[tokio::test]
async fn missing_token_never_reaches_hub() {
	let (hub, addr) = FakeHub::start().await;
	let config = HubConfig::new().host(addr.to_string()).scheme(Scheme::Http);

	let response = router(ProxyState::new(config))
		.oneshot(get("/api/states/sensor.living_room_temperature"))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(
		response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
		"*"
	);
	assert_eq!(
		body_json(response).await,
		json!({ "error": "HA_TOKEN not configured" })
	);
	assert!(hub.seen().is_empty());
}

#[tokio::test]
async fn missing_host_is_reported() {
	let config = HubConfig::new().token("secret-token");

	let response = router(ProxyState::new(config))
		.oneshot(get("/api/states/sensor.living_room_temperature"))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(
		body_json(response).await,
		json!({ "error": "HA_HOST not configured" })
	);
}

#[tokio::test]
async fn token_is_checked_before_host() {
	let response = router(ProxyState::new(HubConfig::new()))
		.oneshot(get("/api/states/sensor.t"))
		.await
		.unwrap();

	assert_eq!(
		body_json(response).await,
		json!({ "error": "HA_TOKEN not configured" })
	);
}

#[tokio::test]
async fn preflight_is_answered_locally() {
	let (hub, addr) = FakeHub::start().await;

	for state in [state_for(addr), ProxyState::new(HubConfig::new())] {
		let request = Request::builder()
			.method(Method::OPTIONS)
			.uri("/api/states/sensor.living_room_temperature")
			.body(Body::empty())
			.unwrap();

		let response = router(state).oneshot(request).await.unwrap();

		assert_eq!(response.status(), StatusCode::NO_CONTENT);
		let headers = response.headers();
		assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
		assert_eq!(
			headers[header::ACCESS_CONTROL_ALLOW_METHODS],
			"GET, POST, OPTIONS"
		);
		assert_eq!(
			headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
			"Content-Type, Authorization"
		);
	}

	assert!(hub.seen().is_empty());
}

#[tokio::test]
async fn non_json_hub_body_is_an_error() {
	let (_hub, addr) = FakeHub::start().await;

	let response = router(state_for(addr))
		.oneshot(get("/api/plain"))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	let body = body_json(response).await;
	assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
}

#[tokio::test]
async fn unreachable_hub_is_an_error() {
	let addr = closed_addr().await;

	let response = router(state_for(addr))
		.oneshot(get("/api/states/sensor.living_room_temperature"))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(
		response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
		"*"
	);
	let body = body_json(response).await;
	assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
}

#[tokio::test]
async fn config_endpoint_returns_settings() {
	let config = HubConfig::new().host("hub.example:8123").token("abc");

	let response = router(ProxyState::new(config))
		.oneshot(get("/config"))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
		"*"
	);
	assert_eq!(
		body_json(response).await,
		json!({ "HA_HOST": "hub.example:8123", "HA_TOKEN": "abc" })
	);
}

#[tokio::test]
async fn config_endpoint_omits_missing_settings() {
	let response = router(ProxyState::new(HubConfig::new()))
		.oneshot(get("/config"))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_json(response).await, json!({}));
}

#[tokio::test]
async fn forwards_bare_api_prefix() {
	let (hub, addr) = FakeHub::start().await;

	let response = router(state_for(addr)).oneshot(get("/api/")).await.unwrap();

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert_eq!(
		response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
		"*"
	);

	let seen = hub.seen();
	assert_eq!(seen.len(), 1);
	assert_eq!(seen[0].uri, "/api/");
	assert_eq!(seen[0].header("authorization"), Some("Bearer secret-token"));
}

#[tokio::test]
async fn answers_preflight_on_bare_api_prefix() {
	let request = Request::builder()
		.method(Method::OPTIONS)
		.uri("/api/")
		.body(Body::empty())
		.unwrap();

	let response = router(ProxyState::new(HubConfig::new()))
		.oneshot(request)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::NO_CONTENT);
	let headers = response.headers();
	assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
	assert_eq!(
		headers[header::ACCESS_CONTROL_ALLOW_METHODS],
		"GET, POST, OPTIONS"
	);
	assert_eq!(
		headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
		"Content-Type, Authorization"
	);
}

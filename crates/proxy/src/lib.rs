use axum::{
	Router,
	extract::FromRef,
	routing::{any, get},
};
use std::{path::PathBuf, sync::Arc};
use tower_http::trace::TraceLayer;

pub mod assets;
pub mod client_config;
pub mod config;
pub mod cors;
pub mod error;
pub mod forward;
pub mod relay;

pub use assets::Assets;
pub use config::{ConfigEnvError, ConfigError, HubConfig, Scheme};
pub use error::ProxyError;

pub const API_PREFIX: &str = "/api/";

/// Host the development server relays to when `HA_HOST` is unset.
pub const DEFAULT_HUB_HOST: &str = "homeassistant.local";

/// Port the development server listens on.
pub const DEV_SERVER_PORT: u16 = 8000;

#[derive(Clone, Debug)]
pub struct ProxyState {
	pub(crate) config: Arc<HubConfig>,
	pub(crate) http: reqwest::Client,
}

impl ProxyState {
	pub fn new(config: HubConfig) -> Self {
		Self::with_client(config, reqwest::Client::new())
	}

	pub fn with_client(config: HubConfig, http: reqwest::Client) -> Self {
		ProxyState {
			config: Arc::new(config),
			http,
		}
	}

	pub fn config(&self) -> &HubConfig {
		&self.config
	}
}

/// The production surface: `/config` and the JSON forwarder on `/api/`.
pub fn router(state: ProxyState) -> Router {
	Router::new()
		.route("/config", get(client_config::handler))
		.route(API_PREFIX, any(forward::handler))
		.route("/api/{*path}", any(forward::handler))
		.with_state(state)
}

#[derive(Clone, Debug)]
struct DevState {
	proxy: ProxyState,
	assets: Assets,
}

impl FromRef<DevState> for ProxyState {
	fn from_ref(state: &DevState) -> Self {
		state.proxy.clone()
	}
}

impl FromRef<DevState> for Assets {
	fn from_ref(state: &DevState) -> Self {
		state.assets.clone()
	}
}

/// The local development server: static files from `root`, the raw relay on
/// `/api/` and `/config`.
pub fn dev_router(state: ProxyState, root: impl Into<PathBuf>) -> Router {
	let state = DevState {
		proxy: state,
		assets: Assets::new(root),
	};

	Router::new()
		.route("/config", get(client_config::handler))
		.route(API_PREFIX, any(relay::handler))
		.route("/api/{*path}", any(relay::handler))
		.fallback(assets::handler)
		.with_state(state)
		.layer(TraceLayer::new_for_http())
}

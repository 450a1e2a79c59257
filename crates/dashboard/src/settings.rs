//! Process settings read from the environment once at startup.

use hass_dyn_error::DynError;
use hass_poller::Layout;
use hass_proxy::DEV_SERVER_PORT;
use std::{
	net::{Ipv4Addr, SocketAddr},
	path::PathBuf,
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid {var}: {value}")]
pub struct SettingsError {
	var: &'static str,
	value: String,
	source: DynError,
}

impl SettingsError {
	fn invalid(
		var: &'static str,
		value: impl Into<String>,
		source: impl std::error::Error + Send + Sync + 'static,
	) -> Self {
		SettingsError {
			var,
			value: value.into(),
			source: DynError::new(source),
		}
	}

	pub fn var(&self) -> &'static str {
		self.var
	}
}

fn lookup_non_empty(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<String> {
	lookup(var).filter(|value| !value.trim().is_empty())
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardSettings {
	/// Where `/config` and `/api/` are served, normally the dev server or
	/// the proxy.
	pub url: String,
	pub layout: Layout,
}

impl DashboardSettings {
	pub const URL_VAR: &'static str = "DASHBOARD_URL";
	pub const LAYOUT_VAR: &'static str = "DASHBOARD_LAYOUT";
	pub const DEFAULT_URL: &'static str = "http://127.0.0.1:8000";

	pub fn from_env() -> Result<Self, SettingsError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
		let url = lookup_non_empty(&lookup, Self::URL_VAR)
			.unwrap_or_else(|| Self::DEFAULT_URL.to_owned());

		let layout = match lookup_non_empty(&lookup, Self::LAYOUT_VAR) {
			Some(name) => name
				.parse()
				.map_err(|e| SettingsError::invalid(Self::LAYOUT_VAR, &name, e))?,
			None => Layout::default(),
		};

		Ok(DashboardSettings { url, layout })
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProxySettings {
	pub bind: SocketAddr,
}

impl ProxySettings {
	pub const BIND_VAR: &'static str = "PROXY_BIND";
	pub const DEFAULT_BIND: SocketAddr = SocketAddr::new(
		std::net::IpAddr::V4(Ipv4Addr::LOCALHOST),
		8787,
	);

	pub fn from_env() -> Result<Self, SettingsError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
		let bind = match lookup_non_empty(&lookup, Self::BIND_VAR) {
			Some(value) => value
				.trim()
				.parse()
				.map_err(|e| SettingsError::invalid(Self::BIND_VAR, &value, e))?,
			None => Self::DEFAULT_BIND,
		};

		Ok(ProxySettings { bind })
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DevServerSettings {
	pub root: PathBuf,
	pub bind: SocketAddr,
}

impl DevServerSettings {
	pub const ROOT_VAR: &'static str = "DEV_ROOT";

	pub fn from_env() -> Self {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let root = lookup_non_empty(&lookup, Self::ROOT_VAR)
			.map(PathBuf::from)
			.unwrap_or_else(|| PathBuf::from("."));

		DevServerSettings {
			root,
			bind: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEV_SERVER_PORT)),
		}
	}
}

use hass_hub_provider::{ClientConfig, Credential};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scheme {
	#[default]
	Https,
	Http,
}

impl Scheme {
	pub fn as_str(self) -> &'static str {
		match self {
			Scheme::Https => "https",
			Scheme::Http => "http",
		}
	}
}

impl fmt::Display for Scheme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Scheme {
	type Err = ConfigEnvError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"https" => Ok(Scheme::Https),
			"http" => Ok(Scheme::Http),
			_ => Err(ConfigEnvError::scheme(value)),
		}
	}
}

/// A required hub setting is missing. Reported to the caller of the failing
/// request as a JSON 500.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
	#[error("HA_TOKEN not configured")]
	MissingToken,

	#[error("HA_HOST not configured")]
	MissingHost,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigEnvError {
	#[error("invalid HA_SCHEME: {value} (expected http or https)")]
	Scheme { value: String },
}

impl ConfigEnvError {
	fn scheme(value: impl Into<String>) -> Self {
		ConfigEnvError::Scheme {
			value: value.into(),
		}
	}
}

/// Where the hub lives and how to authenticate against it. Loaded once at
/// startup and never modified afterwards.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HubConfig {
	host: Option<String>,
	token: Option<String>,
	scheme: Scheme,
}

impl HubConfig {
	pub const HOST_VAR: &'static str = "HA_HOST";
	pub const TOKEN_VAR: &'static str = "HA_TOKEN";
	pub const SCHEME_VAR: &'static str = "HA_SCHEME";

	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_env() -> Result<Self, ConfigEnvError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigEnvError> {
		let scheme = match lookup(Self::SCHEME_VAR).filter(|v| !v.trim().is_empty()) {
			Some(value) => value.parse()?,
			None => Scheme::default(),
		};

		Ok(HubConfig {
			host: non_empty(lookup(Self::HOST_VAR)),
			token: non_empty(lookup(Self::TOKEN_VAR)),
			scheme,
		})
	}

	pub fn host(mut self, host: impl Into<String>) -> Self {
		self.host = non_empty(Some(host.into()));
		self
	}

	pub fn token(mut self, token: impl Into<String>) -> Self {
		self.token = non_empty(Some(token.into()));
		self
	}

	pub fn scheme(mut self, scheme: Scheme) -> Self {
		self.scheme = scheme;
		self
	}

	/// Uses `host` when no host was configured.
	pub fn default_host(mut self, host: impl Into<String>) -> Self {
		if self.host.is_none() {
			self.host = non_empty(Some(host.into()));
		}
		self
	}

	pub fn host_name(&self) -> Option<&str> {
		self.host.as_deref()
	}

	pub fn has_token(&self) -> bool {
		self.token.is_some()
	}

	/// The configuration document handed to browser-side pollers, verbatim.
	pub fn client_config(&self) -> ClientConfig {
		ClientConfig {
			host: self.host.clone(),
			token: self.token.clone(),
		}
	}

	/// Base url of the hub, e.g. `https://hub.example`.
	pub fn base_url(&self) -> Result<String, ConfigError> {
		let host = self.host.as_deref().ok_or(ConfigError::MissingHost)?;
		Ok(format!("{}://{}", self.scheme, host))
	}

	/// Everything the forwarder needs. The credential is checked before the
	/// host.
	pub fn upstream(&self) -> Result<Upstream, ConfigError> {
		let token = self.token.as_deref().ok_or(ConfigError::MissingToken)?;
		let base = self.base_url()?;

		Ok(Upstream {
			base,
			credential: Credential::new(token),
		})
	}
}

impl fmt::Debug for HubConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HubConfig")
			.field("host", &self.host)
			.field("token", &self.token.as_ref().map(|_| "***"))
			.field("scheme", &self.scheme)
			.finish()
	}
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.trim().is_empty())
}

#[derive(Clone, Debug)]
pub struct Upstream {
	base: String,
	credential: Credential,
}

impl Upstream {
	pub fn credential(&self) -> &Credential {
		&self.credential
	}

	/// Url of `relative` (a path below `/api/`, optionally with a query).
	pub fn api_url(&self, relative: &str) -> String {
		format!("{}/api/{}", self.base, relative)
	}
}

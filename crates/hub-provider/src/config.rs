use crate::Credential;
use serde::{Deserialize, Serialize};

/// Document served on `/config` so a browser-side poller can assemble the
/// credential it needs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	#[serde(rename = "HA_HOST", default, skip_serializing_if = "Option::is_none")]
	pub host: Option<String>,
	#[serde(rename = "HA_TOKEN", default, skip_serializing_if = "Option::is_none")]
	pub token: Option<String>,
}

impl ClientConfig {
	pub fn credential(&self) -> Option<Credential> {
		self
			.token
			.as_deref()
			.filter(|token| !token.is_empty())
			.map(Credential::new)
	}
}

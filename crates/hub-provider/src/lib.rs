use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::{fmt, sync::Arc};

pub mod config;
pub mod entity;

#[doc(no_inline)]
pub use config::ClientConfig;
#[doc(no_inline)]
pub use entity::{EntityId, EntityState};

/// The bearer token used to talk to the hub.
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(Arc<str>);

impl Credential {
	pub fn new(token: impl Into<Arc<str>>) -> Self {
		Credential(token.into())
	}

	pub fn expose(&self) -> &str {
		&self.0
	}

	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.0)
	}
}

impl fmt::Debug for Credential {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Credential(***)")
	}
}

/// Status and raw body of a response from the hub (or the proxy in front of
/// it). Non-success statuses are values, not errors; callers decide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HubResponse {
	pub status: u16,
	pub body: Bytes,
}

impl HubResponse {
	pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
		HubResponse {
			status,
			body: body.into(),
		}
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
		serde_json::from_slice(&self.body)
	}
}

#[async_trait]
pub trait HubClient: Send + Sync {
	type Error: std::error::Error + Send + Sync + 'static;

	/// Fetches the client configuration document (`/config`).
	async fn client_config(&self) -> Result<HubResponse, Self::Error>;

	/// Fetches `states/{entity_id}`, authenticating with `credential` when
	/// one is given.
	async fn entity_state(
		&self,
		entity_id: &EntityId,
		credential: Option<&Credential>,
	) -> Result<HubResponse, Self::Error>;
}

#[async_trait]
impl<T> HubClient for Arc<T>
where
	T: HubClient + ?Sized,
{
	type Error = T::Error;

	async fn client_config(&self) -> Result<HubResponse, Self::Error> {
		(**self).client_config().await
	}

	async fn entity_state(
		&self,
		entity_id: &EntityId,
		credential: Option<&Credential>,
	) -> Result<HubResponse, Self::Error> {
		(**self).entity_state(entity_id, credential).await
	}
}

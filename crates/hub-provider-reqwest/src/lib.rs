use async_trait::async_trait;
use hass_dyn_error::DynError;
use hass_hub_provider::{Credential, EntityId, HubClient, HubResponse};
use reqwest::{Url, header};
use thiserror::Error;
use tracing::{Level, instrument};

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ReqwestProviderError {
	#[error("invalid dashboard base url: {url}")]
	BaseUrl {
		url: String,
		source: DynError,
	},

	#[error("request to {url} failed")]
	Request {
		url: Url,
		source: DynError,
	},

	#[error("failed to read response body from {url}")]
	Body {
		url: Url,
		source: DynError,
	},
}

impl ReqwestProviderError {
	fn base_url(
		url: impl Into<String>,
		source: impl std::error::Error + Send + Sync + 'static,
	) -> Self {
		Self::BaseUrl {
			url: url.into(),
			source: DynError::new(source),
		}
	}

	fn request(url: Url, source: impl std::error::Error + Send + Sync + 'static) -> Self {
		Self::Request {
			url,
			source: DynError::new(source),
		}
	}

	fn body(url: Url, source: impl std::error::Error + Send + Sync + 'static) -> Self {
		Self::Body {
			url,
			source: DynError::new(source),
		}
	}
}

/// Talks to the dashboard's proxy: `/config` for the client configuration
/// and `/api/states/{entity_id}` for sensor state.
#[derive(Clone, Debug)]
pub struct ReqwestHubClient {
	http: reqwest::Client,
	base: Url,
}

impl ReqwestHubClient {
	pub fn new(base: &str) -> Result<Self, ReqwestProviderError> {
		Self::with_client(reqwest::Client::new(), base)
	}

	pub fn with_client(http: reqwest::Client, base: &str) -> Result<Self, ReqwestProviderError> {
		let mut url = Url::parse(base).map_err(|e| ReqwestProviderError::base_url(base, e))?;

		// `Url::join` replaces the last segment unless the path ends in `/`
		if !url.path().ends_with('/') {
			let path = format!("{}/", url.path());
			url.set_path(&path);
		}

		Ok(Self { http, base: url })
	}

	pub fn base(&self) -> &Url {
		&self.base
	}

	fn endpoint(&self, path: &str) -> Result<Url, ReqwestProviderError> {
		self
			.base
			.join(path)
			.map_err(|e| ReqwestProviderError::base_url(self.base.as_str(), e))
	}

	async fn send(
		&self,
		request: reqwest::RequestBuilder,
		url: Url,
	) -> Result<HubResponse, ReqwestProviderError> {
		let response = request
			.send()
			.await
			.map_err(|e| ReqwestProviderError::request(url.clone(), e))?;

		let status = response.status().as_u16();
		let body = response
			.bytes()
			.await
			.map_err(|e| ReqwestProviderError::body(url, e))?;

		Ok(HubResponse::new(status, body))
	}
}

#[async_trait]
impl HubClient for ReqwestHubClient {
	type Error = ReqwestProviderError;

	#[instrument(level = Level::DEBUG, name = "ReqwestHubClient::client_config", skip_all)]
	async fn client_config(&self) -> Result<HubResponse, Self::Error> {
		let url = self.endpoint("config")?;
		let request = self.http.get(url.clone());
		self.send(request, url).await
	}

	#[instrument(
		level = Level::DEBUG,
		name = "ReqwestHubClient::entity_state",
		skip_all,
		fields(entity.id = %entity_id)
	)]
	async fn entity_state(
		&self,
		entity_id: &EntityId,
		credential: Option<&Credential>,
	) -> Result<HubResponse, Self::Error> {
		let url = self.endpoint(&format!("api/{}", entity_id.state_path()))?;
		let mut request = self
			.http
			.get(url.clone())
			.header(header::CONTENT_TYPE, "application/json");

		if let Some(credential) = credential {
			request = request.header(header::AUTHORIZATION, credential.bearer());
		}

		self.send(request, url).await
	}
}

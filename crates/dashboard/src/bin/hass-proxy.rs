use error_stack::{Report, ResultExt};
use hass_dashboard::{settings::ProxySettings, shutdown_signal, telemetry};
use hass_proxy::{HubConfig, ProxyState};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Debug, Error)]
enum ApplicationError {
	#[error("setup telemetry")]
	Telemetry,

	#[error("read configuration")]
	Configuration,

	#[error("bind listener")]
	Bind,

	#[error("serve")]
	Serve,
}

#[tokio::main]
async fn main() -> Result<(), Report<ApplicationError>> {
	telemetry::init().change_context(ApplicationError::Telemetry)?;

	let settings = ProxySettings::from_env().change_context(ApplicationError::Configuration)?;
	let config = HubConfig::from_env().change_context(ApplicationError::Configuration)?;
	if !config.has_token() {
		warn!("HA_TOKEN is not set, forwarded requests will fail");
	}
	if config.host_name().is_none() {
		warn!("HA_HOST is not set, forwarded requests will fail");
	}

	let listener = TcpListener::bind(settings.bind)
		.await
		.change_context(ApplicationError::Bind)
		.attach_printable_lazy(|| format!("address: {}", settings.bind))?;

	info!(address = %settings.bind, "proxy listening");
	axum::serve(listener, hass_proxy::router(ProxyState::new(config)))
		.with_graceful_shutdown(shutdown_signal())
		.await
		.change_context(ApplicationError::Serve)?;

	Ok(())
}

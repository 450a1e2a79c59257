use error_stack::{Report, ResultExt};
use hass_dashboard::{settings::DevServerSettings, shutdown_signal, telemetry};
use hass_proxy::{DEFAULT_HUB_HOST, HubConfig, ProxyState};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

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

	let settings = DevServerSettings::from_env();
	let config = HubConfig::from_env()
		.change_context(ApplicationError::Configuration)?
		.default_host(DEFAULT_HUB_HOST);

	let listener = TcpListener::bind(settings.bind)
		.await
		.change_context(ApplicationError::Bind)
		.attach_printable_lazy(|| format!("address: {}", settings.bind))?;

	info!(
		address = %settings.bind,
		root = %settings.root.display(),
		hub = config.host_name().unwrap_or_default(),
		"development server listening"
	);

	let router = hass_proxy::dev_router(ProxyState::new(config), settings.root);
	axum::serve(listener, router)
		.with_graceful_shutdown(shutdown_signal())
		.await
		.change_context(ApplicationError::Serve)?;

	Ok(())
}

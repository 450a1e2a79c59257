use error_stack::{Report, ResultExt};
use hass_dashboard::{
	settings::DashboardSettings, shutdown_signal, telemetry, terminal::TerminalDisplay,
};
use hass_hub_provider_reqwest::ReqwestHubClient;
use hass_poller::Poller;
use semval::Validate;
use thiserror::Error;
use tokio::select;
use tracing::info;

#[derive(Debug, Error)]
enum ApplicationError {
	#[error("setup telemetry")]
	Telemetry,

	#[error("read configuration")]
	Configuration,

	#[error("invalid layout")]
	Layout,

	#[error("create client")]
	CreateClient,

	#[error("poller")]
	Poller,
}

#[tokio::main]
async fn main() -> Result<(), Report<ApplicationError>> {
	telemetry::init().change_context(ApplicationError::Telemetry)?;

	let settings = DashboardSettings::from_env().change_context(ApplicationError::Configuration)?;
	if let Err(invalidities) = settings.layout.validate() {
		return Err(Report::new(ApplicationError::Layout)
			.attach_printable(format!("{invalidities:?}")));
	}

	let client = ReqwestHubClient::new(&settings.url).change_context(ApplicationError::CreateClient)?;

	info!(url = %client.base(), layout = %settings.layout, "starting dashboard");
	let handle = Poller::new(client, TerminalDisplay::stdout(), settings.layout).spawn();

	select! {
		_ = shutdown_signal() => {}
		_ = handle.exited() => {}
	}

	handle.stop().await.change_context(ApplicationError::Poller)?;

	Ok(())
}

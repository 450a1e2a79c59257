pub mod settings;
pub mod telemetry;
pub mod terminal;

use tracing::{info, warn};

/// Resolves on ctrl-c.
pub async fn shutdown_signal() {
	match tokio::signal::ctrl_c().await {
		Ok(()) => info!("shutdown requested"),
		Err(err) => warn!(error = %err, "failed to listen for ctrl-c"),
	}
}

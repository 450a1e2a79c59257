use tracing_subscriber::{EnvFilter, Registry, prelude::*, util::TryInitError};
use tracing_tree::HierarchicalLayer;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

pub fn init() -> Result<(), TryInitError> {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

	Registry::default()
		.with(filter)
		.with(HierarchicalLayer::new(2).with_targets(true))
		.try_init()
}

use crate::{
	display::{DisplaySink, FETCH_FAILED, Status},
	error::{EntityError, HubError, PollerError},
	layout::{Layout, TrackedEntity},
	reading::SensorReading,
};
use chrono::Utc;
use futures::future::join_all;
use hass_comfort::Tween;
use hass_hub_provider::{ClientConfig, Credential, EntityId, EntityState, HubClient};
use std::{collections::HashMap, time::Duration};
use tracing::{Level, debug, error, info, instrument, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollerOptions {
	/// Delay between the end of one cycle and the start of the next.
	pub interval: Duration,
	pub animation: Duration,
}

impl PollerOptions {
	pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);
}

impl Default for PollerOptions {
	fn default() -> Self {
		PollerOptions {
			interval: Self::DEFAULT_INTERVAL,
			animation: Tween::DEFAULT_DURATION,
		}
	}
}

/// Everything a polling session needs: the hub, the display, what to track
/// and what has been shown so far.
pub struct Poller<C, D> {
	client: C,
	display: D,
	layout: Layout,
	options: PollerOptions,
	credential: Option<Credential>,
	last_values: HashMap<EntityId, f64>,
}

impl<C, D> Poller<C, D>
where
	C: HubClient,
	D: DisplaySink,
{
	pub fn new(client: C, display: D, layout: Layout) -> Self {
		Poller {
			client,
			display,
			layout,
			options: PollerOptions::default(),
			credential: None,
			last_values: HashMap::new(),
		}
	}

	pub fn with_options(mut self, options: PollerOptions) -> Self {
		self.options = options;
		self
	}

	pub fn with_credential(mut self, credential: Credential) -> Self {
		self.credential = Some(credential);
		self
	}

	pub fn layout(&self) -> &Layout {
		&self.layout
	}

	pub fn options(&self) -> &PollerOptions {
		&self.options
	}

	pub fn display(&self) -> &D {
		&self.display
	}

	pub fn credential(&self) -> Option<&Credential> {
		self.credential.as_ref()
	}

	/// The value currently on display for `entity`.
	pub fn last_value(&self, entity: &EntityId) -> Option<f64> {
		self.last_values.get(entity).copied()
	}

	/// Fetches the client configuration once. On failure the display shows
	/// an error and the poller must not be started.
	#[instrument(level = Level::DEBUG, name = "Poller::load_config", skip_all)]
	pub async fn load_config(&mut self) -> Result<(), PollerError> {
		match fetch_config(&self.client).await {
			Ok(config) => {
				info!(
					host = config.host.as_deref().unwrap_or_default(),
					token = config.token.is_some(),
					"configuration loaded"
				);
				if let Some(credential) = config.credential() {
					self.credential = Some(credential);
				}
				Ok(())
			}
			Err(err) => {
				error!(error = %err, "failed to load configuration, polling will not start");
				let err = PollerError::configuration(err);
				self.display.set_status(Status::error(err.to_string()));
				Err(err)
			}
		}
	}

	/// Runs exactly one poll cycle: every tracked entity is fetched
	/// concurrently and each reading is handed to the display.
	#[instrument(
		level = Level::DEBUG,
		name = "Poller::run_cycle",
		skip_all,
		fields(layout = %self.layout, entities = self.layout.entities().len())
	)]
	pub async fn run_cycle(&mut self) -> CycleReport {
		self.display.set_status(Status::Updating);

		let client = &self.client;
		let credential = self.credential.as_ref();
		let results = join_all(
			self
				.layout
				.entities()
				.iter()
				.map(|entity| fetch_reading(client, entity, credential)),
		)
		.await;

		let band = self.layout.band();
		let mut outcomes = Vec::with_capacity(results.len());
		for (entity, result) in self.layout.entities().iter().zip(results) {
			let result = match result {
				Ok((reading, value)) => {
					let from = self.last_values.get(&entity.id).copied().unwrap_or(0.0);
					let tween = if from == value {
						Tween::settled(value)
					} else {
						Tween::new(from, value, self.options.animation)
					};

					debug!(entity.id = %entity.id, value, "displaying reading");
					self.display.set_value(entity, &reading, tween);
					if entity.drives_comfort() {
						self.display.set_comfort(entity, &band.assess(value));
					}
					self.last_values.insert(entity.id.clone(), value);
					Ok(value)
				}
				Err(err) if err.is_hard() => {
					error!(entity.id = %entity.id, error = %err, "failed to fetch entity");
					Err(err)
				}
				Err(err) => {
					warn!(entity.id = %entity.id, error = %err, "no reading for entity");
					Err(err)
				}
			};

			outcomes.push(EntityOutcome {
				entity_id: entity.id.clone(),
				result,
			});
		}

		let report = CycleReport { outcomes };
		let status = report.status();
		debug!(readings = report.readings(), %status, "cycle finished");
		self.display.set_status(status);
		report
	}
}

async fn fetch_config<C: HubClient>(client: &C) -> Result<ClientConfig, HubError> {
	let response = client
		.client_config()
		.await
		.map_err(HubError::transport)?;

	if !response.is_success() {
		return Err(HubError::status(response.status));
	}

	response.json().map_err(HubError::document)
}

async fn fetch_reading<C: HubClient>(
	client: &C,
	entity: &TrackedEntity,
	credential: Option<&Credential>,
) -> Result<(SensorReading, f64), EntityError> {
	let response = client
		.entity_state(&entity.id, credential)
		.await
		.map_err(HubError::transport)?;

	if !response.is_success() {
		return Err(HubError::status(response.status).into());
	}

	let state: EntityState = response.json().map_err(HubError::document)?;
	let reading = SensorReading::from_state(entity.id.clone(), &state, Utc::now());
	let value = reading.value()?;
	Ok((reading, value))
}

/// What happened to one entity in a cycle.
#[derive(Debug)]
pub struct EntityOutcome {
	pub entity_id: EntityId,
	pub result: Result<f64, EntityError>,
}

#[derive(Debug)]
pub struct CycleReport {
	pub outcomes: Vec<EntityOutcome>,
}

impl CycleReport {
	/// Number of entities that produced a reading.
	pub fn readings(&self) -> usize {
		self.outcomes.iter().filter(|o| o.result.is_ok()).count()
	}

	/// A cycle succeeds when at least one entity produced a reading.
	pub fn is_success(&self) -> bool {
		self.readings() > 0
	}

	pub fn status(&self) -> Status {
		if self.is_success() {
			Status::Connected
		} else {
			Status::error(FETCH_FAILED)
		}
	}

	pub fn outcome(&self, entity: &EntityId) -> Option<&EntityOutcome> {
		self.outcomes.iter().find(|o| &o.entity_id == entity)
	}
}

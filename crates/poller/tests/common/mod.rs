#![allow(dead_code)]

use async_trait::async_trait;
use hass_comfort::{ComfortAssessment, Tween};
use hass_hub_provider::{Credential, EntityId, HubClient, HubResponse};
use hass_poller::{DisplaySink, SensorReading, Status, TrackedEntity};
use std::{
	collections::HashMap,
	sync::{Arc, Mutex},
	time::Duration,
};
use tokio::time::Instant;

pub const CONFIG: &str = r#"{"HA_HOST":"hub.local","HA_TOKEN":"secret-token"}"#;

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
pub struct Refused;

#[derive(Clone, Debug)]
pub struct Call {
	pub entity_id: EntityId,
	pub credential: Option<String>,
	pub at: Instant,
}

/// A hub that answers from canned responses. Entities without a response
/// get a 404; `None` stands for a transport failure.
#[derive(Clone)]
pub struct FakeHub {
	config: Option<HubResponse>,
	states: Arc<Mutex<HashMap<EntityId, Option<HubResponse>>>>,
	delay: Duration,
	calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeHub {
	pub fn new() -> Self {
		FakeHub {
			config: Some(HubResponse::new(200, CONFIG)),
			states: Default::default(),
			delay: Duration::ZERO,
			calls: Default::default(),
		}
	}

	pub fn config(mut self, reply: Option<HubResponse>) -> Self {
		self.config = reply;
		self
	}

	pub fn delay(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	pub fn reply(&self, id: &EntityId, reply: Option<HubResponse>) {
		self.states.lock().unwrap().insert(id.clone(), reply);
	}

	pub fn state(&self, id: &EntityId, state: &str) {
		let body = format!(
			r#"{{"entity_id":"{id}","state":"{state}","attributes":{{"unit_of_measurement":"°C"}}}}"#
		);
		self.reply(id, Some(HubResponse::new(200, body)));
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.lock().unwrap().clone()
	}
}

#[async_trait]
impl HubClient for FakeHub {
	type Error = Refused;

	async fn client_config(&self) -> Result<HubResponse, Self::Error> {
		self.config.clone().ok_or(Refused)
	}

	async fn entity_state(
		&self,
		entity_id: &EntityId,
		credential: Option<&Credential>,
	) -> Result<HubResponse, Self::Error> {
		self.calls.lock().unwrap().push(Call {
			entity_id: entity_id.clone(),
			credential: credential.map(|c| c.expose().to_owned()),
			at: Instant::now(),
		});

		if !self.delay.is_zero() {
			tokio::time::sleep(self.delay).await;
		}

		let reply = self.states.lock().unwrap().get(entity_id).cloned();
		match reply {
			Some(reply) => reply.ok_or(Refused),
			None => Ok(HubResponse::new(404, r#"{"message":"Entity not found."}"#)),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
	Value { entity: EntityId, tween: Tween },
	Status(Status),
	Comfort {
		entity: EntityId,
		assessment: ComfortAssessment,
	},
}

#[derive(Clone, Default)]
pub struct RecordingDisplay {
	events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingDisplay {
	pub fn events(&self) -> Vec<Event> {
		self.events.lock().unwrap().clone()
	}

	pub fn statuses(&self) -> Vec<Status> {
		self
			.events()
			.into_iter()
			.filter_map(|e| match e {
				Event::Status(status) => Some(status),
				_ => None,
			})
			.collect()
	}

	pub fn last_status(&self) -> Option<Status> {
		self.statuses().pop()
	}

	pub fn tweens(&self) -> Vec<(EntityId, Tween)> {
		self
			.events()
			.into_iter()
			.filter_map(|e| match e {
				Event::Value { entity, tween } => Some((entity, tween)),
				_ => None,
			})
			.collect()
	}

	pub fn assessments(&self) -> Vec<(EntityId, ComfortAssessment)> {
		self
			.events()
			.into_iter()
			.filter_map(|e| match e {
				Event::Comfort { entity, assessment } => Some((entity, assessment)),
				_ => None,
			})
			.collect()
	}
}

impl DisplaySink for RecordingDisplay {
	fn set_value(&mut self, entity: &TrackedEntity, reading: &SensorReading, tween: Tween) {
		assert_eq!(reading.entity_id, entity.id);
		assert_eq!(reading.numeric_value, Some(tween.to));
		self.events.lock().unwrap().push(Event::Value {
			entity: entity.id.clone(),
			tween,
		});
	}

	fn set_status(&mut self, status: Status) {
		self.events.lock().unwrap().push(Event::Status(status));
	}

	fn set_comfort(&mut self, entity: &TrackedEntity, assessment: &ComfortAssessment) {
		self.events.lock().unwrap().push(Event::Comfort {
			entity: entity.id.clone(),
			assessment: *assessment,
		});
	}
}

use chrono::{DateTime, Utc};
use semval::{Validate, ValidationResult, context::Context};
use serde::{Deserialize, Serialize};
use std::{fmt, ops, sync::Arc};

/// A hub entity id such as `sensor.living_room_temperature`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(Arc<str>);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EntityIdInvalidity {
	Empty,
	MissingDomain,
	IllegalCharacter,
}

impl EntityId {
	pub fn new(value: impl Into<Arc<str>>) -> Self {
		EntityId(value.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn domain(&self) -> Option<&str> {
		self.0.split_once('.').map(|(domain, _)| domain)
	}

	/// Path of the entity below the hub's `/api/` prefix.
	pub fn state_path(&self) -> String {
		format!("states/{}", self.0)
	}
}

impl Validate for EntityId {
	type Invalidity = EntityIdInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		let missing_domain = match self.0.split_once('.') {
			Some((domain, object_id)) => domain.is_empty() || object_id.is_empty(),
			None => true,
		};

		Context::new()
			.invalidate_if(self.0.is_empty(), EntityIdInvalidity::Empty)
			.invalidate_if(
				!self.0.is_empty() && missing_domain,
				EntityIdInvalidity::MissingDomain,
			)
			.invalidate_if(
				self
					.0
					.contains(|c: char| matches!(c, '/' | '?' | '#') || c.is_whitespace()),
				EntityIdInvalidity::IllegalCharacter,
			)
			.into()
	}
}

impl From<&str> for EntityId {
	fn from(value: &str) -> Self {
		EntityId::new(value)
	}
}

impl From<String> for EntityId {
	fn from(value: String) -> Self {
		EntityId::new(value)
	}
}

impl ops::Deref for EntityId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl fmt::Display for EntityId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&*self.0, f)
	}
}

/// State document returned by `GET /api/states/{entity_id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
	pub entity_id: String,
	#[serde(default)]
	pub state: Option<String>,
	#[serde(default)]
	pub attributes: serde_json::Map<String, serde_json::Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_changed: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_updated: Option<DateTime<Utc>>,
}

impl EntityState {
	pub fn unit_of_measurement(&self) -> Option<&str> {
		self
			.attributes
			.get("unit_of_measurement")
			.and_then(|unit| unit.as_str())
	}

	pub fn friendly_name(&self) -> Option<&str> {
		self
			.attributes
			.get("friendly_name")
			.and_then(|name| name.as_str())
	}
}

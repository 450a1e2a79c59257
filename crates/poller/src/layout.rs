use hass_comfort::{ComfortBand, band::ComfortBandInvalidity};
use hass_hub_provider::{EntityId, entity::EntityIdInvalidity};
use semval::{Validate, ValidationResult, context::Context};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
	Temperature,
	Humidity,
}

impl EntityKind {
	pub fn unit(self) -> &'static str {
		match self {
			EntityKind::Temperature => "°C",
			EntityKind::Humidity => "%",
		}
	}
}

/// A sensor shown on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackedEntity {
	pub id: EntityId,
	pub kind: EntityKind,
	pub label: &'static str,
}

impl TrackedEntity {
	pub fn temperature(id: &'static str, label: &'static str) -> Self {
		TrackedEntity {
			id: EntityId::from(id),
			kind: EntityKind::Temperature,
			label,
		}
	}

	pub fn humidity(id: &'static str, label: &'static str) -> Self {
		TrackedEntity {
			id: EntityId::from(id),
			kind: EntityKind::Humidity,
			label,
		}
	}

	/// Only temperatures are placed on the comfort band.
	pub fn drives_comfort(&self) -> bool {
		self.kind == EntityKind::Temperature
	}
}

const LIVING_ROOM_TEMPERATURE: &str = "sensor.rtr574_i_52c0090b_temperature";
const LIVING_ROOM_HUMIDITY: &str = "sensor.rtr574_i_52c0090b_humidity";
const BEDROOM_TEMPERATURE: &str = "sensor.rtr574_i_7d1e44a2_temperature";
const STUDY_TEMPERATURE: &str = "sensor.rtr574_i_a90f3c61_temperature";

/// The sensors a dashboard tracks and the band their temperatures are
/// judged against.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
	name: &'static str,
	entities: Vec<TrackedEntity>,
	band: ComfortBand,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LayoutInvalidity {
	NoEntities,
	Entity(EntityIdInvalidity),
	Band(ComfortBandInvalidity),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown layout: {name} (expected single, comfort or triple)")]
pub struct UnknownLayoutError {
	name: String,
}

impl Layout {
	pub fn new(name: &'static str, entities: Vec<TrackedEntity>, band: ComfortBand) -> Self {
		Layout {
			name,
			entities,
			band,
		}
	}

	/// One temperature sensor.
	pub fn single() -> Self {
		Layout::new(
			"single",
			vec![TrackedEntity::temperature(
				LIVING_ROOM_TEMPERATURE,
				"living room",
			)],
			ComfortBand::SINGLE,
		)
	}

	/// Temperature and humidity of one room, with the gradient background.
	pub fn comfort() -> Self {
		Layout::new(
			"comfort",
			vec![
				TrackedEntity::temperature(LIVING_ROOM_TEMPERATURE, "temperature"),
				TrackedEntity::humidity(LIVING_ROOM_HUMIDITY, "humidity"),
			],
			ComfortBand::STANDARD.with_gradient(true),
		)
	}

	/// Three rooms side by side.
	pub fn triple() -> Self {
		Layout::new(
			"triple",
			vec![
				TrackedEntity::temperature(LIVING_ROOM_TEMPERATURE, "living room"),
				TrackedEntity::temperature(BEDROOM_TEMPERATURE, "bedroom"),
				TrackedEntity::temperature(STUDY_TEMPERATURE, "study"),
			],
			ComfortBand::STANDARD,
		)
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn entities(&self) -> &[TrackedEntity] {
		&self.entities
	}

	pub fn band(&self) -> &ComfortBand {
		&self.band
	}
}

impl Default for Layout {
	fn default() -> Self {
		Layout::single()
	}
}

impl fmt::Display for Layout {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

impl FromStr for Layout {
	type Err = UnknownLayoutError;

	fn from_str(name: &str) -> Result<Self, Self::Err> {
		match name.trim().to_ascii_lowercase().as_str() {
			"single" => Ok(Layout::single()),
			"comfort" => Ok(Layout::comfort()),
			"triple" => Ok(Layout::triple()),
			_ => Err(UnknownLayoutError {
				name: name.to_owned(),
			}),
		}
	}
}

impl Validate for Layout {
	type Invalidity = LayoutInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		let mut context = Context::new()
			.invalidate_if(self.entities.is_empty(), LayoutInvalidity::NoEntities)
			.validate_with(&self.band, LayoutInvalidity::Band);

		for entity in &self.entities {
			context = context.validate_with(&entity.id, LayoutInvalidity::Entity);
		}

		context.into()
	}
}

use crate::{
	color::{self, Rgb, anchor},
	range::{DisplayRange, DisplayRangeInvalidity},
};
use semval::{Validate, ValidationResult, context::Context};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComfortCategory {
	Cold,
	Comfortable,
	Hot,
}

impl ComfortCategory {
	pub fn label(self) -> &'static str {
		match self {
			ComfortCategory::Cold => "a little cold",
			ComfortCategory::Comfortable => "comfortable",
			ComfortCategory::Hot => "a little hot",
		}
	}

	pub fn color(self) -> Rgb {
		match self {
			ComfortCategory::Cold => anchor::COLD,
			ComfortCategory::Comfortable => anchor::COMFORTABLE,
			ComfortCategory::Hot => anchor::HOT,
		}
	}
}

/// Splits temperatures into cold, comfortable and hot.
///
/// Both thresholds are exclusive: a reading equal to `low` or `high` is
/// comfortable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComfortBand {
	pub low: f64,
	pub high: f64,
	pub range: DisplayRange,
	pub gradient: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ComfortBandInvalidity {
	NonFiniteThreshold,
	InvertedThresholds,
	Range(DisplayRangeInvalidity),
}

impl ComfortBand {
	/// Band used by the single sensor dashboard.
	pub const SINGLE: ComfortBand = ComfortBand::new(18.0, 24.0, DisplayRange::new(10.0, 35.0));

	/// Band used by the multi sensor dashboards.
	pub const STANDARD: ComfortBand = ComfortBand::new(19.0, 23.0, DisplayRange::new(10.0, 30.0));

	pub const fn new(low: f64, high: f64, range: DisplayRange) -> Self {
		ComfortBand {
			low,
			high,
			range,
			gradient: false,
		}
	}

	pub const fn with_gradient(mut self, gradient: bool) -> Self {
		self.gradient = gradient;
		self
	}

	pub fn classify(&self, value: f64) -> ComfortCategory {
		if value < self.low {
			ComfortCategory::Cold
		} else if value > self.high {
			ComfortCategory::Hot
		} else {
			ComfortCategory::Comfortable
		}
	}

	pub fn assess(&self, value: f64) -> ComfortAssessment {
		let position = self.range.position(value);
		ComfortAssessment {
			value,
			category: self.classify(value),
			position,
			background: self.gradient.then(|| color::background(position)),
		}
	}
}

impl Validate for ComfortBand {
	type Invalidity = ComfortBandInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		let finite = self.low.is_finite() && self.high.is_finite();
		Context::new()
			.invalidate_if(!finite, ComfortBandInvalidity::NonFiniteThreshold)
			.invalidate_if(
				finite && self.low > self.high,
				ComfortBandInvalidity::InvertedThresholds,
			)
			.validate_with(&self.range, ComfortBandInvalidity::Range)
			.into()
	}
}

/// Everything the display needs to render one temperature reading.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ComfortAssessment {
	pub value: f64,
	pub category: ComfortCategory,
	/// Marker position inside the display range, in `[0, 1]`.
	pub position: f64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub background: Option<Rgb>,
}

impl ComfortAssessment {
	pub fn label(&self) -> &'static str {
		self.category.label()
	}

	pub fn color(&self) -> Rgb {
		self.category.color()
	}
}

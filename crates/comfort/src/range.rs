use semval::{Validate, ValidationResult, context::Context};

/// The numeric span the meter covers. Only used for positioning the marker
/// and for the background gradient, never for classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRange {
	pub min: f64,
	pub max: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DisplayRangeInvalidity {
	NonFinite,
	Empty,
}

impl DisplayRange {
	pub const fn new(min: f64, max: f64) -> Self {
		DisplayRange { min, max }
	}

	/// Fractional position of `value` inside the range, clamped to `[0, 1]`.
	pub fn position(&self, value: f64) -> f64 {
		let span = self.max - self.min;
		if !(span > 0.0) || value.is_nan() {
			return 0.0;
		}

		((value - self.min) / span).clamp(0.0, 1.0)
	}

	pub fn percent(&self, value: f64) -> f64 {
		self.position(value) * 100.0
	}
}

impl Validate for DisplayRange {
	type Invalidity = DisplayRangeInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		let finite = self.min.is_finite() && self.max.is_finite();
		Context::new()
			.invalidate_if(!finite, DisplayRangeInvalidity::NonFinite)
			.invalidate_if(finite && self.min >= self.max, DisplayRangeInvalidity::Empty)
			.into()
	}
}

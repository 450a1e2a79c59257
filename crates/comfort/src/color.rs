use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Rgb {
	pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Rgb { r, g, b }
	}

	/// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
	pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
		let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
		Rgb {
			r: lerp_channel(self.r, other.r, t),
			g: lerp_channel(self.g, other.g, t),
			b: lerp_channel(self.b, other.b, t),
		}
	}

	pub fn mix_white(self, ratio: f64) -> Rgb {
		self.lerp(Rgb::WHITE, ratio)
	}
}

fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
	let from = f64::from(from);
	let to = f64::from(to);
	(from + (to - from) * t).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Rgb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

impl Serialize for Rgb {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// Anchor colours of the background gradient.
pub mod anchor {
	use super::Rgb;

	pub const COLD: Rgb = Rgb::new(0x3b, 0x82, 0xf6);
	pub const COMFORTABLE: Rgb = Rgb::new(0x22, 0xc5, 0x5e);
	pub const HOT: Rgb = Rgb::new(0xef, 0x44, 0x44);
}

/// Exponent applied to the upper half of the gradient so the colour warms up
/// faster than it cools down.
pub const WARMING_EXPONENT: f64 = 0.7;

/// How far the gradient colour is pulled towards white for the background.
pub const WHITE_MIX: f64 = 0.4;

/// Gradient colour at normalized position `t` (`0` is the bottom of the
/// display range, `1` the top).
pub fn gradient(t: f64) -> Rgb {
	let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
	if t <= 0.5 {
		anchor::COLD.lerp(anchor::COMFORTABLE, t / 0.5)
	} else {
		let warm = ((t - 0.5) / 0.5).powf(WARMING_EXPONENT);
		anchor::COMFORTABLE.lerp(anchor::HOT, warm)
	}
}

/// Background colour at normalized position `t`.
pub fn background(t: f64) -> Rgb {
	gradient(t).mix_white(WHITE_MIX)
}

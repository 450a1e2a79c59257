use std::time::Duration;

/// Linear interpolation between the previously displayed value and a new
/// reading, sampled by the presentation layer once per refresh tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
	pub from: f64,
	pub to: f64,
	pub duration: Duration,
}

impl Tween {
	pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

	pub const fn new(from: f64, to: f64, duration: Duration) -> Self {
		Tween { from, to, duration }
	}

	/// A tween that is already at rest on `value`.
	pub const fn settled(value: f64) -> Self {
		Tween::new(value, value, Duration::ZERO)
	}

	pub fn progress(&self, elapsed: Duration) -> f64 {
		if self.duration.is_zero() {
			return 1.0;
		}

		(elapsed.as_nanos() as f64 / self.duration.as_nanos() as f64).min(1.0)
	}

	pub fn sample(&self, elapsed: Duration) -> f64 {
		let progress = self.progress(elapsed);
		if progress >= 1.0 {
			return self.to;
		}

		self.from + (self.to - self.from) * progress
	}

	pub fn is_finished(&self, elapsed: Duration) -> bool {
		self.progress(elapsed) >= 1.0
	}

	/// Values at each tick of length `tick`, ending on exactly `to`.
	pub fn frames(&self, tick: Duration) -> impl Iterator<Item = f64> + '_ {
		let tick = tick.max(Duration::from_millis(1));
		let mut elapsed = Some(Duration::ZERO);
		std::iter::from_fn(move || {
			let current = elapsed?;
			let value = self.sample(current);
			elapsed = if self.is_finished(current) {
				None
			} else {
				Some(current + tick)
			};
			Some(value)
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn samples_linearly() {
		let tween = Tween::new(20.0, 22.0, Duration::from_millis(1000));
		assert_eq!(tween.sample(Duration::ZERO), 20.0);
		assert_eq!(tween.sample(Duration::from_millis(500)), 21.0);
		assert_eq!(tween.sample(Duration::from_millis(1000)), 22.0);
	}

	#[test]
	fn holds_target_after_duration() {
		let tween = Tween::new(20.0, 18.0, Tween::DEFAULT_DURATION);
		assert_eq!(tween.sample(Duration::from_secs(5)), 18.0);
		assert!(tween.is_finished(Duration::from_secs(1)));
		assert!(!tween.is_finished(Duration::from_millis(999)));
	}

	#[test]
	fn settled_tween_is_finished_immediately() {
		let tween = Tween::settled(21.4);
		assert!(tween.is_finished(Duration::ZERO));
		assert_eq!(tween.sample(Duration::ZERO), 21.4);
	}

	#[test]
	fn frames_end_on_target() {
		let tween = Tween::new(0.0, 10.0, Duration::from_millis(100));
		let frames: Vec<_> = tween.frames(Duration::from_millis(25)).collect();
		assert_eq!(frames, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
	}
}

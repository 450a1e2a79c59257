//! A [`DisplaySink`] that prints to a terminal, one line per update.
//!
//! A value change is printed with the tween's frames sampled at the display
//! tick, e.g. `22.0 °C  (20.0 > 20.5 > 21.0 > 21.5 > 22.0)`.

use hass_comfort::{ComfortAssessment, Tween};
use hass_poller::{DisplaySink, SensorReading, Status, TrackedEntity};
use std::{
	fmt::Write as _,
	io::{self, Write},
	time::Duration,
};
use tracing::warn;

const METER_WIDTH: usize = 25;

pub const FRAME_TICK: Duration = Duration::from_millis(250);

pub struct TerminalDisplay<W> {
	out: W,
	tick: Duration,
}

impl TerminalDisplay<io::Stdout> {
	pub fn stdout() -> Self {
		TerminalDisplay::new(io::stdout())
	}
}

impl<W: Write> TerminalDisplay<W> {
	pub fn new(out: W) -> Self {
		TerminalDisplay {
			out,
			tick: FRAME_TICK,
		}
	}

	pub fn with_tick(mut self, tick: Duration) -> Self {
		self.tick = tick;
		self
	}

	pub fn into_inner(self) -> W {
		self.out
	}

	fn line(&mut self, line: std::fmt::Arguments<'_>) {
		if let Err(err) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
			warn!(error = %err, "failed to write to terminal");
		}
	}
}

/// The tween's frames joined with ` > `; `None` when it is already at rest.
fn trail(tween: &Tween, tick: Duration) -> Option<String> {
	let mut frames = tween.frames(tick);
	let first = frames.next()?;
	let mut rest = frames.peekable();
	rest.peek()?;

	let mut trail = format!("{first:.1}");
	for frame in rest {
		let _ = write!(trail, " > {frame:.1}");
	}
	Some(trail)
}

/// A text meter with a marker at `position` (`0..=1`), e.g. `[----|----]`.
pub fn meter(position: f64, width: usize) -> String {
	let width = width.max(1);
	let position = if position.is_nan() {
		0.0
	} else {
		position.clamp(0.0, 1.0)
	};
	let marker = (position * (width - 1) as f64).round() as usize;

	let mut meter = String::with_capacity(width + 2);
	meter.push('[');
	for i in 0..width {
		meter.push(if i == marker { '|' } else { '-' });
	}
	meter.push(']');
	meter
}

impl<W: Write + Send> DisplaySink for TerminalDisplay<W> {
	fn set_value(&mut self, entity: &TrackedEntity, reading: &SensorReading, tween: Tween) {
		let unit = reading.unit.as_deref().unwrap_or(entity.kind.unit());
		let time = reading.observed_at.format("%H:%M:%S");
		match trail(&tween, self.tick) {
			Some(trail) => self.line(format_args!(
				"{time}  {:<12} {:>5.1} {unit}  ({trail})",
				entity.label, tween.to
			)),
			None => self.line(format_args!(
				"{time}  {:<12} {:>5.1} {unit}",
				entity.label, tween.to
			)),
		}
	}

	fn set_status(&mut self, status: Status) {
		let marker = match status {
			Status::Updating => "..",
			Status::Connected => "ok",
			Status::Error(_) => "!!",
		};
		self.line(format_args!("[{marker}] {status}"));
	}

	fn set_comfort(&mut self, entity: &TrackedEntity, assessment: &ComfortAssessment) {
		let meter = meter(assessment.position, METER_WIDTH);
		match assessment.background {
			Some(background) => self.line(format_args!(
				"          {:<12} {meter} {} ({}), background {background}",
				entity.label,
				assessment.label(),
				assessment.color()
			)),
			None => self.line(format_args!(
				"          {:<12} {meter} {} ({})",
				entity.label,
				assessment.label(),
				assessment.color()
			)),
		}
	}
}

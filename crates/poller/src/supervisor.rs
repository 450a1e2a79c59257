use crate::{
	display::DisplaySink,
	error::PollerError,
	poller::Poller,
};
use hass_hub_provider::HubClient;
use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};
use tokio::{
	select,
	sync::oneshot,
	task::JoinHandle,
	time::sleep,
};
use tracing::{Instrument, debug, info, info_span};

/// Controls a poller running on its own task.
///
/// Dropping the handle stops the poller at its next await point.
#[derive(Debug)]
pub struct PollerHandle {
	triggers: flume::Sender<()>,
	in_flight: Arc<AtomicBool>,
	stop: Option<oneshot::Sender<()>>,
	exited: flume::Receiver<()>,
	task: JoinHandle<Result<(), PollerError>>,
}

static_assertions::assert_impl_all!(PollerHandle: Send, Sync);

impl PollerHandle {
	/// Asks for a cycle right away. Returns `false`, and does nothing, when a
	/// cycle is already running or already requested, or when the poller
	/// has halted.
	pub fn poll_now(&self) -> bool {
		if self.in_flight.load(Ordering::Acquire) {
			debug!("cycle already in flight, skipping");
			return false;
		}

		self.triggers.try_send(()).is_ok()
	}

	pub fn is_polling(&self) -> bool {
		self.in_flight.load(Ordering::Acquire)
	}

	pub fn is_finished(&self) -> bool {
		self.task.is_finished()
	}

	/// Resolves once the poller task has exited, without consuming the
	/// handle.
	pub async fn exited(&self) {
		// the sender is never used, only dropped with the task
		let _ = self.exited.recv_async().await;
	}

	/// Stops the poller and waits for its task to exit. A cycle in flight is
	/// abandoned.
	pub async fn stop(mut self) -> Result<(), PollerError> {
		if let Some(stop) = self.stop.take() {
			let _ = stop.send(());
		}

		self.join().await
	}

	/// Waits for the poller to exit on its own. It only does so when the
	/// startup configuration fetch fails.
	pub async fn join(self) -> Result<(), PollerError> {
		// keep the stop channel open until the task is done
		let _stop = self.stop;
		self.task.await.map_err(PollerError::task)?
	}
}

impl<C, D> Poller<C, D>
where
	C: HubClient + 'static,
	D: DisplaySink + 'static,
{
	/// Starts the poller on a new task: the configuration fetch first, then a
	/// cycle every interval, measured from the end of the previous cycle.
	pub fn spawn(self) -> PollerHandle {
		let (triggers, trigger_receiver) = flume::bounded(1);
		let (stop, stop_receiver) = oneshot::channel();
		let (exit, exited) = flume::bounded(0);
		let in_flight = Arc::new(AtomicBool::new(false));

		let span = info_span!("Poller::supervise", layout = %self.layout());
		let supervisor = supervise(self, trigger_receiver, stop_receiver, in_flight.clone());
		let task = tokio::spawn(
			async move {
				let _exit: flume::Sender<()> = exit;
				supervisor.await
			}
			.instrument(span),
		);

		PollerHandle {
			triggers,
			in_flight,
			stop: Some(stop),
			exited,
			task,
		}
	}
}

async fn supervise<C, D>(
	mut poller: Poller<C, D>,
	triggers: flume::Receiver<()>,
	mut stop: oneshot::Receiver<()>,
	in_flight: Arc<AtomicBool>,
) -> Result<(), PollerError>
where
	C: HubClient,
	D: DisplaySink,
{
	select! {
		biased;
		_ = &mut stop => return Ok(()),
		loaded = poller.load_config() => loaded?,
	}

	let interval = poller.options().interval;
	info!(interval_secs = interval.as_secs(), "polling started");

	loop {
		in_flight.store(true, Ordering::Release);
		let report = select! {
			biased;
			_ = &mut stop => {
				in_flight.store(false, Ordering::Release);
				break;
			}
			report = poller.run_cycle() => report,
		};
		// drop requests made during the cycle; the flag clears after the drain
		while triggers.try_recv().is_ok() {}
		in_flight.store(false, Ordering::Release);

		debug!(
			readings = report.readings(),
			next_in_secs = interval.as_secs(),
			"scheduling next cycle"
		);

		select! {
			biased;
			_ = &mut stop => break,
			_ = sleep(interval) => {}
			Ok(()) = triggers.recv_async() => debug!("poll requested"),
		}
	}

	info!("polling stopped");
	Ok(())
}

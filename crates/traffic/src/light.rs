// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The traffic light actor.
//!
//! A [`TrafficLight`] owns a single-slot channel and, once simulating, one
//! background thread that cycles the phase and publishes every change into it.
//! Any number of threads may block in [`TrafficLight::wait_for_green`]; each
//! published phase is taken by exactly one of them.

use std::{
	fmt,
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
	thread,
	time::{Duration, Instant},
};

use tracing::{debug, trace, warn};
use trafficlight_runtime::{CancellationToken, JoinError, ThreadHandle, spawn_named, sync::Mutex};

use crate::{
	config::CycleConfig,
	cycle::{PhaseCycler, Signal},
	error::{Error, Result},
	phase::Phase,
};

/// Counter for generating unique light IDs.
static LIGHT_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_light_id() -> u64 {
	LIGHT_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// The running cycling thread and the token that stops it.
struct Cycler {
	handle: ThreadHandle,
	cancel: CancellationToken,
}

impl Cycler {
	fn shutdown(self) -> std::result::Result<(), JoinError> {
		self.cancel.cancel();
		self.handle.join()
	}
}

/// A traffic light whose phase toggles on a randomized timer.
///
/// Starts out [`Phase::Red`]. Call [`simulate`](Self::simulate) to start cycling.
/// Dropping the light stops and joins its cycling thread.
pub struct TrafficLight {
	id: u64,
	signal: Arc<Signal>,
	config: CycleConfig,
	cycler: Mutex<Option<Cycler>>,
}

impl TrafficLight {
	/// Create a light with the default 4 to 6 second cycle.
	pub fn new() -> Self {
		Self::from_parts(CycleConfig::default())
	}

	/// Create a light with custom timing.
	pub fn with_config(config: CycleConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self::from_parts(config))
	}

	fn from_parts(config: CycleConfig) -> Self {
		Self {
			id: next_light_id(),
			signal: Arc::new(Signal::default()),
			config,
			cycler: Mutex::new(None),
		}
	}

	pub fn id(&self) -> u64 {
		self.id
	}

	pub fn config(&self) -> &CycleConfig {
		&self.config
	}

	/// The last phase the cycling thread set.
	///
	/// Never blocks and never touches the channel. The value is best-effort: it may
	/// already be stale by the time the caller looks at it, and it is not what
	/// [`wait_for_green`](Self::wait_for_green) synchronizes on.
	pub fn current_phase(&self) -> Phase {
		self.signal.current.load()
	}

	/// Number of phase changes so far.
	pub fn cycles(&self) -> u64 {
		self.signal.cycles.load(Ordering::Relaxed)
	}

	pub fn is_simulating(&self) -> bool {
		self.cycler.lock().as_ref().is_some_and(|cycler| !cycler.handle.is_finished())
	}

	/// Start cycling on a dedicated thread and return immediately.
	///
	/// Fails with [`Error::AlreadySimulating`] while a cycling thread is running;
	/// a light never has more than one producer.
	pub fn simulate(&self) -> Result<()> {
		let mut cycler = self.cycler.lock();

		if let Some(existing) = cycler.take() {
			if !existing.handle.is_finished() {
				*cycler = Some(existing);
				warn!(light = self.id, "simulate() called while already simulating");
				return Err(Error::AlreadySimulating {
					light: self.id,
				});
			}
			// The previous loop died on its own, reap it before starting over.
			if let Err(err) = existing.handle.join() {
				warn!(light = self.id, error = %err, "Previous cycling thread panicked");
			}
		}

		let cancel = CancellationToken::new();
		let runner = PhaseCycler::new(self.id, Arc::clone(&self.signal), self.config.clone(), cancel.clone());
		let handle = spawn_named(format!("traffic-light-{}", self.id), move || runner.run())?;

		debug!(light = self.id, "Simulation started");
		*cycler = Some(Cycler {
			handle,
			cancel,
		});
		Ok(())
	}

	/// Stop the cycling thread and wait for it to exit.
	///
	/// A no-op if the light is not simulating. The light may be simulated again afterwards.
	pub fn stop(&self) -> Result<()> {
		let Some(cycler) = self.cycler.lock().take() else {
			return Ok(());
		};

		cycler.shutdown()?;
		debug!(light = self.id, "Simulation stopped");
		Ok(())
	}

	/// Block until a green phase arrives through the channel.
	///
	/// Red deliveries are consumed and ignored. The cached phase is never consulted,
	/// so a light that is already green still makes the caller wait for the next
	/// green delivery. Waits forever if the light never turns green.
	pub fn wait_for_green(&self) {
		loop {
			thread::sleep(self.config.wait_interval);

			let phase = self.signal.channel.receive();
			trace!(light = self.id, phase = %phase, "Received phase");
			if phase.is_green() {
				return;
			}
		}
	}

	/// Like [`wait_for_green`](Self::wait_for_green), but gives up after `timeout`.
	///
	/// A phase already pending when the deadline passes is still taken. A timeout
	/// too large to represent as a deadline waits like `wait_for_green`.
	pub fn wait_for_green_timeout(&self, timeout: Duration) -> Result<()> {
		let Some(deadline) = Instant::now().checked_add(timeout) else {
			self.wait_for_green();
			return Ok(());
		};

		loop {
			thread::sleep(self.config.wait_interval);

			let remaining = deadline.saturating_duration_since(Instant::now());
			match self.signal.channel.receive_timeout(remaining) {
				Some(phase) => {
					trace!(light = self.id, phase = %phase, "Received phase");
					if phase.is_green() {
						return Ok(());
					}
				}
				None => return Err(Error::Timeout(timeout)),
			}
		}
	}
}

impl Default for TrafficLight {
	fn default() -> Self {
		Self::new()
	}
}

impl Drop for TrafficLight {
	fn drop(&mut self) {
		if let Some(cycler) = self.cycler.lock().take() {
			if let Err(err) = cycler.shutdown() {
				warn!(light = self.id, error = %err, "Cycling thread panicked");
			}
		}
	}
}

impl fmt::Debug for TrafficLight {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TrafficLight")
			.field("id", &self.id)
			.field("phase", &self.current_phase())
			.field("cycles", &self.cycles())
			.field("config", &self.config)
			.finish()
	}
}

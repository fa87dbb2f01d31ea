// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The phase cycling loop.
//!
//! Runs on the light's dedicated thread:
//! 1. Draw a cycle duration from `[min_cycle, max_cycle]`
//! 2. Sleep one polling quantum at a time until the duration has elapsed
//! 3. Toggle the phase, publish it, draw the next duration and start over
//!
//! The cancellation token is checked once per quantum.

use std::{
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
	thread,
	time::{Duration, Instant},
};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, trace};
use trafficlight_runtime::{CancellationToken, Slot};

use crate::{
	config::CycleConfig,
	phase::{AtomicPhase, Phase},
};

/// State shared between a light and its cycling thread.
#[derive(Debug, Default)]
pub(crate) struct Signal {
	pub(crate) channel: Slot<Phase>,
	pub(crate) current: AtomicPhase,
	pub(crate) cycles: AtomicU64,
}

impl Signal {
	/// Flip the phase, update the cache and publish the new phase.
	///
	/// Only the cycling thread calls this.
	pub(crate) fn toggle(&self) -> Phase {
		let next = self.current.load().toggle();
		self.current.store(next);
		self.cycles.fetch_add(1, Ordering::Relaxed);
		self.channel.send(next);
		next
	}
}

pub(crate) struct PhaseCycler {
	light: u64,
	signal: Arc<Signal>,
	config: CycleConfig,
	cancel: CancellationToken,
}

impl PhaseCycler {
	pub(crate) fn new(light: u64, signal: Arc<Signal>, config: CycleConfig, cancel: CancellationToken) -> Self {
		Self {
			light,
			signal,
			config,
			cancel,
		}
	}

	pub(crate) fn run(self) {
		let mut rng = match self.config.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};

		let mut cycle = self.draw(&mut rng);
		let mut last_update = Instant::now();

		while !self.cancel.is_cancelled() {
			thread::sleep(self.config.poll_interval);

			if last_update.elapsed() >= cycle {
				let phase = self.signal.toggle();
				debug!(light = self.light, phase = %phase, after_ms = cycle.as_millis() as u64, "Phase changed");

				cycle = self.draw(&mut rng);
				last_update = Instant::now();
			}
		}

		debug!(light = self.light, cycles = self.signal.cycles.load(Ordering::Relaxed), "Cycling cancelled");
	}

	fn draw(&self, rng: &mut StdRng) -> Duration {
		let cycle = draw_cycle(rng, self.config.min_cycle, self.config.max_cycle);
		trace!(light = self.light, cycle_ms = cycle.as_millis() as u64, "Drew cycle duration");
		cycle
	}
}

/// Uniform draw, in whole milliseconds, from the closed interval `[min, max]`.
pub(crate) fn draw_cycle<R: Rng>(rng: &mut R, min: Duration, max: Duration) -> Duration {
	let min = min.as_millis() as u64;
	let max = max.as_millis() as u64;
	Duration::from_millis(rng.random_range(min..=max))
}

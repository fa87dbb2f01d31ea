// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Timing configuration for the cycling loop.

use std::time::Duration;

use crate::error::{Error, Result};

/// Shortest cycle the loop draws.
pub const MIN_CYCLE: Duration = Duration::from_millis(4000);

/// Longest cycle the loop draws.
pub const MAX_CYCLE: Duration = Duration::from_millis(6000);

/// Sleep quantum between elapsed-time checks in the cycling loop.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Sleep quantum between receives in `wait_for_green`.
pub const WAIT_INTERVAL: Duration = Duration::from_millis(1);

/// Configuration for a traffic light's timing.
///
/// Cycle durations are drawn uniformly, in whole milliseconds, from the closed
/// interval `[min_cycle, max_cycle]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleConfig {
	/// Default: 4000ms
	pub min_cycle: Duration,

	/// Default: 6000ms
	pub max_cycle: Duration,

	/// Default: 1ms
	pub poll_interval: Duration,

	/// Default: 1ms
	pub wait_interval: Duration,

	/// Seed for the cycle duration RNG. `None` seeds from the OS.
	pub seed: Option<u64>,
}

impl Default for CycleConfig {
	fn default() -> Self {
		Self {
			min_cycle: MIN_CYCLE,
			max_cycle: MAX_CYCLE,
			poll_interval: POLL_INTERVAL,
			wait_interval: WAIT_INTERVAL,
			seed: None,
		}
	}
}

impl CycleConfig {
	/// Create a new config with default values.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the closed interval cycle durations are drawn from.
	pub fn cycle(mut self, min: Duration, max: Duration) -> Self {
		self.min_cycle = min;
		self.max_cycle = max;
		self
	}

	pub fn poll_interval(mut self, interval: Duration) -> Self {
		self.poll_interval = interval;
		self
	}

	pub fn wait_interval(mut self, interval: Duration) -> Self {
		self.wait_interval = interval;
		self
	}

	/// Make the cycle durations reproducible.
	pub fn seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	pub fn validate(&self) -> Result<()> {
		if self.min_cycle > self.max_cycle {
			return Err(Error::InvalidConfig(format!(
				"min_cycle {:?} exceeds max_cycle {:?}",
				self.min_cycle, self.max_cycle
			)));
		}
		if self.max_cycle.as_millis() > u64::MAX as u128 {
			return Err(Error::InvalidConfig(format!("max_cycle {:?} is out of range", self.max_cycle)));
		}
		if self.poll_interval.is_zero() {
			return Err(Error::InvalidConfig("poll_interval must be non-zero".to_string()));
		}
		Ok(())
	}
}

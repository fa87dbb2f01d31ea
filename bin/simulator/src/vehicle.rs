// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Vehicles that queue at the light and cross whenever they catch a green.

use std::{
	sync::Arc,
	time::{Duration, Instant},
};

use crossbeam_channel::Sender;
use tracing::{debug, warn};
use trafficlight::{Error, TrafficLight};
use trafficlight_runtime::{CancellationToken, ThreadHandle, spawn_named};

/// How long a vehicle waits for green before re-checking for shutdown.
const WAIT_SLICE: Duration = Duration::from_millis(250);

/// Cancels its token when dropped.
pub struct CancelOnDrop {
	cancel: CancellationToken,
}

impl CancelOnDrop {
	pub fn new(cancel: CancellationToken) -> Self {
		Self {
			cancel,
		}
	}
}

impl Drop for CancelOnDrop {
	fn drop(&mut self) {
		self.cancel.cancel();
	}
}

/// Reported to the driver every time a vehicle crosses.
#[derive(Debug, Clone, Copy)]
pub struct Crossing {
	pub vehicle: usize,
	pub waited: Duration,
}

pub fn spawn_vehicle(
	vehicle: usize,
	light: Arc<TrafficLight>,
	crossings: Sender<Crossing>,
	cancel: CancellationToken,
) -> std::io::Result<ThreadHandle> {
	spawn_named(format!("vehicle-{vehicle}"), move || {
		let mut arrived = Instant::now();

		while !cancel.is_cancelled() {
			match light.wait_for_green_timeout(WAIT_SLICE) {
				Ok(()) => {
					let crossing = Crossing {
						vehicle,
						waited: arrived.elapsed(),
					};
					if crossings.send(crossing).is_err() {
						debug!(vehicle, "Driver is gone, leaving");
						return;
					}
					arrived = Instant::now();
				}
				Err(Error::Timeout(_)) => continue,
				Err(err) => {
					warn!(vehicle, error = %err, "Giving up on the light");
					return;
				}
			}
		}
	})
}

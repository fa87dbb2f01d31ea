// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod vehicle;

use std::{
	collections::BTreeMap,
	process::ExitCode,
	sync::Arc,
	time::{Duration, Instant},
};

use clap::Parser;
use crossbeam_channel::{RecvTimeoutError, unbounded};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use trafficlight::{CycleConfig, TrafficLight};
use trafficlight_runtime::CancellationToken;

use crate::vehicle::{CancelOnDrop, spawn_vehicle};

/// One week.
const MAX_DURATION_SECS: u64 = 7 * 24 * 60 * 60;

/// Run a single traffic light with vehicles waiting for green.
#[derive(Debug, Parser)]
#[command(name = "trafficlight", version)]
struct Args {
	/// Number of vehicles queueing at the light.
	#[arg(long, default_value_t = 3)]
	vehicles: usize,

	/// How long to run before shutting down.
	#[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..=MAX_DURATION_SECS))]
	duration_secs: u64,

	#[arg(long, default_value_t = 4000)]
	min_cycle_ms: u64,

	#[arg(long, default_value_t = 6000)]
	max_cycle_ms: u64,

	/// Seed for reproducible cycle durations.
	#[arg(long)]
	seed: Option<u64>,

	/// Log filter used when RUST_LOG is not set.
	#[arg(long, default_value = "info")]
	log_level: String,
}

impl Args {
	fn cycle_config(&self) -> CycleConfig {
		let config = CycleConfig::new()
			.cycle(Duration::from_millis(self.min_cycle_ms), Duration::from_millis(self.max_cycle_ms));
		match self.seed {
			Some(seed) => config.seed(seed),
			None => config,
		}
	}
}

fn init_tracing(level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_thread_names(true).try_init();
}

fn run(args: &Args) -> trafficlight::Result<BTreeMap<usize, usize>> {
	let light = Arc::new(TrafficLight::with_config(args.cycle_config())?);
	info!(
		light = light.id(),
		phase = %light.current_phase(),
		vehicles = args.vehicles,
		min_cycle_ms = light.config().min_cycle.as_millis() as u64,
		max_cycle_ms = light.config().max_cycle.as_millis() as u64,
		"Starting simulation"
	);

	light.simulate()?;

	let cancel = CancellationToken::new();
	// Vehicles hold the light, so they must leave on every exit path or the cycler never stops.
	let _leave = CancelOnDrop::new(cancel.clone());
	let (tx, rx) = unbounded();
	let mut vehicles = Vec::with_capacity(args.vehicles);
	for vehicle in 0..args.vehicles {
		vehicles.push(spawn_vehicle(vehicle, Arc::clone(&light), tx.clone(), cancel.clone())?);
	}
	drop(tx);

	let mut crossings = BTreeMap::new();
	let deadline = Instant::now().checked_add(Duration::from_secs(args.duration_secs));
	loop {
		let remaining = match deadline {
			Some(deadline) => deadline.saturating_duration_since(Instant::now()),
			None => Duration::from_secs(MAX_DURATION_SECS),
		};
		if remaining.is_zero() {
			break;
		}

		match rx.recv_timeout(remaining) {
			Ok(crossing) => {
				info!(
					vehicle = crossing.vehicle,
					waited_ms = crossing.waited.as_millis() as u64,
					phase = %light.current_phase(),
					"Vehicle crossed"
				);
				*crossings.entry(crossing.vehicle).or_insert(0) += 1;
			}
			Err(RecvTimeoutError::Timeout) => break,
			Err(RecvTimeoutError::Disconnected) => {
				warn!("All vehicles left early");
				break;
			}
		}
	}

	cancel.cancel();
	for vehicle in vehicles {
		if let Err(err) = vehicle.join() {
			warn!(error = %err, "Vehicle thread panicked");
		}
	}
	light.stop()?;

	info!(cycles = light.cycles(), phase = %light.current_phase(), "Simulation finished");
	Ok(crossings)
}

fn main() -> ExitCode {
	let args = Args::parse();
	init_tracing(&args.log_level);

	match run(&args) {
		Ok(crossings) => {
			println!("crossings per vehicle:");
			for vehicle in 0..args.vehicles {
				println!("  vehicle-{vehicle}: {}", crossings.get(&vehicle).copied().unwrap_or(0));
			}
			ExitCode::SUCCESS
		}
		Err(err) => {
			error!(error = %err, "Simulation failed");
			ExitCode::FAILURE
		}
	}
}

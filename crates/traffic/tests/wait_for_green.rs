// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! End-to-end tests for waiting on a simulating light.

use std::{
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	thread,
	time::{Duration, Instant},
};

use trafficlight::{CycleConfig, Phase, TrafficLight};
use trafficlight_testing::util::wait::wait_for_condition;

fn light_with_cycle(min_ms: u64, max_ms: u64) -> Arc<TrafficLight> {
	let config = CycleConfig::new().cycle(Duration::from_millis(min_ms), Duration::from_millis(max_ms));
	Arc::new(TrafficLight::with_config(config).unwrap())
}

#[test]
fn test_default_light_turns_green_within_max_cycle() {
	let light = Arc::new(TrafficLight::new());
	assert_eq!(light.current_phase(), Phase::Red);

	light.simulate().unwrap();
	let start = Instant::now();

	let waiter = {
		let light = Arc::clone(&light);
		thread::spawn(move || {
			light.wait_for_green();
			light.current_phase()
		})
	};

	let phase = waiter.join().unwrap();
	let elapsed = start.elapsed();

	assert_eq!(phase, Phase::Green);
	assert_eq!(light.current_phase(), Phase::Green);
	assert!(elapsed <= Duration::from_millis(6001 + 500), "took {:?}", elapsed);

	light.stop().unwrap();
}

#[test]
fn test_two_concurrent_waiters_both_see_green() {
	let light = light_with_cycle(200, 300);
	light.simulate().unwrap();

	let waiters: Vec<_> = (0..2)
		.map(|_| {
			let light = Arc::clone(&light);
			thread::spawn(move || {
				light.wait_for_green_timeout(Duration::from_secs(5)).unwrap();
				light.current_phase()
			})
		})
		.collect();

	for waiter in waiters {
		assert_eq!(waiter.join().unwrap(), Phase::Green);
	}

	light.stop().unwrap();
}

#[test]
fn test_many_waiters_all_return() {
	let light = light_with_cycle(20, 40);
	light.simulate().unwrap();

	let returned = Arc::new(AtomicUsize::new(0));
	let waiters: Vec<_> = (0..8)
		.map(|_| {
			let light = Arc::clone(&light);
			let returned = Arc::clone(&returned);
			thread::spawn(move || {
				light.wait_for_green_timeout(Duration::from_secs(10)).unwrap();
				returned.fetch_add(1, Ordering::SeqCst);
			})
		})
		.collect();

	wait_for_condition(
		|| returned.load(Ordering::SeqCst) == 8,
		Duration::from_secs(15),
		Duration::from_millis(5),
		"every waiter should see a green phase",
	);

	for waiter in waiters {
		waiter.join().unwrap();
	}

	light.stop().unwrap();
}

#[test]
fn test_repeated_waits_follow_the_cycle() {
	let light = light_with_cycle(30, 50);
	light.simulate().unwrap();

	for round in 1..=3 {
		light.wait_for_green_timeout(Duration::from_secs(2)).unwrap();
		// Each green is preceded by a red, so the light has toggled 2n - 1 times at least.
		assert!(light.cycles() >= 2 * round - 1, "round {} saw {} cycles", round, light.cycles());
	}

	light.stop().unwrap();
}

#[test]
fn test_wait_times_out_when_not_simulating() {
	let light = TrafficLight::new();
	let err = light.wait_for_green_timeout(Duration::from_millis(50)).unwrap_err();
	assert_eq!(err.to_string(), "no green phase within 50ms");
}

#[test]
fn test_drop_stops_cycling_thread() {
	let light = light_with_cycle(10, 20);
	light.simulate().unwrap();
	light.wait_for_green_timeout(Duration::from_secs(2)).unwrap();

	let start = Instant::now();
	drop(light);
	assert!(start.elapsed() < Duration::from_secs(1));
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Single-slot blocking channel.
//!
//! A [`Slot`] hands the most recent value from a producer to any number of
//! consumers. It never buffers a history:
//! - `send` overwrites whatever is pending and never blocks beyond lock contention
//! - `receive` blocks until a value is pending, then takes it
//!
//! A consumer that falls behind can miss intermediate values entirely. Only the
//! latest value is ever delivered.

use std::{
	fmt,
	time::{Duration, Instant},
};

use crate::sync::{Condvar, Mutex};

/// Holds at most one pending item of type `T`.
pub struct Slot<T> {
	item: Mutex<Option<T>>,
	ready: Condvar,
}

impl<T> Slot<T> {
	/// Creates an empty slot.
	pub fn new() -> Self {
		Self {
			item: Mutex::new(None),
			ready: Condvar::new(),
		}
	}

	/// Stores `item` as the sole pending value, discarding any previous one,
	/// and wakes one waiting consumer.
	pub fn send(&self, item: T) {
		{
			let mut slot = self.item.lock();
			*slot = Some(item);
		}
		self.ready.notify_one();
	}

	/// Blocks until a value is pending, then removes and returns it.
	///
	/// Waits forever if nothing is ever sent.
	pub fn receive(&self) -> T {
		let mut slot = self.item.lock();
		loop {
			if let Some(item) = slot.take() {
				return item;
			}
			self.ready.wait(&mut slot);
		}
	}

	/// Like [`receive`](Self::receive), but gives up after `timeout`.
	///
	/// Returns `None` if no value became pending in time. A timeout too large to
	/// represent as a deadline waits like `receive`.
	pub fn receive_timeout(&self, timeout: Duration) -> Option<T> {
		let Some(deadline) = Instant::now().checked_add(timeout) else {
			return Some(self.receive());
		};
		let mut slot = self.item.lock();
		loop {
			if let Some(item) = slot.take() {
				return Some(item);
			}

			let now = Instant::now();
			if now >= deadline {
				return None;
			}
			self.ready.wait_for(&mut slot, deadline - now);
		}
	}
}

impl<T> Default for Slot<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> fmt::Debug for Slot<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Never block on the lock just to format.
		let pending = self.item.try_lock().map(|slot| slot.is_some());
		f.debug_struct("Slot").field("pending", &pending).finish()
	}
}

#[cfg(test)]
mod tests {
	use std::{
		sync::{
			Arc,
			atomic::{AtomicBool, AtomicUsize, Ordering},
		},
		thread,
	};

	use trafficlight_testing::util::wait::wait_for;

	use super::*;

	#[test]
	fn test_send_then_receive() {
		let slot = Slot::new();
		slot.send(7);
		assert_eq!(slot.receive(), 7);
	}

	#[test]
	fn test_send_overwrites_pending_item() {
		let slot = Slot::new();
		slot.send("first");
		slot.send("second");

		assert_eq!(slot.receive(), "second");
		// "first" is gone for good
		assert_eq!(slot.receive_timeout(Duration::from_millis(20)), None);
	}

	#[test]
	fn test_receive_empties_slot() {
		let slot = Slot::new();
		slot.send(1);
		assert_eq!(slot.receive(), 1);
		assert_eq!(slot.receive_timeout(Duration::from_millis(10)), None);
	}

	#[test]
	fn test_receive_timeout_on_empty_slot() {
		let slot: Slot<u32> = Slot::new();
		let start = Instant::now();

		assert_eq!(slot.receive_timeout(Duration::from_millis(30)), None);
		assert!(start.elapsed() >= Duration::from_millis(30));
	}

	#[test]
	fn test_receive_blocks_until_send() {
		let slot = Arc::new(Slot::new());
		let received = Arc::new(AtomicBool::new(false));

		let consumer = {
			let slot = Arc::clone(&slot);
			let received = Arc::clone(&received);
			thread::spawn(move || {
				let value = slot.receive();
				received.store(true, Ordering::SeqCst);
				value
			})
		};

		thread::sleep(Duration::from_millis(50));
		assert!(!received.load(Ordering::SeqCst), "receive returned before any send");

		slot.send(99);
		assert_eq!(consumer.join().unwrap(), 99);
	}

	#[test]
	fn test_receive_timeout_unbounded_duration() {
		let slot = Slot::new();
		slot.send(5);
		assert_eq!(slot.receive_timeout(Duration::MAX), Some(5));
	}

	#[test]
	fn test_receive_timeout_zero_takes_pending_item() {
		let slot = Slot::new();
		slot.send(8);
		assert_eq!(slot.receive_timeout(Duration::ZERO), Some(8));
	}

	#[test]
	fn test_receive_timeout_wakes_on_send() {
		let slot = Arc::new(Slot::new());

		let consumer = {
			let slot = Arc::clone(&slot);
			thread::spawn(move || slot.receive_timeout(Duration::from_secs(5)))
		};

		thread::sleep(Duration::from_millis(20));
		slot.send(3);
		assert_eq!(consumer.join().unwrap(), Some(3));
	}

	#[test]
	fn test_each_item_goes_to_one_consumer() {
		let slot = Arc::new(Slot::new());
		let done = Arc::new(AtomicUsize::new(0));

		let consumers: Vec<_> = (0..3)
			.map(|_| {
				let slot = Arc::clone(&slot);
				let done = Arc::clone(&done);
				thread::spawn(move || {
					let value = slot.receive();
					done.fetch_add(1, Ordering::SeqCst);
					value
				})
			})
			.collect();

		for value in 0..3 {
			slot.send(value);
			wait_for(|| done.load(Ordering::SeqCst) > value, "consumer should take the item");
		}

		let mut values: Vec<_> = consumers.into_iter().map(|c| c.join().unwrap()).collect();
		values.sort();
		assert_eq!(values, vec![0, 1, 2]);
	}
}

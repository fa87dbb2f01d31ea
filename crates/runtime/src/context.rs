// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Cooperative cancellation for background loops.

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

/// A cancellation token for signaling shutdown.
///
/// This is a simple atomic boolean shared between the owner of a background
/// loop and the loop itself, which checks it on every iteration.
#[derive(Clone, Debug)]
pub struct CancellationToken {
	cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
	/// Create a new cancellation token.
	pub fn new() -> Self {
		Self {
			cancelled: Arc::new(AtomicBool::new(false)),
		}
	}

	/// Signal cancellation.
	pub fn cancel(&self) {
		self.cancelled.store(true, Ordering::SeqCst);
	}

	/// Check if cancellation was requested.
	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::SeqCst)
	}
}

impl Default for CancellationToken {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_clones_share_state() {
		let token = CancellationToken::new();
		let clone = token.clone();
		assert!(!clone.is_cancelled());

		token.cancel();
		assert!(clone.is_cancelled());
	}

	#[test]
	fn test_cancel_is_seen_by_another_thread() {
		let token = CancellationToken::new();
		let worker_token = token.clone();

		let worker = std::thread::spawn(move || {
			let mut turns = 0u64;
			while !worker_token.is_cancelled() {
				std::thread::sleep(std::time::Duration::from_millis(1));
				turns += 1;
			}
			turns
		});

		std::thread::sleep(std::time::Duration::from_millis(20));
		token.cancel();

		assert!(worker.join().unwrap() > 0);
	}
}

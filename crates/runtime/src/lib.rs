// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Threading runtime for the traffic light.
//!
//! - [`sync`]: `Mutex` and `Condvar` over `parking_lot`
//! - [`slot`]: the single-slot blocking channel
//! - [`context`]: cancellation tokens for background loops
//! - [`thread`]: named threads with joinable handles

pub mod context;
pub mod slot;
pub mod sync;
pub mod thread;

pub use context::CancellationToken;
pub use slot::Slot;
pub use thread::{JoinError, ThreadHandle, spawn_named};

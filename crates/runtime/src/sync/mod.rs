// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Blocking synchronization primitives.
//!
//! Thin wrappers over `parking_lot` so the rest of the workspace never touches
//! lock poisoning and always pairs a [`Condvar`] with this crate's [`MutexGuard`].

pub mod condvar;
pub mod mutex;

pub use condvar::{Condvar, WaitTimeoutResult};
pub use mutex::{Mutex, MutexGuard};

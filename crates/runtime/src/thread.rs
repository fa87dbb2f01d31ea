// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Named background threads with joinable handles.

use std::{any::Any, io, thread};

use tracing::debug;

/// Error returned when joining a thread that panicked.
#[derive(Debug, thiserror::Error)]
#[error("thread '{thread}' panicked: {message}")]
pub struct JoinError {
	thread: String,
	message: String,
}

impl JoinError {
	pub(crate) fn new(thread: impl Into<String>, payload: Box<dyn Any + Send>) -> Self {
		let message = if let Some(msg) = payload.downcast_ref::<&str>() {
			msg.to_string()
		} else if let Some(msg) = payload.downcast_ref::<String>() {
			msg.clone()
		} else {
			"unknown panic payload".to_string()
		};

		Self {
			thread: thread.into(),
			message,
		}
	}

	/// Name of the thread that panicked.
	pub fn thread(&self) -> &str {
		&self.thread
	}

	/// The panic message, if it was a string.
	pub fn message(&self) -> &str {
		&self.message
	}
}

/// Handle to a background thread.
pub struct ThreadHandle {
	name: String,
	join_handle: Option<thread::JoinHandle<()>>,
}

impl ThreadHandle {
	/// The thread's name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Whether the thread has finished running.
	pub fn is_finished(&self) -> bool {
		self.join_handle.as_ref().is_none_or(|handle| handle.is_finished())
	}

	/// Wait for the thread to complete.
	pub fn join(mut self) -> Result<(), JoinError> {
		if let Some(handle) = self.join_handle.take() {
			handle.join().map_err(|payload| JoinError::new(self.name.clone(), payload))
		} else {
			Ok(())
		}
	}
}

impl std::fmt::Debug for ThreadHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ThreadHandle")
			.field("name", &self.name)
			.field("finished", &self.is_finished())
			.finish()
	}
}

/// Spawn `f` on a dedicated OS thread called `name`.
pub fn spawn_named<F>(name: impl Into<String>, f: F) -> io::Result<ThreadHandle>
where
	F: FnOnce() + Send + 'static,
{
	let name = name.into();
	let thread_name = name.clone();

	let handle = thread::Builder::new().name(name.clone()).spawn(move || {
		debug!(thread = %thread_name, "Background thread starting");
		f();
		debug!(thread = %thread_name, "Background thread stopped");
	})?;

	Ok(ThreadHandle {
		name,
		join_handle: Some(handle),
	})
}

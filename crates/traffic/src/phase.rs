// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt,
	fmt::{Display, Formatter},
	sync::atomic::{AtomicU8, Ordering},
};

/// Signal state of a traffic light.
///
/// Phases strictly alternate; there is no intermediate state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
	#[default]
	Red,
	Green,
}

impl Phase {
	/// The phase that follows this one.
	#[inline]
	pub fn toggle(self) -> Self {
		match self {
			Phase::Red => Phase::Green,
			Phase::Green => Phase::Red,
		}
	}

	#[inline]
	pub fn is_green(self) -> bool {
		self == Phase::Green
	}

	#[inline]
	pub fn is_red(self) -> bool {
		self == Phase::Red
	}

	fn to_u8(self) -> u8 {
		match self {
			Phase::Red => 0,
			Phase::Green => 1,
		}
	}

	fn from_u8(value: u8) -> Self {
		match value {
			1 => Phase::Green,
			_ => Phase::Red,
		}
	}
}

impl Display for Phase {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Phase::Red => f.write_str("red"),
			Phase::Green => f.write_str("green"),
		}
	}
}

/// A [`Phase`] that can be shared between threads without a lock.
///
/// Reads are best-effort: a reader may see a value that the writer is about to replace.
#[derive(Debug)]
pub struct AtomicPhase {
	inner: AtomicU8,
}

impl AtomicPhase {
	pub fn new(phase: Phase) -> Self {
		Self {
			inner: AtomicU8::new(phase.to_u8()),
		}
	}

	#[inline]
	pub fn load(&self) -> Phase {
		Phase::from_u8(self.inner.load(Ordering::Acquire))
	}

	#[inline]
	pub fn store(&self, phase: Phase) {
		self.inner.store(phase.to_u8(), Ordering::Release);
	}
}

impl Default for AtomicPhase {
	fn default() -> Self {
		Self::new(Phase::default())
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{io, time::Duration};

use trafficlight_runtime::JoinError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("traffic light {light} is already simulating")]
	AlreadySimulating {
		light: u64,
	},

	#[error("invalid cycle configuration: {0}")]
	InvalidConfig(String),

	#[error("failed to spawn cycling thread: {0}")]
	Spawn(#[from] io::Error),

	#[error(transparent)]
	Join(#[from] JoinError),

	#[error("no green phase within {0:?}")]
	Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, Error>;

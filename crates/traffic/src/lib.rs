// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! A traffic light actor.
//!
//! The light cycles between [`Phase::Red`] and [`Phase::Green`] on a randomized
//! timer and hands every change to waiting threads through a single-slot channel.
//!
//! ```ignore
//! let light = TrafficLight::new();
//! light.simulate()?;
//! light.wait_for_green();
//! assert!(light.current_phase().is_green());
//! ```

pub mod config;
mod cycle;
pub mod error;
mod light;
pub mod phase;

pub use config::CycleConfig;
pub use error::{Error, Result};
pub use light::TrafficLight;
pub use phase::{AtomicPhase, Phase};

// src/lib.rs

//! Driver for the Intersil ISL29125 RGB ambient-light sensor, plus the
//! scheduling glue that publishes its samples over a connection-gated link.
//!
//! Layers, leaf first:
//!
//! - [`common`]: register map, bus abstraction, shared types and errors.
//! - [`driver`]: [`Isl29125`], the register-protocol driver with a cached
//!   configuration mirror.
//! - [`link`]: the [`LinkAdapter`] seam and a reference [`NotifyLink`].
//! - [`scheduler`]: [`SampleScheduler`], which turns a timer flag into
//!   sensor reads and publishes fresh samples while connected.
//!
//! ```ignore
//! static SAMPLE_FLAG: SampleFlag = SampleFlag::new();
//!
//! // timer interrupt, once per `timing::DEFAULT_SAMPLE_INTERVAL`
//! fn on_tick() {
//!     SAMPLE_FLAG.raise();
//! }
//!
//! let bus = I2cRegisterBus::new(i2c, registers::DEFAULT_ADDRESS);
//! let mut sensor = Isl29125::new(bus)?;
//! sensor.configure(&SensorConfig::default())?;
//! let mut scheduler = SampleScheduler::new(&SAMPLE_FLAG, sensor, link);
//! loop {
//!     let _ = scheduler.poll();
//!     // dispatch link events...
//! }
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod common;
pub mod driver;
pub mod link;
pub mod scheduler;

// Re-export key types for convenience
pub use common::{Access, Isl29125Error, RegisterBus, Sample, SensorConfig};
pub use driver::Isl29125;
pub use link::{ConnectionState, LinkAdapter, NotifyLink, NotifyTransport};
pub use scheduler::{PollOutcome, SampleFlag, SampleScheduler};

#[cfg(feature = "impl-native")]
pub use common::I2cRegisterBus;

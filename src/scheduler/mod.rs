// src/scheduler/mod.rs

//! Timer-to-publisher bridge.
//!
//! The timer context only ever calls [`SampleFlag::raise`]. All bus traffic
//! happens in [`SampleScheduler::poll`], called from the main loop, so the
//! sensor has exactly one caller.

use crate::common::{
    error::Isl29125Error,
    hal_traits::RegisterBus,
    types::{Channel, Sample},
};
use crate::driver::Isl29125;
use crate::link::LinkAdapter;
use log::{debug, trace, warn};
use portable_atomic::{AtomicBool, Ordering};

/// Single-producer/single-consumer "sample due" flag.
///
/// Safe to share between an interrupt handler (producer) and the main loop
/// (consumer) without locks; typically lives in a `static`.
#[derive(Debug, Default)]
pub struct SampleFlag {
    pending: AtomicBool,
}

impl SampleFlag {
    pub const fn new() -> Self {
        SampleFlag {
            pending: AtomicBool::new(false),
        }
    }

    /// Marks a sample as due. Callable from interrupt context.
    #[inline]
    pub fn raise(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Consumes the flag, returning whether a sample was due.
    #[inline]
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    #[inline]
    pub fn is_raised(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerState {
    Idle,
    Pending,
}

/// What one [`SampleScheduler::poll`] call did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// No sample was due.
    Idle,
    /// A sample was due but the device had no new conversion.
    Stale,
    /// Fresh sample forwarded to the link.
    Published(Sample),
    /// Fresh sample read while disconnected and thrown away.
    Discarded(Sample),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SchedulerStats {
    pub published: u32,
    pub discarded: u32,
    pub stale: u32,
    pub failed: u32,
}

/// Owns the sensor and the link; turns raised flags into publications.
///
/// Samples are never queued: a sample read while disconnected is dropped,
/// and a missed cycle is simply skipped.
#[derive(Debug)]
pub struct SampleScheduler<'a, B, L>
where
    B: RegisterBus,
    L: LinkAdapter,
{
    flag: &'a SampleFlag,
    sensor: Isl29125<B>,
    link: L,
    stats: SchedulerStats,
}

impl<'a, B, L> SampleScheduler<'a, B, L>
where
    B: RegisterBus,
    L: LinkAdapter,
{
    pub fn new(flag: &'a SampleFlag, sensor: Isl29125<B>, link: L) -> Self {
        SampleScheduler {
            flag,
            sensor,
            link,
            stats: SchedulerStats::default(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        if self.flag.is_raised() {
            SchedulerState::Pending
        } else {
            SchedulerState::Idle
        }
    }

    /// One cooperative step of the main loop.
    ///
    /// When a sample is due the flag is cleared first, so a bus failure
    /// skips this cycle instead of retrying it. The error is returned for
    /// the caller to log or count.
    pub fn poll(&mut self) -> Result<PollOutcome, Isl29125Error<B::Error>> {
        if !self.flag.take() {
            return Ok(PollOutcome::Idle);
        }

        let sample = match self.sensor.sample() {
            Ok(sample) => sample,
            Err(nb::Error::WouldBlock) => {
                trace!("scheduler: stale sample");
                self.stats.stale = self.stats.stale.wrapping_add(1);
                return Ok(PollOutcome::Stale);
            }
            Err(nb::Error::Other(e)) => {
                warn!("scheduler: sensor read failed: {:?}", e);
                self.stats.failed = self.stats.failed.wrapping_add(1);
                return Err(e);
            }
        };

        if !self.link.is_connected() {
            debug!("scheduler: not connected, dropping sample");
            self.stats.discarded = self.stats.discarded.wrapping_add(1);
            return Ok(PollOutcome::Discarded(sample));
        }

        for channel in Channel::PUBLISH_ORDER {
            self.link.publish(channel, sample.channel(channel));
        }
        self.stats.published = self.stats.published.wrapping_add(1);
        Ok(PollOutcome::Published(sample))
    }

    #[inline]
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn sensor(&self) -> &Isl29125<B> {
        &self.sensor
    }

    /// Direct driver access, e.g. to reconfigure between polls.
    pub fn sensor_mut(&mut self) -> &mut Isl29125<B> {
        &mut self.sensor
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    /// For forwarding connection events to the adapter.
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn release(self) -> (Isl29125<B>, L) {
        (self.sensor, self.link)
    }
}

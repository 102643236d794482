// src/link/mod.rs

//! Publisher side: the seam the scheduler talks to, and a reference adapter
//! that drives the connection state machine over a notify-capable transport.
//!
//! ```text
//! begin() ──► Advertising ──connection ok──► Connected
//!                  ▲                             │ disconnect requested
//!                  │                             ▼
//!                  └──── disconnection done ── Disconnecting
//! ```

use crate::common::types::Channel;
use core::fmt::Debug;
use log::{debug, warn};

/// Connection state as seen by the core. Owned by the link adapter.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    Advertising,
    Connected,
    Disconnecting,
}

/// What the sample scheduler needs from the wireless side.
pub trait LinkAdapter {
    fn connection_state(&self) -> ConnectionState;

    fn is_connected(&self) -> bool {
        self.connection_state() == ConnectionState::Connected
    }

    /// Makes `value` observable to a subscribed peer. Fire-and-forget:
    /// dropped silently while not connected, no acknowledgment.
    fn publish(&mut self, channel: Channel, value: u16);
}

/// Transport that can push a small buffer to a subscriber of one of the
/// three channel endpoints, and (re)start advertising.
pub trait NotifyTransport {
    /// Platform-specific error type
    type Error: Debug;

    fn start_advertising(&mut self) -> Result<(), Self::Error>;

    fn notify(&mut self, channel: Channel, payload: &[u8]) -> Result<(), Self::Error>;
}

/// Reference [`LinkAdapter`]: connection state machine plus little-endian
/// `u16` notifications, one endpoint per channel.
///
/// The platform's event loop forwards connection events to
/// [`on_connection_complete`](Self::on_connection_complete),
/// [`on_disconnection_started`](Self::on_disconnection_started) and
/// [`on_disconnection_complete`](Self::on_disconnection_complete).
#[derive(Debug)]
pub struct NotifyLink<T>
where
    T: NotifyTransport,
{
    transport: T,
    state: ConnectionState,
    // device order: green, red, blue
    last_values: [u16; 3],
}

impl<T> NotifyLink<T>
where
    T: NotifyTransport,
{
    pub fn new(transport: T) -> Self {
        NotifyLink {
            transport,
            state: ConnectionState::Advertising,
            last_values: [0; 3],
        }
    }

    /// Starts advertising. Call once the transport stack is initialised.
    /// The state only moves to `Advertising` once the transport accepted it.
    pub fn begin(&mut self) -> Result<(), T::Error> {
        self.transport.start_advertising()?;
        self.state = ConnectionState::Advertising;
        Ok(())
    }

    /// A connection attempt finished. Failed attempts keep advertising.
    pub fn on_connection_complete(&mut self, success: bool) {
        if success {
            debug!("link: connected");
            self.state = ConnectionState::Connected;
        }
    }

    pub fn on_disconnection_started(&mut self) {
        if self.state == ConnectionState::Connected {
            self.state = ConnectionState::Disconnecting;
        }
    }

    /// The peer is gone; advertising restarts so it can reconnect. If the
    /// restart fails the link stays in `Disconnecting`.
    pub fn on_disconnection_complete(&mut self) -> Result<(), T::Error> {
        debug!("link: disconnected, re-advertising");
        self.state = ConnectionState::Disconnecting;
        self.begin()
    }

    /// Last value successfully handed to the transport for `channel`.
    pub fn last_value(&self, channel: Channel) -> u16 {
        self.last_values[channel.device_index()]
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

impl<T> LinkAdapter for NotifyLink<T>
where
    T: NotifyTransport,
{
    fn connection_state(&self) -> ConnectionState {
        self.state
    }

    fn publish(&mut self, channel: Channel, value: u16) {
        if self.state != ConnectionState::Connected {
            return;
        }
        match self.transport.notify(channel, &value.to_le_bytes()) {
            Ok(()) => self.last_values[channel.device_index()] = value,
            Err(e) => warn!("link: notify {:?} failed: {:?}", channel, e),
        }
    }
}

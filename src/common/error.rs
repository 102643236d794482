// src/common/error.rs

/// Errors surfaced by the ISL29125 driver.
///
/// Rejected configuration values are not errors; accessors report them as
/// [`Access::Rejected`](super::Access::Rejected) before touching the bus.
/// A stale sample is not an error either, see [`Isl29125::read`](crate::Isl29125::read).
#[derive(Debug, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Isl29125Error<E = ()>
where
    E: core::fmt::Debug, // Debug is all the format string needs
{
    /// The bus transaction failed (NACK, arbitration loss, timeout...).
    #[error("Bus error: {0:?}")]
    Bus(E),

    /// The device-ID register did not hold the ISL29125 identifier.
    #[error("Unexpected device id: {0:#04x}")]
    InvalidDeviceId(u8),

    /// Output buffer too small for the requested channel selection.
    #[error("Buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
}

impl<E: core::fmt::Debug> Isl29125Error<E> {
    /// True when the failure came from the bus rather than from the driver.
    pub fn is_bus_error(&self) -> bool {
        matches!(self, Isl29125Error::Bus(_))
    }
}

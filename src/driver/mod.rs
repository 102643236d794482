// src/driver/mod.rs

use crate::common::{
    config::{DeviceConfig, SensorConfig},
    error::Isl29125Error,
    hal_traits::RegisterBus,
    registers, timing,
    types::{ChannelSelector, Sample, SamplingMode, StatusSnapshot, ThresholdPair, ThresholdRegister},
};
use core::time::Duration;
use log::{debug, trace, warn};

mod accessors;

#[cfg(test)]
pub(crate) mod mock;

/// Driver for one ISL29125 on a [`RegisterBus`].
///
/// The configuration registers are mirrored in a [`DeviceConfig`] so that
/// parameterless accessor calls never touch the bus and every field update is
/// a read-modify-write against the mirror.
#[derive(Debug)]
pub struct Isl29125<B>
where
    B: RegisterBus,
{
    bus: B,
    config: DeviceConfig,
    sampling: SamplingMode,
}

impl<B> Isl29125<B>
where
    B: RegisterBus,
{
    /// Binds the bus, checks the device ID and loads the configuration mirror.
    pub fn new(bus: B) -> Result<Self, Isl29125Error<B::Error>> {
        Self::with_sampling_mode(bus, SamplingMode::FreeRunning)
    }

    pub fn with_sampling_mode(
        bus: B,
        sampling: SamplingMode,
    ) -> Result<Self, Isl29125Error<B::Error>> {
        let mut driver = Isl29125 {
            bus,
            config: DeviceConfig::default(),
            sampling,
        };

        let id = driver.identify()?;
        if id != registers::EXPECTED_DEVICE_ID {
            warn!("isl29125: unexpected device id {:#04x}", id);
            return Err(Isl29125Error::InvalidDeviceId(id));
        }
        driver.reload_config()?;
        driver.apply_sampling_mode()?;
        debug!(
            "isl29125: probed, config {:?}, sampling {:?}",
            driver.config.to_registers(),
            sampling
        );
        Ok(driver)
    }

    // --- Public Blocking Methods ---

    /// Reads the device-ID register. Compare against
    /// [`registers::EXPECTED_DEVICE_ID`]. Never cached.
    pub fn identify(&mut self) -> Result<u8, Isl29125Error<B::Error>> {
        self.bus
            .read_byte(registers::DEVICE_ID)
            .map_err(Isl29125Error::Bus)
    }

    /// Reads and decodes the status register.
    ///
    /// Destructive: the device clears its interrupt flag on this read.
    pub fn status(&mut self) -> Result<StatusSnapshot, Isl29125Error<B::Error>> {
        let raw = self
            .bus
            .read_byte(registers::STATUS)
            .map_err(Isl29125Error::Bus)?;
        Ok(StatusSnapshot::from_raw(raw))
    }

    /// Reads the selected channel(s) into `out`.
    ///
    /// Single channels fill `out[0]`; [`ChannelSelector::Rgb`] fills `out[..3]`
    /// in device order (green, red, blue). Returns `Ok(false)` and leaves
    /// `out` untouched when the status read done as part of this call shows
    /// no completed conversion.
    pub fn read(
        &mut self,
        selector: ChannelSelector,
        out: &mut [u16],
    ) -> Result<bool, Isl29125Error<B::Error>> {
        let words = selector.word_count();
        if out.len() < words {
            return Err(Isl29125Error::BufferTooSmall {
                needed: words,
                got: out.len(),
            });
        }

        if !self.status()?.conversion_complete() {
            trace!("isl29125: no new conversion");
            return Ok(false);
        }

        let mut raw = [0u8; 6];
        let raw = &mut raw[..words * 2];
        self.bus
            .read_block(selector.data_register(), raw)
            .map_err(Isl29125Error::Bus)?;

        for (word, bytes) in out.iter_mut().zip(raw.chunks_exact(2)) {
            *word = u16::from_le_bytes([bytes[0], bytes[1]]);
        }
        Ok(true)
    }

    /// RGB read as a [`Sample`]; `WouldBlock` while no new conversion is ready.
    pub fn sample(&mut self) -> nb::Result<Sample, Isl29125Error<B::Error>> {
        let mut words = [0u16; 3];
        if self.read(ChannelSelector::Rgb, &mut words)? {
            Ok(Sample::from_device_order(words, true))
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    /// Writes or reads one interrupt threshold; `register` decides which.
    ///
    /// Write selectors transmit `value` low byte first and echo it back.
    /// Read selectors ignore `value` and return the device's content.
    pub fn threshold(
        &mut self,
        register: ThresholdRegister,
        value: u16,
    ) -> Result<u16, Isl29125Error<B::Error>> {
        if register.is_write() {
            let [lo, hi] = value.to_le_bytes();
            self.bus
                .write_block(&[register.address(), lo, hi])
                .map_err(Isl29125Error::Bus)?;
            debug!("isl29125: threshold {:?} <- {:#06x}", register, value);
            Ok(value)
        } else {
            let mut raw = [0u8; 2];
            self.bus
                .read_block(register.address(), &mut raw)
                .map_err(Isl29125Error::Bus)?;
            Ok(u16::from_le_bytes(raw))
        }
    }

    /// Reads both thresholds in one transaction.
    pub fn thresholds(&mut self) -> Result<ThresholdPair, Isl29125Error<B::Error>> {
        let mut raw = [0u8; 4];
        self.bus
            .read_block(registers::LOW_THRESHOLD, &mut raw)
            .map_err(Isl29125Error::Bus)?;
        Ok(ThresholdPair {
            low: u16::from_le_bytes([raw[0], raw[1]]),
            high: u16::from_le_bytes([raw[2], raw[3]]),
        })
    }

    /// Starts one conversion. Only does anything in [`SamplingMode::Sync`].
    ///
    /// With the SYNC bit clear the device restarts its ADC on every I2C write
    /// to CONFIG_1, so the trigger is a rewrite of the cached value. Returns
    /// whether the trigger write went out; `false` without bus traffic when
    /// the operating mode converts no channel.
    pub fn run(&mut self) -> bool {
        if self.sampling != SamplingMode::Sync {
            debug!("isl29125: run ignored outside sync mode");
            return false;
        }
        if self.config.mode().channel_count() == 0 {
            debug!("isl29125: run ignored, mode {:?} converts nothing", self.config.mode());
            return false;
        }
        let config1 = self.config.register(registers::CONFIG_1);
        match self.bus.write_block(&[registers::CONFIG_1, config1]) {
            Ok(()) => true,
            Err(e) => {
                warn!("isl29125: conversion trigger failed: {:?}", e);
                false
            }
        }
    }

    /// Software reset. Every register returns to its power-on value and the
    /// mirror follows, then the sampling mode's register bits are restored.
    pub fn reset(&mut self) -> Result<(), Isl29125Error<B::Error>> {
        self.bus
            .write_block(&[registers::DEVICE_ID, registers::RESET_COMMAND])
            .map_err(Isl29125Error::Bus)?;
        self.config = DeviceConfig::default();
        debug!("isl29125: reset");
        self.apply_sampling_mode()
    }

    /// Applies a complete start-up configuration in one block write, then the
    /// thresholds if present. Bits the sampling mode requires override the
    /// corresponding `config` fields.
    pub fn configure(&mut self, config: &SensorConfig) -> Result<(), Isl29125Error<B::Error>> {
        let packed = self.sampling_bits(config.apply_to(&self.config));
        let [c1, c2, c3] = packed.to_registers();
        self.bus
            .write_block(&[registers::CONFIG_1, c1, c2, c3])
            .map_err(Isl29125Error::Bus)?;
        self.config = packed;
        debug!("isl29125: configured {:?}", packed.to_registers());

        if let Some(pair) = config.thresholds {
            self.threshold(ThresholdRegister::LowWrite, pair.low)?;
            self.threshold(ThresholdRegister::HighWrite, pair.high)?;
        }
        Ok(())
    }

    /// `config` with the bits the sampling mode depends on forced: SYNC is
    /// always clear (the ADC is never gated on an INT edge) and Interrupt
    /// mode signals every completed conversion on INT.
    fn sampling_bits(&self, config: DeviceConfig) -> DeviceConfig {
        let mut forced = config;
        forced.set_register(
            registers::CONFIG_1,
            config.merged(registers::CONFIG_1, registers::SYNC_MASK, 0),
        );
        if self.sampling == SamplingMode::Interrupt {
            forced.set_register(
                registers::CONFIG_3,
                config.merged(
                    registers::CONFIG_3,
                    registers::CONVERSION_DONE_MASK,
                    registers::CONVERSION_DONE_MASK,
                ),
            );
        }
        forced
    }

    /// Writes whichever configuration registers disagree with the sampling mode.
    fn apply_sampling_mode(&mut self) -> Result<(), Isl29125Error<B::Error>> {
        let wanted = self.sampling_bits(self.config);
        for register in [registers::CONFIG_1, registers::CONFIG_3] {
            let value = wanted.register(register);
            if value != self.config.register(register) {
                self.update_register(register, 0xFF, value)?;
            }
        }
        Ok(())
    }

    /// Re-reads CONFIG_1..CONFIG_3 into the mirror.
    pub fn reload_config(&mut self) -> Result<(), Isl29125Error<B::Error>> {
        let mut raw = [0u8; 3];
        self.bus
            .read_block(registers::CONFIG_1, &mut raw)
            .map_err(Isl29125Error::Bus)?;
        self.config = DeviceConfig::from_registers(raw);
        Ok(())
    }

    /// The cached configuration.
    #[inline]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    #[inline]
    pub fn sampling_mode(&self) -> SamplingMode {
        self.sampling
    }

    /// Time for one pass over every channel the current mode converts.
    pub fn cycle_time(&self) -> Duration {
        timing::cycle_time(self.config.resolution(), self.config.mode().channel_count())
    }

    /// Hands back the bus.
    pub fn release(self) -> B {
        self.bus
    }

    #[cfg(test)]
    pub(crate) fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}

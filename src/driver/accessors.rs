// src/driver/accessors.rs

use super::Isl29125;
use crate::common::{
    config::DeviceConfig,
    error::Isl29125Error,
    hal_traits::RegisterBus,
    registers,
    types::{Access, IrCompensation, IrqColor, OperatingMode, Persistence, Range, Resolution},
};
use log::debug;

/// Where a logical field lives and how its user-facing value maps to bits.
struct Field {
    name: &'static str,
    register: u8,
    mask: u8,
    /// Cached user-facing value.
    decode: fn(&DeviceConfig) -> u8,
    /// Register bits for a requested value, `None` if outside the legal set.
    encode: fn(u8) -> Option<u8>,
}

const MODE: Field = Field {
    name: "mode",
    register: registers::CONFIG_1,
    mask: registers::MODE_MASK,
    decode: |c| c.mode().bits(),
    encode: |v| OperatingMode::from_u8(v).map(OperatingMode::bits),
};

const RANGE: Field = Field {
    name: "range",
    register: registers::CONFIG_1,
    mask: registers::RANGE_MASK,
    decode: |c| c.range().bits(),
    encode: |v| Range::from_u8(v).map(Range::bits),
};

const RESOLUTION: Field = Field {
    name: "resolution",
    register: registers::CONFIG_1,
    mask: registers::RESOLUTION_MASK,
    decode: |c| c.resolution().bits(),
    encode: |v| Resolution::from_u8(v).map(Resolution::bits),
};

const PERSISTENCE: Field = Field {
    name: "persistence",
    register: registers::CONFIG_3,
    mask: registers::PERSISTENCE_MASK,
    decode: |c| c.persistence().bits(),
    encode: |v| Persistence::from_u8(v).map(Persistence::bits),
};

const IRQ_ON_CONVERSION_DONE: Field = Field {
    name: "irq_on_conversion_done",
    register: registers::CONFIG_3,
    mask: registers::CONVERSION_DONE_MASK,
    decode: |c| c.irq_on_conversion_done() as u8,
    encode: |v| match v {
        0 => Some(0),
        1 => Some(registers::CONVERSION_DONE_MASK),
        _ => None,
    },
};

const IRQ_ON_COLOR: Field = Field {
    name: "irq_on_color",
    register: registers::CONFIG_3,
    mask: registers::IRQ_COLOR_MASK,
    decode: |c| c.irq_color().bits(),
    encode: |v| IrqColor::from_u8(v).map(IrqColor::bits),
};

const IR_COMPENSATION: Field = Field {
    name: "ir_compensation",
    register: registers::CONFIG_2,
    mask: registers::IR_COMPENSATION_MASK,
    decode: |c| c.ir_compensation().raw(),
    encode: |v| IrCompensation::new(v).map(|c| c.raw()),
};

// Every accessor follows the same contract: `None` (or the legacy `0xFF`)
// reads the mirror without bus traffic, a legal value is merged into its
// register and written, an illegal one is rejected before any I/O.
impl<B> Isl29125<B>
where
    B: RegisterBus,
{
    /// Operating mode, raw codes `0x00..=0x07` (see [`OperatingMode`]).
    pub fn mode(&mut self, value: Option<u8>) -> Result<Access<u8>, Isl29125Error<B::Error>> {
        self.access(&MODE, value)
    }

    /// Full-scale range: `0x00` (375 lux) or `0x08` (10k lux).
    pub fn range(&mut self, value: Option<u8>) -> Result<Access<u8>, Isl29125Error<B::Error>> {
        self.access(&RANGE, value)
    }

    /// ADC resolution: `0x00` (16-bit) or `0x10` (12-bit).
    pub fn resolution(&mut self, value: Option<u8>) -> Result<Access<u8>, Isl29125Error<B::Error>> {
        self.access(&RESOLUTION, value)
    }

    /// Interrupt persistence: `0x00`, `0x04`, `0x08`, `0x0C` for 1, 2, 4, 8 hits.
    pub fn persistence(&mut self, value: Option<u8>) -> Result<Access<u8>, Isl29125Error<B::Error>> {
        self.access(&PERSISTENCE, value)
    }

    /// Conversion-done interrupt: `0` off, `1` on.
    pub fn irq_on_conversion_done(
        &mut self,
        value: Option<u8>,
    ) -> Result<Access<u8>, Isl29125Error<B::Error>> {
        self.access(&IRQ_ON_CONVERSION_DONE, value)
    }

    /// Threshold interrupt source: `0x00` off, `0x01` green, `0x02` red, `0x03` blue.
    pub fn irq_on_color(&mut self, value: Option<u8>) -> Result<Access<u8>, Isl29125Error<B::Error>> {
        self.access(&IRQ_ON_COLOR, value)
    }

    /// IR compensation, `0..=63` or `128..=191`.
    pub fn ir_compensation(
        &mut self,
        value: Option<u8>,
    ) -> Result<Access<u8>, Isl29125Error<B::Error>> {
        self.access(&IR_COMPENSATION, value)
    }

    fn access(
        &mut self,
        field: &Field,
        value: Option<u8>,
    ) -> Result<Access<u8>, Isl29125Error<B::Error>> {
        let requested = match value {
            None | Some(registers::READ_SENTINEL) => {
                return Ok(Access::Read((field.decode)(&self.config)));
            }
            Some(v) => v,
        };

        let Some(bits) = (field.encode)(requested) else {
            debug!("isl29125: {} rejected {:#04x}", field.name, requested);
            return Ok(Access::Rejected);
        };

        self.update_register(field.register, field.mask, bits)?;
        Ok(Access::Written(requested))
    }

    /// Clears `mask` in the mirrored register, ORs in `bits`, writes the whole
    /// byte and only then updates the mirror.
    pub(super) fn update_register(
        &mut self,
        register: u8,
        mask: u8,
        bits: u8,
    ) -> Result<(), Isl29125Error<B::Error>> {
        let updated = self.config.merged(register, mask, bits);
        self.bus
            .write_block(&[register, updated])
            .map_err(Isl29125Error::Bus)?;
        self.config.set_register(register, updated);
        debug!("isl29125: reg {:#04x} <- {:#04x}", register, updated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::{MockBus, MockBusError};
    use super::*;
    use crate::common::types::SamplingMode;

    type Accessor = fn(&mut Isl29125<MockBus>, Option<u8>) -> Result<Access<u8>, Isl29125Error<MockBusError>>;

    fn probed() -> Isl29125<MockBus> {
        Isl29125::new(MockBus::new()).unwrap()
    }

    // (accessor, legal values, illegal values)
    fn fields() -> [(&'static str, Accessor, &'static [u8], &'static [u8]); 7] {
        [
            ("mode", Isl29125::mode, &[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07], &[0x08, 0x10, 0x80]),
            ("range", Isl29125::range, &[0x00, 0x08], &[0x01, 0x04, 0x10]),
            ("resolution", Isl29125::resolution, &[0x00, 0x10], &[0x01, 0x08, 0x20]),
            ("persistence", Isl29125::persistence, &[0x00, 0x04, 0x08, 0x0C], &[0x01, 0x02, 0x10]),
            ("irq_on_conversion_done", Isl29125::irq_on_conversion_done, &[0, 1], &[2, 0x10]),
            ("irq_on_color", Isl29125::irq_on_color, &[0x00, 0x01, 0x02, 0x03], &[0x04, 0x05]),
            ("ir_compensation", Isl29125::ir_compensation, &[0, 1, 63, 128, 150, 191], &[64, 100, 127, 192, 254]),
        ]
    }

    #[test]
    fn test_written_value_reads_back_without_bus() {
        for (name, accessor, legal, _) in fields() {
            for &v in legal {
                let mut sensor = probed();
                assert_eq!(accessor(&mut sensor, Some(v)).unwrap(), Access::Written(v), "{} <- {:#x}", name, v);

                let reads = sensor.bus.reads;
                let writes = sensor.bus.writes.len();
                assert_eq!(accessor(&mut sensor, None).unwrap(), Access::Read(v), "{} read-back", name);
                assert_eq!(sensor.bus.reads, reads);
                assert_eq!(sensor.bus.writes.len(), writes);
            }
        }
    }

    #[test]
    fn test_rejected_value_changes_nothing() {
        for (name, accessor, legal, illegal) in fields() {
            let mut sensor = probed();
            let last_legal = legal[legal.len() - 1];
            accessor(&mut sensor, Some(last_legal)).unwrap();
            let before = *sensor.config();
            let writes = sensor.bus.writes.len();

            for &v in illegal {
                assert_eq!(accessor(&mut sensor, Some(v)).unwrap(), Access::Rejected, "{} <- {:#x}", name, v);
            }
            assert_eq!(*sensor.config(), before);
            assert_eq!(sensor.bus.writes.len(), writes);
            assert_eq!(accessor(&mut sensor, None).unwrap(), Access::Read(last_legal));
        }
    }

    #[test]
    fn test_legacy_sentinel_reads() {
        let mut sensor = probed();
        sensor.range(Some(0x08)).unwrap();
        let writes = sensor.bus.writes.len();
        assert_eq!(sensor.range(Some(0xFF)).unwrap(), Access::Read(0x08));
        assert_eq!(sensor.bus.writes.len(), writes);
    }

    #[test]
    fn test_ir_compensation_boundaries() {
        let mut sensor = probed();
        for v in [0u8, 63, 128, 191] {
            assert_eq!(sensor.ir_compensation(Some(v)).unwrap(), Access::Written(v));
        }
        for v in [64u8, 127, 192] {
            assert_eq!(sensor.ir_compensation(Some(v)).unwrap(), Access::Rejected);
        }
        assert_eq!(sensor.ir_compensation(None).unwrap(), Access::Read(191));
    }

    #[test]
    fn test_resolution_survives_range_write() {
        let mut sensor = probed();
        sensor.resolution(Some(Resolution::Bits12.bits())).unwrap();
        sensor.range(Some(Range::Lux10k.bits())).unwrap();

        assert_eq!(sensor.resolution(None).unwrap(), Access::Read(0x10));
        // device side too
        assert_eq!(sensor.bus.regs[registers::CONFIG_1 as usize], 0x18);
        assert_eq!(sensor.bus.last_write(), Some(&[registers::CONFIG_1, 0x18][..]));
    }

    #[test]
    fn test_config3_siblings_preserved() {
        let mut sensor = probed();
        sensor.irq_on_color(Some(IrqColor::Blue.bits())).unwrap();
        sensor.persistence(Some(Persistence::Four.bits())).unwrap();
        sensor.irq_on_conversion_done(Some(1)).unwrap();
        sensor.persistence(Some(Persistence::Two.bits())).unwrap();

        assert_eq!(sensor.bus.regs[registers::CONFIG_3 as usize], 0x10 | 0x04 | 0x03);
        assert_eq!(sensor.irq_on_color(None).unwrap(), Access::Read(0x03));
        assert_eq!(sensor.irq_on_conversion_done(None).unwrap(), Access::Read(1));
    }

    #[test]
    fn test_mode_write_keeps_device_range() {
        let mut bus = MockBus::new();
        bus.regs[registers::CONFIG_1 as usize] = 0x08;
        let mut sensor = Isl29125::with_sampling_mode(bus, SamplingMode::Sync).unwrap();

        sensor.mode(Some(OperatingMode::Rgb.bits())).unwrap();
        assert_eq!(sensor.bus.regs[registers::CONFIG_1 as usize], 0x0D);
        assert_eq!(sensor.range(None).unwrap(), Access::Read(0x08));
    }

    #[test]
    fn test_bus_failure_is_not_rejection() {
        let mut sensor = probed();
        sensor.range(Some(0x08)).unwrap();
        sensor.bus.fail = true;

        assert!(matches!(sensor.resolution(Some(0x10)), Err(Isl29125Error::Bus(MockBusError))));
        // mirror untouched on a failed write
        sensor.bus.fail = false;
        assert_eq!(sensor.resolution(None).unwrap(), Access::Read(0x00));
        assert_eq!(sensor.range(None).unwrap(), Access::Read(0x08));
    }
}

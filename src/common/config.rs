// src/common/config.rs

use super::registers;
use super::types::{
    IrCompensation, IrqColor, OperatingMode, Persistence, Range, Resolution, ThresholdPair,
};

/// Mirror of the three configuration registers.
///
/// The packed bytes are the source of truth so that updating one field
/// can never disturb a sibling sharing the same register. Typed getters
/// decode on demand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    config1: u8,
    config2: u8,
    config3: u8,
}

impl DeviceConfig {
    /// Builds the mirror from CONFIG_1..CONFIG_3 as read from the device.
    pub const fn from_registers(bytes: [u8; 3]) -> Self {
        DeviceConfig {
            config1: bytes[0],
            config2: bytes[1],
            config3: bytes[2],
        }
    }

    pub const fn to_registers(&self) -> [u8; 3] {
        [self.config1, self.config2, self.config3]
    }

    /// Cached byte for a configuration register address.
    pub(crate) fn register(&self, address: u8) -> u8 {
        match address {
            registers::CONFIG_1 => self.config1,
            registers::CONFIG_2 => self.config2,
            _ => self.config3,
        }
    }

    /// `register` with the bits under `mask` replaced by `bits`.
    pub(crate) fn merged(&self, address: u8, mask: u8, bits: u8) -> u8 {
        (self.register(address) & !mask) | (bits & mask)
    }

    pub(crate) fn set_register(&mut self, address: u8, value: u8) {
        match address {
            registers::CONFIG_1 => self.config1 = value,
            registers::CONFIG_2 => self.config2 = value,
            _ => self.config3 = value,
        }
    }

    pub fn mode(&self) -> OperatingMode {
        // Every 3-bit pattern is a valid mode
        OperatingMode::from_u8(self.config1 & registers::MODE_MASK).unwrap_or(OperatingMode::Off)
    }

    pub fn range(&self) -> Range {
        if self.config1 & registers::RANGE_MASK != 0 {
            Range::Lux10k
        } else {
            Range::Lux375
        }
    }

    pub fn resolution(&self) -> Resolution {
        if self.config1 & registers::RESOLUTION_MASK != 0 {
            Resolution::Bits12
        } else {
            Resolution::Bits16
        }
    }

    /// INT pin used as a conversion-start input.
    pub fn sync_input(&self) -> bool {
        self.config1 & registers::SYNC_MASK != 0
    }

    /// Reserved bit 6 is masked off, so the result is always legal.
    pub fn ir_compensation(&self) -> IrCompensation {
        IrCompensation::new(self.config2 & registers::IR_COMPENSATION_MASK).unwrap_or_default()
    }

    pub fn persistence(&self) -> Persistence {
        Persistence::from_u8(self.config3 & registers::PERSISTENCE_MASK).unwrap_or(Persistence::One)
    }

    pub fn irq_color(&self) -> IrqColor {
        IrqColor::from_u8(self.config3 & registers::IRQ_COLOR_MASK).unwrap_or(IrqColor::Off)
    }

    pub fn irq_on_conversion_done(&self) -> bool {
        self.config3 & registers::CONVERSION_DONE_MASK != 0
    }

    /// Scales a raw channel count to lux for the configured range and
    /// resolution. Linear, uncalibrated.
    pub fn count_to_lux(&self, count: u16) -> f32 {
        let full_scale = self.range().full_scale_lux() as f32;
        full_scale * f32::from(count) / f32::from(self.resolution().max_count())
    }
}

/// Start-up configuration applied with [`Isl29125::configure`](crate::Isl29125::configure).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    pub mode: OperatingMode,
    pub range: Range,
    pub resolution: Resolution,
    pub persistence: Persistence,
    pub irq_color: IrqColor,
    pub irq_on_conversion_done: bool,
    pub ir_compensation: IrCompensation,
    /// Written only when present.
    pub thresholds: Option<ThresholdPair>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            mode: OperatingMode::Rgb,
            range: Range::Lux10k,
            resolution: Resolution::Bits16,
            persistence: Persistence::One,
            irq_color: IrqColor::Off,
            irq_on_conversion_done: false,
            ir_compensation: IrCompensation::default(),
            thresholds: None,
        }
    }
}

impl SensorConfig {
    /// Indoor / dim scenes: 375 lux full scale.
    pub const fn low_light() -> Self {
        Self {
            mode: OperatingMode::Rgb,
            range: Range::Lux375,
            resolution: Resolution::Bits16,
            persistence: Persistence::One,
            irq_color: IrqColor::Off,
            irq_on_conversion_done: false,
            ir_compensation: IrCompensation::NONE,
            thresholds: None,
        }
    }

    /// Daylight: 10k lux full scale, fast 12-bit conversions.
    pub const fn bright_light() -> Self {
        Self {
            mode: OperatingMode::Rgb,
            range: Range::Lux10k,
            resolution: Resolution::Bits12,
            persistence: Persistence::One,
            irq_color: IrqColor::Off,
            irq_on_conversion_done: false,
            ir_compensation: IrCompensation::NONE,
            thresholds: None,
        }
    }

    /// Packs the configuration over `current`, keeping bits no field owns
    /// (e.g. the sync bit).
    pub fn apply_to(&self, current: &DeviceConfig) -> DeviceConfig {
        let config1 = current.merged(
            registers::CONFIG_1,
            registers::MODE_MASK | registers::RANGE_MASK | registers::RESOLUTION_MASK,
            self.mode.bits() | self.range.bits() | self.resolution.bits(),
        );
        let config2 = current.merged(
            registers::CONFIG_2,
            registers::IR_COMPENSATION_MASK,
            self.ir_compensation.raw(),
        );
        let conversion_done = if self.irq_on_conversion_done {
            registers::CONVERSION_DONE_MASK
        } else {
            0
        };
        let config3 = current.merged(
            registers::CONFIG_3,
            registers::IRQ_COLOR_MASK | registers::PERSISTENCE_MASK | registers::CONVERSION_DONE_MASK,
            self.irq_color.bits() | self.persistence.bits() | conversion_done,
        );
        DeviceConfig::from_registers([config1, config2, config3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_to_lux() {
        let close = |a: f32, b: f32| (a - b).abs() < 0.01;

        let dim = DeviceConfig::from_registers([0x05, 0, 0]);
        assert!(close(dim.count_to_lux(u16::MAX), 375.0));
        assert!(close(dim.count_to_lux(0), 0.0));

        let bright = DeviceConfig::from_registers([0x1D, 0, 0]);
        assert!(close(bright.count_to_lux(0x0FFF), 10_000.0));
        assert!(close(bright.count_to_lux(0x0800), 10_000.0 * 2048.0 / 4095.0));
    }

    #[test]
    fn test_decode_packed_registers() {
        let cfg = DeviceConfig::from_registers([0x3D, 0x85, 0x1E]);
        assert_eq!(cfg.mode(), OperatingMode::Rgb);
        assert_eq!(cfg.range(), Range::Lux10k);
        assert_eq!(cfg.resolution(), Resolution::Bits12);
        assert!(cfg.sync_input());
        assert_eq!(cfg.ir_compensation().raw(), 0x85);
        assert_eq!(cfg.persistence(), Persistence::Eight);
        assert_eq!(cfg.irq_color(), IrqColor::Red);
        assert!(cfg.irq_on_conversion_done());
    }

    #[test]
    fn test_reserved_ir_bit_masked() {
        let cfg = DeviceConfig::from_registers([0, 0x7F, 0]);
        assert_eq!(cfg.ir_compensation().raw(), 0x3F);
    }

    #[test]
    fn test_merged_only_touches_mask() {
        let cfg = DeviceConfig::from_registers([0x15, 0, 0]);
        // swap range in, keep 12-bit + RGB
        assert_eq!(cfg.merged(registers::CONFIG_1, registers::RANGE_MASK, 0x08), 0x1D);
        assert_eq!(cfg.merged(registers::CONFIG_1, registers::MODE_MASK, 0xFF), 0x17);
    }

    #[test]
    fn test_apply_keeps_sync_bit() {
        let current = DeviceConfig::from_registers([registers::SYNC_MASK, 0, 0]);
        let packed = SensorConfig::default().apply_to(&current);
        assert_eq!(packed.to_registers(), [0x2D, 0x00, 0x00]);

        let packed = SensorConfig::bright_light().apply_to(&DeviceConfig::default());
        assert_eq!(packed.resolution(), Resolution::Bits12);
        assert_eq!(packed.range(), Range::Lux10k);
        assert_eq!(SensorConfig::low_light().apply_to(&packed).to_registers(), [0x05, 0x00, 0x00]);
    }
}

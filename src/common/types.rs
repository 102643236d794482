// src/common/types.rs

use super::registers;
use core::convert::TryFrom;

/// Outcome of a configuration accessor call.
///
/// Replaces the legacy `0xFF` echo, which could mean both "you asked to
/// read" and "your write was rejected".
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access<T> {
    /// No value was supplied; this is the cached value. No bus traffic.
    Read(T),
    /// The value was validated, written to the device and cached.
    Written(T),
    /// The value is outside the field's legal set. Nothing was written.
    Rejected,
}

impl<T: Copy> Access<T> {
    /// The value carried by `Read` or `Written`.
    pub fn value(&self) -> Option<T> {
        match *self {
            Access::Read(v) | Access::Written(v) => Some(v),
            Access::Rejected => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Access::Rejected)
    }

    /// Collapses to the legacy single-byte contract (`0xFF` on rejection).
    pub fn to_legacy(&self) -> T
    where
        T: From<u8>,
    {
        self.value().unwrap_or_else(|| T::from(registers::READ_SENTINEL))
    }
}

/// Active ADC channels (CONFIG_1 bits 2..0).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OperatingMode {
    /// ADC powered down.
    Off = 0x00,
    Green = 0x01,
    Red = 0x02,
    Blue = 0x03,
    /// No conversion.
    Standby = 0x04,
    Rgb = 0x05,
    RedGreen = 0x06,
    BlueGreen = 0x07,
}

impl OperatingMode {
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(OperatingMode::Off),
            0x01 => Some(OperatingMode::Green),
            0x02 => Some(OperatingMode::Red),
            0x03 => Some(OperatingMode::Blue),
            0x04 => Some(OperatingMode::Standby),
            0x05 => Some(OperatingMode::Rgb),
            0x06 => Some(OperatingMode::RedGreen),
            0x07 => Some(OperatingMode::BlueGreen),
            _ => None,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Channels converted per cycle.
    pub const fn channel_count(self) -> u8 {
        match self {
            OperatingMode::Off | OperatingMode::Standby => 0,
            OperatingMode::Green | OperatingMode::Red | OperatingMode::Blue => 1,
            OperatingMode::RedGreen | OperatingMode::BlueGreen => 2,
            OperatingMode::Rgb => 3,
        }
    }
}

/// Full-scale sensing range (CONFIG_1 bit 3).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Range {
    Lux375 = 0x00,
    Lux10k = 0x08,
}

impl Range {
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Range::Lux375),
            0x08 => Some(Range::Lux10k),
            _ => None,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Lux value corresponding to a full-scale reading.
    pub const fn full_scale_lux(self) -> u32 {
        match self {
            Range::Lux375 => 375,
            Range::Lux10k => 10_000,
        }
    }
}

/// ADC resolution (CONFIG_1 bit 4).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Resolution {
    Bits16 = 0x00,
    Bits12 = 0x10,
}

impl Resolution {
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Resolution::Bits16),
            0x10 => Some(Resolution::Bits12),
            _ => None,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Largest count the ADC can report.
    pub const fn max_count(self) -> u16 {
        match self {
            Resolution::Bits16 => u16::MAX,
            Resolution::Bits12 => 0x0FFF,
        }
    }
}

/// Consecutive threshold hits before the interrupt asserts (CONFIG_3 bits 3..2).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Persistence {
    One = 0x00,
    Two = 0x04,
    Four = 0x08,
    Eight = 0x0C,
}

impl Persistence {
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Persistence::One),
            0x04 => Some(Persistence::Two),
            0x08 => Some(Persistence::Four),
            0x0C => Some(Persistence::Eight),
            _ => None,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn count(self) -> u8 {
        match self {
            Persistence::One => 1,
            Persistence::Two => 2,
            Persistence::Four => 4,
            Persistence::Eight => 8,
        }
    }
}

/// Channel compared against the thresholds (CONFIG_3 bits 1..0).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum IrqColor {
    Off = 0x00,
    Green = 0x01,
    Red = 0x02,
    Blue = 0x03,
}

impl IrqColor {
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(IrqColor::Off),
            0x01 => Some(IrqColor::Green),
            0x02 => Some(IrqColor::Red),
            0x03 => Some(IrqColor::Blue),
            _ => None,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Active IR compensation (CONFIG_2). Legal values are 0..=63 and 128..=191:
/// bits 5..0 adjust, bit 7 selects the offset, bit 6 is reserved.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrCompensation(u8);

impl IrCompensation {
    /// No compensation.
    pub const NONE: IrCompensation = IrCompensation(0);

    pub const fn new(value: u8) -> Option<Self> {
        if Self::is_valid(value) {
            Some(IrCompensation(value))
        } else {
            None
        }
    }

    #[inline]
    pub const fn is_valid(value: u8) -> bool {
        matches!(value, 0..=63 | 128..=191)
    }

    #[inline]
    pub const fn raw(&self) -> u8 {
        self.0
    }

    /// Bits 5..0.
    #[inline]
    pub const fn adjust(&self) -> u8 {
        self.0 & 0x3F
    }

    /// Bit 7.
    #[inline]
    pub const fn offset(&self) -> bool {
        self.0 & 0x80 != 0
    }
}

impl TryFrom<u8> for IrCompensation {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(value)
    }
}

/// How conversions are started and observed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SamplingMode {
    /// Device converts continuously; the host polls.
    #[default]
    FreeRunning,
    /// Conversions run continuously and INT asserts on each completed one;
    /// the host waits on the pin before reading.
    Interrupt,
    /// Each conversion is started explicitly with [`Isl29125::run`](crate::Isl29125::run),
    /// an I2C write to CONFIG_1.
    Sync,
}

/// One of the three measured colors.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Publication order used by the scheduler.
    pub const PUBLISH_ORDER: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of the channel in a device-order (green, red, blue) buffer.
    pub const fn device_index(self) -> usize {
        match self {
            Channel::Green => 0,
            Channel::Red => 1,
            Channel::Blue => 2,
        }
    }
}

/// Channels requested by [`Isl29125::read`](crate::Isl29125::read).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ChannelSelector {
    Green = 0x01,
    Red = 0x02,
    Blue = 0x03,
    /// All three, returned in device order: green, red, blue.
    Rgb = 0x05,
}

impl ChannelSelector {
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(ChannelSelector::Green),
            0x02 => Some(ChannelSelector::Red),
            0x03 => Some(ChannelSelector::Blue),
            0x05 => Some(ChannelSelector::Rgb),
            _ => None,
        }
    }

    /// First data register of the selection.
    pub const fn data_register(self) -> u8 {
        match self {
            ChannelSelector::Green | ChannelSelector::Rgb => registers::GREEN_DATA,
            ChannelSelector::Red => registers::RED_DATA,
            ChannelSelector::Blue => registers::BLUE_DATA,
        }
    }

    /// Number of 16-bit words the selection produces.
    pub const fn word_count(self) -> usize {
        match self {
            ChannelSelector::Rgb => 3,
            _ => 1,
        }
    }
}

impl From<Channel> for ChannelSelector {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::Red => ChannelSelector::Red,
            Channel::Green => ChannelSelector::Green,
            Channel::Blue => ChannelSelector::Blue,
        }
    }
}

/// Selects both the threshold register and the transfer direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ThresholdRegister {
    LowWrite = 0x04,
    HighWrite = 0x06,
    LowRead = 0x02,
    HighRead = 0x03,
}

impl ThresholdRegister {
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x04 => Some(ThresholdRegister::LowWrite),
            0x06 => Some(ThresholdRegister::HighWrite),
            0x02 => Some(ThresholdRegister::LowRead),
            0x03 => Some(ThresholdRegister::HighRead),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, ThresholdRegister::LowWrite | ThresholdRegister::HighWrite)
    }

    /// Physical register holding the low byte.
    pub const fn address(self) -> u8 {
        match self {
            ThresholdRegister::LowWrite | ThresholdRegister::LowRead => registers::LOW_THRESHOLD,
            ThresholdRegister::HighWrite | ThresholdRegister::HighRead => registers::HIGH_THRESHOLD,
        }
    }
}

/// Low/high interrupt thresholds. Ordering between them is the caller's business.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdPair {
    pub low: u16,
    pub high: u16,
}

/// Channel being converted when the status register was read.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionColor {
    None,
    Green,
    Red,
    Blue,
}

/// Decoded status register. Obtaining one clears the interrupt flag on the
/// device, so two consecutive snapshots can differ.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot(u8);

impl StatusSnapshot {
    #[inline]
    pub const fn from_raw(raw: u8) -> Self {
        StatusSnapshot(raw)
    }

    #[inline]
    pub const fn raw(&self) -> u8 {
        self.0
    }

    pub const fn active_conversion(&self) -> ConversionColor {
        match (self.0 & registers::STATUS_COLOR_MASK) >> registers::STATUS_COLOR_SHIFT {
            0b01 => ConversionColor::Green,
            0b10 => ConversionColor::Red,
            0b11 => ConversionColor::Blue,
            _ => ConversionColor::None,
        }
    }

    #[inline]
    pub const fn brownout(&self) -> bool {
        self.0 & registers::STATUS_BROWNOUT != 0
    }

    #[inline]
    pub const fn conversion_complete(&self) -> bool {
        self.0 & registers::STATUS_CONVERSION_COMPLETE != 0
    }

    #[inline]
    pub const fn interrupt(&self) -> bool {
        self.0 & registers::STATUS_INTERRUPT != 0
    }
}

/// One three-channel reading.
///
/// The device delivers channels as green, red, blue; `from_device_order`
/// and `to_device_order` keep that ordering explicit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub green: u16,
    pub red: u16,
    pub blue: u16,
    /// A conversion not previously retrieved.
    pub fresh: bool,
}

impl Sample {
    pub const fn from_device_order(words: [u16; 3], fresh: bool) -> Self {
        Sample {
            green: words[0],
            red: words[1],
            blue: words[2],
            fresh,
        }
    }

    pub const fn to_device_order(&self) -> [u16; 3] {
        [self.green, self.red, self.blue]
    }

    pub const fn channel(&self, channel: Channel) -> u16 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }
}

// src/common/registers.rs

// Register map from the ISL29125 datasheet (FN8424). All multi-byte values
// are little-endian and the register pointer auto-increments on block access.

/// Fixed 7-bit I2C address of the ISL29125.
pub const DEFAULT_ADDRESS: u8 = 0x44;

// === Register addresses ===

/// Device ID (read) / reset (write `RESET_COMMAND`).
pub const DEVICE_ID: u8 = 0x00;
/// Mode, range, resolution, sync.
pub const CONFIG_1: u8 = 0x01;
/// IR compensation.
pub const CONFIG_2: u8 = 0x02;
/// Interrupt color, persistence, conversion-done interrupt.
pub const CONFIG_3: u8 = 0x03;
pub const LOW_THRESHOLD: u8 = 0x04;
pub const HIGH_THRESHOLD: u8 = 0x06;
/// Reading this register clears `STATUS_INTERRUPT` on the device.
pub const STATUS: u8 = 0x08;
pub const GREEN_DATA: u8 = 0x09;
pub const RED_DATA: u8 = 0x0B;
pub const BLUE_DATA: u8 = 0x0D;

// === Fixed values ===

/// Expected content of `DEVICE_ID`.
pub const EXPECTED_DEVICE_ID: u8 = 0x7D;
/// Writing this to `DEVICE_ID` resets every register to its power-on value.
pub const RESET_COMMAND: u8 = 0x46;
/// Legacy accessor argument meaning "read the cached value".
pub const READ_SENTINEL: u8 = 0xFF;

// === CONFIG_1 fields ===

pub const MODE_MASK: u8 = 0x07;
pub const RANGE_MASK: u8 = 0x08;
pub const RESOLUTION_MASK: u8 = 0x10;
pub const SYNC_MASK: u8 = 0x20;

// === CONFIG_2 fields ===

/// Bit 7 offset plus bits 5..0 adjust. Bit 6 is reserved.
pub const IR_COMPENSATION_MASK: u8 = 0xBF;

// === CONFIG_3 fields ===

pub const IRQ_COLOR_MASK: u8 = 0x03;
pub const PERSISTENCE_MASK: u8 = 0x0C;
pub const CONVERSION_DONE_MASK: u8 = 0x10;

// === STATUS fields ===

pub const STATUS_INTERRUPT: u8 = 0x01;
pub const STATUS_CONVERSION_COMPLETE: u8 = 0x02;
pub const STATUS_BROWNOUT: u8 = 0x04;
pub const STATUS_COLOR_MASK: u8 = 0x30;
pub const STATUS_COLOR_SHIFT: u8 = 4;

// src/common/hal_traits.rs

use core::fmt::Debug;

/// Abstraction for register access on a 7-bit addressed peripheral.
///
/// Every call is one blocking bus transaction. A NACK or timeout surfaces as
/// `Err` with no retry; whatever the bus already clocked out stays clocked out.
pub trait RegisterBus {
    /// Associated error type for bus failures.
    type Error: Debug;

    /// Reads `buffer.len()` consecutive bytes starting at register `address`.
    fn read_block(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Writes `bytes` in one transaction. The first byte is the start register,
    /// the remaining bytes land in consecutive registers.
    fn write_block(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Reads a single register.
    fn read_byte(&mut self, address: u8) -> Result<u8, Self::Error> {
        let mut byte = [0u8; 1];
        self.read_block(address, &mut byte)?;
        Ok(byte[0])
    }
}

/// [`RegisterBus`] over any embedded-hal 1.0 I2C implementation.
///
/// Register reads use a repeated-start `write_read`, writes a plain `write`.
#[cfg(feature = "impl-native")]
#[derive(Debug)]
pub struct I2cRegisterBus<I> {
    i2c: I,
    address: u8,
}

#[cfg(feature = "impl-native")]
impl<I> I2cRegisterBus<I>
where
    I: embedded_hal::i2c::I2c,
{
    pub fn new(i2c: I, address: u8) -> Self {
        I2cRegisterBus { i2c, address }
    }

    #[inline]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Hands back the I2C peripheral.
    pub fn release(self) -> I {
        self.i2c
    }
}

#[cfg(feature = "impl-native")]
impl<I> RegisterBus for I2cRegisterBus<I>
where
    I: embedded_hal::i2c::I2c,
{
    type Error = I::Error;

    fn read_block(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[address], buffer)
    }

    fn write_block(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(self.address, bytes)
    }
}

#[cfg(all(test, feature = "impl-native"))]
mod tests {
    use super::*;
    use crate::common::registers;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    const ADDR: u8 = registers::DEFAULT_ADDRESS;

    #[test]
    fn test_read_byte_uses_write_read() {
        let expectations = [Transaction::write_read(ADDR, vec![registers::DEVICE_ID], vec![0x7D])];
        let mut bus = I2cRegisterBus::new(I2cMock::new(&expectations), ADDR);

        assert_eq!(bus.read_byte(registers::DEVICE_ID), Ok(0x7D));
        bus.release().done();
    }

    #[test]
    fn test_read_block() {
        let expectations = [Transaction::write_read(
            ADDR,
            vec![registers::GREEN_DATA],
            vec![0x64, 0x00, 0xC8, 0x00, 0x32, 0x00],
        )];
        let mut bus = I2cRegisterBus::new(I2cMock::new(&expectations), ADDR);
        let mut buf = [0u8; 6];

        assert!(bus.read_block(registers::GREEN_DATA, &mut buf).is_ok());
        assert_eq!(buf, [0x64, 0x00, 0xC8, 0x00, 0x32, 0x00]);
        bus.release().done();
    }

    #[test]
    fn test_write_block() {
        let expectations = [Transaction::write(ADDR, vec![registers::HIGH_THRESHOLD, 0x34, 0x12])];
        let mut bus = I2cRegisterBus::new(I2cMock::new(&expectations), ADDR);

        assert!(bus.write_block(&[registers::HIGH_THRESHOLD, 0x34, 0x12]).is_ok());
        bus.release().done();
    }

    #[test]
    fn test_nack_surfaces_as_error() {
        let expectations = [Transaction::write(ADDR, vec![registers::CONFIG_1, 0x05])
            .with_error(ErrorKind::Other)];
        let mut bus = I2cRegisterBus::new(I2cMock::new(&expectations), ADDR);

        assert_eq!(bus.write_block(&[registers::CONFIG_1, 0x05]), Err(ErrorKind::Other));
        bus.release().done();
    }
}

// src/driver/mock.rs

// Register-file stand-in for the ISL29125, shared by driver and scheduler tests.

use crate::common::{hal_traits::RegisterBus, registers};
use heapless::Vec;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockBusError;

#[derive(Debug)]
pub(crate) struct MockBus {
    pub regs: [u8; 16],
    /// Every successful write transaction, register address first.
    pub writes: Vec<Vec<u8, 8>, 64>,
    /// Successful read transactions.
    pub reads: u32,
    /// When set, every transaction NACKs.
    pub fail: bool,
}

impl MockBus {
    pub fn new() -> Self {
        let mut regs = [0u8; 16];
        regs[registers::DEVICE_ID as usize] = registers::EXPECTED_DEVICE_ID;
        MockBus {
            regs,
            writes: Vec::new(),
            reads: 0,
            fail: false,
        }
    }

    /// Loads the data registers and flags a completed conversion.
    pub fn stage_sample(&mut self, green: u16, red: u16, blue: u16) {
        for (reg, value) in [
            (registers::GREEN_DATA, green),
            (registers::RED_DATA, red),
            (registers::BLUE_DATA, blue),
        ] {
            let [lo, hi] = value.to_le_bytes();
            self.regs[reg as usize] = lo;
            self.regs[reg as usize + 1] = hi;
        }
        self.regs[registers::STATUS as usize] |= registers::STATUS_CONVERSION_COMPLETE;
    }

    /// Drops the conversion-complete flag, as if the data was already fetched.
    pub fn clear_conversion(&mut self) {
        self.regs[registers::STATUS as usize] &= !registers::STATUS_CONVERSION_COMPLETE;
    }

    pub fn last_write(&self) -> Option<&[u8]> {
        self.writes.last().map(|w| w.as_slice())
    }
}

impl RegisterBus for MockBus {
    type Error = MockBusError;

    fn read_block(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockBusError);
        }
        let start = address as usize;
        buffer.copy_from_slice(&self.regs[start..start + buffer.len()]);
        if (start..start + buffer.len()).contains(&(registers::STATUS as usize)) {
            self.regs[registers::STATUS as usize] &= !registers::STATUS_INTERRUPT;
        }
        self.reads += 1;
        Ok(())
    }

    fn write_block(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockBusError);
        }
        let (&address, data) = bytes.split_first().ok_or(MockBusError)?;
        if address == registers::DEVICE_ID && data == [registers::RESET_COMMAND] {
            self.regs = [0u8; 16];
            self.regs[registers::DEVICE_ID as usize] = registers::EXPECTED_DEVICE_ID;
        } else {
            let start = address as usize;
            self.regs[start..start + data.len()].copy_from_slice(data);
        }
        let mut entry = Vec::new();
        entry.extend_from_slice(bytes).map_err(|_| MockBusError)?;
        self.writes.push(entry).map_err(|_| MockBusError)?;
        Ok(())
    }
}

// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod config;
pub mod error;
pub mod hal_traits;
pub mod registers;
pub mod timing;
pub mod types;

// --- Re-export key types/traits for easier access ---

// From config.rs
pub use config::{DeviceConfig, SensorConfig};

// From error.rs
pub use error::Isl29125Error;

// From hal_traits.rs
pub use hal_traits::RegisterBus;

// From types.rs
pub use types::{
    Access, Channel, ChannelSelector, ConversionColor, IrCompensation, IrqColor, OperatingMode,
    Persistence, Range, Resolution, Sample, SamplingMode, StatusSnapshot, ThresholdPair,
    ThresholdRegister,
};

// Native HAL integration (from hal_traits.rs)
#[cfg(feature = "impl-native")]
pub use hal_traits::I2cRegisterBus;

#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod device;
pub mod interface;
pub mod registers;
pub mod sensors;
pub mod service;

// Re-export main types
pub use config::{DriverConfig, SamplerConfig};
pub use device::Mpu9250Driver;
pub use interface::I2cInterface;
pub use sensors::{BitField, RawSample, Vector3D, convert_axis};
pub use service::{AccelerometerService, MAX_SUBSCRIBERS, SubscriptionId};

/// MPU-9250 I2C address when AD0 pin is low (default: 0x68)
///
/// Use [`I2cInterface::default()`] for this configuration.
pub const I2C_ADDRESS_AD0_LOW: u8 = 0x68;

/// MPU-9250 I2C address when AD0 pin is high (alternative: 0x69)
///
/// Use [`I2cInterface::alternative()`] for this configuration.
pub const I2C_ADDRESS_AD0_HIGH: u8 = 0x69;

/// Full-scale magnitude applied to every converted axis, in output units
pub const SCALE: f32 = 65550.0;

/// Clock source selector for the auto-selecting PLL
pub const CLOCK_SOURCE_PLL: u8 = 1;

/// Highest valid clock source selector
pub const CLOCK_SOURCE_MAX: u8 = 7;

/// Gyroscope full-scale selector for ±250 °/s
pub const GYRO_FULL_SCALE_250DPS: u8 = 0;

/// Highest valid gyroscope full-scale selector (±2000 °/s)
pub const GYRO_FULL_SCALE_MAX: u8 = 3;

/// Accelerometer full-scale selector for ±8g
pub const ACCEL_FULL_SCALE_8G: u8 = 2;

/// Smallest accelerometer selector that [`Mpu9250Driver::set_full_scale_accel_range`]
/// writes to the device. Lower selectors are accepted and ignored.
pub const ACCEL_FULL_SCALE_WRITE_THRESHOLD: u8 = 3;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Configuration value outside the accepted domain (no bus traffic was issued)
    InvalidArgument,
    /// The sampling service already holds [`MAX_SUBSCRIBERS`] consumers
    SubscriberLimit,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}

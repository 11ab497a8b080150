//! Sensor data types for the MPU-9250
//!
//! Only the accelerometer path is implemented. Gyroscope and magnetometer
//! registers are configured where the accelerometer needs them but never read.

pub mod accelerometer;

// Re-export main types
pub use accelerometer::{BitField, RawSample, Vector3D, convert_axis, twelve_bit_signed};

//! Accelerometer sample types and raw-to-physical conversion
//!
//! The MPU-9250 reports each axis as a big-endian 16-bit two's-complement
//! value. This driver keeps the top 12 bits of each reading and scales them
//! to [`SCALE`](crate::SCALE) output units.

use crate::SCALE;

/// Divisor normalizing a 12-bit signed value to the interval `[-1, 1)`
const TWELVE_BIT_FULL_SCALE: f32 = 2048.0;

/// A sub-range of bits within a register byte
///
/// Describes where a field lives so that a read-modify-write only touches
/// the field's bits. The driver's setters go through the generated register
/// accessors in [`crate::registers`], which do their own masking; only
/// [`max_value`](Self::max_value) of [`ACCEL_FULL_SCALE`](Self::ACCEL_FULL_SCALE)
/// is used internally. The constants, [`apply`](Self::apply) and
/// [`extract`](Self::extract) mirror the generated layout so callers can
/// decode raw register bytes and check expected values against a bus trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitField {
    /// Mask of the field in register position
    pub mask: u8,
    /// Position of the field's least significant bit
    pub shift: u8,
}

impl BitField {
    /// `PWR_MGMT_1` clock select, bits 0..=2
    pub const CLOCK_SELECT: Self = Self::new(0x07, 0);
    /// `PWR_MGMT_1` sleep, bit 6
    pub const SLEEP: Self = Self::new(0x40, 6);
    /// `GYRO_CONFIG` full-scale select, bits 3..=4
    pub const GYRO_FULL_SCALE: Self = Self::new(0x18, 3);
    /// `ACCEL_CONFIG` full-scale select, bits 3..=4
    pub const ACCEL_FULL_SCALE: Self = Self::new(0x18, 3);

    /// Create a field description from a positioned mask and its shift
    #[must_use]
    pub const fn new(mask: u8, shift: u8) -> Self {
        Self { mask, shift }
    }

    /// Largest value the field can hold
    #[must_use]
    pub const fn max_value(self) -> u8 {
        self.mask >> self.shift
    }

    /// Replace the field in `register` with `value`, leaving every other bit as-is
    ///
    /// `value` is truncated to the field width.
    #[must_use]
    pub const fn apply(self, register: u8, value: u8) -> u8 {
        (register & !self.mask) | ((value << self.shift) & self.mask)
    }

    /// Extract the field value from a register byte
    #[must_use]
    pub const fn extract(self, register: u8) -> u8 {
        (register & self.mask) >> self.shift
    }
}

/// Six raw accelerometer bytes, as returned by one burst read
///
/// Order is X high, X low, Y high, Y low, Z high, Z low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample(pub [u8; 6]);

impl RawSample {
    /// Convert all three axes to a physical-unit vector
    #[must_use]
    pub fn to_vector(&self) -> Vector3D {
        let [xh, xl, yh, yl, zh, zl] = self.0;
        Vector3D {
            x: convert_axis(xh, xl),
            y: convert_axis(yh, yl),
            z: convert_axis(zh, zl),
        }
    }
}

/// Acceleration vector in [`SCALE`](crate::SCALE) output units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3D {
    /// X-axis magnitude
    pub x: f32,
    /// Y-axis magnitude
    pub y: f32,
    /// Z-axis magnitude
    pub z: f32,
}

impl Vector3D {
    /// Create a vector from its components
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm of the vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Sign-extend the top 12 bits of a big-endian register pair
///
/// Input: any `high`/`low` byte pair. Output: a value in `-2048..=2047`.
/// The low nibble of `low` is discarded. Sign extension is done on the
/// 12-bit value itself, so the result does not depend on the width of the
/// integer type the shift happens in.
#[must_use]
pub const fn twelve_bit_signed(high: u8, low: u8) -> i16 {
    let unsigned = (((high as u16) << 8) | low as u16) >> 4;
    if unsigned & 0x0800 != 0 {
        unsigned as i16 - 0x1000
    } else {
        unsigned as i16
    }
}

/// Convert one axis register pair to a physical magnitude
///
/// `magnitude = (raw12 / 2^11) * SCALE`, where `raw12` is
/// [`twelve_bit_signed`]`(high, low)`. Output lies in
/// `[-SCALE, SCALE * 2047 / 2048]`.
#[must_use]
pub fn convert_axis(high: u8, low: u8) -> f32 {
    let raw = twelve_bit_signed(high, low);
    (f32::from(raw) / TWELVE_BIT_FULL_SCALE) * SCALE
}

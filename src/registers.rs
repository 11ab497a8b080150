//! Register definitions for the MPU-9250
//!
//! Only the registers the accelerometer path touches are declared here. The
//! MPU-9250 has a flat 7-bit register space (no banks), so every address is
//! unique and no overlap is declared.
//!
//! The accelerometer output block (`ACCEL_XOUT_H`..`ACCEL_ZOUT_L`) is read as a
//! single 6-byte burst through the interface rather than as six registers; see
//! [`ACCEL_XOUT_H`].

device_driver::create_device!(
    device_name: Mpu9250,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// RANGE_CONTROL - Reading Range Control (0x0F)
        ///
        /// Written as a whole byte, never read-modify-written.
        register RangeControl {
            const ADDRESS = 0x0F;
            const SIZE_BITS = 8;

            /// Reading range value
            reading_range: uint = 0..8,
        },

        /// GYRO_CONFIG - Gyroscope Configuration (0x1B)
        register GyroConfig {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 8;

            /// Bypass of the digital low pass filter
            fchoice_b: uint = 0..2,
            reserved_2: uint = 2..3,
            /// Full scale select (0=250dps, 1=500dps, 2=1000dps, 3=2000dps)
            gyro_fs_sel: uint = 3..5,
            /// Z gyro self-test
            zgyro_cten: bool = 5,
            /// Y gyro self-test
            ygyro_cten: bool = 6,
            /// X gyro self-test
            xgyro_cten: bool = 7,
        },

        /// ACCEL_CONFIG - Accelerometer Configuration (0x1C)
        register AccelConfig {
            const ADDRESS = 0x1C;
            const SIZE_BITS = 8;

            reserved_2_0: uint = 0..3,
            /// Full scale select (0=2g, 1=4g, 2=8g, 3=16g)
            accel_fs_sel: uint = 3..5,
            /// Z accel self-test
            az_st_en: bool = 5,
            /// Y accel self-test
            ay_st_en: bool = 6,
            /// X accel self-test
            ax_st_en: bool = 7,
        },

        /// PWR_MGMT_1 - Power Management 1 (0x6B)
        register PwrMgmt1 {
            const ADDRESS = 0x6B;
            const SIZE_BITS = 8;

            /// Clock source select (0=internal 20MHz, 1-5=auto select PLL, 6=internal, 7=stop)
            clksel: uint = 0..3,
            /// Power down the PTAT voltage generator
            pd_ptat: bool = 3,
            /// Gyro standby
            gyro_standby: bool = 4,
            /// Cycle between sleep and sampling
            cycle: bool = 5,
            /// Sleep mode enable
            sleep: bool = 6,
            /// Device reset
            h_reset: bool = 7,
        }
    }
);

// Re-export commonly used types for convenience
pub use Mpu9250 as RegisterDevice;

/// ACCEL_XOUT_H - first of the six accelerometer output registers (0x3B..=0x40)
pub const ACCEL_XOUT_H: u8 = 0x3B;

/// Number of bytes in one accelerometer burst (X, Y, Z high/low)
pub const ACCEL_BURST_LEN: usize = 6;

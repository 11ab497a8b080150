//! High-level driver API for the MPU-9250
//!
//! Wraps the register map with semantically named operations. Every setter
//! is a read-modify-write of exactly one register field, except
//! [`set_reading_range`](Mpu9250Driver::set_reading_range) which overwrites
//! its whole register. Sample reads are one 6-byte burst.

use crate::config::DriverConfig;
use crate::registers::{ACCEL_BURST_LEN, ACCEL_XOUT_H, RegisterDevice};
use crate::sensors::{BitField, RawSample, Vector3D};
use crate::{
    ACCEL_FULL_SCALE_8G, ACCEL_FULL_SCALE_WRITE_THRESHOLD, CLOCK_SOURCE_MAX, CLOCK_SOURCE_PLL,
    Error, GYRO_FULL_SCALE_250DPS, GYRO_FULL_SCALE_MAX,
};

// Only import RegisterInterface when not using async feature
#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

/// Burst length in bits, as passed to the register interface
const ACCEL_BURST_BITS: u32 = (ACCEL_BURST_LEN * 8) as u32;

/// Main driver for the MPU-9250 accelerometer
pub struct Mpu9250Driver<I> {
    device: RegisterDevice<I>,
    config: DriverConfig,
}

impl<I> Mpu9250Driver<I> {
    /// Create a new driver over the given register interface
    ///
    /// No bus traffic is issued. Call `initialize()` to configure the device.
    pub fn new(interface: I) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            config: DriverConfig::default(),
        }
    }

    /// Configuration last written by this driver
    #[must_use]
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Selectable reading ranges
    ///
    /// The driver does not enumerate ranges; the answer is always unknown.
    #[must_use]
    pub const fn supported_ranges(&self) -> Option<&'static [u8]> {
        None
    }

    /// Current reading range
    ///
    /// The range control register is write-only from this driver's point of
    /// view, so the current value is always unknown.
    #[must_use]
    pub const fn reading_range(&self) -> Option<u8> {
        None
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }
}

#[cfg(not(feature = "async"))]
impl<I> Mpu9250Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Bring the device into a known measuring state
    ///
    /// In order: clock source to PLL, gyro range to ±250 °/s, accel range to
    /// ±8g, sleep cleared. Each step is a read-modify-write. A failure stops
    /// the sequence and leaves the earlier steps applied.
    ///
    /// The accel step writes the ±8g selector directly; it is not subject to
    /// the threshold of [`set_full_scale_accel_range`](Self::set_full_scale_accel_range).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn initialize(&mut self) -> Result<(), Error<I::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU-9250: initializing");

        self.set_clock_source(CLOCK_SOURCE_PLL)?;
        self.set_full_scale_gyro_range(GYRO_FULL_SCALE_250DPS)?;
        self.write_accel_full_scale(ACCEL_FULL_SCALE_8G)?;
        self.set_sleep_enabled(false)?;

        #[cfg(feature = "defmt")]
        defmt::info!("MPU-9250: initialized");

        Ok(())
    }

    /// Set clock source (0-7)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for `source > 7` without touching
    /// the bus, or a bus error if communication fails.
    pub fn set_clock_source(&mut self, source: u8) -> Result<(), Error<I::Error>> {
        if source > CLOCK_SOURCE_MAX {
            return Err(Error::InvalidArgument);
        }

        self.device.pwr_mgmt_1().modify(|w| {
            w.set_clksel(source);
        })?;

        self.config.clock_source = Some(source);
        Ok(())
    }

    /// Set gyroscope full-scale range selector (0-3)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for `range > 3` without touching
    /// the bus, or a bus error if communication fails.
    pub fn set_full_scale_gyro_range(&mut self, range: u8) -> Result<(), Error<I::Error>> {
        if range > GYRO_FULL_SCALE_MAX {
            return Err(Error::InvalidArgument);
        }

        self.device.gyro_config().modify(|w| {
            w.set_gyro_fs_sel(range);
        })?;

        self.config.gyro_full_scale = Some(range);
        Ok(())
    }

    /// Set accelerometer full-scale range selector
    ///
    /// Selectors below 3 are ignored: no bus traffic, no error. Selectors of 3
    /// and above are masked to the 2-bit field and written.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_full_scale_accel_range(&mut self, range: u8) -> Result<(), Error<I::Error>> {
        if range < ACCEL_FULL_SCALE_WRITE_THRESHOLD {
            return Ok(());
        }

        self.write_accel_full_scale(range)
    }

    fn write_accel_full_scale(&mut self, range: u8) -> Result<(), Error<I::Error>> {
        let selector = range & BitField::ACCEL_FULL_SCALE.max_value();

        self.device.accel_config().modify(|w| {
            w.set_accel_fs_sel(selector);
        })?;

        self.config.accel_full_scale = Some(selector);
        Ok(())
    }

    /// Enable or disable sleep mode
    ///
    /// Only the sleep bit changes; clock select and the other power bits are
    /// written back as read.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sleep_enabled(&mut self, enabled: bool) -> Result<(), Error<I::Error>> {
        self.device.pwr_mgmt_1().modify(|w| {
            w.set_sleep(enabled);
        })?;

        self.config.sleep_enabled = Some(enabled);
        Ok(())
    }

    /// Overwrite the reading range control register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_reading_range(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.device.range_control().write(|w| {
            w.set_reading_range(value);
        })?;
        Ok(())
    }

    /// Read the six accelerometer output bytes in one burst
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_raw_sample(&mut self) -> Result<RawSample, Error<I::Error>> {
        let mut buffer = [0u8; ACCEL_BURST_LEN];
        self.device
            .interface
            .read_register(ACCEL_XOUT_H, ACCEL_BURST_BITS, &mut buffer)?;
        Ok(RawSample(buffer))
    }

    /// Read one acceleration sample
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_sample(&mut self) -> Result<Vector3D, Error<I::Error>> {
        Ok(self.read_raw_sample()?.to_vector())
    }
}

#[cfg(feature = "async")]
impl<I> Mpu9250Driver<I>
where
    I: device_driver::AsyncRegisterInterface<AddressType = u8>,
{
    /// Bring the device into a known measuring state
    ///
    /// In order: clock source to PLL, gyro range to ±250 °/s, accel range to
    /// ±8g, sleep cleared. Each step is a read-modify-write. A failure stops
    /// the sequence and leaves the earlier steps applied.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn initialize(&mut self) -> Result<(), Error<I::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU-9250: initializing");

        self.set_clock_source(CLOCK_SOURCE_PLL).await?;
        self.set_full_scale_gyro_range(GYRO_FULL_SCALE_250DPS)
            .await?;
        self.write_accel_full_scale(ACCEL_FULL_SCALE_8G).await?;
        self.set_sleep_enabled(false).await?;

        #[cfg(feature = "defmt")]
        defmt::info!("MPU-9250: initialized");

        Ok(())
    }

    /// Set clock source (0-7)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for `source > 7` without touching
    /// the bus, or a bus error if communication fails.
    pub async fn set_clock_source(&mut self, source: u8) -> Result<(), Error<I::Error>> {
        if source > CLOCK_SOURCE_MAX {
            return Err(Error::InvalidArgument);
        }

        self.device
            .pwr_mgmt_1()
            .modify_async(|w| {
                w.set_clksel(source);
            })
            .await?;

        self.config.clock_source = Some(source);
        Ok(())
    }

    /// Set gyroscope full-scale range selector (0-3)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for `range > 3` without touching
    /// the bus, or a bus error if communication fails.
    pub async fn set_full_scale_gyro_range(&mut self, range: u8) -> Result<(), Error<I::Error>> {
        if range > GYRO_FULL_SCALE_MAX {
            return Err(Error::InvalidArgument);
        }

        self.device
            .gyro_config()
            .modify_async(|w| {
                w.set_gyro_fs_sel(range);
            })
            .await?;

        self.config.gyro_full_scale = Some(range);
        Ok(())
    }

    /// Set accelerometer full-scale range selector
    ///
    /// Selectors below 3 are ignored: no bus traffic, no error.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_full_scale_accel_range(&mut self, range: u8) -> Result<(), Error<I::Error>> {
        if range < ACCEL_FULL_SCALE_WRITE_THRESHOLD {
            return Ok(());
        }

        self.write_accel_full_scale(range).await
    }

    async fn write_accel_full_scale(&mut self, range: u8) -> Result<(), Error<I::Error>> {
        let selector = range & BitField::ACCEL_FULL_SCALE.max_value();

        self.device
            .accel_config()
            .modify_async(|w| {
                w.set_accel_fs_sel(selector);
            })
            .await?;

        self.config.accel_full_scale = Some(selector);
        Ok(())
    }

    /// Enable or disable sleep mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_sleep_enabled(&mut self, enabled: bool) -> Result<(), Error<I::Error>> {
        self.device
            .pwr_mgmt_1()
            .modify_async(|w| {
                w.set_sleep(enabled);
            })
            .await?;

        self.config.sleep_enabled = Some(enabled);
        Ok(())
    }

    /// Overwrite the reading range control register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_reading_range(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.device
            .range_control()
            .write_async(|w| {
                w.set_reading_range(value);
            })
            .await?;
        Ok(())
    }

    /// Read the six accelerometer output bytes in one burst
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_raw_sample(&mut self) -> Result<RawSample, Error<I::Error>> {
        let mut buffer = [0u8; ACCEL_BURST_LEN];
        self.device
            .interface
            .read_register(ACCEL_XOUT_H, ACCEL_BURST_BITS, &mut buffer)
            .await?;
        Ok(RawSample(buffer))
    }

    /// Read one acceleration sample
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_sample(&mut self) -> Result<Vector3D, Error<I::Error>> {
        Ok(self.read_raw_sample().await?.to_vector())
    }
}

//! Driver and sampler configuration

/// Logical configuration last written to the device
///
/// Fields start as `None` and are updated only after the corresponding
/// register write succeeds. The values are the selectors as written, not a
/// read-back of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    /// Clock source selector (0-7)
    pub clock_source: Option<u8>,
    /// Gyroscope full-scale selector (0-3)
    pub gyro_full_scale: Option<u8>,
    /// Accelerometer full-scale selector, as stored in the 2-bit field
    pub accel_full_scale: Option<u8>,
    /// Sleep mode flag
    pub sleep_enabled: Option<bool>,
}

/// Periodic sampling configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerConfig {
    /// Delay before each sampling read in milliseconds
    ///
    /// The delay runs before the read rather than on a fixed-rate timer, so
    /// the effective period is `period_ms` plus the burst read and subscriber
    /// callbacks, and drifts accordingly.
    pub period_ms: u32,
}

impl SamplerConfig {
    /// Default tick period
    pub const DEFAULT_PERIOD_MS: u32 = 50;

    /// Sampling rate in Hz implied by the period
    #[must_use]
    pub fn rate_hz(&self) -> f32 {
        if self.period_ms == 0 {
            return f32::INFINITY;
        }
        1000.0 / self.period_ms as f32
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            period_ms: Self::DEFAULT_PERIOD_MS,
        }
    }
}

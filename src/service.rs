//! Periodic accelerometer sampling
//!
//! [`AccelerometerService`] owns one [`Mpu9250Driver`], initializes it once
//! in `start()`, and then produces one sample per tick for every subscribed
//! consumer.
//!
//! A tick waits one period on the injected delay, burst-reads the
//! accelerometer, and fans the converted vector out to all consumers. A
//! failed read is counted in [`missed_ticks`](AccelerometerService::missed_ticks)
//! and skipped: no value is delivered for that tick and the next tick runs as
//! usual. Ticks never overlap because each one runs to completion before the
//! next delay starts.
//!
//! `run()` repeats ticks until a stop [`Signal`] fires. A sample read during
//! the tick that is cancelled is dropped, never delivered.
//!
//! # Example
//!
//! ```ignore
//! use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
//! use mpu9250::{AccelerometerService, I2cInterface, SamplerConfig};
//!
//! static STOP: Signal<CriticalSectionRawMutex, ()> = Signal::new();
//!
//! let mut service =
//!     AccelerometerService::start(I2cInterface::default(i2c), Delay, SamplerConfig::default())
//!         .await?;
//! let print = |v: mpu9250::Vector3D| defmt::info!("accel: {}", v);
//! service.subscribe(&print)?;
//! service.run(&STOP).await;
//! ```

use crate::config::SamplerConfig;
use crate::device::Mpu9250Driver;
use crate::sensors::Vector3D;
use crate::Error;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

/// Maximum number of concurrent subscribers per service
pub const MAX_SUBSCRIBERS: usize = 8;

/// Consumer invoked with every delivered sample
pub type Consumer<'a> = &'a dyn Fn(Vector3D);

/// Handle identifying one subscription, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SubscriptionId(u32);

struct Subscriber<'a> {
    id: SubscriptionId,
    consumer: Consumer<'a>,
}

/// Accelerometer sampling service
pub struct AccelerometerService<'a, I, D> {
    driver: Mpu9250Driver<I>,
    delay: D,
    config: SamplerConfig,
    subscribers: heapless::Vec<Subscriber<'a>, MAX_SUBSCRIBERS>,
    next_id: u32,
    missed_ticks: u32,
}

impl<'a, I, D> AccelerometerService<'a, I, D> {
    fn from_parts(driver: Mpu9250Driver<I>, delay: D, config: SamplerConfig) -> Self {
        Self {
            driver,
            delay,
            config,
            subscribers: heapless::Vec::new(),
            next_id: 0,
            missed_ticks: 0,
        }
    }

    /// Remove a subscription
    ///
    /// Returns `false` if `id` is not subscribed. The consumer is not called
    /// again after this returns.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.subscribers.iter().position(|s| s.id == id) {
            Some(index) => {
                self.subscribers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of active subscriptions
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Number of ticks whose sample read failed
    #[must_use]
    pub const fn missed_ticks(&self) -> u32 {
        self.missed_ticks
    }

    /// Sampling configuration
    #[must_use]
    pub const fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// The owned driver
    #[must_use]
    pub const fn driver(&self) -> &Mpu9250Driver<I> {
        &self.driver
    }

    /// Mutable access to the owned driver, e.g. to reconfigure ranges
    pub fn driver_mut(&mut self) -> &mut Mpu9250Driver<I> {
        &mut self.driver
    }

    /// Consume the service and return the driver and delay provider
    pub fn release(self) -> (Mpu9250Driver<I>, D) {
        (self.driver, self.delay)
    }

    fn add_subscriber(&mut self, consumer: Consumer<'a>) -> Option<SubscriptionId> {
        let id = SubscriptionId(self.next_id);
        self.subscribers
            .push(Subscriber { id, consumer })
            .ok()?;
        self.next_id = self.next_id.wrapping_add(1);
        Some(id)
    }

    fn deliver(&self, sample: Vector3D) {
        for subscriber in &self.subscribers {
            (subscriber.consumer)(sample);
        }
    }

    fn record_failure(&mut self) {
        self.missed_ticks = self.missed_ticks.saturating_add(1);

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "MPU-9250: sample read failed, tick skipped ({} missed)",
            self.missed_ticks
        );
    }
}

#[cfg(not(feature = "async"))]
impl<'a, I, D> AccelerometerService<'a, I, D>
where
    I: RegisterInterface<AddressType = u8>,
    D: embedded_hal::delay::DelayNs,
{
    /// Create the driver, initialize the device, and return the ready service
    ///
    /// # Errors
    ///
    /// Returns the error from [`Mpu9250Driver::initialize`]; no service is
    /// created in that case.
    pub fn start(interface: I, delay: D, config: SamplerConfig) -> Result<Self, Error<I::Error>> {
        let mut driver = Mpu9250Driver::new(interface);
        driver.initialize()?;
        Ok(Self::from_parts(driver, delay, config))
    }

    /// Register a consumer that receives every subsequent sample
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubscriberLimit`] when [`MAX_SUBSCRIBERS`] consumers
    /// are already registered.
    pub fn subscribe(&mut self, consumer: Consumer<'a>) -> Result<SubscriptionId, Error<I::Error>> {
        self.add_subscriber(consumer).ok_or(Error::SubscriberLimit)
    }

    /// Run one sampling tick
    ///
    /// Returns the sample delivered to subscribers, or `None` if the read
    /// failed.
    pub fn tick(&mut self) -> Option<Vector3D> {
        self.delay.delay_ms(self.config.period_ms);
        let sample = self.sample_once()?;
        self.deliver(sample);
        Some(sample)
    }

    /// Run ticks until `stop` is signaled
    ///
    /// The signal is checked before each tick and again between the read and
    /// delivery. It is reset on return so the service can be run again.
    pub fn run<M: RawMutex>(&mut self, stop: &Signal<M, ()>) {
        while !stop.signaled() {
            self.delay.delay_ms(self.config.period_ms);
            let Some(sample) = self.sample_once() else {
                continue;
            };
            if stop.signaled() {
                break;
            }
            self.deliver(sample);
        }
        stop.reset();
    }

    fn sample_once(&mut self) -> Option<Vector3D> {
        match self.driver.read_sample() {
            Ok(sample) => Some(sample),
            Err(_) => {
                self.record_failure();
                None
            }
        }
    }
}

#[cfg(feature = "async")]
impl<'a, I, D> AccelerometerService<'a, I, D>
where
    I: device_driver::AsyncRegisterInterface<AddressType = u8>,
    D: embedded_hal_async::delay::DelayNs,
{
    /// Create the driver, initialize the device, and return the ready service
    ///
    /// # Errors
    ///
    /// Returns the error from [`Mpu9250Driver::initialize`]; no service is
    /// created in that case.
    pub async fn start(
        interface: I,
        delay: D,
        config: SamplerConfig,
    ) -> Result<Self, Error<I::Error>> {
        let mut driver = Mpu9250Driver::new(interface);
        driver.initialize().await?;
        Ok(Self::from_parts(driver, delay, config))
    }

    /// Register a consumer that receives every subsequent sample
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubscriberLimit`] when [`MAX_SUBSCRIBERS`] consumers
    /// are already registered.
    pub fn subscribe(&mut self, consumer: Consumer<'a>) -> Result<SubscriptionId, Error<I::Error>> {
        self.add_subscriber(consumer).ok_or(Error::SubscriberLimit)
    }

    /// Run one sampling tick
    ///
    /// Returns the sample delivered to subscribers, or `None` if the read
    /// failed.
    pub async fn tick(&mut self) -> Option<Vector3D> {
        self.delay.delay_ms(self.config.period_ms).await;
        let sample = self.sample_once().await?;
        self.deliver(sample);
        Some(sample)
    }

    /// Run ticks until `stop` is signaled
    ///
    /// The pending tick is raced against the signal; when the signal wins the
    /// tick future is dropped, including any read still in flight, and its
    /// sample never reaches a consumer.
    pub async fn run<M: RawMutex>(&mut self, stop: &Signal<M, ()>) {
        use embassy_futures::select::{Either, select};

        loop {
            match select(stop.wait(), self.tick()).await {
                Either::First(()) => break,
                Either::Second(_) => {}
            }
        }
    }

    async fn sample_once(&mut self) -> Option<Vector3D> {
        match self.driver.read_sample().await {
            Ok(sample) => Some(sample),
            Err(_) => {
                self.record_failure();
                None
            }
        }
    }
}

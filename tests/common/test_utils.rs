//! Test utilities and helper functions

use crate::common::mock_interface::MockInterface;
use mpu9250::Mpu9250Driver;
use std::cell::Cell;
use std::rc::Rc;

/// Mock delay implementation for testing
///
/// Returns immediately but accumulates the requested time so tests can check
/// the sampling cadence.
#[derive(Debug, Clone, Default)]
pub struct MockDelay {
    elapsed_ns: Rc<Cell<u64>>,
}

#[allow(dead_code)]
impl MockDelay {
    /// Create a delay with nothing elapsed
    pub fn new() -> Self {
        Self::default()
    }

    /// Total requested delay in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns.get() / 1_000_000
    }

    fn add_ns(&self, ns: u64) {
        self.elapsed_ns.set(self.elapsed_ns.get() + ns);
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.add_ns(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.add_ns(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.add_ns(u64::from(ms) * 1_000_000);
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.add_ns(u64::from(ns));
    }

    async fn delay_us(&mut self, us: u32) {
        self.add_ns(u64::from(us) * 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.add_ns(u64::from(ms) * 1_000_000);
    }
}

/// Create a mock driver for testing
/// Returns (driver, interface) where interface is a clone that shares state with the driver
#[allow(dead_code)]
pub fn create_mock_driver() -> (Mpu9250Driver<MockInterface>, MockInterface) {
    let interface = MockInterface::new();
    let interface_clone = interface.clone();
    (Mpu9250Driver::new(interface), interface_clone)
}

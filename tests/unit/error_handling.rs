//! Unit tests for error handling and recovery

use crate::common::{MockError, create_mock_driver};
use mpu9250::Error;

#[test]
fn test_read_failure_propagates_as_bus_error() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_read();

    let result = driver.read_sample();
    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
}

#[test]
fn test_read_failure_recovery() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_bytes([0x10, 0x00, 0x00, 0x00, 0x00, 0x00]);

    interface.fail_next_read();
    assert!(driver.read_sample().is_err(), "First read should fail");

    let sample = driver.read_sample().expect("Second read should succeed");
    assert_eq!(sample.x, 8193.75);
}

#[test]
fn test_setter_read_failure_skips_write() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_read();
    let result = driver.set_clock_source(1);

    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
    assert_eq!(interface.write_count(), 0);
    assert_eq!(driver.config().clock_source, None);
}

#[test]
fn test_setter_write_failure_leaves_config_unchanged() {
    let (mut driver, interface) = create_mock_driver();
    driver.set_full_scale_gyro_range(1).unwrap();

    interface.fail_next_write();
    assert!(driver.set_full_scale_gyro_range(3).is_err());

    assert_eq!(
        driver.config().gyro_full_scale,
        Some(1),
        "Config must reflect the last successful write"
    );
    assert_eq!((interface.get_register(0x1B) >> 3) & 0x03, 1);
}

#[test]
fn test_initialize_failure_stops_sequence() {
    let (mut driver, interface) = create_mock_driver();
    interface.fail_writes_to(0x1B);

    let result = driver.initialize();
    assert!(result.is_err());

    // Clock source was applied before the failure, nothing after it
    assert_eq!(interface.write_addresses(), vec![0x6B]);
    assert_eq!(driver.config().clock_source, Some(1));
    assert_eq!(driver.config().gyro_full_scale, None);
    assert_eq!(driver.config().accel_full_scale, None);
    assert_eq!(driver.config().sleep_enabled, None);
}

#[test]
fn test_error_from_bus_error() {
    let error: Error<MockError> = MockError::Communication.into();
    assert_eq!(error, Error::Bus(MockError::Communication));
}

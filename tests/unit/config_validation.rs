//! Unit tests for configuration validation and range policies

use crate::common::{MockError, Operation, create_mock_driver};
use mpu9250::{DriverConfig, Error};

#[test]
fn test_clock_source_out_of_range_rejected_without_bus_traffic() {
    let (mut driver, interface) = create_mock_driver();

    let result = driver.set_clock_source(8);
    assert_eq!(result, Err(Error::<MockError>::InvalidArgument));
    assert!(
        interface.operations().is_empty(),
        "Rejected clock source must not touch the bus"
    );
    assert_eq!(driver.config().clock_source, None);
}

#[test]
fn test_gyro_range_out_of_range_rejected_without_bus_traffic() {
    let (mut driver, interface) = create_mock_driver();

    for range in [4, 5, 0x80, u8::MAX] {
        let result = driver.set_full_scale_gyro_range(range);
        assert_eq!(
            result,
            Err(Error::InvalidArgument),
            "Gyro range {} should be rejected",
            range
        );
    }
    assert_eq!(interface.write_count(), 0);
    assert_eq!(interface.read_count(), 0);
}

#[test]
fn test_all_valid_clock_sources_accepted() {
    let (mut driver, interface) = create_mock_driver();

    for source in 0..=7 {
        driver.set_clock_source(source).unwrap();
        assert_eq!(interface.get_register(0x6B) & 0x07, source);
        assert_eq!(driver.config().clock_source, Some(source));
    }
}

#[test]
fn test_all_valid_gyro_ranges_accepted() {
    let (mut driver, interface) = create_mock_driver();

    for range in 0..=3 {
        driver.set_full_scale_gyro_range(range).unwrap();
        assert_eq!((interface.get_register(0x1B) >> 3) & 0x03, range);
        assert_eq!(driver.config().gyro_full_scale, Some(range));
    }
}

#[test]
fn test_accel_range_below_threshold_is_silent_noop() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(0x1C, 0xE7);

    for range in 0..3 {
        assert!(driver.set_full_scale_accel_range(range).is_ok());
    }

    assert!(interface.operations().is_empty(), "No bus traffic expected");
    assert_eq!(interface.get_register(0x1C), 0xE7);
    assert_eq!(driver.config().accel_full_scale, None);
}

#[test]
fn test_accel_range_at_threshold_reads_once_and_writes_once() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_full_scale_accel_range(3).unwrap();

    assert_eq!(
        interface.operations(),
        vec![
            Operation::Read {
                address: 0x1C,
                len: 1
            },
            Operation::Write {
                address: 0x1C,
                value: 0x18
            },
        ]
    );
    assert_eq!(driver.config().accel_full_scale, Some(3));
}

#[test]
fn test_accel_range_above_field_width_is_masked() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(0x1C, 0xE0);

    // 4 = 0b100: only the low two bits fit the field
    driver.set_full_scale_accel_range(4).unwrap();

    assert_eq!(interface.get_register(0x1C), 0xE0);
    assert_eq!(driver.config().accel_full_scale, Some(0));

    driver.set_full_scale_accel_range(7).unwrap();
    assert_eq!(interface.get_register(0x1C), 0xF8);
    assert_eq!(driver.config().accel_full_scale, Some(3));
}

#[test]
fn test_reading_range_overwrites_whole_register_without_read() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(0x0F, 0xFF);

    driver.set_reading_range(0x24).unwrap();

    assert_eq!(
        interface.operations(),
        vec![Operation::Write {
            address: 0x0F,
            value: 0x24
        }]
    );
    assert_eq!(interface.get_register(0x0F), 0x24);
}

#[test]
fn test_capability_queries_are_unknown() {
    let (mut driver, _interface) = create_mock_driver();

    assert_eq!(driver.supported_ranges(), None);
    assert_eq!(driver.reading_range(), None);

    driver.set_reading_range(0x10).unwrap();
    assert_eq!(
        driver.reading_range(),
        None,
        "Reading range stays unknown after a write"
    );
}

#[test]
fn test_fresh_driver_has_unknown_config() {
    let (driver, _interface) = create_mock_driver();
    assert_eq!(*driver.config(), DriverConfig::default());
}

#[test]
fn test_sleep_flag_tracked() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_sleep_enabled(true).unwrap();
    assert_eq!(interface.get_register(0x6B) & 0x40, 0x40);
    assert_eq!(driver.config().sleep_enabled, Some(true));

    driver.set_sleep_enabled(false).unwrap();
    assert_eq!(interface.get_register(0x6B) & 0x40, 0x00);
    assert_eq!(driver.config().sleep_enabled, Some(false));
}

//! I2C bus interface for the MPU-9250
//!
//! Implements the `device-driver` register interface traits on top of an
//! `embedded-hal` I2C bus. Every register access is one bus transaction:
//! - single register read: write the address, read 1 byte
//! - register write: write the address followed by the value
//! - burst read: write the start address, read `n` bytes (the device
//!   auto-increments the register pointer)
//!
//! `embedded-hal` implements `I2c` for `&mut T`, so the bus can be lent to
//! the interface instead of moved into it. To share one bus between several
//! devices, wrap it with an `embedded-hal-bus` device type, which keeps the
//! transactions of different drivers mutually exclusive.

use crate::I2C_ADDRESS_AD0_LOW;

use device_driver::RegisterInterface;

/// Largest payload written in one transaction
const MAX_WRITE_LEN: usize = 8;

/// I2C interface for the MPU-9250
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the default address (0x68, AD0 pin LOW)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut imu = Mpu9250Driver::new(interface);
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_AD0_LOW,
        }
    }

    /// Create a new I2C interface with the alternative address (0x69, AD0 pin HIGH)
    pub const fn alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: crate::I2C_ADDRESS_AD0_HIGH,
        }
    }

    /// Create a new I2C interface with a custom 7-bit device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The device address this interface talks to
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

/// Build `[register, data..]` for a write transaction
fn write_frame(address: u8, write_data: &[u8]) -> ([u8; MAX_WRITE_LEN + 1], usize) {
    debug_assert!(
        write_data.len() <= MAX_WRITE_LEN,
        "register payload exceeds write buffer"
    );
    let mut buffer = [0u8; MAX_WRITE_LEN + 1];
    buffer[0] = address;
    let len = write_data.len().min(MAX_WRITE_LEN);
    buffer[1..=len].copy_from_slice(&write_data[..len]);
    (buffer, len + 1)
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let (buffer, len) = write_frame(address, write_data);
        self.i2c.write(self.address, &buffer[..len])
    }
}

#[cfg(feature = "async")]
impl<I2C, E> device_driver::AsyncRegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal_async::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c
            .write_read(self.address, &[address], read_data)
            .await
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let (buffer, len) = write_frame(address, write_data);
        self.i2c.write(self.address, &buffer[..len]).await
    }
}

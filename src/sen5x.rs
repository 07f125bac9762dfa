use core::time::Duration;

use embedded_hal::{delay::DelayNs, i2c::I2c};
use log::error;

use crate::codec::{self, WORD_LEN};
use crate::commands::Command;
use crate::decode::decode_measurement;
use crate::error::Error;
use crate::types::Measurement;

/// Fixed 7-bit I2C address of the SEN5x.
pub const SEN5X_I2C_ADDRESS: u8 = 0x69;

/// Normal bus clock for the sensor.
pub const I2C_STANDARD_SPEED_HZ: u32 = 100_000;

/// Reduced bus clock for long or shared wiring.
pub const I2C_LOW_SPEED_HZ: u32 = 10_000;

/// SEN5x driver owning the I2C binding to one sensor.
///
/// Every command blocks for its settle time or processing window, so callers
/// never have to sprinkle delays between commands.
pub struct Sen5x<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D, E> Sen5x<I2C, D>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
    E: core::fmt::Debug,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Sen5x { i2c, delay }
    }

    /// Write a command that has no response, then wait out its settle time.
    pub fn send_command(&mut self, command: Command) -> Result<(), Error<E>> {
        self.write(command)?;
        self.hold(command.settle_time());
        Ok(())
    }

    /// Write a read command and fetch `count` CRC-checked words.
    ///
    /// No further I/O is issued after the first failure.
    pub fn read_words(&mut self, command: Command, count: usize) -> Result<Vec<u16>, Error<E>> {
        let mut buf = vec![0u8; count * WORD_LEN];

        self.write(command)?;
        self.hold(command.pre_read_delay());
        self.i2c
            .read(SEN5X_I2C_ADDRESS, &mut buf)
            .map_err(|cause| Error::Bus { command, cause })?;

        let words = codec::decode_words(&buf, count).map_err(|err| {
            error!("{command:?}: {err}");
            Error::decode(command, err)
        })?;
        Ok(words.into_iter().map(|word| word.value).collect())
    }

    pub fn start_measurement(&mut self) -> Result<(), Error<E>> {
        self.send_command(Command::StartMeasurement)
    }

    pub fn stop_measurement(&mut self) -> Result<(), Error<E>> {
        self.send_command(Command::StopMeasurement)
    }

    /// Returns true once a new set of measured values can be read.
    pub fn read_data_ready(&mut self) -> Result<bool, Error<E>> {
        let command = Command::ReadDataReady;
        let words = self.read_words(command, command.response_words())?;
        Ok(words.first().is_some_and(|word| word & 0x0001 != 0))
    }

    pub fn read_measured_values(&mut self) -> Result<Measurement, Error<E>> {
        let command = Command::ReadMeasuredValues;
        let words = self.read_words(command, command.response_words())?;
        let raw = <[u16; 8]>::try_from(words.as_slice()).map_err(|_| Error::Truncated {
            command,
            expected: 8 * WORD_LEN,
            got: words.len() * WORD_LEN,
        })?;
        Ok(decode_measurement(&raw))
    }

    /// Soft reset. Never issued implicitly.
    pub fn device_reset(&mut self) -> Result<(), Error<E>> {
        self.send_command(Command::DeviceReset)
    }

    /// Block for `duration` on the driver's delay provider, to the
    /// microsecond.
    pub fn hold(&mut self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        if millis > 0 {
            self.delay.delay_ms(millis);
        }
        let micros = duration.subsec_micros() % 1_000;
        if micros > 0 {
            self.delay.delay_us(micros);
        }
    }

    /// Destroys the driver and returns the I2C bus and delay.
    pub fn destroy(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn write(&mut self, command: Command) -> Result<(), Error<E>> {
        self.i2c
            .write(SEN5X_I2C_ADDRESS, &codec::encode_command(command))
            .map_err(|cause| Error::Bus { command, cause })
    }
}

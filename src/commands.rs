use core::time::Duration;

/// Commands understood by the SEN5x over I2C.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Enter measurement mode; fan and measurement engine start running.
    StartMeasurement,
    /// Return to idle mode.
    StopMeasurement,
    /// Query whether a new set of measured values is available.
    ReadDataReady,
    /// Fetch the eight measured value words.
    ReadMeasuredValues,
    /// Soft reset; the sensor returns to idle mode.
    DeviceReset,
}

impl Command {
    /// Every command, in opcode order.
    pub const ALL: [Command; 5] = [
        Command::StartMeasurement,
        Command::StopMeasurement,
        Command::ReadDataReady,
        Command::ReadMeasuredValues,
        Command::DeviceReset,
    ];

    /// 16-bit command code, sent big-endian.
    pub const fn opcode(self) -> u16 {
        match self {
            Command::StartMeasurement => 0x0021,
            Command::StopMeasurement => 0x0104,
            Command::ReadDataReady => 0x0202,
            Command::ReadMeasuredValues => 0x03C4,
            Command::DeviceReset => 0xD304,
        }
    }

    /// Number of CRC-protected words the sensor answers with.
    pub const fn response_words(self) -> usize {
        match self {
            Command::ReadDataReady => 1,
            Command::ReadMeasuredValues => 8,
            Command::StartMeasurement | Command::StopMeasurement | Command::DeviceReset => 0,
        }
    }

    /// Time the sensor needs after a write-only command before it accepts
    /// the next one.
    pub const fn settle_time(self) -> Duration {
        match self {
            Command::StartMeasurement => Duration::from_millis(50),
            Command::StopMeasurement => Duration::from_millis(200),
            Command::DeviceReset => Duration::from_millis(100),
            Command::ReadDataReady | Command::ReadMeasuredValues => Duration::ZERO,
        }
    }

    /// Processing window between writing a read command and fetching its
    /// response.
    pub const fn pre_read_delay(self) -> Duration {
        match self {
            Command::ReadDataReady | Command::ReadMeasuredValues => Duration::from_millis(20),
            Command::StartMeasurement | Command::StopMeasurement | Command::DeviceReset => {
                Duration::ZERO
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_only_commands_settle_and_read_commands_wait() {
        for cmd in Command::ALL {
            if cmd.response_words() == 0 {
                assert!(cmd.settle_time() > Duration::ZERO, "{cmd:?}");
                assert_eq!(cmd.pre_read_delay(), Duration::ZERO, "{cmd:?}");
            } else {
                assert_eq!(cmd.settle_time(), Duration::ZERO, "{cmd:?}");
                assert_eq!(cmd.pre_read_delay(), Duration::from_millis(20), "{cmd:?}");
            }
        }
    }

    #[test]
    fn measured_values_is_largest_response() {
        assert_eq!(Command::ReadMeasuredValues.response_words(), 8);
        assert_eq!(Command::ReadMeasuredValues.opcode(), 0x03C4);
    }
}

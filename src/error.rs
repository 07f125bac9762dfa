use core::fmt::Debug;

use thiserror::Error;

use crate::codec::DecodeError;
use crate::commands::Command;

/// SEN5x protocol errors, tagged with the command that failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error<E: Debug> {
    /// The I2C transfer failed (no acknowledge, timeout, arbitration loss).
    #[error("I2C error during {command:?}: {cause:?}")]
    Bus { command: Command, cause: E },
    /// A response word failed its CRC check.
    #[error("invalid CRC in response to {command:?}, word {index}: computed 0x{expected:02X}, received 0x{received:02X}")]
    InvalidCrc {
        command: Command,
        index: usize,
        expected: u8,
        received: u8,
    },
    /// The response held fewer bytes than the command's word count needs.
    #[error("short response to {command:?}: {expected} bytes needed, {got} received")]
    Truncated {
        command: Command,
        expected: usize,
        got: usize,
    },
}

impl<E: Debug> Error<E> {
    pub(crate) fn decode(command: Command, err: DecodeError) -> Self {
        match err {
            DecodeError::CrcMismatch {
                index,
                expected,
                received,
            } => Error::InvalidCrc {
                command,
                index,
                expected,
                received,
            },
            DecodeError::Truncated { expected, got } => Error::Truncated {
                command,
                expected,
                got,
            },
        }
    }

    /// Command that was in flight when the error occurred.
    pub fn command(&self) -> Command {
        match self {
            Error::Bus { command, .. }
            | Error::InvalidCrc { command, .. }
            | Error::Truncated { command, .. } => *command,
        }
    }

    pub fn is_crc(&self) -> bool {
        matches!(self, Error::InvalidCrc { .. })
    }
}

//! Framing of commands and CRC-protected response words.
//!
//! Commands go out as a bare big-endian opcode. Responses come back as
//! triplets: two data bytes followed by their CRC-8.

use thiserror::Error;

use crate::commands::Command;
use crate::crc::crc8;

/// Size of one response word on the wire, including its check byte.
pub const WORD_LEN: usize = 3;

/// One 16-bit word from a response together with its transmitted check byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawWord {
    pub value: u16,
    pub crc: u8,
}

/// Why a response could not be turned into words.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A triplet's check byte does not match its data.
    #[error("CRC mismatch in word {index}: computed 0x{expected:02X}, received 0x{received:02X}")]
    CrcMismatch {
        /// Zero-based position of the triplet in the response.
        index: usize,
        expected: u8,
        received: u8,
    },
    /// Fewer bytes than `count` triplets need.
    #[error("response too short: {expected} bytes needed, {got} received")]
    Truncated { expected: usize, got: usize },
}

/// Bytes to put on the bus for `cmd`.
pub fn encode_command(cmd: Command) -> [u8; 2] {
    cmd.opcode().to_be_bytes()
}

/// Split `raw` into `count` triplets and validate each one.
///
/// Stops at the first bad triplet. Input shorter than `count * 3` bytes is
/// rejected as a whole; trailing bytes beyond that are ignored.
pub fn decode_words(raw: &[u8], count: usize) -> Result<Vec<RawWord>, DecodeError> {
    let expected = count * WORD_LEN;
    if raw.len() < expected {
        return Err(DecodeError::Truncated {
            expected,
            got: raw.len(),
        });
    }
    raw[..expected]
        .chunks_exact(WORD_LEN)
        .enumerate()
        .map(|(index, triplet)| {
            let expected = crc8(&triplet[..2]);
            let received = triplet[2];
            if expected != received {
                return Err(DecodeError::CrcMismatch {
                    index,
                    expected,
                    received,
                });
            }
            Ok(RawWord {
                value: u16::from_be_bytes([triplet[0], triplet[1]]),
                crc: received,
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn encode_words(words: &[u16]) -> Vec<u8> {
    words
        .iter()
        .flat_map(|word| {
            let [hi, lo] = word.to_be_bytes();
            [hi, lo, crc8(&[hi, lo])]
        })
        .collect()
}

//! Codec errors

use thiserror::Error;

use crate::enums::MmMessageType;

/// Error raised while encoding or decoding a 5GMM message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NasError {
    #[error("Buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Invalid extended protocol discriminator: 0x{0:02X}")]
    InvalidEpd(u8),

    #[error("Invalid security header type: 0x{0:02X}")]
    InvalidSecurityHeaderType(u8),

    #[error("Unknown 5GMM message type: 0x{0:02X}")]
    UnknownMessageType(u8),

    #[error("Unexpected message type: expected {expected:?}, got {actual:?}")]
    UnexpectedMessageType {
        expected: MmMessageType,
        actual: MmMessageType,
    },

    /// A security protected PDU was handed to the plain decoder.
    #[error("Message is security protected")]
    Protected,

    #[error("Invalid IE value: {0}")]
    InvalidIeValue(String),

    #[error("{ie} too long: {len} bytes")]
    IeTooLong { ie: &'static str, len: usize },

    #[error("Unknown IEI: 0x{0:02X}")]
    UnknownIei(u8),
}

/// Fails with [`NasError::BufferTooShort`] unless `remaining >= expected`.
pub(crate) fn ensure_remaining(remaining: usize, expected: usize) -> Result<(), NasError> {
    if remaining < expected {
        return Err(NasError::BufferTooShort {
            expected,
            actual: remaining,
        });
    }
    Ok(())
}

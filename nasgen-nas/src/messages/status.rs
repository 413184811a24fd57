//! 5GMM Status (TS 24.501 8.2.29)

use bytes::{Buf, BufMut};

use super::authentication::decode_cause;
use crate::enums::MmCause;
use crate::error::NasError;

/// 5GMM Status (UE to network)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GmmStatus {
    /// 5GMM cause (mandatory, Type 3)
    pub cause: MmCause,
}

impl GmmStatus {
    pub fn new(cause: MmCause) -> Self {
        Self { cause }
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        Ok(Self::new(decode_cause(buf)?))
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        buf.put_u8(self.cause.into());
        Ok(())
    }
}

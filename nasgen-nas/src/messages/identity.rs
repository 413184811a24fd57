//! Identity Response (TS 24.501 8.2.22)

use bytes::{Buf, BufMut};

use crate::error::NasError;
use crate::ies::ie6::Ie5gsMobileIdentity;

/// Identity Response (UE to network)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentityResponse {
    /// Mobile identity (mandatory, Type 6)
    pub mobile_identity: Ie5gsMobileIdentity,
}

impl IdentityResponse {
    pub fn new(mobile_identity: Ie5gsMobileIdentity) -> Self {
        Self { mobile_identity }
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        Ok(Self::new(Ie5gsMobileIdentity::decode(buf)?))
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        self.mobile_identity.encode(buf)
    }
}

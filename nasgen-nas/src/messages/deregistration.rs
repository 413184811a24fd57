//! De-registration Request, UE originating (TS 24.501 8.2.12)

use bytes::{Buf, BufMut};

use crate::error::{ensure_remaining, NasError};
use crate::ies::ie1::{IeDeRegistrationType, InformationElement1, NasKeySetIdentifier};
use crate::ies::ie6::Ie5gsMobileIdentity;

/// De-registration Request (UE originating)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeregistrationRequest {
    /// De-registration type (mandatory, Type 1, low nibble)
    pub deregistration_type: IeDeRegistrationType,
    /// ngKSI (mandatory, Type 1, high nibble)
    pub ng_ksi: NasKeySetIdentifier,
    /// 5GS mobile identity (mandatory, Type 6)
    pub mobile_identity: Ie5gsMobileIdentity,
}

impl DeregistrationRequest {
    pub fn new(
        deregistration_type: IeDeRegistrationType,
        ng_ksi: NasKeySetIdentifier,
        mobile_identity: Ie5gsMobileIdentity,
    ) -> Self {
        Self {
            deregistration_type,
            ng_ksi,
            mobile_identity,
        }
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        ensure_remaining(buf.remaining(), 1)?;
        let octet = buf.get_u8();
        let ng_ksi = NasKeySetIdentifier::decode(octet >> 4)?;
        let deregistration_type = IeDeRegistrationType::decode(octet & 0x0F)?;
        let mobile_identity = Ie5gsMobileIdentity::decode(buf)?;
        Ok(Self::new(deregistration_type, ng_ksi, mobile_identity))
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        let first_octet =
            (self.ng_ksi.encode() << 4) | (self.deregistration_type.encode() & 0x0F);
        buf.put_u8(first_octet);
        self.mobile_identity.encode(buf)
    }
}

//! Registration Request / Registration Complete (TS 24.501 8.2.6, 8.2.8)

use bytes::{Buf, BufMut};

use crate::error::{ensure_remaining, NasError};
use crate::ies::ie1::{Ie5gsRegistrationType, InformationElement1, NasKeySetIdentifier};
use crate::ies::ie4::{Ie5gmmCapability, IeUeSecurityCapability, IeUplinkDataStatus};
use crate::ies::ie6::Ie5gsMobileIdentity;
use crate::ies::peek_iei;

/// Optional IEIs of the Registration Request
pub mod registration_request_iei {
    pub const CAPABILITY_5GMM: u8 = 0x10;
    pub const UE_SECURITY_CAPABILITY: u8 = 0x2E;
    pub const UPLINK_DATA_STATUS: u8 = 0x40;
}

/// Registration Request (UE to network)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationRequest {
    /// 5GS registration type (mandatory, Type 1)
    pub registration_type: Ie5gsRegistrationType,
    /// ngKSI (mandatory, Type 1)
    pub ng_ksi: NasKeySetIdentifier,
    /// 5GS mobile identity (mandatory, Type 6)
    pub mobile_identity: Ie5gsMobileIdentity,
    /// 5GMM capability (optional, Type 4, IEI 0x10)
    pub gmm_capability: Option<Ie5gmmCapability>,
    /// UE security capability (optional, Type 4, IEI 0x2E)
    pub ue_security_capability: Option<IeUeSecurityCapability>,
    /// Uplink data status (optional, Type 4, IEI 0x40)
    pub uplink_data_status: Option<IeUplinkDataStatus>,
}

impl RegistrationRequest {
    pub fn new(
        registration_type: Ie5gsRegistrationType,
        ng_ksi: NasKeySetIdentifier,
        mobile_identity: Ie5gsMobileIdentity,
    ) -> Self {
        Self {
            registration_type,
            ng_ksi,
            mobile_identity,
            ..Default::default()
        }
    }

    /// Decode the message body (after the plain header)
    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        ensure_remaining(buf.remaining(), 1)?;
        // ngKSI (high nibble) + 5GS registration type (low nibble)
        let first_octet = buf.get_u8();
        let ng_ksi = NasKeySetIdentifier::decode(first_octet >> 4)?;
        let registration_type = Ie5gsRegistrationType::decode(first_octet & 0x0F)?;
        let mobile_identity = Ie5gsMobileIdentity::decode(buf)?;

        let mut msg = Self::new(registration_type, ng_ksi, mobile_identity);

        while let Some(iei) = peek_iei(buf) {
            buf.advance(1);
            match iei {
                registration_request_iei::CAPABILITY_5GMM => {
                    msg.gmm_capability = Some(Ie5gmmCapability::decode(buf)?);
                }
                registration_request_iei::UE_SECURITY_CAPABILITY => {
                    msg.ue_security_capability = Some(IeUeSecurityCapability::decode(buf)?);
                }
                registration_request_iei::UPLINK_DATA_STATUS => {
                    msg.uplink_data_status = Some(IeUplinkDataStatus::decode(buf)?);
                }
                other => return Err(NasError::UnknownIei(other)),
            }
        }

        Ok(msg)
    }

    /// Encode the message body (after the plain header)
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        let first_octet = (self.ng_ksi.encode() << 4) | (self.registration_type.encode() & 0x0F);
        buf.put_u8(first_octet);
        self.mobile_identity.encode(buf)?;

        if let Some(ref cap) = self.gmm_capability {
            buf.put_u8(registration_request_iei::CAPABILITY_5GMM);
            cap.encode(buf)?;
        }
        if let Some(ref cap) = self.ue_security_capability {
            buf.put_u8(registration_request_iei::UE_SECURITY_CAPABILITY);
            cap.encode(buf)?;
        }
        if let Some(ref status) = self.uplink_data_status {
            buf.put_u8(registration_request_iei::UPLINK_DATA_STATUS);
            status.encode(buf)?;
        }
        Ok(())
    }
}

/// Registration Complete (UE to network), no IEs used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistrationComplete;

impl RegistrationComplete {
    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        match peek_iei(buf) {
            Some(iei) => Err(NasError::UnknownIei(iei)),
            None => Ok(Self),
        }
    }

    pub fn encode<B: BufMut>(&self, _buf: &mut B) -> Result<(), NasError> {
        Ok(())
    }
}

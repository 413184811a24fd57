//! Service Request (TS 24.501 8.2.16)

use bytes::{Buf, BufMut};

use crate::error::{ensure_remaining, NasError};
use crate::ies::ie1::{InformationElement1, NasKeySetIdentifier, ServiceType};
use crate::ies::ie4::IeUplinkDataStatus;
use crate::ies::ie6::Ie5gsMobileIdentity;
use crate::ies::peek_iei;

/// IEI values for Service Request
pub mod service_request_iei {
    pub const UPLINK_DATA_STATUS: u8 = 0x40;
}

/// Service Request (UE to network)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceRequest {
    /// ngKSI (mandatory, Type 1, low nibble)
    pub ng_ksi: NasKeySetIdentifier,
    /// Service type (mandatory, Type 1, high nibble)
    pub service_type: ServiceType,
    /// 5G-S-TMSI (mandatory, Type 6)
    pub s_tmsi: Ie5gsMobileIdentity,
    /// Uplink data status (optional, Type 4, IEI 0x40)
    pub uplink_data_status: Option<IeUplinkDataStatus>,
}

impl ServiceRequest {
    pub fn new(
        ng_ksi: NasKeySetIdentifier,
        service_type: ServiceType,
        s_tmsi: Ie5gsMobileIdentity,
    ) -> Self {
        Self {
            ng_ksi,
            service_type,
            s_tmsi,
            uplink_data_status: None,
        }
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        ensure_remaining(buf.remaining(), 1)?;
        let octet = buf.get_u8();
        let service_type = ServiceType::decode(octet >> 4)?;
        let ng_ksi = NasKeySetIdentifier::decode(octet & 0x0F)?;
        let s_tmsi = Ie5gsMobileIdentity::decode(buf)?;

        let mut msg = Self::new(ng_ksi, service_type, s_tmsi);
        while let Some(iei) = peek_iei(buf) {
            buf.advance(1);
            match iei {
                service_request_iei::UPLINK_DATA_STATUS => {
                    msg.uplink_data_status = Some(IeUplinkDataStatus::decode(buf)?);
                }
                other => return Err(NasError::UnknownIei(other)),
            }
        }
        Ok(msg)
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        let first_octet = (self.service_type.encode() << 4) | (self.ng_ksi.encode() & 0x0F);
        buf.put_u8(first_octet);
        self.s_tmsi.encode(buf)?;
        if let Some(ref status) = self.uplink_data_status {
            buf.put_u8(service_request_iei::UPLINK_DATA_STATUS);
            status.encode(buf)?;
        }
        Ok(())
    }
}

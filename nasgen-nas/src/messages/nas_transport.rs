//! UL NAS Transport (TS 24.501 8.2.10)

use bytes::{Buf, BufMut};

use crate::error::{ensure_remaining, NasError};
use crate::ies::ie1::{InformationElement1, PayloadContainerType, RequestType};
use crate::ies::ie4::{IeDnn, IeSNssai};
use crate::ies::ie6::IePayloadContainer;
use crate::ies::peek_iei;

/// IEI values for UL NAS Transport
pub mod ul_nas_transport_iei {
    pub const PDU_SESSION_ID: u8 = 0x12;
    /// Type 1 IEI, carried in the high nibble
    pub const REQUEST_TYPE: u8 = 0x8;
    pub const S_NSSAI: u8 = 0x22;
    pub const DNN: u8 = 0x25;
}

/// UL NAS Transport (UE to network)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UlNasTransport {
    /// Payload container type (mandatory, Type 1)
    pub payload_container_type: PayloadContainerType,
    /// Payload container (mandatory, Type 6)
    pub payload_container: IePayloadContainer,
    /// PDU session identity 2 (optional, Type 3, IEI 0x12)
    pub pdu_session_id: Option<u8>,
    /// Request type (optional, Type 1, IEI 0x8)
    pub request_type: Option<RequestType>,
    /// S-NSSAI (optional, Type 4, IEI 0x22)
    pub s_nssai: Option<IeSNssai>,
    /// DNN (optional, Type 4, IEI 0x25)
    pub dnn: Option<IeDnn>,
}

impl UlNasTransport {
    pub fn new(
        payload_container_type: PayloadContainerType,
        payload_container: IePayloadContainer,
    ) -> Self {
        Self {
            payload_container_type,
            payload_container,
            ..Default::default()
        }
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        ensure_remaining(buf.remaining(), 1)?;
        let payload_container_type = PayloadContainerType::decode(buf.get_u8() & 0x0F)?;
        let payload_container = IePayloadContainer::decode(buf)?;
        let mut msg = Self::new(payload_container_type, payload_container);

        while let Some(iei) = peek_iei(buf) {
            if iei >> 4 == ul_nas_transport_iei::REQUEST_TYPE {
                buf.advance(1);
                msg.request_type = Some(RequestType::decode(iei & 0x0F)?);
                continue;
            }

            buf.advance(1);
            match iei {
                ul_nas_transport_iei::PDU_SESSION_ID => {
                    ensure_remaining(buf.remaining(), 1)?;
                    msg.pdu_session_id = Some(buf.get_u8());
                }
                ul_nas_transport_iei::S_NSSAI => {
                    msg.s_nssai = Some(IeSNssai::decode(buf)?);
                }
                ul_nas_transport_iei::DNN => {
                    msg.dnn = Some(IeDnn::decode(buf)?);
                }
                other => return Err(NasError::UnknownIei(other)),
            }
        }
        Ok(msg)
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        buf.put_u8(self.payload_container_type.encode() & 0x0F);
        self.payload_container.encode(buf)?;

        if let Some(psi) = self.pdu_session_id {
            buf.put_u8(ul_nas_transport_iei::PDU_SESSION_ID);
            buf.put_u8(psi);
        }
        if let Some(request_type) = self.request_type {
            let octet = (ul_nas_transport_iei::REQUEST_TYPE << 4) | request_type.encode();
            buf.put_u8(octet);
        }
        if let Some(ref s_nssai) = self.s_nssai {
            buf.put_u8(ul_nas_transport_iei::S_NSSAI);
            s_nssai.encode(buf)?;
        }
        if let Some(ref dnn) = self.dnn {
            buf.put_u8(ul_nas_transport_iei::DNN);
            dnn.encode(buf)?;
        }
        Ok(())
    }
}

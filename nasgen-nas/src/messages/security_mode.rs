//! Security Mode Complete (TS 24.501 8.2.26)

use bytes::{Buf, BufMut};

use crate::error::NasError;
use crate::ies::ie6::{Ie5gsMobileIdentity, IeNasMessageContainer};
use crate::ies::peek_iei;

/// IEI values for Security Mode Complete
pub mod security_mode_complete_iei {
    pub const IMEISV: u8 = 0x77;
    pub const NAS_MESSAGE_CONTAINER: u8 = 0x71;
}

/// Security Mode Complete (UE to network)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SecurityModeComplete {
    /// IMEISV (optional, Type 6, IEI 0x77)
    pub imeisv: Option<Ie5gsMobileIdentity>,
    /// NAS message container (optional, Type 6, IEI 0x71)
    pub nas_message_container: Option<IeNasMessageContainer>,
}

impl SecurityModeComplete {
    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        let mut msg = Self::default();
        while let Some(iei) = peek_iei(buf) {
            buf.advance(1);
            match iei {
                security_mode_complete_iei::IMEISV => {
                    msg.imeisv = Some(Ie5gsMobileIdentity::decode(buf)?);
                }
                security_mode_complete_iei::NAS_MESSAGE_CONTAINER => {
                    msg.nas_message_container = Some(IeNasMessageContainer::decode(buf)?);
                }
                other => return Err(NasError::UnknownIei(other)),
            }
        }
        Ok(msg)
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        if let Some(ref imeisv) = self.imeisv {
            buf.put_u8(security_mode_complete_iei::IMEISV);
            imeisv.encode(buf)?;
        }
        if let Some(ref container) = self.nas_message_container {
            buf.put_u8(security_mode_complete_iei::NAS_MESSAGE_CONTAINER);
            container.encode(buf)?;
        }
        Ok(())
    }
}

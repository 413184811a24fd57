//! Configuration Update Complete (TS 24.501 8.2.20)

use bytes::{Buf, BufMut};

use crate::error::{ensure_remaining, NasError};
use crate::ies::ie1::{ControlPlaneServiceType, InformationElement1};

/// Configuration Update Complete (UE to network)
///
/// Carries the control plane service type as a half-octet V field;
/// the high nibble is spare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigurationUpdateComplete {
    pub control_plane_service_type: ControlPlaneServiceType,
}

impl ConfigurationUpdateComplete {
    pub fn new(control_plane_service_type: ControlPlaneServiceType) -> Self {
        Self {
            control_plane_service_type,
        }
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        ensure_remaining(buf.remaining(), 1)?;
        let octet = buf.get_u8();
        Ok(Self::new(ControlPlaneServiceType::decode(octet & 0x0F)?))
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        buf.put_u8(self.control_plane_service_type.encode() & 0x0F);
        Ok(())
    }
}

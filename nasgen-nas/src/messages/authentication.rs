//! Authentication Response / Authentication Failure (TS 24.501 8.2.2, 8.2.4)

use bytes::{Buf, BufMut};

use crate::enums::MmCause;
use crate::error::{ensure_remaining, NasError};
use crate::ies::ie4::{IeAuthenticationFailureParameter, IeAuthenticationResponseParameter};
use crate::ies::peek_iei;

/// IEI values for authentication messages
pub mod authentication_iei {
    pub const AUTHENTICATION_RESPONSE_PARAMETER: u8 = 0x2D;
    pub const AUTHENTICATION_FAILURE_PARAMETER: u8 = 0x30;
}

pub(crate) fn decode_cause<B: Buf>(buf: &mut B) -> Result<MmCause, NasError> {
    ensure_remaining(buf.remaining(), 1)?;
    let value = buf.get_u8();
    MmCause::try_from(value).map_err(|_| NasError::InvalidIeValue(format!("5GMM cause {value}")))
}

/// Authentication Response (UE to network)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthenticationResponse {
    /// Authentication response parameter, RES* (optional, Type 4, IEI 0x2D)
    pub response_parameter: Option<IeAuthenticationResponseParameter>,
}

impl AuthenticationResponse {
    pub fn new(res_star: [u8; 16]) -> Self {
        Self {
            response_parameter: Some(IeAuthenticationResponseParameter { res_star }),
        }
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        let mut msg = Self::default();
        while let Some(iei) = peek_iei(buf) {
            buf.advance(1);
            match iei {
                authentication_iei::AUTHENTICATION_RESPONSE_PARAMETER => {
                    msg.response_parameter = Some(IeAuthenticationResponseParameter::decode(buf)?);
                }
                other => return Err(NasError::UnknownIei(other)),
            }
        }
        Ok(msg)
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        if let Some(ref param) = self.response_parameter {
            buf.put_u8(authentication_iei::AUTHENTICATION_RESPONSE_PARAMETER);
            param.encode(buf)?;
        }
        Ok(())
    }
}

/// Authentication Failure (UE to network)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationFailure {
    /// 5GMM cause (mandatory, Type 3)
    pub cause: MmCause,
    /// Authentication failure parameter, AUTS (optional, Type 4, IEI 0x30)
    pub failure_parameter: Option<IeAuthenticationFailureParameter>,
}

impl AuthenticationFailure {
    pub fn new(cause: MmCause) -> Self {
        Self {
            cause,
            failure_parameter: None,
        }
    }

    pub fn with_auts(cause: MmCause, auts: [u8; 14]) -> Self {
        Self {
            cause,
            failure_parameter: Some(IeAuthenticationFailureParameter { auts }),
        }
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        let mut msg = Self::new(decode_cause(buf)?);
        while let Some(iei) = peek_iei(buf) {
            buf.advance(1);
            match iei {
                authentication_iei::AUTHENTICATION_FAILURE_PARAMETER => {
                    msg.failure_parameter = Some(IeAuthenticationFailureParameter::decode(buf)?);
                }
                other => return Err(NasError::UnknownIei(other)),
            }
        }
        Ok(msg)
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        buf.put_u8(self.cause.into());
        if let Some(ref param) = self.failure_parameter {
            buf.put_u8(authentication_iei::AUTHENTICATION_FAILURE_PARAMETER);
            param.encode(buf)?;
        }
        Ok(())
    }
}

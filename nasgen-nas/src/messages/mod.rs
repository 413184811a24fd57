//! Uplink 5GMM messages (TS 24.501 section 8.2)
//!
//! Each message struct encodes and decodes its body only. [`GmmMessage`]
//! ties a body to its plain header.

pub mod authentication;
pub mod configuration;
pub mod deregistration;
pub mod identity;
pub mod nas_transport;
pub mod registration;
pub mod security_mode;
pub mod service;
pub mod status;

pub use authentication::{AuthenticationFailure, AuthenticationResponse};
pub use configuration::ConfigurationUpdateComplete;
pub use deregistration::DeregistrationRequest;
pub use identity::IdentityResponse;
pub use nas_transport::UlNasTransport;
pub use registration::{RegistrationComplete, RegistrationRequest};
pub use security_mode::SecurityModeComplete;
pub use service::ServiceRequest;
pub use status::GmmStatus;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::enums::MmMessageType;
use crate::error::NasError;
use crate::header::PlainMmHeader;

/// One uplink 5GMM message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GmmMessage {
    RegistrationRequest(RegistrationRequest),
    IdentityResponse(IdentityResponse),
    AuthenticationResponse(AuthenticationResponse),
    AuthenticationFailure(AuthenticationFailure),
    SecurityModeComplete(SecurityModeComplete),
    RegistrationComplete(RegistrationComplete),
    ServiceRequest(ServiceRequest),
    ConfigurationUpdateComplete(ConfigurationUpdateComplete),
    UlNasTransport(UlNasTransport),
    DeregistrationRequest(DeregistrationRequest),
    GmmStatus(GmmStatus),
}

impl GmmMessage {
    pub fn message_type(&self) -> MmMessageType {
        match self {
            GmmMessage::RegistrationRequest(_) => MmMessageType::RegistrationRequest,
            GmmMessage::IdentityResponse(_) => MmMessageType::IdentityResponse,
            GmmMessage::AuthenticationResponse(_) => MmMessageType::AuthenticationResponse,
            GmmMessage::AuthenticationFailure(_) => MmMessageType::AuthenticationFailure,
            GmmMessage::SecurityModeComplete(_) => MmMessageType::SecurityModeComplete,
            GmmMessage::RegistrationComplete(_) => MmMessageType::RegistrationComplete,
            GmmMessage::ServiceRequest(_) => MmMessageType::ServiceRequest,
            GmmMessage::ConfigurationUpdateComplete(_) => {
                MmMessageType::ConfigurationUpdateComplete
            }
            GmmMessage::UlNasTransport(_) => MmMessageType::UlNasTransport,
            GmmMessage::DeregistrationRequest(_) => {
                MmMessageType::DeregistrationRequestUeOriginating
            }
            GmmMessage::GmmStatus(_) => MmMessageType::FiveGMmStatus,
        }
    }

    /// Encodes the plain header followed by the message body.
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        PlainMmHeader::new(self.message_type()).encode(buf);
        match self {
            GmmMessage::RegistrationRequest(m) => m.encode(buf),
            GmmMessage::IdentityResponse(m) => m.encode(buf),
            GmmMessage::AuthenticationResponse(m) => m.encode(buf),
            GmmMessage::AuthenticationFailure(m) => m.encode(buf),
            GmmMessage::SecurityModeComplete(m) => m.encode(buf),
            GmmMessage::RegistrationComplete(m) => m.encode(buf),
            GmmMessage::ServiceRequest(m) => m.encode(buf),
            GmmMessage::ConfigurationUpdateComplete(m) => m.encode(buf),
            GmmMessage::UlNasTransport(m) => m.encode(buf),
            GmmMessage::DeregistrationRequest(m) => m.encode(buf),
            GmmMessage::GmmStatus(m) => m.encode(buf),
        }
    }

    pub fn to_bytes(&self) -> Result<Bytes, NasError> {
        let mut buf = BytesMut::with_capacity(64);
        self.encode(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Decodes a plain (unprotected) 5GMM message.
    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        let header = PlainMmHeader::decode(buf)?;
        let msg = match header.message_type {
            MmMessageType::RegistrationRequest => {
                GmmMessage::RegistrationRequest(RegistrationRequest::decode(buf)?)
            }
            MmMessageType::RegistrationComplete => {
                GmmMessage::RegistrationComplete(RegistrationComplete::decode(buf)?)
            }
            MmMessageType::DeregistrationRequestUeOriginating => {
                GmmMessage::DeregistrationRequest(DeregistrationRequest::decode(buf)?)
            }
            MmMessageType::ServiceRequest => {
                GmmMessage::ServiceRequest(ServiceRequest::decode(buf)?)
            }
            MmMessageType::ConfigurationUpdateComplete => {
                GmmMessage::ConfigurationUpdateComplete(ConfigurationUpdateComplete::decode(buf)?)
            }
            MmMessageType::AuthenticationResponse => {
                GmmMessage::AuthenticationResponse(AuthenticationResponse::decode(buf)?)
            }
            MmMessageType::AuthenticationFailure => {
                GmmMessage::AuthenticationFailure(AuthenticationFailure::decode(buf)?)
            }
            MmMessageType::IdentityResponse => {
                GmmMessage::IdentityResponse(IdentityResponse::decode(buf)?)
            }
            MmMessageType::SecurityModeComplete => {
                GmmMessage::SecurityModeComplete(SecurityModeComplete::decode(buf)?)
            }
            MmMessageType::FiveGMmStatus => GmmMessage::GmmStatus(GmmStatus::decode(buf)?),
            MmMessageType::UlNasTransport => {
                GmmMessage::UlNasTransport(UlNasTransport::decode(buf)?)
            }
        };
        Ok(msg)
    }
}

//! Plain vs security protected envelopes
//!
//! The envelope of a message is chosen once per build by
//! [`select_envelope`] and then applied by [`seal`]. A failing security
//! encoder fails the build; there is no fallback to a plain message.

use bytes::Bytes;
use nasgen_nas::{
    protect, GmmMessage, NasError, NasSecurityContext, SecurityError, SecurityHeaderType,
};
use tracing::trace;

use crate::error::GmmError;

const CIPHERED: SecurityHeaderType = SecurityHeaderType::IntegrityProtectedAndCiphered;
const NEW_CONTEXT: SecurityHeaderType =
    SecurityHeaderType::IntegrityProtectedAndCipheredWithNewSecurityContext;

/// Encodes a message without security protection.
pub trait PlainEncoder {
    fn encode(&self, message: &GmmMessage) -> Result<Bytes, NasError>;
}

/// Encodes and protects a message, advancing the uplink NAS COUNT.
pub trait SecurityEncoder {
    fn encode(
        &self,
        ctx: &mut NasSecurityContext,
        security_header_type: SecurityHeaderType,
        message: &GmmMessage,
    ) -> Result<Bytes, SecurityError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NasPlainEncoder;

impl PlainEncoder for NasPlainEncoder {
    fn encode(&self, message: &GmmMessage) -> Result<Bytes, NasError> {
        message.to_bytes()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NasSecurityEncoder;

impl SecurityEncoder for NasSecurityEncoder {
    fn encode(
        &self,
        ctx: &mut NasSecurityContext,
        security_header_type: SecurityHeaderType,
        message: &GmmMessage,
    ) -> Result<Bytes, SecurityError> {
        let plain = message.to_bytes()?;
        protect(ctx, security_header_type, &plain)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    Plain,
    Protected(SecurityHeaderType),
}

impl Envelope {
    pub fn name(&self) -> &'static str {
        match self {
            Envelope::Plain => "plain",
            Envelope::Protected(NEW_CONTEXT) => "protected/new-context",
            Envelope::Protected(_) => "protected",
        }
    }
}

/// Envelope for `message`. `context_update` only affects Registration Request.
pub fn select_envelope(message: &GmmMessage, context_update: bool) -> Envelope {
    match message {
        GmmMessage::RegistrationRequest(_) if context_update => Envelope::Protected(CIPHERED),
        GmmMessage::RegistrationRequest(_) => Envelope::Plain,
        GmmMessage::IdentityResponse(_) => Envelope::Plain,
        GmmMessage::AuthenticationResponse(_) => Envelope::Plain,
        GmmMessage::AuthenticationFailure(_) => Envelope::Plain,
        GmmMessage::GmmStatus(_) => Envelope::Plain,
        GmmMessage::SecurityModeComplete(_) => Envelope::Protected(NEW_CONTEXT),
        GmmMessage::RegistrationComplete(_) => Envelope::Protected(CIPHERED),
        GmmMessage::ServiceRequest(_) => Envelope::Protected(CIPHERED),
        GmmMessage::ConfigurationUpdateComplete(_) => Envelope::Protected(CIPHERED),
        GmmMessage::UlNasTransport(_) => Envelope::Protected(CIPHERED),
        GmmMessage::DeregistrationRequest(_) => Envelope::Protected(CIPHERED),
    }
}

/// Runs the encoder matching `envelope` exactly once.
pub fn seal<P: PlainEncoder, S: SecurityEncoder>(
    plain: &P,
    security: &S,
    ctx: &mut NasSecurityContext,
    envelope: Envelope,
    message: &GmmMessage,
) -> Result<Bytes, GmmError> {
    let bytes = match envelope {
        Envelope::Plain => plain.encode(message)?,
        Envelope::Protected(sht) => security.encode(ctx, sht, message)?,
    };
    let message_type = message.message_type();
    trace!("Sealed {:?} as {}", message_type, envelope.name());
    Ok(bytes)
}

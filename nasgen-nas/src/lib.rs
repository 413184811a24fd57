//! Uplink NAS-5GMM message codec
//!
//! Encodes (and, for verification, decodes) the 5GMM messages a UE sends to
//! the AMF as defined in 3GPP TS 24.501, and applies NAS security protection.
//!
//! # Message Structure
//!
//! - [`PlainMmHeader`]: plain 5GMM header (3 bytes)
//! - [`SecuredHeader`]: security protected header (7 bytes)
//! - [`GmmMessage`]: one variant per uplink message
//!
//! # Example
//!
//! ```rust
//! use nasgen_nas::{GmmMessage, GmmStatus, MmCause};
//!
//! let msg = GmmMessage::GmmStatus(GmmStatus::new(MmCause::SemanticallyIncorrectMessage));
//! let bytes = msg.to_bytes().unwrap();
//! assert_eq!(bytes.as_ref(), &[0x7E, 0x00, 0x64, 95]);
//!
//! let decoded = GmmMessage::decode(&mut bytes.clone()).unwrap();
//! assert_eq!(decoded, msg);
//! ```

pub mod enums;
pub mod error;
pub mod header;
pub mod ies;
pub mod messages;
pub mod security;

pub use enums::{ExtendedProtocolDiscriminator, MmCause, MmMessageType, SecurityHeaderType};
pub use error::NasError;
pub use header::{PlainMmHeader, SecuredHeader};
pub use ies::ie1::{
    AccessType, ControlPlaneServiceType, FollowOnRequest, IdentityType, Ie5gsRegistrationType,
    IeDeRegistrationType, InformationElement1, NasKeySetIdentifier, PayloadContainerType,
    RegistrationType, RequestType, SecurityContextType, ServiceType, SwitchOff,
};
pub use ies::ie4::{
    Ie5gmmCapability, IeAuthenticationFailureParameter, IeAuthenticationResponseParameter, IeDnn,
    IeSNssai, IeUeSecurityCapability, IeUplinkDataStatus,
};
pub use ies::ie6::{Ie5gsMobileIdentity, IeNasMessageContainer, IePayloadContainer};
pub use messages::{
    AuthenticationFailure, AuthenticationResponse, ConfigurationUpdateComplete,
    DeregistrationRequest, GmmMessage, GmmStatus, IdentityResponse, RegistrationComplete,
    RegistrationRequest, SecurityModeComplete, ServiceRequest, UlNasTransport,
};
pub use security::{
    protect, unprotect, CipheringAlgorithm, IntegrityAlgorithm, NasCount, NasDirection,
    NasSecurityContext, SecurityError,
};

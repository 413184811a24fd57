//! NAS protocol enumerations (3GPP TS 24.501)

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Extended Protocol Discriminator (TS 24.501 9.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ExtendedProtocolDiscriminator {
    MobilityManagement = 0x7E,
    SessionManagement = 0x2E,
}

/// Security Header Type (TS 24.501 9.3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SecurityHeaderType {
    #[default]
    NotProtected = 0x00,
    IntegrityProtected = 0x01,
    IntegrityProtectedAndCiphered = 0x02,
    IntegrityProtectedWithNewSecurityContext = 0x03,
    IntegrityProtectedAndCipheredWithNewSecurityContext = 0x04,
}

impl SecurityHeaderType {
    pub fn is_protected(&self) -> bool {
        !matches!(self, SecurityHeaderType::NotProtected)
    }

    pub fn is_ciphered(&self) -> bool {
        matches!(
            self,
            SecurityHeaderType::IntegrityProtectedAndCiphered
                | SecurityHeaderType::IntegrityProtectedAndCipheredWithNewSecurityContext
        )
    }

    pub fn is_new_security_context(&self) -> bool {
        matches!(
            self,
            SecurityHeaderType::IntegrityProtectedWithNewSecurityContext
                | SecurityHeaderType::IntegrityProtectedAndCipheredWithNewSecurityContext
        )
    }
}

/// 5GMM message types sent by the UE (TS 24.501 9.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum MmMessageType {
    RegistrationRequest = 0x41,
    RegistrationComplete = 0x43,
    DeregistrationRequestUeOriginating = 0x45,
    ServiceRequest = 0x4C,
    ConfigurationUpdateComplete = 0x55,
    AuthenticationResponse = 0x57,
    AuthenticationFailure = 0x59,
    IdentityResponse = 0x5C,
    SecurityModeComplete = 0x5E,
    FiveGMmStatus = 0x64,
    UlNasTransport = 0x67,
}

/// 5GMM cause values (TS 24.501 9.11.3.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum MmCause {
    IllegalUe = 3,
    PeiNotAccepted = 5,
    IllegalMe = 6,
    FiveGsServicesNotAllowed = 7,
    UeIdentityCannotBeDerived = 9,
    ImplicitlyDeregistered = 10,
    PlmnNotAllowed = 11,
    TrackingAreaNotAllowed = 12,
    RoamingNotAllowedInTa = 13,
    NoSuitableCellsInTa = 15,
    MacFailure = 20,
    SynchFailure = 21,
    Congestion = 22,
    UeSecurityCapabilitiesMismatch = 23,
    SecurityModeRejectedUnspecified = 24,
    Non5gAuthenticationUnacceptable = 26,
    N1ModeNotAllowed = 27,
    RestrictedServiceArea = 28,
    LadnNotAvailable = 43,
    MaxPduSessionsReached = 65,
    InsufficientResourcesForSliceAndDnn = 67,
    InsufficientResourcesForSlice = 69,
    NgksiAlreadyInUse = 71,
    Non3gppAccessTo5gcnNotAllowed = 72,
    ServingNetworkNotAuthorized = 73,
    PayloadNotForwarded = 90,
    DnnNotSupportedOrNotSubscribedInSlice = 91,
    InsufficientUserPlaneResources = 92,
    SemanticallyIncorrectMessage = 95,
    InvalidMandatoryInformation = 96,
    MessageTypeNonExistent = 97,
    MessageTypeNotCompatible = 98,
    IeNonExistent = 99,
    ConditionalIeError = 100,
    MessageNotCompatible = 101,
    ProtocolErrorUnspecified = 111,
}

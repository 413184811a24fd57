//! Type 1 Information Elements (half-octet)

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::NasError;

/// A value that fits in four bits of an octet.
pub trait InformationElement1: Sized {
    fn decode(val: u8) -> Result<Self, NasError>;
    fn encode(&self) -> u8;
}

fn invalid(val: u8, name: &str) -> NasError {
    NasError::InvalidIeValue(format!("0x{val:X} for {name}"))
}

/// Reads `bits`, extracted from the octet `val`, as the enum `T`.
fn field<T: TryFrom<u8>>(val: u8, bits: u8, name: &str) -> Result<T, NasError> {
    T::try_from(bits).map_err(|_| invalid(val, name))
}

/// 5GS identity type (TS 24.501 9.11.3.3), carried in the mobile identity's first octet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum IdentityType {
    #[default]
    NoIdentity = 0b000,
    Suci = 0b001,
    Guti = 0b010,
    Imei = 0b011,
    Tmsi = 0b100,
    ImeiSv = 0b101,
}

/// Follow-on request indicator (TS 24.501 9.11.3.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum FollowOnRequest {
    #[default]
    NoPending = 0,
    Pending = 1,
}

/// 5GS registration type value (TS 24.501 9.11.3.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RegistrationType {
    #[default]
    InitialRegistration = 0b001,
    MobilityRegistrationUpdating = 0b010,
    PeriodicRegistrationUpdating = 0b011,
    EmergencyRegistration = 0b100,
}

/// 5GS registration type IE: FOR in bit 4, type in bits 3-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ie5gsRegistrationType {
    pub follow_on_request: FollowOnRequest,
    pub registration_type: RegistrationType,
}

impl Ie5gsRegistrationType {
    pub fn new(follow_on_request: FollowOnRequest, registration_type: RegistrationType) -> Self {
        Self {
            follow_on_request,
            registration_type,
        }
    }
}

impl InformationElement1 for Ie5gsRegistrationType {
    fn decode(val: u8) -> Result<Self, NasError> {
        let follow_on_request = field(val, (val >> 3) & 0x01, "FollowOnRequest")?;
        let registration_type = field(val, val & 0x07, "RegistrationType")?;
        Ok(Self::new(follow_on_request, registration_type))
    }

    fn encode(&self) -> u8 {
        (u8::from(self.follow_on_request) << 3) | (u8::from(self.registration_type) & 0x07)
    }
}

/// Type of security context flag (TS 24.501 9.11.3.32)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SecurityContextType {
    #[default]
    Native = 0,
    Mapped = 1,
}

/// NAS key set identifier, ngKSI (TS 24.501 9.11.3.32): TSC in bit 4, KSI in bits 3-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NasKeySetIdentifier {
    pub tsc: SecurityContextType,
    /// 0-6, 7 = no key available
    pub ksi: u8,
}

impl NasKeySetIdentifier {
    pub const NO_KEY_AVAILABLE: u8 = 0x07;

    pub fn new(tsc: SecurityContextType, ksi: u8) -> Self {
        Self {
            tsc,
            ksi: ksi & 0x07,
        }
    }

    pub fn no_key() -> Self {
        Self::new(SecurityContextType::Native, Self::NO_KEY_AVAILABLE)
    }

    pub fn is_no_key(&self) -> bool {
        self.ksi == Self::NO_KEY_AVAILABLE
    }
}

impl InformationElement1 for NasKeySetIdentifier {
    fn decode(val: u8) -> Result<Self, NasError> {
        let tsc = field(val, (val >> 3) & 0x01, "SecurityContextType")?;
        Ok(Self::new(tsc, val & 0x07))
    }

    fn encode(&self) -> u8 {
        (u8::from(self.tsc) << 3) | (self.ksi & 0x07)
    }
}

/// Service type (TS 24.501 9.11.3.50)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ServiceType {
    #[default]
    Signalling = 0,
    Data = 1,
    MobileTerminatedServices = 2,
    EmergencyServices = 3,
    EmergencyServicesFallback = 4,
    HighPriorityAccess = 5,
    ElevatedSignalling = 6,
}

impl InformationElement1 for ServiceType {
    fn decode(val: u8) -> Result<Self, NasError> {
        field(val, val & 0x0F, "ServiceType")
    }

    fn encode(&self) -> u8 {
        u8::from(*self) & 0x0F
    }
}

/// Access type (TS 24.501 9.11.2.1A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum AccessType {
    #[default]
    ThreeGppAccess = 0b01,
    NonThreeGppAccess = 0b10,
    Both = 0b11,
}

/// Switch off flag of the de-registration type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SwitchOff {
    #[default]
    NormalDeRegistration = 0,
    SwitchOff = 1,
}

/// De-registration type, UE originating (TS 24.501 9.11.3.20):
/// switch off in bit 4, bit 3 spare, access type in bits 2-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeDeRegistrationType {
    pub switch_off: SwitchOff,
    pub access_type: AccessType,
}

impl IeDeRegistrationType {
    pub fn new(switch_off: SwitchOff, access_type: AccessType) -> Self {
        Self {
            switch_off,
            access_type,
        }
    }
}

impl InformationElement1 for IeDeRegistrationType {
    fn decode(val: u8) -> Result<Self, NasError> {
        let switch_off = field(val, (val >> 3) & 0x01, "SwitchOff")?;
        let access_type = field(val, val & 0x03, "AccessType")?;
        Ok(Self::new(switch_off, access_type))
    }

    fn encode(&self) -> u8 {
        (u8::from(self.switch_off) << 3) | u8::from(self.access_type)
    }
}

/// Payload container type (TS 24.501 9.11.3.40)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum PayloadContainerType {
    #[default]
    N1SmInformation = 0x01,
    Sms = 0x02,
    Lpp = 0x03,
    SorTransparentContainer = 0x04,
    UePolicyContainer = 0x05,
    UeParametersUpdate = 0x06,
    LocationServicesMessage = 0x07,
    CiotUserData = 0x08,
    Multiple = 0x0F,
}

impl InformationElement1 for PayloadContainerType {
    fn decode(val: u8) -> Result<Self, NasError> {
        field(val, val & 0x0F, "PayloadContainerType")
    }

    fn encode(&self) -> u8 {
        u8::from(*self) & 0x0F
    }
}

/// Request type (TS 24.501 9.11.3.47)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RequestType {
    #[default]
    InitialRequest = 0b001,
    ExistingPduSession = 0b010,
    InitialEmergencyRequest = 0b011,
    ExistingEmergencyPduSession = 0b100,
    ModificationRequest = 0b101,
    MaPduRequest = 0b110,
}

impl InformationElement1 for RequestType {
    fn decode(val: u8) -> Result<Self, NasError> {
        field(val, val & 0x07, "RequestType")
    }

    fn encode(&self) -> u8 {
        u8::from(*self) & 0x07
    }
}

/// Control plane service type (TS 24.501 9.11.3.18D)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ControlPlaneServiceType {
    #[default]
    MobileOriginatingRequest = 0b000,
    MobileTerminatingRequest = 0b001,
    EmergencyServices = 0b010,
    EmergencyServicesFallback = 0b011,
}

impl InformationElement1 for ControlPlaneServiceType {
    fn decode(val: u8) -> Result<Self, NasError> {
        field(val, val & 0x07, "ControlPlaneServiceType")
    }

    fn encode(&self) -> u8 {
        u8::from(*self) & 0x07
    }
}

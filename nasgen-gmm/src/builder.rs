//! Uplink 5GMM message builders
//!
//! Every builder takes the UE context mutably, fills a fresh message,
//! picks its envelope and returns the wire bytes. Builders that protect
//! their message advance the UE's uplink NAS COUNT;
//! `authentication_response` also replaces the UE's key hierarchy.

use bytes::Bytes;
use nasgen_common::logging::log_uplink_nas;
use nasgen_common::NetworkConfig;
use nasgen_nas::{
    AuthenticationFailure, AuthenticationResponse, ConfigurationUpdateComplete,
    ControlPlaneServiceType, DeregistrationRequest, GmmMessage, GmmStatus, IdentityResponse,
    Ie5gmmCapability, IeDeRegistrationType, IeDnn, IeNasMessageContainer, IePayloadContainer,
    IeSNssai, IeUeSecurityCapability, IeUplinkDataStatus, MmCause, PayloadContainerType,
    RegistrationComplete, RegistrationRequest, RequestType, SecurityModeComplete, ServiceRequest,
    ServiceType, SwitchOff, UlNasTransport,
};
use tracing::{debug, info};

use crate::auth::{derive_challenge_response, derive_resync_token, RESYNC_AMF};
use crate::context::UeTestContext;
use crate::envelope::{
    seal, select_envelope, NasPlainEncoder, NasSecurityEncoder, PlainEncoder, SecurityEncoder,
};
use crate::error::GmmError;
use crate::identity::{encode_identity, IdentityKind};

/// Uplink data status for the session `psi`.
///
/// The PSI mask is ORed in twice: shifted up a byte (truncated to 16 bits)
/// and shifted down a byte. Only one of the two can be non-zero for a given
/// PSI, so PSI 5 yields 0x2000. The pattern is kept literally.
pub fn uplink_data_status(psi: u8) -> IeUplinkDataStatus {
    let psimask: u16 = 1 << (psi & 0x0F);
    let mut value: u16 = 0;
    value |= ((psimask as u32) << 8) as u16;
    value |= psimask >> 8;
    IeUplinkDataStatus::new(value)
}

/// Builds uplink 5GMM messages for one serving network.
pub struct GmmBuilder<'c, P = NasPlainEncoder, S = NasSecurityEncoder> {
    network: &'c NetworkConfig,
    plain: P,
    security: S,
}

impl<'c> GmmBuilder<'c> {
    pub fn new(network: &'c NetworkConfig) -> Self {
        Self::with_encoders(network, NasPlainEncoder, NasSecurityEncoder)
    }
}

impl<'c, P: PlainEncoder, S: SecurityEncoder> GmmBuilder<'c, P, S> {
    pub fn with_encoders(network: &'c NetworkConfig, plain: P, security: S) -> Self {
        Self {
            network,
            plain,
            security,
        }
    }

    fn finish(
        &self,
        ue: &mut UeTestContext,
        message: GmmMessage,
        context_update: bool,
    ) -> Result<Bytes, GmmError> {
        let envelope = select_envelope(&message, context_update);
        let bytes = seal(
            &self.plain,
            &self.security,
            &mut ue.security,
            envelope,
            &message,
        )?;
        let message_type = format!("{:?}", message.message_type());
        log_uplink_nas(&message_type, envelope.name(), &bytes);
        Ok(bytes)
    }

    /// Registration Request. An `update` registration identifies the UE by
    /// its GUTI, reports the current session and is protected; an initial
    /// one uses the SUCI and is sent plain.
    pub fn registration_request(
        &self,
        ue: &mut UeTestContext,
        update: bool,
    ) -> Result<Bytes, GmmError> {
        let kind = if update {
            IdentityKind::Guti
        } else {
            IdentityKind::Suci
        };
        let mobile_identity = encode_identity(ue, kind)?;

        let mut msg =
            RegistrationRequest::new(ue.nas.registration_type, ue.nas.ng_ksi, mobile_identity);
        if update {
            msg.uplink_data_status = Some(uplink_data_status(ue.current_session()?.psi));
        }
        msg.gmm_capability = Some(Ie5gmmCapability::all());
        msg.ue_security_capability = Some(IeUeSecurityCapability::default());

        info!("Building Registration Request (update={})", update);
        self.finish(ue, GmmMessage::RegistrationRequest(msg), update)
    }

    pub fn identity_response(&self, ue: &mut UeTestContext) -> Result<Bytes, GmmError> {
        let msg = IdentityResponse::new(encode_identity(ue, IdentityKind::Suci)?);
        self.finish(ue, GmmMessage::IdentityResponse(msg), false)
    }

    /// Authentication Response carrying RES*. Runs the 5G-AKA pipeline and
    /// stores the resulting key hierarchy in `ue`.
    pub fn authentication_response(&self, ue: &mut UeTestContext) -> Result<Bytes, GmmError> {
        let snn = self.network.serving_network_name();
        let res_star = derive_challenge_response(ue, &snn)?;
        let msg = AuthenticationResponse::new(res_star);
        self.finish(ue, GmmMessage::AuthenticationResponse(msg), false)
    }

    /// Authentication Failure. AUTS is only included for synch failure.
    pub fn authentication_failure(
        &self,
        ue: &mut UeTestContext,
        cause: MmCause,
    ) -> Result<Bytes, GmmError> {
        let msg = if cause == MmCause::SynchFailure {
            AuthenticationFailure::with_auts(cause, derive_resync_token(ue, &RESYNC_AMF)?)
        } else {
            AuthenticationFailure::new(cause)
        };
        debug!("Building Authentication Failure, cause={:?}", cause);
        self.finish(ue, GmmMessage::AuthenticationFailure(msg), false)
    }

    /// Security Mode Complete with IMEISV and, if given, the nested
    /// message in a NAS message container.
    pub fn security_mode_complete(
        &self,
        ue: &mut UeTestContext,
        nested: Option<Bytes>,
    ) -> Result<Bytes, GmmError> {
        let msg = SecurityModeComplete {
            imeisv: Some(encode_identity(ue, IdentityKind::Imeisv)?),
            nas_message_container: nested.map(IeNasMessageContainer::new),
        };
        self.finish(ue, GmmMessage::SecurityModeComplete(msg), false)
    }

    pub fn registration_complete(&self, ue: &mut UeTestContext) -> Result<Bytes, GmmError> {
        let msg = GmmMessage::RegistrationComplete(RegistrationComplete);
        self.finish(ue, msg, false)
    }

    /// Service Request for data, identified by 5G-S-TMSI.
    pub fn service_request(&self, ue: &mut UeTestContext) -> Result<Bytes, GmmError> {
        let s_tmsi = encode_identity(ue, IdentityKind::STmsi)?;
        let mut msg = ServiceRequest::new(ue.nas.ng_ksi, ServiceType::Data, s_tmsi);
        msg.uplink_data_status = Some(uplink_data_status(ue.current_session()?.psi));
        self.finish(ue, GmmMessage::ServiceRequest(msg), false)
    }

    pub fn configuration_update_complete(&self, ue: &mut UeTestContext) -> Result<Bytes, GmmError> {
        let service_type = ControlPlaneServiceType::MobileOriginatingRequest;
        let msg = ConfigurationUpdateComplete::new(service_type);
        self.finish(ue, GmmMessage::ConfigurationUpdateComplete(msg), false)
    }

    /// UL NAS Transport of `payload` for the session `psi`, requesting an
    /// initial PDU session on the first configured slice.
    pub fn ul_nas_transport(
        &self,
        ue: &mut UeTestContext,
        psi: u8,
        payload_type: PayloadContainerType,
        payload: Bytes,
    ) -> Result<Bytes, GmmError> {
        let dnn = ue.session(psi)?.dnn.clone();
        let slice = self.network.default_s_nssai();
        let s_nssai = *slice.ok_or(GmmError::NoConfiguredSlice)?;

        let mut msg = UlNasTransport::new(payload_type, IePayloadContainer::new(payload));
        msg.pdu_session_id = Some(psi);
        msg.request_type = Some(RequestType::InitialRequest);
        msg.s_nssai = Some(IeSNssai::new(s_nssai));
        msg.dnn = Some(IeDnn::new(dnn));

        debug!("Building UL NAS Transport, psi={} {:?}", psi, payload_type);
        self.finish(ue, GmmMessage::UlNasTransport(msg), false)
    }

    /// UE originating De-registration Request; GUTI if assigned, else SUCI.
    pub fn deregistration_request(
        &self,
        ue: &mut UeTestContext,
        switch_off: bool,
    ) -> Result<Bytes, GmmError> {
        let kind = if ue.assigned_guti().is_some() {
            IdentityKind::Guti
        } else {
            IdentityKind::Suci
        };
        let mobile_identity = encode_identity(ue, kind)?;
        let switch_off = if switch_off {
            SwitchOff::SwitchOff
        } else {
            SwitchOff::NormalDeRegistration
        };
        let msg = DeregistrationRequest::new(
            IeDeRegistrationType::new(switch_off, ue.nas.access_type),
            ue.nas.ng_ksi,
            mobile_identity,
        );
        info!("Building De-registration Request ({:?})", switch_off);
        self.finish(ue, GmmMessage::DeregistrationRequest(msg), false)
    }

    pub fn gmm_status(&self, ue: &mut UeTestContext, cause: MmCause) -> Result<Bytes, GmmError> {
        self.finish(ue, GmmMessage::GmmStatus(GmmStatus::new(cause)), false)
    }
}

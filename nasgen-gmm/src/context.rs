//! UE and PDU session test contexts
//!
//! A [`UeTestContext`] is everything the builders know about one simulated
//! UE: credentials, the current AKA challenge and the key hierarchy derived
//! from it, identities, NAS state and its PDU sessions.

use bytes::Bytes;
use nasgen_common::{Guti, OpType, SubscriberConfig, Supi};
use nasgen_crypto::milenage::{compute_opc, Milenage};
use nasgen_nas::{
    AccessType, FollowOnRequest, Ie5gsRegistrationType, NasKeySetIdentifier, NasSecurityContext,
    RegistrationType,
};

use crate::error::GmmError;

/// IMEISV used when the subscriber does not configure one.
pub const DEFAULT_IMEISV: &str = "1110000000000000";

pub const IMEISV_DIGITS: usize = 16;

/// Keys and intermediate values of one 5G-AKA run.
///
/// A stored vector is a record of the run that produced it and stays
/// readable after a new challenge arrives. Builders take KAMF only through
/// [`UeTestContext::kamf`], which rejects a vector from an older challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthVector {
    /// Challenge the vector was derived for
    pub rand: [u8; 16],
    pub autn: [u8; 16],
    pub res: [u8; 8],
    pub res_star: [u8; 16],
    pub ck: [u8; 16],
    pub ik: [u8; 16],
    pub ak: [u8; 6],
    pub kausf: [u8; 32],
    pub kseaf: [u8; 32],
    pub kamf: [u8; 32],
}

/// Mobility management state reported in uplink messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NasState {
    pub registration_type: Ie5gsRegistrationType,
    pub ng_ksi: NasKeySetIdentifier,
    pub access_type: AccessType,
}

impl Default for NasState {
    fn default() -> Self {
        Self {
            registration_type: Ie5gsRegistrationType::new(
                FollowOnRequest::Pending,
                RegistrationType::InitialRegistration,
            ),
            ng_ksi: NasKeySetIdentifier::no_key(),
            access_type: AccessType::ThreeGppAccess,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTestContext {
    pub psi: u8,
    pub dnn: String,
}

impl SessionTestContext {
    pub fn new(psi: u8, dnn: impl Into<String>) -> Result<Self, GmmError> {
        if !(1..=15).contains(&psi) {
            return Err(GmmError::InvalidPsi(psi));
        }
        Ok(Self {
            psi,
            dnn: dnn.into(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct UeTestContext {
    k: [u8; 16],
    opc: [u8; 16],
    supi: Supi,
    abba: Vec<u8>,
    challenge: Option<([u8; 16], [u8; 16])>,
    auth_vector: Option<AuthVector>,
    guti: Option<Guti>,
    suci: Bytes,
    imeisv: Option<[u8; IMEISV_DIGITS]>,
    sessions: Vec<SessionTestContext>,
    current_session: Option<u8>,
    pub nas: NasState,
    pub security: NasSecurityContext,
}

fn parse_imeisv(digits: &str) -> Result<[u8; IMEISV_DIGITS], GmmError> {
    let invalid = || nasgen_common::Error::Config(format!("IMEISV must be 16 digits: {digits}"));
    if digits.len() != IMEISV_DIGITS {
        return Err(invalid().into());
    }
    let mut out = [0u8; IMEISV_DIGITS];
    for (slot, c) in out.iter_mut().zip(digits.chars()) {
        *slot = c.to_digit(10).ok_or_else(invalid)? as u8;
    }
    Ok(out)
}

impl UeTestContext {
    /// Context with the default IMEISV and ABBA, and no challenge or GUTI.
    pub fn new(supi: Supi, k: [u8; 16], opc: [u8; 16]) -> Self {
        Self {
            k,
            opc,
            supi,
            abba: vec![0x00, 0x00],
            challenge: None,
            auth_vector: None,
            guti: None,
            suci: Bytes::new(),
            imeisv: parse_imeisv(DEFAULT_IMEISV).ok(),
            sessions: Vec::new(),
            current_session: None,
            nas: NasState::default(),
            security: NasSecurityContext::new(),
        }
    }

    /// Builds a context from a subscriber configuration. OP is converted to
    /// OPc here; the first configured session becomes the current one.
    pub fn from_config(config: &SubscriberConfig) -> Result<Self, GmmError> {
        config.validate()?;
        let opc = match config.op_type {
            OpType::Opc => config.op,
            OpType::Op => compute_opc(&config.key, &config.op),
        };

        let mut ue = Self::new(config.supi.clone(), config.key, opc);
        ue.abba = config.abba.clone();
        ue.suci = Bytes::copy_from_slice(&config.suci);
        if let Some(imeisv) = &config.imeisv {
            ue.set_imeisv(imeisv)?;
        }
        for session in &config.sessions {
            ue.add_session(session.psi, session.dnn.clone())?;
        }
        if let Some(first) = config.sessions.first() {
            ue.set_current_session(first.psi)?;
        }
        Ok(ue)
    }

    /// Subscriber identity the KAMF derivation is bound to.
    pub fn supi(&self) -> &Supi {
        &self.supi
    }

    /// ABBA parameter fed into the KAMF derivation. Defaults to `0x0000`.
    pub fn abba(&self) -> &[u8] {
        &self.abba
    }

    /// Replaces the ABBA used by the next KAMF derivation.
    pub fn set_abba(&mut self, abba: Vec<u8>) {
        self.abba = abba;
    }

    /// Operator variant key OPc, already derived from OP when configured so.
    pub fn opc(&self) -> &[u8; 16] {
        &self.opc
    }

    pub(crate) fn milenage(&self) -> Milenage {
        Milenage::new(&self.k, &self.opc)
    }

    /// Sets RAND/AUTN from an Authentication Request. Keys derived for an
    /// earlier challenge become stale.
    pub fn set_challenge(&mut self, rand: [u8; 16], autn: [u8; 16]) {
        self.challenge = Some((rand, autn));
    }

    /// Current RAND and AUTN.
    pub fn challenge(&self) -> Option<(&[u8; 16], &[u8; 16])> {
        self.challenge.as_ref().map(|(rand, autn)| (rand, autn))
    }

    /// Last stored 5G-AKA vector, for inspection only.
    ///
    /// The vector is not checked against the current challenge; use
    /// [`kamf`](Self::kamf) to read a key that is still valid.
    pub fn auth_vector(&self) -> Option<&AuthVector> {
        self.auth_vector.as_ref()
    }

    pub(crate) fn store_auth_vector(&mut self, vector: AuthVector) {
        self.auth_vector = Some(vector);
    }

    /// KAMF of the current challenge. Fails with `KeysNotDerived` before
    /// any 5G-AKA run and with `StaleKeys` once the challenge has changed.
    pub fn kamf(&self) -> Result<&[u8; 32], GmmError> {
        let vector = self.auth_vector.as_ref().ok_or(GmmError::KeysNotDerived)?;
        match self.challenge {
            Some((rand, autn)) if rand == vector.rand && autn == vector.autn => Ok(&vector.kamf),
            _ => Err(GmmError::StaleKeys),
        }
    }

    /// Stored GUTI, assigned or not.
    pub fn guti(&self) -> Option<&Guti> {
        self.guti.as_ref()
    }

    /// The GUTI, if one with a non-zero 5G-TMSI has been assigned.
    pub fn assigned_guti(&self) -> Option<&Guti> {
        self.guti.as_ref().filter(|g| g.is_assigned())
    }

    /// Stores the GUTI the network assigned.
    pub fn set_guti(&mut self, guti: Guti) {
        self.guti = Some(guti);
    }

    /// Forgets the GUTI, so registration and de-registration send the SUCI.
    pub fn clear_guti(&mut self) {
        self.guti = None;
    }

    /// Encoded SUCI mobile identity value, empty until one is set.
    pub fn suci(&self) -> &Bytes {
        &self.suci
    }

    /// Replaces the SUCI value, sent verbatim in identity fields.
    pub fn set_suci(&mut self, suci: impl Into<Bytes>) {
        self.suci = suci.into();
    }

    /// IMEISV as 16 decimal digit values.
    pub fn imeisv(&self) -> Option<&[u8; IMEISV_DIGITS]> {
        self.imeisv.as_ref()
    }

    /// Sets the IMEISV from a string of exactly 16 decimal digits.
    pub fn set_imeisv(&mut self, digits: &str) -> Result<(), GmmError> {
        self.imeisv = Some(parse_imeisv(digits)?);
        Ok(())
    }

    /// Drops the IMEISV so Security Mode Complete omits it.
    pub fn clear_imeisv(&mut self) {
        self.imeisv = None;
    }

    /// Adds a PDU session, replacing any session with the same PSI.
    pub fn add_session(
        &mut self,
        psi: u8,
        dnn: impl Into<String>,
    ) -> Result<&SessionTestContext, GmmError> {
        let session = SessionTestContext::new(psi, dnn)?;
        self.sessions.retain(|s| s.psi != psi);
        self.sessions.push(session);
        self.session(psi)
    }

    /// Session with the given PSI.
    pub fn session(&self, psi: u8) -> Result<&SessionTestContext, GmmError> {
        self.sessions
            .iter()
            .find(|s| s.psi == psi)
            .ok_or(GmmError::UnknownSession(psi))
    }

    /// All sessions, in the order they were added.
    pub fn sessions(&self) -> &[SessionTestContext] {
        &self.sessions
    }

    /// Selects the session reported by update registrations and service
    /// requests. The PSI must already be known.
    pub fn set_current_session(&mut self, psi: u8) -> Result<(), GmmError> {
        self.session(psi)?;
        self.current_session = Some(psi);
        Ok(())
    }

    /// Session picked by [`set_current_session`](Self::set_current_session).
    pub fn current_session(&self) -> Result<&SessionTestContext, GmmError> {
        let psi = self.current_session.ok_or(GmmError::NoCurrentSession)?;
        self.session(psi)
    }
}

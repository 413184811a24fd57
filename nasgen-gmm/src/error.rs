//! Builder errors
//!
//! Precondition violations mean the test scenario misused the context
//! (for example asking for an S-TMSI before a GUTI was assigned). They are
//! reported immediately and never retried.

use thiserror::Error;

use nasgen_nas::{NasError, SecurityError};

use crate::identity::IdentityKind;

#[derive(Debug, Error)]
pub enum GmmError {
    #[error("No {0} identity available in the UE context")]
    MissingIdentity(IdentityKind),

    #[error("UE has no current PDU session")]
    NoCurrentSession,

    #[error("Unknown PDU session: PSI {0}")]
    UnknownSession(u8),

    #[error("Invalid PSI {0}: expected 1..=15")]
    InvalidPsi(u8),

    #[error("No S-NSSAI configured for the serving network")]
    NoConfiguredSlice,

    #[error("KAMF not derived yet")]
    KeysNotDerived,

    #[error("Stored keys were derived for a different RAND/AUTN")]
    StaleKeys,

    #[error("No authentication challenge (RAND/AUTN) set")]
    NoChallenge,

    #[error("Invalid SUPI: {0}")]
    InvalidSupi(String),

    #[error("Configuration error: {0}")]
    Config(#[from] nasgen_common::Error),

    #[error("Encoding failed: {0}")]
    Encode(#[from] NasError),

    #[error("Security protection failed: {0}")]
    Security(#[from] SecurityError),
}

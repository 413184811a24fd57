//! UE-side NAS-5GMM test message builders
//!
//! Synthesizes the uplink 5GMM messages a test driver sends to an AMF:
//!
//! - [`identity`]: GUTI, S-TMSI, SUCI and IMEISV mobile identities
//! - [`auth`]: 5G-AKA (RES*, KAUSF, KSEAF, KAMF) and AUTS
//! - [`envelope`]: plain or security protected encoding
//! - [`builder`]: one builder per message
//!
//! # Example
//!
//! ```rust
//! use std::net::{IpAddr, Ipv4Addr};
//!
//! use nasgen_common::{AmfConfig, NetworkConfig, Plmn, SNssai, Supi};
//! use nasgen_gmm::{GmmBuilder, UeTestContext};
//!
//! let network = NetworkConfig {
//!     amf: AmfConfig::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 38412),
//!     plmn: Plmn::new(999, 70, false),
//!     tac: 1,
//!     s_nssai: vec![SNssai::new(1)],
//! };
//! let mut ue = UeTestContext::new(Supi::imsi("999700000021309"), [0x46; 16], [0xCD; 16]);
//! ue.set_suci(vec![
//!     0x01, 0x99, 0xF9, 0x07, 0xF0, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x21, 0x03, 0x90,
//! ]);
//!
//! let builder = GmmBuilder::new(&network);
//! let pdu = builder.registration_request(&mut ue, false).unwrap();
//! assert_eq!(&pdu[..3], &[0x7E, 0x00, 0x41]);
//! ```

pub mod auth;
pub mod builder;
pub mod context;
pub mod envelope;
pub mod error;
pub mod identity;

pub use auth::{
    activate_security, derive_challenge_response, derive_resync_token, RESYNC_AMF, SQN_MS,
};
pub use builder::{uplink_data_status, GmmBuilder};
pub use context::{AuthVector, NasState, SessionTestContext, UeTestContext, DEFAULT_IMEISV};
pub use envelope::{
    seal, select_envelope, Envelope, NasPlainEncoder, NasSecurityEncoder, PlainEncoder,
    SecurityEncoder,
};
pub use error::GmmError;
pub use identity::{
    encode_identity, IdentityKind, GUTI_IDENTITY_LEN, IMEISV_IDENTITY_LEN, S_TMSI_IDENTITY_LEN,
};

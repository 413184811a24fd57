//! Mobile identity encoding (TS 24.501 9.11.3.4)
//!
//! ```text
//! GUTI   : F2 | PLMN(3) | AMF region | set(10) ptr(6) | 5G-TMSI(4)   11 octets
//! S-TMSI : F4 | set(10) ptr(6) | 5G-TMSI(4)                          7 octets
//! IMEISV : d1 | o/e | 101, then digit pairs, F filler                9 octets
//! SUCI   : stored verbatim
//! ```

use std::fmt;

use bytes::{BufMut, BytesMut};
use nasgen_common::Guti;
use nasgen_nas::{IdentityType, Ie5gsMobileIdentity};

use crate::context::{UeTestContext, IMEISV_DIGITS};
use crate::error::GmmError;

pub const GUTI_IDENTITY_LEN: usize = 11;
pub const S_TMSI_IDENTITY_LEN: usize = 7;
pub const IMEISV_IDENTITY_LEN: usize = 9;

/// Identity a message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKind {
    Guti,
    Suci,
    STmsi,
    Imeisv,
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdentityKind::Guti => "5G-GUTI",
            IdentityKind::Suci => "SUCI",
            IdentityKind::STmsi => "5G-S-TMSI",
            IdentityKind::Imeisv => "IMEISV",
        };
        f.write_str(name)
    }
}

/// Encodes the requested identity from the UE context.
///
/// Fails with [`GmmError::MissingIdentity`] when the context has nothing to
/// back it: no assigned GUTI for GUTI/S-TMSI, an empty SUCI, no IMEISV.
pub fn encode_identity(
    ue: &UeTestContext,
    kind: IdentityKind,
) -> Result<Ie5gsMobileIdentity, GmmError> {
    let missing = || GmmError::MissingIdentity(kind);
    let identity = match kind {
        IdentityKind::Guti => {
            let guti = ue.assigned_guti().ok_or_else(missing)?;
            Ie5gsMobileIdentity::new(IdentityType::Guti, pack_guti(guti).to_vec())
        }
        IdentityKind::STmsi => {
            let guti = ue.assigned_guti().ok_or_else(missing)?;
            Ie5gsMobileIdentity::new(IdentityType::Tmsi, pack_s_tmsi(guti).to_vec())
        }
        IdentityKind::Suci => {
            if ue.suci().is_empty() {
                return Err(missing());
            }
            Ie5gsMobileIdentity::new(IdentityType::Suci, ue.suci().clone())
        }
        IdentityKind::Imeisv => {
            let digits = ue.imeisv().ok_or_else(missing)?;
            Ie5gsMobileIdentity::new(IdentityType::ImeiSv, pack_imeisv(digits).to_vec())
        }
    };
    Ok(identity)
}

fn pack_guti(guti: &Guti) -> [u8; GUTI_IDENTITY_LEN] {
    let mut buf = BytesMut::with_capacity(GUTI_IDENTITY_LEN);
    buf.put_u8(0xF0 | u8::from(IdentityType::Guti));
    buf.put_slice(&guti.plmn.encode());
    buf.put_u8(guti.amf_region_id);
    buf.put_u16(guti.amf_set_pointer());
    buf.put_slice(&guti.tmsi.to_be_bytes());

    let mut out = [0u8; GUTI_IDENTITY_LEN];
    out.copy_from_slice(&buf);
    out
}

fn pack_s_tmsi(guti: &Guti) -> [u8; S_TMSI_IDENTITY_LEN] {
    let mut out = [0u8; S_TMSI_IDENTITY_LEN];
    out[0] = 0xF0 | u8::from(IdentityType::Tmsi);
    // 5G-TMSI is held in host order
    out[1..].copy_from_slice(&guti.s_tmsi().to_be_bytes()[2..]);
    out
}

fn pack_imeisv(digits: &[u8; IMEISV_DIGITS]) -> [u8; IMEISV_IDENTITY_LEN] {
    let odd = (IMEISV_DIGITS % 2) as u8;
    let mut out = [0u8; IMEISV_IDENTITY_LEN];
    out[0] = (digits[0] << 4) | (odd << 3) | u8::from(IdentityType::ImeiSv);

    for (i, pair) in digits[1..].chunks(2).enumerate() {
        let low = pair[0] & 0x0F;
        let high = pair.get(1).map_or(0x0F, |d| d & 0x0F);
        out[1 + i] = (high << 4) | low;
    }
    out
}

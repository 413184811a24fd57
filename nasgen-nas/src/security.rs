//! NAS security context and uplink message protection
//!
//! The context holds the NAS keys and algorithms selected by the Security
//! Mode procedure together with the NAS COUNTs. [`protect`] turns a plain
//! 5GMM message into a security protected one:
//!
//! ```text
//! EPD | SHT | MAC(4) | SQN | [ciphered] plain NAS message
//! ```
//!
//! The MAC is computed over `SQN || [ciphered] plain NAS message` with
//! COUNT = `overflow << 8 | SQN`, bearer 0 and the uplink direction.

use bytes::{BufMut, Bytes, BytesMut};
use nasgen_crypto::kdf::{derive_knas_enc, derive_knas_int, KEY_128_SIZE, KEY_256_SIZE};
use nasgen_crypto::nea::nea2_encrypt;
use nasgen_crypto::nia::{nia2_compute_mac, MAC_SIZE};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use tracing::trace;

use crate::enums::SecurityHeaderType;
use crate::error::NasError;
use crate::header::SecuredHeader;
use crate::ies::ie1::NasKeySetIdentifier;

/// NAS bearer identity used for integrity and ciphering (TS 33.501)
pub const NAS_BEARER: u8 = 0;

/// 5G NAS ciphering algorithm (TS 24.501 9.11.3.34)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum CipheringAlgorithm {
    /// 5G-EA0 (null ciphering)
    #[default]
    Nea0 = 0x00,
    /// 128-5G-EA1 (SNOW 3G)
    Nea1 = 0x01,
    /// 128-5G-EA2 (AES)
    Nea2 = 0x02,
    /// 128-5G-EA3 (ZUC)
    Nea3 = 0x03,
}

/// 5G NAS integrity algorithm (TS 24.501 9.11.3.34)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum IntegrityAlgorithm {
    /// 5G-IA0 (null integrity)
    #[default]
    Nia0 = 0x00,
    /// 128-5G-IA1 (SNOW 3G)
    Nia1 = 0x01,
    /// 128-5G-IA2 (AES-CMAC)
    Nia2 = 0x02,
    /// 128-5G-IA3 (ZUC)
    Nia3 = 0x03,
}

/// Direction bit for NAS security
///
/// Messages built here always travel uplink; the downlink value keeps the
/// MAC and keystream inputs complete for callers checking network messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NasDirection {
    Uplink = 0,
    Downlink = 1,
}

/// Security errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecurityError {
    #[error("Security context not active")]
    SecurityContextNotActive,
    #[error("NAS keys not installed")]
    MissingKeys,
    #[error("Unsupported ciphering algorithm: {0:?}")]
    UnsupportedCipheringAlgorithm(CipheringAlgorithm),
    #[error("Unsupported integrity algorithm: {0:?}")]
    UnsupportedIntegrityAlgorithm(IntegrityAlgorithm),
    #[error("NAS count overflow detected")]
    NasCountOverflow,
    #[error("MAC verification failed")]
    MacVerificationFailed,
    #[error("Invalid security header type for protection: {0:?}")]
    InvalidSecurityHeaderType(SecurityHeaderType),
    #[error("Codec error: {0}")]
    Codec(#[from] NasError),
}

/// NAS COUNT (TS 33.501 6.4.3): 16-bit overflow counter and 8-bit sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NasCount {
    pub overflow: u16,
    pub sqn: u8,
}

impl NasCount {
    pub fn new(overflow: u16, sqn: u8) -> Self {
        Self { overflow, sqn }
    }

    /// `0x00 | overflow(16) | sqn(8)`
    pub fn to_u32(&self) -> u32 {
        ((self.overflow as u32) << 8) | (self.sqn as u32)
    }

    pub fn increment(&mut self) -> Result<(), SecurityError> {
        if self.sqn == 0xFF && self.overflow == 0xFFFF {
            return Err(SecurityError::NasCountOverflow);
        }
        self.sqn = self.sqn.wrapping_add(1);
        if self.sqn == 0 {
            self.overflow = self.overflow.wrapping_add(1);
        }
        Ok(())
    }

    /// COUNT of an already sent message carrying `sqn`, given that `self` is
    /// the next COUNT to be used.
    pub fn estimate_sent(&self, sqn: u8) -> NasCount {
        if sqn < self.sqn {
            NasCount::new(self.overflow, sqn)
        } else {
            NasCount::new(self.overflow.wrapping_sub(1), sqn)
        }
    }
}

/// NAS security context of one UE.
#[derive(Debug, Clone, Default)]
pub struct NasSecurityContext {
    active: bool,
    ng_ksi: NasKeySetIdentifier,
    knas_enc: Option<[u8; KEY_128_SIZE]>,
    knas_int: Option<[u8; KEY_128_SIZE]>,
    ciphering_algorithm: CipheringAlgorithm,
    integrity_algorithm: IntegrityAlgorithm,
    uplink_count: NasCount,
}

impl NasSecurityContext {
    pub fn new() -> Self {
        Self {
            ng_ksi: NasKeySetIdentifier::no_key(),
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn ng_ksi(&self) -> NasKeySetIdentifier {
        self.ng_ksi
    }

    pub fn set_ng_ksi(&mut self, ng_ksi: NasKeySetIdentifier) {
        self.ng_ksi = ng_ksi;
    }

    pub fn ciphering_algorithm(&self) -> CipheringAlgorithm {
        self.ciphering_algorithm
    }

    pub fn integrity_algorithm(&self) -> IntegrityAlgorithm {
        self.integrity_algorithm
    }

    pub fn knas_enc(&self) -> Option<&[u8; KEY_128_SIZE]> {
        self.knas_enc.as_ref()
    }

    pub fn knas_int(&self) -> Option<&[u8; KEY_128_SIZE]> {
        self.knas_int.as_ref()
    }

    /// The COUNT the next protected uplink message will use.
    pub fn uplink_count(&self) -> NasCount {
        self.uplink_count
    }

    /// Derives KNASenc/KNASint from KAMF for the selected algorithms.
    pub fn derive_nas_keys(
        &mut self,
        kamf: &[u8; KEY_256_SIZE],
        ciphering: CipheringAlgorithm,
        integrity: IntegrityAlgorithm,
    ) {
        self.knas_enc = Some(derive_knas_enc(kamf, ciphering.into()));
        self.knas_int = Some(derive_knas_int(kamf, integrity.into()));
        self.ciphering_algorithm = ciphering;
        self.integrity_algorithm = integrity;
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn reset_counts(&mut self) {
        self.uplink_count = NasCount::default();
    }

    /// Returns the COUNT to use for the next uplink message and advances it.
    pub fn increment_uplink_count(&mut self) -> Result<NasCount, SecurityError> {
        let current = self.uplink_count;
        self.uplink_count.increment()?;
        Ok(current)
    }

    fn keys(&self) -> Result<(&[u8; KEY_128_SIZE], &[u8; KEY_128_SIZE]), SecurityError> {
        match (&self.knas_enc, &self.knas_int) {
            (Some(enc), Some(int)) => Ok((enc, int)),
            _ => Err(SecurityError::MissingKeys),
        }
    }
}

fn apply_cipher(
    algorithm: CipheringAlgorithm,
    key: &[u8; KEY_128_SIZE],
    count: NasCount,
    direction: NasDirection,
    data: &mut [u8],
) -> Result<(), SecurityError> {
    match algorithm {
        CipheringAlgorithm::Nea0 => Ok(()),
        CipheringAlgorithm::Nea2 => {
            nea2_encrypt(count.to_u32(), NAS_BEARER, direction as u8, key, data);
            Ok(())
        }
        CipheringAlgorithm::Nea1 | CipheringAlgorithm::Nea3 => {
            Err(SecurityError::UnsupportedCipheringAlgorithm(algorithm))
        }
    }
}

/// Computes the NAS MAC over `SQN || message`.
pub fn compute_nas_mac(
    algorithm: IntegrityAlgorithm,
    key: &[u8; KEY_128_SIZE],
    count: NasCount,
    direction: NasDirection,
    message: &[u8],
) -> Result<[u8; MAC_SIZE], SecurityError> {
    match algorithm {
        IntegrityAlgorithm::Nia0 => Ok([0u8; MAC_SIZE]),
        IntegrityAlgorithm::Nia2 => {
            let mut data = Vec::with_capacity(1 + message.len());
            data.push(count.sqn);
            data.extend_from_slice(message);
            let mac = nia2_compute_mac(count.to_u32(), NAS_BEARER, direction as u8, key, &data);
            Ok(mac)
        }
        IntegrityAlgorithm::Nia1 | IntegrityAlgorithm::Nia3 => {
            Err(SecurityError::UnsupportedIntegrityAlgorithm(algorithm))
        }
    }
}

/// Protects an encoded plain 5GMM message and advances the uplink COUNT.
///
/// Fails without consuming a COUNT if the context is inactive, keys are
/// missing or an algorithm is unsupported.
pub fn protect(
    ctx: &mut NasSecurityContext,
    header_type: SecurityHeaderType,
    plain: &[u8],
) -> Result<Bytes, SecurityError> {
    if !header_type.is_protected() {
        return Err(SecurityError::InvalidSecurityHeaderType(header_type));
    }
    if !ctx.is_active() {
        return Err(SecurityError::SecurityContextNotActive);
    }
    let (enc_key, int_key) = ctx.keys()?;
    let count = ctx.uplink_count;
    let direction = NasDirection::Uplink;

    let mut body = plain.to_vec();
    if header_type.is_ciphered() {
        apply_cipher(
            ctx.ciphering_algorithm,
            enc_key,
            count,
            direction,
            &mut body,
        )?;
    }
    let mac = compute_nas_mac(ctx.integrity_algorithm, int_key, count, direction, &body)?;

    ctx.increment_uplink_count()?;
    trace!("Protected uplink NAS message, count={:#x}", count.to_u32());

    let mut out = BytesMut::with_capacity(SecuredHeader::SIZE + body.len());
    SecuredHeader::new(header_type, mac, count.sqn).encode(&mut out);
    out.put_slice(&body);
    Ok(out.freeze())
}

/// Verifies and deciphers an uplink message previously produced by
/// [`protect`] with this context, returning its header and plain body.
pub fn unprotect(
    ctx: &NasSecurityContext,
    data: &[u8],
) -> Result<(SecuredHeader, Bytes), SecurityError> {
    let mut buf = data;
    let header = SecuredHeader::decode(&mut buf)?;
    let (enc_key, int_key) = ctx.keys()?;
    let count = ctx.uplink_count.estimate_sent(header.sequence_number);
    let direction = NasDirection::Uplink;

    if ctx.integrity_algorithm != IntegrityAlgorithm::Nia0 {
        let expected = compute_nas_mac(ctx.integrity_algorithm, int_key, count, direction, buf)?;
        if expected != header.mac {
            return Err(SecurityError::MacVerificationFailed);
        }
    }

    let mut body = buf.to_vec();
    if header.security_header_type.is_ciphered() {
        apply_cipher(
            ctx.ciphering_algorithm,
            enc_key,
            count,
            direction,
            &mut body,
        )?;
    }
    Ok((header, Bytes::from(body)))
}

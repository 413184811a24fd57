//! 5G key derivation (3GPP TS 33.220 Annex B, TS 33.501 Annex A)
//!
//! Every derivation is HMAC-SHA-256 over `FC || P0 || L0 || ... || Pn || Ln`.
//! String parameters are NFKC-normalised and UTF-8 encoded first.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use unicode_normalization::UnicodeNormalization;

/// HMAC-SHA-256 output size in bytes
pub const HMAC_SHA256_SIZE: usize = 32;
/// 256-bit key size
pub const KEY_256_SIZE: usize = 32;
/// 128-bit key size
pub const KEY_128_SIZE: usize = 16;
/// RES* / XRES* size in bytes
pub const RES_STAR_SIZE: usize = 16;

/// Function codes from TS 33.501 Annex A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FcValue {
    /// KNASint / KNASenc from KAMF
    KnasIntEnc = 0x69,
    /// KAUSF from CK || IK
    Kausf = 0x6A,
    /// RES* from CK || IK
    ResStar = 0x6B,
    /// KSEAF from KAUSF
    Kseaf = 0x6C,
    /// KAMF from KSEAF
    Kamf = 0x6D,
}

/// Algorithm type distinguisher for NAS key derivation (TS 33.501 A.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AlgorithmTypeDistinguisher {
    NasEnc = 0x01,
    NasInt = 0x02,
}

pub fn hmac_sha256(key: &[u8], input: &[u8]) -> [u8; HMAC_SHA256_SIZE] {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC-SHA256 accepts keys of any size"));
    mac.update(input);
    let mut out = [0u8; HMAC_SHA256_SIZE];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Generic KDF: `HMAC-SHA-256(key, FC || P0 || L0 || ...)` with 2-octet
/// big-endian lengths.
pub fn calculate_kdf_key(key: &[u8], fc: u8, parameters: &[&[u8]]) -> [u8; KEY_256_SIZE] {
    let capacity = 1 + parameters.iter().map(|p| p.len() + 2).sum::<usize>();
    let mut s = Vec::with_capacity(capacity);
    s.push(fc);
    for param in parameters {
        s.extend_from_slice(param);
        s.extend_from_slice(&(param.len() as u16).to_be_bytes());
    }
    hmac_sha256(key, &s)
}

/// NFKC-normalised UTF-8 form of a string KDF parameter.
pub fn encode_kdf_string(s: &str) -> Vec<u8> {
    s.nfkc().collect::<String>().into_bytes()
}

fn ck_ik(ck: &[u8; KEY_128_SIZE], ik: &[u8; KEY_128_SIZE]) -> [u8; KEY_256_SIZE] {
    let mut key = [0u8; KEY_256_SIZE];
    key[..KEY_128_SIZE].copy_from_slice(ck);
    key[KEY_128_SIZE..].copy_from_slice(ik);
    key
}

fn low_128(out: &[u8; KEY_256_SIZE]) -> [u8; KEY_128_SIZE] {
    let mut key = [0u8; KEY_128_SIZE];
    key.copy_from_slice(&out[KEY_256_SIZE - KEY_128_SIZE..]);
    key
}

/// RES* (TS 33.501 A.4): the 128 least significant bits of
/// KDF(CK || IK, 0x6B, SNN, RAND, RES).
pub fn derive_res_star(
    ck: &[u8; KEY_128_SIZE],
    ik: &[u8; KEY_128_SIZE],
    serving_network_name: &str,
    rand: &[u8; 16],
    res: &[u8],
) -> [u8; RES_STAR_SIZE] {
    let snn = encode_kdf_string(serving_network_name);
    let params = [snn.as_slice(), rand.as_slice(), res];
    let out = calculate_kdf_key(&ck_ik(ck, ik), FcValue::ResStar as u8, &params);
    low_128(&out)
}

/// KAUSF (TS 33.501 A.2) from CK || IK and SQN XOR AK (the first six octets of AUTN).
pub fn derive_kausf(
    ck: &[u8; KEY_128_SIZE],
    ik: &[u8; KEY_128_SIZE],
    serving_network_name: &str,
    sqn_xor_ak: &[u8; 6],
) -> [u8; KEY_256_SIZE] {
    let snn = encode_kdf_string(serving_network_name);
    let params = [snn.as_slice(), sqn_xor_ak.as_slice()];
    calculate_kdf_key(&ck_ik(ck, ik), FcValue::Kausf as u8, &params)
}

/// KSEAF (TS 33.501 A.6).
pub fn derive_kseaf(kausf: &[u8; KEY_256_SIZE], serving_network_name: &str) -> [u8; KEY_256_SIZE] {
    let snn = encode_kdf_string(serving_network_name);
    calculate_kdf_key(kausf, FcValue::Kseaf as u8, &[snn.as_slice()])
}

/// KAMF (TS 33.501 A.7). `supi` is the IMSI digit string without its type prefix.
pub fn derive_kamf(kseaf: &[u8; KEY_256_SIZE], supi: &str, abba: &[u8]) -> [u8; KEY_256_SIZE] {
    let supi = encode_kdf_string(supi);
    calculate_kdf_key(kseaf, FcValue::Kamf as u8, &[supi.as_slice(), abba])
}

fn derive_nas_key(
    kamf: &[u8; KEY_256_SIZE],
    distinguisher: AlgorithmTypeDistinguisher,
    alg_id: u8,
) -> [u8; KEY_128_SIZE] {
    let params: [&[u8]; 2] = [&[distinguisher as u8], &[alg_id]];
    let out = calculate_kdf_key(kamf, FcValue::KnasIntEnc as u8, &params);
    low_128(&out)
}

/// KNASenc (TS 33.501 A.8) for the NEA algorithm identity `alg_id`.
pub fn derive_knas_enc(kamf: &[u8; KEY_256_SIZE], alg_id: u8) -> [u8; KEY_128_SIZE] {
    derive_nas_key(kamf, AlgorithmTypeDistinguisher::NasEnc, alg_id)
}

/// KNASint (TS 33.501 A.8) for the NIA algorithm identity `alg_id`.
pub fn derive_knas_int(kamf: &[u8; KEY_256_SIZE], alg_id: u8) -> [u8; KEY_128_SIZE] {
    derive_nas_key(kamf, AlgorithmTypeDistinguisher::NasInt, alg_id)
}

//! NAS ciphering algorithms
//!
//! 128-NEA2 is AES-128 in counter mode with the initial counter block
//! `COUNT || BEARER << 3 | DIRECTION << 2 || 0^88` (TS 33.501 D.2.1.3).

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};

/// Key size in bytes (128 bits)
pub const KEY_SIZE: usize = 16;
/// Counter block size in bytes
pub const IV_SIZE: usize = 16;

type Aes128Ctr = ctr::Ctr128BE<Aes128>;

fn nea2_iv(count: u32, bearer: u8, direction: u8) -> [u8; IV_SIZE] {
    let mut iv = [0u8; IV_SIZE];
    iv[..4].copy_from_slice(&count.to_be_bytes());
    iv[4] = ((bearer & 0x1F) << 3) | ((direction & 0x01) << 2);
    iv
}

/// 128-NEA2 in place. Encryption and decryption are the same operation.
pub fn nea2_encrypt(count: u32, bearer: u8, direction: u8, key: &[u8; KEY_SIZE], data: &mut [u8]) {
    let iv = nea2_iv(count, bearer, direction);
    let mut cipher = Aes128Ctr::new(key.into(), &iv.into());
    cipher.apply_keystream(data);
}

#[inline]
pub fn nea2_decrypt(count: u32, bearer: u8, direction: u8, key: &[u8; KEY_SIZE], data: &mut [u8]) {
    nea2_encrypt(count, bearer, direction, key, data);
}

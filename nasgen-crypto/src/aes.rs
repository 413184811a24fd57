//! Single-block AES-128 used by MILENAGE

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes128;

/// AES-128 block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// AES-128 key size in bytes
pub const KEY_SIZE: usize = 16;

/// AES-128 keyed once, encrypting one 16-byte block at a time.
#[derive(Clone)]
pub struct Aes128Block {
    cipher: Aes128,
}

impl Aes128Block {
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        Self {
            cipher: Aes128::new(GenericArray::from_slice(key)),
        }
    }

    /// Encrypt a block in place.
    pub fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        let mut generic = GenericArray::clone_from_slice(block);
        self.cipher.encrypt_block(&mut generic);
        block.copy_from_slice(&generic);
    }

    pub fn encrypt_block_copy(&self, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut out = *block;
        self.encrypt_block(&mut out);
        out
    }
}

/// `a ^= b` over a full block.
#[inline]
pub fn xor_block(a: &mut [u8; BLOCK_SIZE], b: &[u8; BLOCK_SIZE]) {
    a.iter_mut().zip(b).for_each(|(x, y)| *x ^= y);
}

//! NAS integrity algorithms
//!
//! Only 128-NIA2 (AES-CMAC, TS 33.501 D.3.1.3) is provided; NIA0 is the
//! null algorithm and is handled by the caller.

use aes::Aes128;
use cmac::{Cmac, Mac};

/// Key size in bytes (128 bits)
pub const KEY_SIZE: usize = 16;
/// MAC size in bytes (32 bits)
pub const MAC_SIZE: usize = 4;

/// 128-NIA2: the first 32 bits of
/// `AES-CMAC(key, COUNT || BEARER << 3 | DIRECTION << 2 || 0^24 || data)`.
pub fn nia2_compute_mac(
    count: u32,
    bearer: u8,
    direction: u8,
    key: &[u8; KEY_SIZE],
    data: &[u8],
) -> [u8; MAC_SIZE] {
    let mut mac = Cmac::<Aes128>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("AES-128 CMAC key is always 16 bytes"));
    mac.update(&count.to_be_bytes());
    let bearer_direction = ((bearer & 0x1F) << 3) | ((direction & 0x01) << 2);
    mac.update(&[bearer_direction, 0, 0, 0]);
    mac.update(data);
    let tag = mac.finalize().into_bytes();

    let mut out = [0u8; MAC_SIZE];
    out.copy_from_slice(&tag[..MAC_SIZE]);
    out
}

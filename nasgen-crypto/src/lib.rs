//! Cryptographic algorithms for nasgen
//!
//! - MILENAGE f1, f1*, f2345 (5G-AKA on the UE side)
//! - 5G key derivation: RES*, KAUSF, KSEAF, KAMF, KNASint/KNASenc
//! - 128-NIA2 / 128-NEA2 for NAS message protection

pub mod aes;
pub mod kdf;
pub mod milenage;
pub mod nea;
pub mod nia;

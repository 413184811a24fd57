//! Information Elements
//!
//! - [`ie1`]: half-octet values (type 1)
//! - [`ie4`]: length-prefixed values with a 1-octet length (type 4)
//! - [`ie6`]: length-prefixed values with a 2-octet length (type 6)

pub mod ie1;
pub mod ie4;
pub mod ie6;

use bytes::{Buf, BufMut, Bytes};

use crate::error::{ensure_remaining, NasError};

/// Writes `len(1) || value`.
pub(crate) fn put_lv<B: BufMut>(
    buf: &mut B,
    ie: &'static str,
    value: &[u8],
) -> Result<(), NasError> {
    let too_long = || NasError::IeTooLong {
        ie,
        len: value.len(),
    };
    let len = u8::try_from(value.len()).map_err(|_| too_long())?;
    buf.put_u8(len);
    buf.put_slice(value);
    Ok(())
}

/// Writes `len(2) || value`.
pub(crate) fn put_lv_e<B: BufMut>(
    buf: &mut B,
    ie: &'static str,
    value: &[u8],
) -> Result<(), NasError> {
    let too_long = || NasError::IeTooLong {
        ie,
        len: value.len(),
    };
    let len = u16::try_from(value.len()).map_err(|_| too_long())?;
    buf.put_u16(len);
    buf.put_slice(value);
    Ok(())
}

pub(crate) fn get_lv<B: Buf>(buf: &mut B) -> Result<Bytes, NasError> {
    ensure_remaining(buf.remaining(), 1)?;
    let len = buf.get_u8() as usize;
    ensure_remaining(buf.remaining(), len)?;
    Ok(buf.copy_to_bytes(len))
}

pub(crate) fn get_lv_e<B: Buf>(buf: &mut B) -> Result<Bytes, NasError> {
    ensure_remaining(buf.remaining(), 2)?;
    let len = buf.get_u16() as usize;
    ensure_remaining(buf.remaining(), len)?;
    Ok(buf.copy_to_bytes(len))
}

/// Reads the IEI of the next optional IE without consuming it.
pub(crate) fn peek_iei<B: Buf>(buf: &mut B) -> Option<u8> {
    buf.chunk().first().copied()
}

//! Type 6 Information Elements (TLV-E / LV-E with a 2-octet length)

use bytes::{Buf, BufMut, Bytes};

use super::ie1::IdentityType;
use super::{get_lv_e, put_lv_e};
use crate::error::NasError;

/// 5GS mobile identity (TS 24.501 9.11.3.4)
///
/// `data` holds the complete identity contents, starting with the octet
/// that carries the identity type in bits 3-1.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ie5gsMobileIdentity {
    pub identity_type: IdentityType,
    pub data: Bytes,
}

impl Ie5gsMobileIdentity {
    pub fn new(identity_type: IdentityType, data: impl Into<Bytes>) -> Self {
        Self {
            identity_type,
            data: data.into(),
        }
    }

    pub fn no_identity() -> Self {
        Self::default()
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        put_lv_e(buf, "5GS mobile identity", &self.data)
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        let data = get_lv_e(buf)?;
        let Some(&first) = data.first() else {
            return Ok(Self::no_identity());
        };
        let ty = first & 0x07;
        let identity_type = IdentityType::try_from(ty)
            .map_err(|_| NasError::InvalidIeValue(format!("identity type {ty}")))?;
        Ok(Self {
            identity_type,
            data,
        })
    }

    pub fn encoded_len(&self) -> usize {
        2 + self.data.len()
    }
}

/// NAS message container (TS 24.501 9.11.3.33)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IeNasMessageContainer {
    pub data: Bytes,
}

impl IeNasMessageContainer {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        put_lv_e(buf, "NAS message container", &self.data)
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        Ok(Self::new(get_lv_e(buf)?))
    }
}

/// Payload container (TS 24.501 9.11.3.39)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IePayloadContainer {
    pub data: Bytes,
}

impl IePayloadContainer {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        put_lv_e(buf, "Payload container", &self.data)
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        Ok(Self::new(get_lv_e(buf)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_identity_type_from_first_octet() {
        let wire = [0x00, 0x03, 0xF4, 0x12, 0x34];
        let ie = Ie5gsMobileIdentity::decode(&mut wire.as_slice()).unwrap();
        assert_eq!(ie.identity_type, IdentityType::Tmsi);
        assert_eq!(ie.data.as_ref(), &[0xF4, 0x12, 0x34]);

        let mut buf = Vec::new();
        ie.encode(&mut buf).unwrap();
        assert_eq!(buf, wire);
        assert_eq!(ie.encoded_len(), wire.len());
    }

    #[test]
    fn test_mobile_identity_empty() {
        let ie = Ie5gsMobileIdentity::decode(&mut [0x00, 0x00].as_slice()).unwrap();
        assert_eq!(ie, Ie5gsMobileIdentity::no_identity());
        let res = Ie5gsMobileIdentity::decode(&mut [0x00, 0x01, 0x07].as_slice());
        assert!(res.is_err());
    }
}

//! NAS message headers
//!
//! ## Plain 5GMM header (3 bytes)
//! ```text
//! +------------------+------------------+------------------+
//! |       EPD        |  Spare (4 bits)  |   Message Type   |
//! |                  |  SHT   (4 bits)  |                  |
//! +------------------+------------------+------------------+
//! ```
//!
//! ## Security protected header (7 bytes)
//! ```text
//! +------+------+----------------------------+------+------------------+
//! | EPD  | SHT  |          MAC (4)           | SQN  | Plain NAS message |
//! +------+------+----------------------------+------+------------------+
//! ```

use bytes::{Buf, BufMut};

use crate::enums::{ExtendedProtocolDiscriminator, MmMessageType, SecurityHeaderType};
use crate::error::{ensure_remaining, NasError};

fn decode_epd(byte: u8) -> Result<ExtendedProtocolDiscriminator, NasError> {
    match ExtendedProtocolDiscriminator::try_from(byte) {
        Ok(epd @ ExtendedProtocolDiscriminator::MobilityManagement) => Ok(epd),
        _ => Err(NasError::InvalidEpd(byte)),
    }
}

fn decode_sht(byte: u8) -> Result<SecurityHeaderType, NasError> {
    SecurityHeaderType::try_from(byte & 0x0F).map_err(|_| NasError::InvalidSecurityHeaderType(byte))
}

/// Plain 5GMM NAS message header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainMmHeader {
    pub epd: ExtendedProtocolDiscriminator,
    pub security_header_type: SecurityHeaderType,
    pub message_type: MmMessageType,
}

impl PlainMmHeader {
    pub const SIZE: usize = 3;

    pub fn new(message_type: MmMessageType) -> Self {
        Self {
            epd: ExtendedProtocolDiscriminator::MobilityManagement,
            security_header_type: SecurityHeaderType::NotProtected,
            message_type,
        }
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        ensure_remaining(buf.remaining(), Self::SIZE)?;

        let epd = decode_epd(buf.get_u8())?;
        let security_header_type = decode_sht(buf.get_u8())?;
        if security_header_type.is_protected() {
            return Err(NasError::Protected);
        }
        let mt = buf.get_u8();
        let message_type =
            MmMessageType::try_from(mt).map_err(|_| NasError::UnknownMessageType(mt))?;

        Ok(Self {
            epd,
            security_header_type,
            message_type,
        })
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.epd.into());
        buf.put_u8(u8::from(self.security_header_type) & 0x0F);
        buf.put_u8(self.message_type.into());
    }
}

/// Security protected 5GMM header; the plain message follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecuredHeader {
    pub epd: ExtendedProtocolDiscriminator,
    pub security_header_type: SecurityHeaderType,
    pub mac: [u8; 4],
    pub sequence_number: u8,
}

impl SecuredHeader {
    pub const SIZE: usize = 7;

    pub fn new(
        security_header_type: SecurityHeaderType,
        mac: [u8; 4],
        sequence_number: u8,
    ) -> Self {
        Self {
            epd: ExtendedProtocolDiscriminator::MobilityManagement,
            security_header_type,
            mac,
            sequence_number,
        }
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        ensure_remaining(buf.remaining(), Self::SIZE)?;

        let epd = decode_epd(buf.get_u8())?;
        let sht_byte = buf.get_u8();
        let security_header_type = decode_sht(sht_byte)?;
        if !security_header_type.is_protected() {
            return Err(NasError::InvalidSecurityHeaderType(sht_byte));
        }
        let mut mac = [0u8; 4];
        buf.copy_to_slice(&mut mac);
        let sequence_number = buf.get_u8();

        Ok(Self {
            epd,
            security_header_type,
            mac,
            sequence_number,
        })
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.epd.into());
        buf.put_u8(u8::from(self.security_header_type) & 0x0F);
        buf.put_slice(&self.mac);
        buf.put_u8(self.sequence_number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_header_roundtrip() {
        let header = PlainMmHeader::new(MmMessageType::IdentityResponse);
        let mut buf = Vec::new();
        header.encode(&mut buf);
        assert_eq!(buf, vec![0x7E, 0x00, 0x5C]);
        assert_eq!(PlainMmHeader::decode(&mut buf.as_slice()).unwrap(), header);
    }

    #[test]
    fn test_plain_header_rejects_protected_and_sm() {
        assert_eq!(
            PlainMmHeader::decode(&mut [0x7E, 0x02, 0x43].as_slice()),
            Err(NasError::Protected)
        );
        assert_eq!(
            PlainMmHeader::decode(&mut [0x2E, 0x00, 0x43].as_slice()),
            Err(NasError::InvalidEpd(0x2E))
        );
        assert_eq!(
            PlainMmHeader::decode(&mut [0x7E, 0x00].as_slice()),
            Err(NasError::BufferTooShort {
                expected: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_secured_header_roundtrip() {
        let header = SecuredHeader::new(
            SecurityHeaderType::IntegrityProtectedAndCipheredWithNewSecurityContext,
            [0xDE, 0xAD, 0xBE, 0xEF],
            3,
        );
        let mut buf = Vec::new();
        header.encode(&mut buf);
        assert_eq!(buf, vec![0x7E, 0x04, 0xDE, 0xAD, 0xBE, 0xEF, 0x03]);
        assert_eq!(SecuredHeader::decode(&mut buf.as_slice()).unwrap(), header);
    }
}

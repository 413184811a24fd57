//! Type 4 Information Elements (TLV / LV with a 1-octet length)
//!
//! `encode` writes `length || value`; the owning message writes the IEI.
//! `decode` expects the buffer to start at the length octet.

use bytes::{Buf, BufMut};
use nasgen_common::SNssai;

use super::{get_lv, put_lv};
use crate::error::NasError;

fn bad_length(name: &str, len: usize) -> NasError {
    NasError::InvalidIeValue(format!("{name} length {len}"))
}

/// 5GMM capability (TS 24.501 9.11.3.1), first octet only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ie5gmmCapability {
    /// S1 mode supported
    pub s1_mode: bool,
    /// ATTACH REQUEST can be sent in the HO procedure
    pub ho_attach: bool,
    /// LTE positioning protocol supported
    pub lpp: bool,
}

impl Ie5gmmCapability {
    pub fn all() -> Self {
        Self {
            s1_mode: true,
            ho_attach: true,
            lpp: true,
        }
    }

    pub fn octet(&self) -> u8 {
        (u8::from(self.lpp) << 2) | (u8::from(self.ho_attach) << 1) | u8::from(self.s1_mode)
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        put_lv(buf, "5GMM capability", &[self.octet()])
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        let value = get_lv(buf)?;
        let octet = *value
            .first()
            .ok_or_else(|| NasError::InvalidIeValue("empty 5GMM capability".into()))?;
        Ok(Self {
            s1_mode: octet & 0x01 != 0,
            ho_attach: octet & 0x02 != 0,
            lpp: octet & 0x04 != 0,
        })
    }
}

/// UE security capability (TS 24.501 9.11.3.54)
///
/// Bit 8 of each algorithm octet is algorithm 0 (NEA0, NIA0, EEA0, EIA0).
/// Always encoded with a length of 8; octets 7 to 10 are spare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeUeSecurityCapability {
    pub nea: u8,
    pub nia: u8,
    pub eea: u8,
    pub eia: u8,
}

impl Default for IeUeSecurityCapability {
    fn default() -> Self {
        Self {
            nea: 0xFF,
            nia: 0xFF,
            eea: 0xFF,
            eia: 0xFF,
        }
    }
}

impl IeUeSecurityCapability {
    pub const ENCODED_LEN: usize = 8;

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        let mut value = [0u8; Self::ENCODED_LEN];
        value[..4].copy_from_slice(&[self.nea, self.nia, self.eea, self.eia]);
        put_lv(buf, "UE security capability", &value)
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        let value = get_lv(buf)?;
        if value.len() < 2 {
            return Err(NasError::InvalidIeValue(format!(
                "UE security capability length {}",
                value.len()
            )));
        }
        let at = |i: usize| value.get(i).copied().unwrap_or(0);
        Ok(Self {
            nea: at(0),
            nia: at(1),
            eea: at(2),
            eia: at(3),
        })
    }
}

/// Uplink data status (TS 24.501 9.11.3.57), a 16-bit PSI bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeUplinkDataStatus {
    pub value: u16,
}

impl IeUplinkDataStatus {
    pub fn new(value: u16) -> Self {
        Self { value }
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        put_lv(buf, "Uplink data status", &self.value.to_be_bytes())
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        let value = get_lv(buf)?;
        match value.as_ref() {
            [hi, lo, ..] => Ok(Self::new(u16::from_be_bytes([*hi, *lo]))),
            _ => Err(bad_length("Uplink data status", value.len())),
        }
    }
}

/// S-NSSAI (TS 24.501 9.11.2.8)
///
/// Encoded as SST plus a 3-octet SD. A missing SD is carried as 0xFFFFFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeSNssai {
    pub s_nssai: SNssai,
}

impl IeSNssai {
    pub const NO_SD: u32 = 0x00FF_FFFF;

    pub fn new(s_nssai: SNssai) -> Self {
        Self { s_nssai }
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        let sd = self.s_nssai.sd_bytes().unwrap_or([0xFF; 3]);
        put_lv(buf, "S-NSSAI", &[self.s_nssai.sst, sd[0], sd[1], sd[2]])
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        let value = get_lv(buf)?;
        let s_nssai = match value.as_ref() {
            [sst] => SNssai::new(*sst),
            [sst, a, b, c, ..] => {
                let sd = u32::from_be_bytes([0, *a, *b, *c]);
                if sd == Self::NO_SD {
                    SNssai::new(*sst)
                } else {
                    SNssai::with_sd(*sst, sd)
                }
            }
            _ => return Err(bad_length("S-NSSAI", value.len())),
        };
        Ok(Self::new(s_nssai))
    }
}

/// DNN (TS 24.501 9.11.2.1B), APN label encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IeDnn {
    pub dnn: String,
}

impl IeDnn {
    pub fn new(dnn: impl Into<String>) -> Self {
        Self { dnn: dnn.into() }
    }

    /// `internet` -> `08 'internet'`, `ims.mnc001` -> `03 'ims' 06 'mnc001'`.
    pub fn to_labels(&self) -> Result<Vec<u8>, NasError> {
        let mut out = Vec::with_capacity(self.dnn.len() + 1);
        for label in self.dnn.split('.') {
            let len = u8::try_from(label.len())
                .ok()
                .filter(|l| (1..=63).contains(l))
                .ok_or_else(|| NasError::InvalidIeValue(format!("DNN label {label:?}")))?;
            out.push(len);
            out.extend_from_slice(label.as_bytes());
        }
        Ok(out)
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        put_lv(buf, "DNN", &self.to_labels()?)
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        let value = get_lv(buf)?;
        let mut labels = Vec::new();
        let mut rest = value.as_ref();
        while let Some((&len, tail)) = rest.split_first() {
            let len = len as usize;
            if tail.len() < len {
                return Err(NasError::InvalidIeValue("truncated DNN label".into()));
            }
            let label = std::str::from_utf8(&tail[..len])
                .map_err(|_| NasError::InvalidIeValue("non UTF-8 DNN label".into()))?;
            labels.push(label);
            rest = &tail[len..];
        }
        Ok(Self::new(labels.join(".")))
    }
}

/// Authentication response parameter (TS 24.501 9.11.3.17) carrying RES*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeAuthenticationResponseParameter {
    pub res_star: [u8; 16],
}

impl IeAuthenticationResponseParameter {
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        put_lv(buf, "Authentication response parameter", &self.res_star)
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        let value = get_lv(buf)?;
        let res_star = <[u8; 16]>::try_from(value.as_ref())
            .map_err(|_| bad_length("RES*", value.len()))?;
        Ok(Self { res_star })
    }
}

/// Authentication failure parameter (TS 24.501 9.11.3.14) carrying AUTS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeAuthenticationFailureParameter {
    pub auts: [u8; 14],
}

impl IeAuthenticationFailureParameter {
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), NasError> {
        put_lv(buf, "Authentication failure parameter", &self.auts)
    }

    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self, NasError> {
        let value = get_lv(buf)?;
        let auts = <[u8; 14]>::try_from(value.as_ref())
            .map_err(|_| bad_length("AUTS", value.len()))?;
        Ok(Self { auts })
    }
}

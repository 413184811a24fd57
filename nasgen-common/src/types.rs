//! Core 5G identifiers: PLMN, S-NSSAI, SUPI, 5G-GUTI.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Public Land Mobile Network identifier (MCC + MNC).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Plmn {
    /// Mobile Country Code (3 digits)
    pub mcc: u16,
    /// Mobile Network Code (2 or 3 digits)
    pub mnc: u16,
    /// True if the MNC has three digits
    #[serde(default)]
    pub long_mnc: bool,
}

impl Plmn {
    pub const fn new(mcc: u16, mnc: u16, long_mnc: bool) -> Self {
        Self { mcc, mnc, long_mnc }
    }

    /// Encodes the PLMN in the TS 24.008 BCD layout:
    ///
    /// ```text
    /// octet 1: MCC digit 2 | MCC digit 1
    /// octet 2: MNC digit 3 (or 0xF) | MCC digit 3
    /// octet 3: MNC digit 2 | MNC digit 1
    /// ```
    pub fn encode(&self) -> [u8; 3] {
        let mcc1 = ((self.mcc / 100) % 10) as u8;
        let mcc2 = ((self.mcc / 10) % 10) as u8;
        let mcc3 = (self.mcc % 10) as u8;

        let (mnc1, mnc2, mnc3) = if self.long_mnc {
            (
                ((self.mnc / 100) % 10) as u8,
                ((self.mnc / 10) % 10) as u8,
                (self.mnc % 10) as u8,
            )
        } else {
            (((self.mnc / 10) % 10) as u8, (self.mnc % 10) as u8, 0x0F)
        };

        [(mcc2 << 4) | mcc1, (mnc3 << 4) | mcc3, (mnc2 << 4) | mnc1]
    }

    /// Decodes the 3-octet BCD form produced by [`Plmn::encode`].
    pub fn decode(bytes: [u8; 3]) -> Self {
        let mcc = 100 * (bytes[0] & 0x0F) as u16
            + 10 * (bytes[0] >> 4) as u16
            + (bytes[1] & 0x0F) as u16;

        let mnc1 = (bytes[2] & 0x0F) as u16;
        let mnc2 = (bytes[2] >> 4) as u16;
        let mnc3 = bytes[1] >> 4;

        if mnc3 == 0x0F {
            Self::new(mcc, 10 * mnc1 + mnc2, false)
        } else {
            Self::new(mcc, 100 * mnc1 + 10 * mnc2 + mnc3 as u16, true)
        }
    }

    /// Serving network name used as a KDF input (TS 24.501 9.12.1).
    ///
    /// Both MNC and MCC are rendered with three digits, e.g.
    /// `5G:mnc070.mcc999.3gppnetwork.org`.
    pub fn serving_network_name(&self) -> String {
        format!("5G:mnc{:03}.mcc{:03}.3gppnetwork.org", self.mnc, self.mcc)
    }
}

impl fmt::Debug for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plmn({self})")
    }
}

impl fmt::Display for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.long_mnc {
            write!(f, "{:03}-{:03}", self.mcc, self.mnc)
        } else {
            write!(f, "{:03}-{:02}", self.mcc, self.mnc)
        }
    }
}

/// Single Network Slice Selection Assistance Information.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SNssai {
    /// Slice/Service Type
    pub sst: u8,
    /// Slice Differentiator (24 bits), if any
    #[serde(default)]
    pub sd: Option<u32>,
}

impl SNssai {
    pub const fn new(sst: u8) -> Self {
        Self { sst, sd: None }
    }

    pub const fn with_sd(sst: u8, sd: u32) -> Self {
        Self {
            sst,
            sd: Some(sd & 0x00FF_FFFF),
        }
    }

    /// SD as three big-endian octets.
    pub fn sd_bytes(&self) -> Option<[u8; 3]> {
        self.sd.map(|sd| {
            let be = sd.to_be_bytes();
            [be[1], be[2], be[3]]
        })
    }
}

impl fmt::Debug for SNssai {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sd {
            Some(sd) => write!(f, "SNssai(sst={}, sd={:06X})", self.sst, sd),
            None => write!(f, "SNssai(sst={})", self.sst),
        }
    }
}

/// SUPI type per TS 23.003.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupiType {
    Imsi,
    Nai,
}

impl SupiType {
    pub fn prefix(&self) -> &'static str {
        match self {
            SupiType::Imsi => "imsi",
            SupiType::Nai => "nai",
        }
    }
}

/// Subscription Permanent Identifier, written `<type>-<value>`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Supi {
    pub supi_type: SupiType,
    pub value: String,
}

impl Supi {
    pub fn imsi(value: impl Into<String>) -> Self {
        Self {
            supi_type: SupiType::Imsi,
            value: value.into(),
        }
    }

    /// Parses `imsi-<digits>` or `nai-<value>`.
    pub fn parse(s: &str) -> Option<Self> {
        let (prefix, value) = s.split_once('-')?;
        let supi_type = match prefix.to_ascii_lowercase().as_str() {
            "imsi" => SupiType::Imsi,
            "nai" => SupiType::Nai,
            _ => return None,
        };
        Some(Self {
            supi_type,
            value: value.to_string(),
        })
    }

    /// The IMSI digits, if this is a well-formed IMSI-type SUPI (5 to 15 digits).
    pub fn imsi_digits(&self) -> Option<&str> {
        let well_formed = self.supi_type == SupiType::Imsi
            && (5..=15).contains(&self.value.len())
            && self.value.bytes().all(|b| b.is_ascii_digit());
        well_formed.then_some(self.value.as_str())
    }
}

impl TryFrom<String> for Supi {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Supi::parse(&s).ok_or_else(|| format!("invalid SUPI: {s}"))
    }
}

impl From<Supi> for String {
    fn from(supi: Supi) -> Self {
        supi.to_string()
    }
}

impl fmt::Debug for Supi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Supi({self})")
    }
}

impl fmt::Display for Supi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.supi_type.prefix(), self.value)
    }
}

/// 5G Globally Unique Temporary Identifier (TS 23.003 2.10).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Guti {
    pub plmn: Plmn,
    /// AMF Region ID (8 bits)
    pub amf_region_id: u8,
    /// AMF Set ID (10 bits)
    pub amf_set_id: u16,
    /// AMF Pointer (6 bits)
    pub amf_pointer: u8,
    /// 5G-TMSI, host order
    pub tmsi: u32,
}

impl Guti {
    pub const MAX_AMF_SET_ID: u16 = 0x3FF;
    pub const MAX_AMF_POINTER: u8 = 0x3F;

    pub fn new(plmn: Plmn, amf_region_id: u8, amf_set_id: u16, amf_pointer: u8, tmsi: u32) -> Self {
        Self {
            plmn,
            amf_region_id,
            amf_set_id: amf_set_id & Self::MAX_AMF_SET_ID,
            amf_pointer: amf_pointer & Self::MAX_AMF_POINTER,
            tmsi,
        }
    }

    /// A GUTI counts as assigned once the network has handed out a non-zero 5G-TMSI.
    pub fn is_assigned(&self) -> bool {
        self.tmsi != 0
    }

    /// AMF Set ID and AMF Pointer packed into 16 bits (set in the upper 10).
    pub fn amf_set_pointer(&self) -> u16 {
        let set_id = self.amf_set_id & Self::MAX_AMF_SET_ID;
        let pointer = self.amf_pointer & Self::MAX_AMF_POINTER;
        (set_id << 6) | pointer as u16
    }

    /// 48-bit 5G-S-TMSI value: AMF Set ID, AMF Pointer, 5G-TMSI.
    pub fn s_tmsi(&self) -> u64 {
        ((self.amf_set_pointer() as u64) << 32) | self.tmsi as u64
    }
}

impl fmt::Debug for Guti {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Guti({}, region={:02X}, set={:03X}, ptr={:02X}, tmsi={:08X})",
            self.plmn, self.amf_region_id, self.amf_set_id, self.amf_pointer, self.tmsi
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plmn_encode_two_digit_mnc() {
        assert_eq!(Plmn::new(1, 1, false).encode(), [0x00, 0xF1, 0x10]);
        assert_eq!(Plmn::new(999, 70, false).encode(), [0x99, 0xF9, 0x07]);
    }

    #[test]
    fn test_plmn_encode_three_digit_mnc() {
        assert_eq!(Plmn::new(310, 410, true).encode(), [0x13, 0x00, 0x14]);
    }

    #[test]
    fn test_plmn_decode_inverts_encode() {
        for plmn in [
            Plmn::new(1, 1, false),
            Plmn::new(310, 410, true),
            Plmn::new(999, 70, false),
        ] {
            assert_eq!(Plmn::decode(plmn.encode()), plmn);
        }
    }

    #[test]
    fn test_serving_network_name_pads_both_fields() {
        assert_eq!(
            Plmn::new(999, 70, false).serving_network_name(),
            "5G:mnc070.mcc999.3gppnetwork.org"
        );
        assert_eq!(
            Plmn::new(1, 1, false).serving_network_name(),
            "5G:mnc001.mcc001.3gppnetwork.org"
        );
    }

    #[test]
    fn test_snssai_sd_bytes_big_endian() {
        assert_eq!(
            SNssai::with_sd(1, 0x010203).sd_bytes(),
            Some([0x01, 0x02, 0x03])
        );
        assert_eq!(SNssai::with_sd(1, 0xFF00_0001).sd, Some(0x000001));
        assert_eq!(SNssai::new(1).sd_bytes(), None);
    }

    #[test]
    fn test_supi_parse_and_digits() {
        let supi = Supi::parse("imsi-999700000021309").unwrap();
        assert_eq!(supi.imsi_digits(), Some("999700000021309"));
        assert_eq!(supi.to_string(), "imsi-999700000021309");

        assert!(Supi::parse("999700000021309").is_none());
        assert_eq!(Supi::imsi("99970x").imsi_digits(), None);
        assert_eq!(Supi::imsi("").imsi_digits(), None);
        let nai = Supi::parse("nai-user@example.org").unwrap();
        assert_eq!(nai.imsi_digits(), None);
    }

    #[test]
    fn test_guti_masks_and_s_tmsi() {
        let guti = Guti::new(Plmn::new(999, 70, false), 2, 0x7FF, 0x41, 0xC000_0001);
        assert_eq!(guti.amf_set_id, 0x3FF);
        assert_eq!(guti.amf_pointer, 0x01);
        assert_eq!(guti.amf_set_pointer(), 0xFFC1);
        assert_eq!(guti.s_tmsi(), 0xFFC1_C000_0001);
        assert!(guti.is_assigned());
        assert!(!Guti::default().is_assigned());
    }
}

//! Network and subscriber configuration
//!
//! `NetworkConfig` is the serving network the messages are synthesized for
//! (PLMN, TAC, supported slices, target AMF). It is handed to the message
//! builders by reference. `SubscriberConfig` describes one simulated UE.

use std::fs;
use std::net::IpAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{Plmn, SNssai, Supi};

/// AMF the test driver sends the synthesized messages to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmfConfig {
    /// IP address of the AMF
    pub address: IpAddr,
    /// SCTP port of the AMF (typically 38412)
    #[serde(default = "default_ngap_port")]
    pub port: u16,
}

fn default_ngap_port() -> u16 {
    38412
}

impl AmfConfig {
    pub fn new(address: IpAddr, port: u16) -> Self {
        Self { address, port }
    }
}

/// Serving network context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub amf: AmfConfig,
    pub plmn: Plmn,
    /// Tracking Area Code (24-bit)
    pub tac: u32,
    /// Supported S-NSSAI list; the first entry is used by UL NAS Transport.
    #[serde(default)]
    pub s_nssai: Vec<SNssai>,
}

impl NetworkConfig {
    /// Serving network name for the configured PLMN.
    pub fn serving_network_name(&self) -> String {
        self.plmn.serving_network_name()
    }

    /// First configured slice, if any.
    pub fn default_s_nssai(&self) -> Option<&SNssai> {
        self.s_nssai.first()
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), Error> {
        if self.plmn.mcc > 999 {
            return Err(Error::Config(format!(
                "MCC out of range: {}",
                self.plmn.mcc
            )));
        }
        let mnc_max = if self.plmn.long_mnc { 999 } else { 99 };
        if self.plmn.mnc > mnc_max {
            return Err(Error::Config(format!(
                "MNC out of range: {}",
                self.plmn.mnc
            )));
        }
        if self.tac > 0x00FF_FFFF {
            return Err(Error::Config(format!(
                "TAC exceeds 24 bits: {:#x}",
                self.tac
            )));
        }
        let wide_sd = |s: &&SNssai| s.sd.is_some_and(|sd| sd > 0x00FF_FFFF);
        if let Some(s) = self.s_nssai.iter().find(wide_sd) {
            return Err(Error::Config(format!("S-NSSAI SD exceeds 24 bits: {s:?}")));
        }
        Ok(())
    }

    /// Parses a network configuration from a YAML string.
    ///
    /// # Example
    /// ```
    /// use nasgen_common::NetworkConfig;
    ///
    /// let yaml = r#"
    /// amf:
    ///   address: 127.0.0.5
    /// plmn:
    ///   mcc: 999
    ///   mnc: 70
    /// tac: 1
    /// s_nssai:
    ///   - sst: 1
    /// "#;
    ///
    /// let config = NetworkConfig::from_yaml(yaml).unwrap();
    /// assert_eq!(config.amf.port, 38412);
    /// assert_eq!(config.serving_network_name(), "5G:mnc070.mcc999.3gppnetwork.org");
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a network configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Operator key type for authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpType {
    /// Operator key (OP), converted to OPc before use
    Op,
    /// Derived operator key (OPc), used directly
    #[default]
    Opc,
}

/// PDU session owned by a simulated UE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// PDU session identity (1..=15)
    pub psi: u8,
    /// Data network name
    pub dnn: String,
}

/// One simulated subscriber.
///
/// Keys and the SUCI mobile identity are written as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberConfig {
    pub supi: Supi,
    /// Subscriber key K (128-bit)
    #[serde(with = "hex_array")]
    pub key: [u8; 16],
    /// Operator key OP or OPc (128-bit), see `op_type`
    #[serde(with = "hex_array")]
    pub op: [u8; 16],
    #[serde(default)]
    pub op_type: OpType,
    /// ABBA parameter
    #[serde(default = "default_abba", with = "hex_vec")]
    pub abba: Vec<u8>,
    /// IMEISV, 16 decimal digits
    #[serde(default)]
    pub imeisv: Option<String>,
    /// Pre-computed SUCI mobile identity contents
    #[serde(default, with = "hex_vec")]
    pub suci: Vec<u8>,
    #[serde(default)]
    pub sessions: Vec<SessionConfig>,
}

fn default_abba() -> Vec<u8> {
    vec![0x00, 0x00]
}

impl SubscriberConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.supi.imsi_digits().is_none() {
            return Err(Error::Config(format!(
                "SUPI is not imsi-<5..15 digits>: {}",
                self.supi
            )));
        }
        if let Some(imeisv) = &self.imeisv {
            if imeisv.len() != 16 || !imeisv.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::Config(format!("IMEISV must be 16 digits: {imeisv}")));
            }
        }
        if let Some(session) = self.sessions.iter().find(|s| !(1..=15).contains(&s.psi)) {
            return Err(Error::Config(format!("PSI out of range: {}", session.psi)));
        }
        Ok(())
    }

    /// Parses a subscriber configuration from a YAML string.
    ///
    /// # Example
    /// ```
    /// use nasgen_common::{OpType, SubscriberConfig};
    ///
    /// let yaml = r#"
    /// supi: imsi-999700000021309
    /// key: 465b5ce8b199b49faa5f0a2ee238a6bc
    /// op: cd63cb71954a9f4e48a5994e37a02baf
    /// sessions:
    ///   - psi: 5
    ///     dnn: internet
    /// "#;
    ///
    /// let config = SubscriberConfig::from_yaml(yaml).unwrap();
    /// assert_eq!(config.op_type, OpType::Opc);
    /// assert_eq!(config.abba, vec![0, 0]);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a subscriber configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}

mod hex_array {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[u8; 16], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 16], D::Error> {
        let s = String::deserialize(deserializer)?;
        let mut out = [0u8; 16];
        hex::decode_to_slice(s.trim(), &mut out).map_err(D::Error::custom)?;
        Ok(out)
    }
}

mod hex_vec {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.trim()).map_err(D::Error::custom)
    }
}

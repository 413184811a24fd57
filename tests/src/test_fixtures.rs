//! Test fixtures
//!
//! Contexts are built with the 3GPP TS 35.208 test set 1 credentials so the
//! AKA outputs can be checked against published values.

use std::net::{IpAddr, Ipv4Addr};

use hex_literal::hex;
use nasgen_common::{AmfConfig, Guti, NetworkConfig, Plmn, SNssai, Supi};
use nasgen_gmm::{activate_security, GmmBuilder, UeTestContext};
use nasgen_nas::{CipheringAlgorithm, IntegrityAlgorithm, NasKeySetIdentifier, SecurityContextType};

/// TS 35.208 test set 1.
pub struct TestSet {
    pub k: [u8; 16],
    pub op: [u8; 16],
    pub opc: [u8; 16],
    pub rand: [u8; 16],
    pub autn: [u8; 16],
}

pub const TEST_SET_1: TestSet = TestSet {
    k: hex!("465b5ce8b199b49faa5f0a2ee238a6bc"),
    op: hex!("cdc202d5123e20f62b6d676ac72cb318"),
    opc: hex!("cd63cb71954a9f4e48a5994e37a02baf"),
    rand: hex!("23553cbe9637a89d218ae64dae47bf35"),
    autn: hex!("55f328b43577b9b94a9ffac354dfafb3"),
};

pub const TEST_SUPI: &str = "999700000021309";

/// SUCI with the null protection scheme for `TEST_SUPI`.
pub const TEST_SUCI: [u8; 13] = hex!("0199f907f0ff00000000210390");

pub fn network() -> NetworkConfig {
    NetworkConfig {
        amf: AmfConfig::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 5)), 38412),
        plmn: Plmn::new(999, 70, false),
        tac: 1,
        s_nssai: vec![SNssai::new(1)],
    }
}

pub fn network_without_slices() -> NetworkConfig {
    NetworkConfig {
        s_nssai: Vec::new(),
        ..network()
    }
}

pub fn test_guti() -> Guti {
    Guti::new(Plmn::new(999, 70, false), 0x02, 0x001, 0x00, 0xC000_0001)
}

/// UE before registration: SUCI, one PDU session (PSI 5), no GUTI, no keys.
pub fn unregistered_ue() -> UeTestContext {
    let mut ue = UeTestContext::new(Supi::imsi(TEST_SUPI), TEST_SET_1.k, TEST_SET_1.opc);
    ue.set_suci(TEST_SUCI.to_vec());
    ue.add_session(5, "internet").expect("valid PSI");
    ue.set_current_session(5).expect("session added");
    ue
}

/// UE after a successful AKA run with NEA2/NIA2 active and a GUTI assigned.
pub fn registered_ue(network: &NetworkConfig) -> UeTestContext {
    let mut ue = unregistered_ue();
    ue.set_challenge(TEST_SET_1.rand, TEST_SET_1.autn);
    GmmBuilder::new(network)
        .authentication_response(&mut ue)
        .expect("authentication response");
    ue.nas.ng_ksi = NasKeySetIdentifier::new(SecurityContextType::Native, 0);
    activate_security(&mut ue, CipheringAlgorithm::Nea2, IntegrityAlgorithm::Nia2)
        .expect("keys derived");
    ue.set_guti(test_guti());
    ue
}

pub fn subscriber_yaml() -> String {
    format!(
        r#"
supi: imsi-{TEST_SUPI}
key: {}
op: {}
op_type: Op
imeisv: "4370816125816151"
suci: {}
sessions:
  - psi: 5
    dnn: internet
  - psi: 6
    dnn: ims
"#,
        hex::encode(TEST_SET_1.k),
        hex::encode(TEST_SET_1.op),
        hex::encode(TEST_SUCI),
    )
}

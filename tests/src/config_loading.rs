//! YAML configuration loading tests

use std::fs;

use integration_tests::test_fixtures::{TEST_SET_1, TEST_SUCI};
use integration_tests::{decode_plain, init_test_logging, subscriber_yaml};
use nasgen_common::{Error, NetworkConfig, SNssai, SubscriberConfig};
use nasgen_gmm::{GmmBuilder, GmmError, UeTestContext};
use nasgen_nas::GmmMessage;

const NETWORK_YAML: &str = r#"
amf:
  address: 127.0.0.5
  port: 38412
plmn:
  mcc: 999
  mnc: 70
tac: 1
s_nssai:
  - sst: 1
  - sst: 2
    sd: 66051
"#;

#[test]
fn test_network_config_from_file() {
    init_test_logging();
    let path = std::env::temp_dir().join(format!("nasgen-network-{}.yaml", std::process::id()));
    fs::write(&path, NETWORK_YAML).unwrap();

    let network = NetworkConfig::from_yaml_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(
        network.serving_network_name(),
        "5G:mnc070.mcc999.3gppnetwork.org"
    );
    assert_eq!(network.default_s_nssai(), Some(&SNssai::new(1)));
    assert_eq!(network.s_nssai[1], SNssai::with_sd(2, 0x010203));
}

#[test]
fn test_subscriber_config_drives_ue_context() {
    let network = NetworkConfig::from_yaml(NETWORK_YAML).unwrap();
    let subscriber = SubscriberConfig::from_yaml(&subscriber_yaml()).unwrap();
    let mut ue = UeTestContext::from_config(&subscriber).unwrap();

    assert_eq!(ue.opc(), &TEST_SET_1.opc);
    assert_eq!(&ue.suci()[..], &TEST_SUCI);
    assert_eq!(ue.sessions().len(), 2);
    assert_eq!(ue.current_session().unwrap().psi, 5);
    assert_eq!(ue.imeisv().unwrap()[..4], [4u8, 3, 7, 0]);

    let pdu = GmmBuilder::new(&network)
        .registration_request(&mut ue, false)
        .unwrap();
    let GmmMessage::RegistrationRequest(req) = decode_plain(&pdu) else {
        panic!("expected Registration Request");
    };
    assert_eq!(&req.mobile_identity.data[..], &TEST_SUCI);
}

#[test]
fn test_subscriber_config_rejects_unknown_supi_type() {
    let yaml = subscriber_yaml().replace("supi: imsi-", "supi: msisdn-");
    let res = SubscriberConfig::from_yaml(&yaml);
    assert!(matches!(res, Err(Error::YamlParse(_))));
}

#[test]
fn test_nai_supi_cannot_build_context() {
    let mut subscriber = SubscriberConfig::from_yaml(&subscriber_yaml()).unwrap();
    subscriber.supi = nasgen_common::Supi::parse("nai-user@example.org").unwrap();
    assert!(matches!(
        UeTestContext::from_config(&subscriber),
        Err(GmmError::Config(Error::Config(_)))
    ));
}

#[test]
fn test_network_config_rejects_out_of_range_values() {
    let yaml = NETWORK_YAML.replace("tac: 1", "tac: 16777216");
    let res = NetworkConfig::from_yaml(&yaml);
    assert!(matches!(res, Err(Error::Config(_))));

    let yaml = NETWORK_YAML.replace("mnc: 70", "mnc: 700");
    let res = NetworkConfig::from_yaml(&yaml);
    assert!(matches!(res, Err(Error::Config(_))));
}

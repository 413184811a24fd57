//! 5G-AKA and NAS security integration tests

use bytes::Bytes;
use hex_literal::hex;
use integration_tests::{
    decode_plain, init_test_logging, network, open_protected, registered_ue, unregistered_ue,
    TEST_SET_1,
};
use nasgen_crypto::kdf::calculate_kdf_key;
use nasgen_crypto::milenage::Milenage;
use nasgen_gmm::{
    activate_security, GmmBuilder, GmmError, NasPlainEncoder, SecurityEncoder, RESYNC_AMF, SQN_MS,
};
use nasgen_nas::{
    CipheringAlgorithm, GmmMessage, IntegrityAlgorithm, MmCause, NasSecurityContext, SecurityError,
    SecurityHeaderType,
};

#[test]
fn test_authentication_response_matches_stored_res_star() {
    init_test_logging();
    let network = network();
    let mut ue = unregistered_ue();
    ue.set_challenge(TEST_SET_1.rand, TEST_SET_1.autn);

    let pdu = GmmBuilder::new(&network)
        .authentication_response(&mut ue)
        .unwrap();
    assert_eq!(pdu.len(), 3 + 2 + 16);
    assert_eq!(&pdu[..5], &[0x7E, 0x00, 0x57, 0x2D, 0x10]);

    let vector = ue.auth_vector().unwrap();
    assert_eq!(&pdu[5..], &vector.res_star);
    assert_eq!(vector.res, hex!("a54211d5e3ba50bf"));
    assert_eq!(ue.kamf().unwrap(), &vector.kamf);

    let GmmMessage::AuthenticationResponse(resp) = decode_plain(&pdu) else {
        panic!("expected Authentication Response");
    };
    assert_eq!(resp.response_parameter.unwrap().res_star, vector.res_star);
}

#[test]
fn test_key_hierarchy_matches_recomputation() {
    let network = network();
    let snn = network.serving_network_name();
    let mut ue = unregistered_ue();
    ue.set_challenge(TEST_SET_1.rand, TEST_SET_1.autn);
    let res_star = GmmBuilder::new(&network)
        .authentication_response(&mut ue)
        .map(|pdu| pdu[5..].to_vec())
        .unwrap();

    let out = Milenage::new(&TEST_SET_1.k, &TEST_SET_1.opc).f2345(&TEST_SET_1.rand);
    let ck_ik = [out.ck, out.ik].concat();
    let params = [snn.as_bytes(), &TEST_SET_1.rand[..], &out.res[..]];
    let expected_res_star = calculate_kdf_key(&ck_ik, 0x6B, &params);
    let kausf = calculate_kdf_key(&ck_ik, 0x6A, &[snn.as_bytes(), &TEST_SET_1.autn[..6]]);
    let kseaf = calculate_kdf_key(&kausf, 0x6C, &[snn.as_bytes()]);
    let kamf = calculate_kdf_key(&kseaf, 0x6D, &[&b"999700000021309"[..], &[0x00, 0x00][..]]);

    let vector = ue.auth_vector().unwrap();
    assert_eq!(res_star, expected_res_star[16..]);
    assert_eq!(vector.kausf, kausf);
    assert_eq!(vector.kseaf, kseaf);
    assert_eq!(vector.kamf, kamf);
}

#[test]
fn test_authentication_response_without_challenge_fails() {
    let network = network();
    let mut ue = unregistered_ue();
    assert!(matches!(
        GmmBuilder::new(&network).authentication_response(&mut ue),
        Err(GmmError::NoChallenge)
    ));
    assert!(ue.auth_vector().is_none());
}

#[test]
fn test_keys_depend_on_serving_network() {
    let mut other = network();
    other.plmn = nasgen_common::Plmn::new(1, 1, false);

    let mut a = unregistered_ue();
    let mut b = unregistered_ue();
    a.set_challenge(TEST_SET_1.rand, TEST_SET_1.autn);
    b.set_challenge(TEST_SET_1.rand, TEST_SET_1.autn);

    let res_a = GmmBuilder::new(&network())
        .authentication_response(&mut a)
        .unwrap();
    let res_b = GmmBuilder::new(&other)
        .authentication_response(&mut b)
        .unwrap();
    assert_ne!(res_a, res_b);
    assert_ne!(a.kamf().unwrap(), b.kamf().unwrap());
}

#[test]
fn test_synch_failure_auts() {
    let network = network();
    let mut ue = unregistered_ue();
    ue.set_challenge(TEST_SET_1.rand, TEST_SET_1.autn);

    let pdu = GmmBuilder::new(&network)
        .authentication_failure(&mut ue, MmCause::SynchFailure)
        .unwrap();
    let GmmMessage::AuthenticationFailure(failure) = decode_plain(&pdu) else {
        panic!("expected Authentication Failure");
    };
    assert_eq!(failure.cause, MmCause::SynchFailure);
    let auts = failure.failure_parameter.unwrap().auts;

    let milenage = Milenage::new(&TEST_SET_1.k, &TEST_SET_1.opc);
    let ak_star = milenage.f5_star(&TEST_SET_1.rand);
    let concealed: Vec<u8> = SQN_MS.iter().zip(ak_star).map(|(s, a)| s ^ a).collect();
    assert_eq!(&auts[..6], &concealed[..]);
    assert_eq!(&auts[..6], &hex!("451e9ace977f"));
    assert_eq!(
        auts[6..],
        milenage.f1_star(&TEST_SET_1.rand, &SQN_MS, &RESYNC_AMF)
    );
}

#[test]
fn test_other_failures_omit_auts() {
    let network = network();
    let mut ue = unregistered_ue();

    let pdu = GmmBuilder::new(&network)
        .authentication_failure(&mut ue, MmCause::MacFailure)
        .unwrap();
    assert_eq!(&pdu[..], &[0x7E, 0x00, 0x59, 20]);

    assert!(matches!(
        GmmBuilder::new(&network).authentication_failure(&mut ue, MmCause::SynchFailure),
        Err(GmmError::NoChallenge)
    ));
}

#[test]
fn test_protected_round_trip_and_count() {
    let network = network();
    let builder = GmmBuilder::new(&network);
    let mut ue = registered_ue(&network);
    assert_eq!(ue.security.uplink_count().to_u32(), 0);

    let first = builder.registration_complete(&mut ue).unwrap();
    let second = builder.registration_complete(&mut ue).unwrap();
    assert_eq!(ue.security.uplink_count().to_u32(), 2);
    assert_eq!(first[6], 0);
    assert_eq!(second[6], 1);
    assert_ne!(first, second);

    let (_, msg) = open_protected(&ue, &second);
    assert!(matches!(msg, GmmMessage::RegistrationComplete(_)));
}

#[test]
fn test_tampered_mac_rejected() {
    let network = network();
    let mut ue = registered_ue(&network);

    let pdu = GmmBuilder::new(&network)
        .registration_complete(&mut ue)
        .unwrap();
    let mut tampered = pdu.to_vec();
    tampered[2] ^= 0x01;
    assert!(matches!(
        nasgen_nas::unprotect(&ue.security, &tampered),
        Err(SecurityError::MacVerificationFailed)
    ));
}

#[test]
fn test_null_algorithms() {
    let network = network();
    let mut ue = registered_ue(&network);
    activate_security(&mut ue, CipheringAlgorithm::Nea0, IntegrityAlgorithm::Nia0).unwrap();

    let pdu = GmmBuilder::new(&network)
        .registration_complete(&mut ue)
        .unwrap();
    assert_eq!(pdu[..7], [0x7E, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(pdu[7..], [0x7E, 0x00, 0x43]);
}

#[test]
fn test_inactive_context_fails_without_consuming_count() {
    let network = network();
    let mut ue = unregistered_ue();

    let result = GmmBuilder::new(&network).registration_complete(&mut ue);
    assert!(matches!(
        result,
        Err(GmmError::Security(SecurityError::SecurityContextNotActive))
    ));
    assert_eq!(ue.security.uplink_count().to_u32(), 0);
}

#[test]
fn test_unsupported_algorithm_fails_without_consuming_count() {
    let network = network();
    let mut ue = registered_ue(&network);
    activate_security(&mut ue, CipheringAlgorithm::Nea1, IntegrityAlgorithm::Nia2).unwrap();

    let result = GmmBuilder::new(&network).service_request(&mut ue);
    let Err(GmmError::Security(err)) = result else {
        panic!("expected a security error");
    };
    assert_eq!(
        err,
        SecurityError::UnsupportedCipheringAlgorithm(CipheringAlgorithm::Nea1)
    );
    assert_eq!(ue.security.uplink_count().to_u32(), 0);
}

struct RejectingEncoder;

impl SecurityEncoder for RejectingEncoder {
    fn encode(
        &self,
        _ctx: &mut NasSecurityContext,
        _security_header_type: SecurityHeaderType,
        _message: &GmmMessage,
    ) -> Result<Bytes, SecurityError> {
        Err(SecurityError::MissingKeys)
    }
}

#[test]
fn test_security_encoder_failure_propagates() {
    let network = network();
    let mut ue = registered_ue(&network);
    let builder = GmmBuilder::with_encoders(&network, NasPlainEncoder, RejectingEncoder);

    assert!(matches!(
        builder.deregistration_request(&mut ue, false),
        Err(GmmError::Security(SecurityError::MissingKeys))
    ));
    // plain messages do not touch the security encoder
    assert!(builder.registration_request(&mut ue, false).is_ok());
}

#[test]
fn test_stale_kamf_after_new_challenge() {
    let network = network();
    let mut ue = registered_ue(&network);
    ue.set_challenge([0x5A; 16], TEST_SET_1.autn);

    assert!(matches!(
        activate_security(&mut ue, CipheringAlgorithm::Nea2, IntegrityAlgorithm::Nia2),
        Err(GmmError::StaleKeys)
    ));

    GmmBuilder::new(&network)
        .authentication_response(&mut ue)
        .unwrap();
    activate_security(&mut ue, CipheringAlgorithm::Nea2, IntegrityAlgorithm::Nia2).unwrap();
}

#[test]
fn test_registration_flow_end_to_end() {
    init_test_logging();
    let network = network();
    let builder = GmmBuilder::new(&network);
    let mut ue = unregistered_ue();

    let request = builder.registration_request(&mut ue, false).unwrap();
    let GmmMessage::RegistrationRequest(req) = decode_plain(&request) else {
        panic!("expected Registration Request");
    };
    assert_eq!(req.mobile_identity.data.len(), 13);
    assert!(req.uplink_data_status.is_none());

    ue.set_challenge(TEST_SET_1.rand, TEST_SET_1.autn);
    builder.authentication_response(&mut ue).unwrap();
    activate_security(&mut ue, CipheringAlgorithm::Nea2, IntegrityAlgorithm::Nia2).unwrap();

    let smc = builder
        .security_mode_complete(&mut ue, Some(request.clone()))
        .unwrap();
    let (_, msg) = open_protected(&ue, &smc);
    let GmmMessage::SecurityModeComplete(smc) = msg else {
        panic!("expected Security Mode Complete");
    };
    assert_eq!(smc.nas_message_container.unwrap().data, request);

    ue.set_guti(integration_tests::test_guti());
    let complete = builder.registration_complete(&mut ue).unwrap();
    assert_eq!(complete[6], 1);
    assert_eq!(ue.security.uplink_count().to_u32(), 2);
}

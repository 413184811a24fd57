//! Message builder integration tests
//!
//! Wire layout and identity selection of every uplink 5GMM builder.

use bytes::Bytes;
use hex_literal::hex;
use integration_tests::test_fixtures::TEST_SUCI;
use integration_tests::{
    decode_plain, init_test_logging, network, network_without_slices, open_protected, registered_ue,
    unregistered_ue,
};
use nasgen_gmm::{
    GmmBuilder, GmmError, IdentityKind, GUTI_IDENTITY_LEN, IMEISV_IDENTITY_LEN, S_TMSI_IDENTITY_LEN,
};
use nasgen_nas::{
    AccessType, GmmMessage, IdentityType, MmCause, PayloadContainerType, RequestType,
    SecurityHeaderType, ServiceType, SwitchOff,
};

#[test]
fn test_initial_registration_request_wire_layout() {
    init_test_logging();
    let network = network();
    let mut ue = unregistered_ue();

    let pdu = GmmBuilder::new(&network)
        .registration_request(&mut ue, false)
        .unwrap();

    let mut expected = vec![0x7E, 0x00, 0x41, 0x79, 0x00, 0x0D];
    expected.extend_from_slice(&TEST_SUCI);
    expected.extend_from_slice(&[0x10, 0x01, 0x07]);
    expected.extend_from_slice(&hex!("2e08ffffffff00000000"));
    assert_eq!(&pdu[..], &expected[..]);
    assert_eq!(ue.security.uplink_count().to_u32(), 0);
}

#[test]
fn test_update_registration_request_uses_guti_and_session() {
    init_test_logging();
    let network = network();
    let mut ue = registered_ue(&network);

    let pdu = GmmBuilder::new(&network)
        .registration_request(&mut ue, true)
        .unwrap();
    let (header, msg) = open_protected(&ue, &pdu);
    assert_eq!(
        header.security_header_type,
        SecurityHeaderType::IntegrityProtectedAndCiphered
    );

    let GmmMessage::RegistrationRequest(req) = msg else {
        panic!("expected Registration Request");
    };
    assert_eq!(req.mobile_identity.identity_type, IdentityType::Guti);
    assert_eq!(req.mobile_identity.data.len(), GUTI_IDENTITY_LEN);
    assert_eq!(req.ng_ksi.ksi, 0);
    assert_eq!(req.uplink_data_status.unwrap().value, 0x2000);
}

#[test]
fn test_builders_are_deterministic() {
    let network = network();
    let builder = GmmBuilder::new(&network);

    let mut a = registered_ue(&network);
    let mut b = registered_ue(&network);

    assert_eq!(
        builder.registration_request(&mut a, false).unwrap(),
        builder.registration_request(&mut b, false).unwrap()
    );
    assert_eq!(
        builder.service_request(&mut a).unwrap(),
        builder.service_request(&mut b).unwrap()
    );
    assert_eq!(
        builder.deregistration_request(&mut a, true).unwrap(),
        builder.deregistration_request(&mut b, true).unwrap()
    );
}

#[test]
fn test_identity_response_carries_suci() {
    let network = network();
    let mut ue = unregistered_ue();

    let pdu = GmmBuilder::new(&network)
        .identity_response(&mut ue)
        .unwrap();
    assert_eq!(&pdu[..3], &[0x7E, 0x00, 0x5C]);

    let GmmMessage::IdentityResponse(resp) = decode_plain(&pdu) else {
        panic!("expected Identity Response");
    };
    assert_eq!(resp.mobile_identity.identity_type, IdentityType::Suci);
    assert_eq!(&resp.mobile_identity.data[..], &TEST_SUCI);
}

#[test]
fn test_identity_response_without_suci_fails() {
    let network = network();
    let mut ue = unregistered_ue();
    ue.set_suci(Bytes::new());

    assert!(matches!(
        GmmBuilder::new(&network).identity_response(&mut ue),
        Err(GmmError::MissingIdentity(IdentityKind::Suci))
    ));
}

#[test]
fn test_deregistration_identity_selection() {
    let network = network();
    let builder = GmmBuilder::new(&network);

    let mut ue = registered_ue(&network);
    let pdu = builder.deregistration_request(&mut ue, false).unwrap();
    let (_, msg) = open_protected(&ue, &pdu);
    let GmmMessage::DeregistrationRequest(req) = msg else {
        panic!("expected De-registration Request");
    };
    assert_eq!(req.mobile_identity.identity_type, IdentityType::Guti);
    assert_eq!(req.mobile_identity.data.len(), GUTI_IDENTITY_LEN);
    let deregistration_type = req.deregistration_type;
    assert_eq!(
        deregistration_type.switch_off,
        SwitchOff::NormalDeRegistration
    );
    assert_eq!(deregistration_type.access_type, AccessType::ThreeGppAccess);

    ue.clear_guti();
    let pdu = builder.deregistration_request(&mut ue, true).unwrap();
    let (_, msg) = open_protected(&ue, &pdu);
    let GmmMessage::DeregistrationRequest(req) = msg else {
        panic!("expected De-registration Request");
    };
    assert_eq!(req.mobile_identity.identity_type, IdentityType::Suci);
    assert_eq!(req.mobile_identity.data.len(), TEST_SUCI.len());
    assert_eq!(req.deregistration_type.switch_off, SwitchOff::SwitchOff);
}

#[test]
fn test_service_request_s_tmsi_and_uplink_data_status() {
    let network = network();
    let mut ue = registered_ue(&network);

    let pdu = GmmBuilder::new(&network).service_request(&mut ue).unwrap();
    let (_, msg) = open_protected(&ue, &pdu);
    let GmmMessage::ServiceRequest(req) = msg else {
        panic!("expected Service Request");
    };
    assert_eq!(req.service_type, ServiceType::Data);
    assert_eq!(req.s_tmsi.identity_type, IdentityType::Tmsi);
    assert_eq!(req.s_tmsi.data.len(), S_TMSI_IDENTITY_LEN);
    assert_eq!(&req.s_tmsi.data[..], &hex!("f40040c0000001"));
    assert_eq!(req.uplink_data_status.unwrap().value, 0x2000);
}

#[test]
fn test_security_mode_complete_always_has_imeisv() {
    let network = network();
    let builder = GmmBuilder::new(&network);
    let mut ue = registered_ue(&network);

    let pdu = builder.security_mode_complete(&mut ue, None).unwrap();
    let (header, msg) = open_protected(&ue, &pdu);
    assert_eq!(
        header.security_header_type,
        SecurityHeaderType::IntegrityProtectedAndCipheredWithNewSecurityContext
    );
    let GmmMessage::SecurityModeComplete(smc) = msg else {
        panic!("expected Security Mode Complete");
    };
    let imeisv = smc.imeisv.unwrap();
    assert_eq!(imeisv.identity_type, IdentityType::ImeiSv);
    assert_eq!(&imeisv.data[..], &hex!("1511000000000000f0"));
    assert_eq!(imeisv.data.len(), IMEISV_IDENTITY_LEN);
    assert!(smc.nas_message_container.is_none());

    let nested = builder
        .registration_request(&mut unregistered_ue(), false)
        .unwrap();
    let pdu = builder
        .security_mode_complete(&mut ue, Some(nested.clone()))
        .unwrap();
    let (_, msg) = open_protected(&ue, &pdu);
    let GmmMessage::SecurityModeComplete(smc) = msg else {
        panic!("expected Security Mode Complete");
    };
    assert!(smc.imeisv.is_some());
    assert_eq!(smc.nas_message_container.unwrap().data, nested);
}

#[test]
fn test_security_mode_complete_without_imeisv_fails() {
    let network = network();
    let mut ue = registered_ue(&network);
    ue.clear_imeisv();
    let count = ue.security.uplink_count();

    assert!(matches!(
        GmmBuilder::new(&network).security_mode_complete(&mut ue, None),
        Err(GmmError::MissingIdentity(IdentityKind::Imeisv))
    ));
    assert_eq!(ue.security.uplink_count(), count);
}

#[test]
fn test_ul_nas_transport_session_fields() {
    let network = network();
    let mut ue = registered_ue(&network);
    ue.add_session(6, "ims").unwrap();
    let payload = Bytes::from_static(&[0x2E, 0x06, 0x01, 0xC1, 0xFF, 0xFF, 0x91]);
    let sm = PayloadContainerType::N1SmInformation;

    let pdu = GmmBuilder::new(&network)
        .ul_nas_transport(&mut ue, 6, sm, payload.clone())
        .unwrap();
    let (_, msg) = open_protected(&ue, &pdu);
    let GmmMessage::UlNasTransport(transport) = msg else {
        panic!("expected UL NAS Transport");
    };
    assert_eq!(transport.payload_container_type, sm);
    assert_eq!(transport.payload_container.data, payload);
    assert_eq!(transport.pdu_session_id, Some(6));
    assert_eq!(transport.request_type, Some(RequestType::InitialRequest));
    assert_eq!(transport.s_nssai.unwrap().s_nssai, network.s_nssai[0]);
    assert_eq!(transport.dnn.unwrap().dnn, "ims");
}

#[test]
fn test_ul_nas_transport_without_slice_fails() {
    let network = network_without_slices();
    let mut ue = registered_ue(&network);

    let result = GmmBuilder::new(&network).ul_nas_transport(
        &mut ue,
        5,
        PayloadContainerType::N1SmInformation,
        Bytes::from_static(&[0x2E]),
    );
    assert!(matches!(result, Err(GmmError::NoConfiguredSlice)));
    assert_eq!(ue.security.uplink_count().to_u32(), 0);
}

#[test]
fn test_small_protected_messages() {
    let network = network();
    let builder = GmmBuilder::new(&network);
    let mut ue = registered_ue(&network);

    let pdu = builder.registration_complete(&mut ue).unwrap();
    let (header, msg) = open_protected(&ue, &pdu);
    assert_eq!(header.sequence_number, 0);
    assert!(matches!(msg, GmmMessage::RegistrationComplete(_)));

    let pdu = builder.configuration_update_complete(&mut ue).unwrap();
    let (header, msg) = open_protected(&ue, &pdu);
    assert_eq!(header.sequence_number, 1);
    let GmmMessage::ConfigurationUpdateComplete(complete) = msg else {
        panic!("expected Configuration Update Complete");
    };
    assert_eq!(u8::from(complete.control_plane_service_type), 0);
}

#[test]
fn test_gmm_status_is_plain() {
    let network = network();
    let mut ue = registered_ue(&network);

    let pdu = GmmBuilder::new(&network)
        .gmm_status(&mut ue, MmCause::MessageTypeNonExistent)
        .unwrap();
    assert_eq!(&pdu[..], &[0x7E, 0x00, 0x64, 97]);
    let GmmMessage::GmmStatus(status) = decode_plain(&pdu) else {
        panic!("expected 5GMM Status");
    };
    assert_eq!(status.cause, MmCause::MessageTypeNonExistent);
    assert_eq!(ue.security.uplink_count().to_u32(), 0);
}

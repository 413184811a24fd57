//! Test utility functions

use bytes::Bytes;
use nasgen_gmm::UeTestContext;
use nasgen_nas::{unprotect, GmmMessage, SecuredHeader};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging for tests
///
/// Uses RUST_LOG environment variable if set, otherwise defaults to "debug"
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
}

pub fn decode_plain(pdu: &[u8]) -> GmmMessage {
    let mut buf = pdu;
    let msg = GmmMessage::decode(&mut buf).expect("plain 5GMM message");
    assert!(
        buf.is_empty(),
        "trailing bytes after {:?}",
        msg.message_type()
    );
    msg
}

/// Verifies and deciphers a protected uplink PDU with the UE's context.
pub fn open_protected(ue: &UeTestContext, pdu: &Bytes) -> (SecuredHeader, GmmMessage) {
    let (header, body) = unprotect(&ue.security, pdu).expect("protected 5GMM message");
    (header, decode_plain(&body))
}

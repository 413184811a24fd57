//! Integration test support for nasgen
//!
//! - [`test_fixtures`] - network, subscriber and UE contexts in known states
//! - [`test_utils`] - logging and helpers to open built PDUs again
//!
//! # Test Categories
//!
//! 1. **Message builders** - wire layout and identity selection per message
//! 2. **Security flow** - AKA, security activation, protected envelopes
//! 3. **Config loading** - YAML network and subscriber files

pub mod test_fixtures;
pub mod test_utils;

pub use test_fixtures::{
    network, network_without_slices, registered_ue, subscriber_yaml, test_guti, unregistered_ue,
    TEST_SET_1,
};
pub use test_utils::{decode_plain, init_test_logging, open_protected};

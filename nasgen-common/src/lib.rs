//! Common types and utilities for nasgen
//!
//! Shared PLMN / identity types, the explicit network and subscriber
//! configuration handed to the message builders, and logging setup.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{AmfConfig, NetworkConfig, OpType, SessionConfig, SubscriberConfig};
pub use error::Error;
pub use logging::{format_hex_compact, init_logging, init_logging_with_filter, HexDump, LogLevel};
pub use types::{Guti, Plmn, SNssai, Supi, SupiType};

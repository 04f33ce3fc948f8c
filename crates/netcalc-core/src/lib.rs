//! Core types for netcalc (IPv4 network calculator)
//!
//! This crate provides the leaf primitives used by the rest of the workspace:
//! - [`ip_to_long`] / [`long_to_ip`] - dotted-quad codec
//! - [`IpType`] / [`classify`] - address classification
//! - [`EngineConfig`] - tunable limits
//! - [`NetcalcError`] - error types
//!
//! ```
//! use netcalc_core::{classify, ip_to_long, long_to_ip, IpType};
//!
//! let ip = ip_to_long("192.168.1.10").unwrap();
//! assert_eq!(ip, 0xC0A8010A);
//! assert_eq!(long_to_ip(ip), "192.168.1.10");
//! assert_eq!(classify(ip), IpType::Private);
//! ```

use thiserror::Error;

pub mod addr;
pub mod class;
pub mod config;

pub use addr::{ip_to_long, long_to_ip, octets, to_binary};
pub use class::{classify, IpType};
pub use config::{EngineConfig, DEFAULT_MAX_SUBNETS, MAX_SUBNETS_CEILING};

/// Error types for netcalc core operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetcalcError {
    /// Malformed dotted-quad: wrong segment count, non-numeric segment
    /// or an octet outside 0-255. Carries the offending input.
    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),
}

/// Result type alias for netcalc core operations
pub type Result<T> = std::result::Result<T, NetcalcError>;

//! IPv4 CIDR calculation and subnet generation
//!
//! Provides the calculation engine behind the CIDR analyzer and subnet
//! generator:
//! - Parse CIDR notation (e.g., "192.168.0.0/24")
//! - Derive network, broadcast, usable range, masks and classification
//! - Split a network into equal, contiguous subnets
//!
//! Every call recomputes from its input. Nothing is cached or shared.
//!
//! # Examples
//!
//! ```
//! use netcalc_cidr::calculate_cidr;
//!
//! let calc = calculate_cidr("10.0.0.5/8").unwrap();
//! assert_eq!(calc.network_address, "10.0.0.0");
//! assert_eq!(calc.broadcast_address, "10.255.255.255");
//! assert_eq!(calc.cidr_notation, "10.0.0.0/8");
//! ```

use netcalc_core::{classify, ip_to_long, long_to_ip, to_binary, IpType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

pub mod subnet;

pub use subnet::{generate_subnets, generate_subnets_with_config, HostRange, SubnetInfo};

/// Placeholder for usable-host fields of /31 and /32 networks
pub const NOT_APPLICABLE: &str = "N/A";

/// CIDR errors
///
/// The message of each variant is the complete user-facing text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrError {
    /// Malformed `ip/prefix` string
    #[error("{0}")]
    InvalidCidr(String),

    /// Rejected subnetting request
    #[error("{0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CidrError>;

/// Mask with the top `prefix` bits set. Callers guarantee `prefix <= 32`.
pub fn mask_for_prefix(prefix: u8) -> u32 {
    u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0)
}

/// Parsed CIDR specification
///
/// Keeps the address exactly as given; the network address is derived by
/// masking, so `10.0.0.5/8` reports network `10.0.0.0` while still
/// classifying `10.0.0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CidrSpec {
    /// Address as supplied (host bits intact)
    address: u32,
    /// Prefix length (0-32)
    prefix: u8,
    /// Network mask
    mask: u32,
}

impl CidrSpec {
    /// Parse CIDR notation string
    ///
    /// # Arguments
    ///
    /// * `cidr` - CIDR string (e.g., "192.168.1.0/24")
    ///
    /// # Examples
    ///
    /// ```
    /// use netcalc_cidr::CidrSpec;
    ///
    /// let cidr = CidrSpec::parse("10.0.0.0/8").unwrap();
    /// assert_eq!(cidr.prefix(), 8);
    /// ```
    pub fn parse(cidr: &str) -> Result<Self> {
        let parts: Vec<&str> = cidr.split('/').collect();
        if parts.len() != 2 {
            return Err(CidrError::InvalidCidr(
                "Invalid CIDR format. Expected e.g., 192.168.1.0/24.".to_string(),
            ));
        }

        let prefix = Self::parse_prefix(parts[1])?;
        let address = ip_to_long(parts[0]).map_err(|e| CidrError::InvalidCidr(e.to_string()))?;

        Self::new(address, prefix)
    }

    fn parse_prefix(text: &str) -> Result<u8> {
        let invalid = || {
            CidrError::InvalidCidr(format!("Invalid prefix length: {} (must be 0-32).", text))
        };

        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        text.parse::<u8>()
            .ok()
            .filter(|prefix| *prefix <= 32)
            .ok_or_else(invalid)
    }

    /// Create a spec from an address and prefix length
    ///
    /// # Arguments
    ///
    /// * `address` - Address as u32; host bits are kept
    /// * `prefix` - Prefix length (0-32)
    pub fn new(address: u32, prefix: u8) -> Result<Self> {
        if prefix > 32 {
            return Err(CidrError::InvalidCidr(format!(
                "Invalid prefix length: {} (must be 0-32).",
                prefix
            )));
        }

        Ok(Self {
            address,
            prefix,
            mask: mask_for_prefix(prefix),
        })
    }

    /// Get the address as supplied
    pub fn address(&self) -> u32 {
        self.address
    }

    /// Get prefix length
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Get network mask
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Get wildcard mask (complement of the network mask)
    pub fn wildcard(&self) -> u32 {
        !self.mask
    }

    /// Get network address (host bits cleared)
    pub fn network(&self) -> u32 {
        self.address & self.mask
    }

    /// Get broadcast address (host bits set)
    pub fn broadcast(&self) -> u32 {
        self.network() | !self.mask
    }

    /// First usable host, `None` for /31 and /32
    pub fn first_usable(&self) -> Option<u32> {
        (self.prefix <= 30).then(|| self.network() + 1)
    }

    /// Last usable host, `None` for /31 and /32
    pub fn last_usable(&self) -> Option<u32> {
        (self.prefix <= 30).then(|| self.broadcast() - 1)
    }

    /// Number of usable hosts (network and broadcast excluded)
    ///
    /// /31 and /32 report zero: the point-to-point reading of RFC 3021 is
    /// not applied.
    pub fn usable_hosts(&self) -> u64 {
        if self.prefix <= 30 {
            self.size() - 2
        } else {
            0
        }
    }

    /// Get total number of addresses in this block
    pub fn size(&self) -> u64 {
        1u64 << (32 - self.prefix)
    }

    /// Check if address is in this block
    ///
    /// # Arguments
    ///
    /// * `ip` - IP address as u32
    pub fn contains(&self, ip: u32) -> bool {
        (ip & self.mask) == self.network()
    }

    /// Classification of the supplied address
    pub fn ip_type(&self) -> IpType {
        classify(self.address)
    }

    /// Derive the full calculation snapshot
    pub fn calculate(&self) -> CidrCalculation {
        CidrCalculation {
            original_ip: long_to_ip(self.address),
            prefix: self.prefix,
            network_address: long_to_ip(self.network()),
            broadcast_address: long_to_ip(self.broadcast()),
            first_usable_host: render_optional(self.first_usable()),
            last_usable_host: render_optional(self.last_usable()),
            num_usable_hosts: self.usable_hosts(),
            total_addresses: self.size(),
            subnet_mask: long_to_ip(self.mask),
            wildcard_mask: long_to_ip(self.wildcard()),
            cidr_notation: self.to_string(),
            ip_type: self.ip_type(),
            binary_address: to_binary(self.address),
            binary_mask: to_binary(self.mask),
        }
    }
}

pub(crate) fn render_optional(ip: Option<u32>) -> String {
    ip.map_or_else(|| NOT_APPLICABLE.to_string(), long_to_ip)
}

impl FromStr for CidrSpec {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Canonical `network/prefix` form
impl fmt::Display for CidrSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", long_to_ip(self.network()), self.prefix)
    }
}

/// Result of analyzing a single CIDR block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CidrCalculation {
    /// Supplied address, in canonical dotted form
    pub original_ip: String,
    pub prefix: u8,
    pub network_address: String,
    pub broadcast_address: String,
    /// Dotted quad, or "N/A" for /31 and /32
    pub first_usable_host: String,
    /// Dotted quad, or "N/A" for /31 and /32
    pub last_usable_host: String,
    pub num_usable_hosts: u64,
    pub total_addresses: u64,
    pub subnet_mask: String,
    pub wildcard_mask: String,
    /// `network/prefix`
    pub cidr_notation: String,
    /// Classification of `original_ip`, not of the network address
    pub ip_type: IpType,
    pub binary_address: String,
    pub binary_mask: String,
}

/// Analyze a CIDR string
///
/// # Examples
///
/// ```
/// use netcalc_cidr::calculate_cidr;
///
/// let calc = calculate_cidr("192.168.1.0/24").unwrap();
/// assert_eq!(calc.num_usable_hosts, 254);
/// assert_eq!(calc.wildcard_mask, "0.0.0.255");
/// assert!(calculate_cidr("not-an-ip/24").is_err());
/// ```
pub fn calculate_cidr(cidr: &str) -> Result<CidrCalculation> {
    let spec = CidrSpec::parse(cidr)?;
    debug!(input = cidr, network = %spec, "calculated CIDR");
    Ok(spec.calculate())
}

//! Subnet generation
//!
//! Splits a base network into `2^(new_prefix - base_prefix)` equal subnets,
//! contiguous and ordered by network address. Rows are materialized eagerly
//! and bounded by [`EngineConfig::max_subnets`].

use netcalc_core::{long_to_ip, EngineConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{render_optional, CidrError, CidrSpec, Result};

/// Usable host range of one subnet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRange {
    pub first: String,
    pub last: String,
}

/// One row of a subnet enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetInfo {
    pub network_address: String,
    /// `network/new_prefix`
    pub cidr_notation: String,
    pub usable_host_range: HostRange,
    pub broadcast_address: String,
    pub num_usable_hosts: u64,
}

impl From<&CidrSpec> for SubnetInfo {
    fn from(spec: &CidrSpec) -> Self {
        Self {
            network_address: long_to_ip(spec.network()),
            cidr_notation: spec.to_string(),
            usable_host_range: HostRange {
                first: render_optional(spec.first_usable()),
                last: render_optional(spec.last_usable()),
            },
            broadcast_address: long_to_ip(spec.broadcast()),
            num_usable_hosts: spec.usable_hosts(),
        }
    }
}

impl CidrSpec {
    /// Split this network into subnets of length `new_prefix`
    ///
    /// Starts from the normalized network address, not the supplied one.
    ///
    /// # Arguments
    ///
    /// * `new_prefix` - Must be greater than this prefix and at most 32
    /// * `max_rows` - Upper bound on the number of subnets produced
    ///
    /// # Examples
    ///
    /// ```
    /// use netcalc_cidr::CidrSpec;
    ///
    /// let base = CidrSpec::parse("10.0.0.0/30").unwrap();
    /// let subnets = base.subnets(31, 16).unwrap();
    /// assert_eq!(subnets.len(), 2);
    /// assert_eq!(subnets[1].cidr_notation, "10.0.0.2/31");
    /// ```
    pub fn subnets(&self, new_prefix: u8, max_rows: u64) -> Result<Vec<SubnetInfo>> {
        if new_prefix <= self.prefix() || new_prefix > 32 {
            return Err(prefix_bound_error(self.prefix()));
        }

        let subnet_bits = new_prefix - self.prefix();
        let count = 1u64 << subnet_bits;
        if count > max_rows {
            warn!(
                base = %self,
                new_prefix,
                count,
                max_rows,
                "subnet request exceeds row limit"
            );
            return Err(CidrError::InvalidInput(format!(
                "Subnetting /{} into /{} would produce {} subnets (limit {}).",
                self.prefix(),
                new_prefix,
                count,
                max_rows
            )));
        }

        let subnet_size = 1u64 << (32 - new_prefix);
        debug_assert_eq!(count * subnet_size, self.size());

        let start = u64::from(self.network());
        let subnets = (0..count)
            .map(|i| {
                let network = (start + i * subnet_size) as u32;
                CidrSpec::new(network, new_prefix).map(|spec| SubnetInfo::from(&spec))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(base = %self, new_prefix, count, "generated subnets");
        Ok(subnets)
    }
}

fn prefix_bound_error(base_prefix: u8) -> CidrError {
    CidrError::InvalidInput(format!(
        "New prefix must be > {} and <= 32.",
        base_prefix
    ))
}

/// Generate subnets with the default row limit
///
/// # Examples
///
/// ```
/// use netcalc_cidr::generate_subnets;
///
/// let subnets = generate_subnets("192.168.1.0/24", "26").unwrap();
/// assert_eq!(subnets.len(), 4);
/// assert_eq!(subnets[3].cidr_notation, "192.168.1.192/26");
/// ```
pub fn generate_subnets(base_cidr: &str, new_prefix: &str) -> Result<Vec<SubnetInfo>> {
    generate_subnets_with_config(base_cidr, new_prefix, &EngineConfig::default())
}

/// Generate subnets honoring the configured row limit
///
/// # Arguments
///
/// * `base_cidr` - Base network in CIDR notation
/// * `new_prefix` - New prefix length as text
/// * `config` - Engine limits
pub fn generate_subnets_with_config(
    base_cidr: &str,
    new_prefix: &str,
    config: &EngineConfig,
) -> Result<Vec<SubnetInfo>> {
    let base = CidrSpec::parse(base_cidr).map_err(|_| {
        CidrError::InvalidInput("Invalid Base CIDR for subnetting.".to_string())
    })?;

    if new_prefix.is_empty() || !new_prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CidrError::InvalidInput(
            "New prefix must be a number.".to_string(),
        ));
    }

    let new_prefix = new_prefix
        .parse::<u8>()
        .map_err(|_| prefix_bound_error(base.prefix()))?;

    base.subnets(new_prefix, config.max_subnets)
}

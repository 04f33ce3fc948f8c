//! Dotted-quad codec
//!
//! Converts between the textual `a.b.c.d` form and the `u32` form every other
//! module computes with. Parsing is strict about shape (exactly four groups of
//! ASCII digits, each <= 255) and lenient about leading zeros, so `"010"`
//! reads as 10.

use crate::{NetcalcError, Result};

/// Parse a dotted-quad string into its 32-bit value
///
/// # Examples
///
/// ```
/// use netcalc_core::ip_to_long;
///
/// assert_eq!(ip_to_long("10.0.0.1").unwrap(), 0x0A000001);
/// assert!(ip_to_long("10.0.0.256").is_err());
/// ```
pub fn ip_to_long(text: &str) -> Result<u32> {
    let invalid = || NetcalcError::InvalidAddress(text.to_string());

    let mut groups = text.split('.');
    let mut value = 0u32;
    for _ in 0..4 {
        let group = groups.next().ok_or_else(invalid)?;
        value = (value << 8) | u32::from(parse_octet(group).ok_or_else(invalid)?);
    }

    if groups.next().is_some() {
        return Err(invalid());
    }

    Ok(value)
}

/// `str::parse` alone would accept a leading `+`.
fn parse_octet(group: &str) -> Option<u8> {
    if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    group.parse::<u8>().ok()
}

/// Render a 32-bit value as a dotted quad
///
/// Total over `u32`: every value maps to exactly one of
/// `0.0.0.0` ..= `255.255.255.255`.
pub fn long_to_ip(value: u32) -> String {
    let [a, b, c, d] = octets(value);
    format!("{}.{}.{}.{}", a, b, c, d)
}

/// Split a 32-bit value into its four octets, most significant first
pub fn octets(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Render a 32-bit value as four dot-separated 8-bit binary groups
///
/// ```
/// use netcalc_core::to_binary;
///
/// assert_eq!(to_binary(0xFFFFFF00), "11111111.11111111.11111111.00000000");
/// ```
pub fn to_binary(value: u32) -> String {
    octets(value)
        .iter()
        .map(|octet| format!("{:08b}", octet))
        .collect::<Vec<_>>()
        .join(".")
}

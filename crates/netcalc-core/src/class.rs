//! Address classification
//!
//! Rules are evaluated top to bottom and the first match wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::addr::octets;

/// Classification of an IPv4 address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IpType {
    Private,
    Public,
    Loopback,
    #[serde(rename = "Link-Local")]
    LinkLocal,
    Reserved,
    Multicast,
}

impl IpType {
    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            IpType::Private => "Private",
            IpType::Public => "Public",
            IpType::Loopback => "Loopback",
            IpType::LinkLocal => "Link-Local",
            IpType::Reserved => "Reserved",
            IpType::Multicast => "Multicast",
        }
    }
}

impl fmt::Display for IpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Rule = (fn(u8, u8) -> bool, IpType);

/// Ordered `(predicate on first two octets, label)` table.
const RULES: &[Rule] = &[
    (|a, _| a == 127, IpType::Loopback),
    (|a, _| a == 10, IpType::Private),
    (|a, b| a == 172 && (16..=31).contains(&b), IpType::Private),
    (|a, b| a == 192 && b == 168, IpType::Private),
    (|a, b| a == 169 && b == 254, IpType::LinkLocal),
    (|a, _| (224..=239).contains(&a), IpType::Multicast),
    (|a, _| a >= 240, IpType::Reserved),
    (|a, _| a == 0, IpType::Reserved),
];

/// Classify an address by its leading octets
///
/// # Examples
///
/// ```
/// use netcalc_core::{classify, IpType};
///
/// assert_eq!(classify(0x7F000001), IpType::Loopback); // 127.0.0.1
/// assert_eq!(classify(0x08080808), IpType::Public); // 8.8.8.8
/// ```
pub fn classify(address: u32) -> IpType {
    let [a, b, _, _] = octets(address);
    RULES
        .iter()
        .find(|(matches, _)| matches(a, b))
        .map_or(IpType::Public, |(_, ip_type)| *ip_type)
}

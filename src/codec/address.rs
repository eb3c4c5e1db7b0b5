//! Network address values exchanged with the API.
//!
//! An [`Address`] is either a bare IP address (`10.0.0.5`) or an address with
//! a network prefix (`10.0.0.5/24`). Only the canonical value is kept, so the
//! textual form always re-serializes as the bare address followed, when a
//! prefix is present, by `/` and the prefix length in decimal.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::domain::error::{PaciError, PaciResult};

/// Separator between the address and its prefix length.
pub const MASK_SEPARATOR: char = '/';

/// A single IP address with an optional network prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    ip: IpAddr,
    prefix_len: Option<u8>,
}

impl Address {
    /// Parse the wire form of an address.
    ///
    /// Text without a `/` must be a bare IPv4 or IPv6 address. Text with a
    /// `/` must be a CIDR pair whose prefix is a decimal number no wider than
    /// the address family.
    pub fn parse(text: &str) -> PaciResult<Self> {
        match text.split_once(MASK_SEPARATOR) {
            None => {
                let ip = parse_ip(text)?;
                Ok(Self { ip, prefix_len: None })
            }
            Some((addr, prefix)) => {
                let ip = parse_ip(addr)?;
                let prefix_len = parse_prefix(prefix, max_prefix_len(&ip))
                    .ok_or_else(|| PaciError::InvalidAddress(text.to_string()))?;
                Ok(Self {
                    ip,
                    prefix_len: Some(prefix_len),
                })
            }
        }
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn prefix_len(&self) -> Option<u8> {
        self.prefix_len
    }

    /// Canonical wire text of the address.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

fn parse_ip(text: &str) -> PaciResult<IpAddr> {
    IpAddr::from_str(text).map_err(|_| PaciError::InvalidAddress(text.to_string()))
}

fn max_prefix_len(ip: &IpAddr) -> u32 {
    match ip {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

fn parse_prefix(text: &str, max: u32) -> Option<u8> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = text.parse().ok()?;
    if value > max {
        return None;
    }
    u8::try_from(value).ok()
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ip)?;
        if let Some(prefix_len) = self.prefix_len {
            write!(f, "{}{}", MASK_SEPARATOR, prefix_len)?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = PaciError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        Self { ip, prefix_len: None }
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(de::Error::custom)
    }
}

/// Ordered list of addresses, serialized as their wire forms joined by a space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList(Vec<Address>);

impl AddressList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, address: Address) {
        self.0.push(address);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.0.iter()
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl From<Vec<Address>> for AddressList {
    fn from(addresses: Vec<Address>) -> Self {
        Self(addresses)
    }
}

impl FromIterator<Address> for AddressList {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for AddressList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, address) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", address)?;
        }
        Ok(())
    }
}

impl Serialize for AddressList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Setting files may carry the list in its wire form.
impl<'de> Deserialize<'de> for AddressList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.split_whitespace()
            .map(Address::parse)
            .collect::<PaciResult<AddressList>>()
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_bare_address_round_trip() {
        for text in ["192.168.1.10", "10.0.0.1", "2001:db8::1", "::1"] {
            let address = Address::parse(text).unwrap();
            assert_eq!(address.prefix_len(), None);
            assert_eq!(address.to_text(), text);
        }
    }

    #[test]
    fn test_cidr_keeps_host_part_and_prefix() {
        let address = Address::parse("192.168.1.10/24").unwrap();
        assert_eq!(address.ip(), IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10)));
        assert_eq!(address.prefix_len(), Some(24));
        assert_eq!(address.to_text(), "192.168.1.10/24");

        let v6 = Address::parse("2001:db8::/32").unwrap();
        assert_eq!(v6.to_text(), "2001:db8::/32");
    }

    #[test]
    fn test_prefix_leading_zeros_are_canonicalized() {
        let address = Address::parse("10.1.2.3/008").unwrap();
        assert_eq!(address.to_text(), "10.1.2.3/8");
    }

    #[test]
    fn test_invalid_addresses() {
        for text in [
            "not-an-address",
            "",
            "300.1.1.1",
            "10.0.0.1/",
            "10.0.0.1/33",
            "10.0.0.1/+8",
            "10.0.0.1/8/8",
            "::1/129",
            "/24",
        ] {
            let err = Address::parse(text).unwrap_err();
            assert!(matches!(err, PaciError::InvalidAddress(_)), "{text}");
        }
    }

    #[test]
    fn test_address_list_text() {
        assert_eq!(AddressList::new().to_text(), "");

        let mut list = AddressList::new();
        list.push(Address::parse("10.0.0.1").unwrap());
        list.push(Address::parse("10.0.1.0/24").unwrap());
        assert_eq!(list.to_text(), "10.0.0.1 10.0.1.0/24");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_serde_uses_wire_text() {
        let address = Address::parse("172.16.0.1/12").unwrap();
        assert_eq!(serde_json::to_string(&address).unwrap(), "\"172.16.0.1/12\"");

        let decoded: Address = serde_json::from_str("\"172.16.0.1/12\"").unwrap();
        assert_eq!(decoded, address);

        assert!(serde_json::from_str::<Address>("\"bogus\"").is_err());

        let list: AddressList = serde_json::from_str("\"10.0.0.1 10.0.0.2\"").unwrap();
        assert_eq!(list.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_ipv4_round_trip(bits in any::<u32>()) {
            let text = Ipv4Addr::from(bits).to_string();
            prop_assert_eq!(Address::parse(&text).unwrap().to_text(), text);
        }

        #[test]
        fn prop_ipv6_round_trip(bits in any::<u128>()) {
            let text = Ipv6Addr::from(bits).to_string();
            prop_assert_eq!(Address::parse(&text).unwrap().to_text(), text);
        }

        #[test]
        fn prop_cidr_prefix_is_canonical(bits in any::<u32>(), prefix in 0u8..=32, zeros in 0usize..3) {
            let ip = Ipv4Addr::from(bits);
            let text = format!("{}/{}{}", ip, "0".repeat(zeros), prefix);
            let address = Address::parse(&text).unwrap();
            prop_assert_eq!(address.to_text(), format!("{}/{}", ip, prefix));
        }
    }
}

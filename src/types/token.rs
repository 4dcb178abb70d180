//! Token parsing with CIDR and address/netmask support.
//!
//! Provides flexible token interpretation supporting:
//! - Single addresses (IPv4 and IPv6), treated as host networks
//! - CIDR notation (192.168.1.0/24, 2001:db8::/32)
//! - Address with a written-out netmask (192.168.1.1/255.255.255.0)
//! - Anything else, carried through as opaque text

use ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// One whitespace-delimited fragment of an input line.
///
/// A token is either a parsed network or the original text, never both.
/// Keeping the two cases in a closed enum lets downstream code branch
/// exhaustively instead of inspecting types at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// The fragment parsed as an address or network.
    Network(IpNetwork),
    /// The fragment has no network interpretation.
    Text(String),
}

impl Token {
    /// Interpret a text fragment.
    ///
    /// Parse attempts run in a fixed order: bare address, CIDR, then
    /// address with a written-out netmask. The first success wins; a
    /// fragment that fails all three is passed through as [`Token::Text`].
    pub fn parse(text: &str) -> Self {
        match parse_network(text) {
            Some(network) => Self::Network(network),
            None => Self::Text(text.to_string()),
        }
    }

    /// The parsed network, if this token has one.
    pub fn network(&self) -> Option<IpNetwork> {
        match self {
            Self::Network(network) => Some(*network),
            Self::Text(_) => None,
        }
    }
}

impl FromStr for Token {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(network) => write!(f, "{}", network),
            Self::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Try every supported network notation against a fragment.
///
/// Every returned network is in canonical form: host bits beyond the
/// prefix length are cleared.
fn parse_network(s: &str) -> Option<IpNetwork> {
    let s = s.trim();

    // A bare address is a host network with the full prefix length.
    if let Ok(ip) = s.parse::<IpAddr>() {
        return host_network(ip);
    }

    let (addr, mask) = s.split_once('/')?;

    // CIDR with an integer prefix length. Host bits in the address are
    // tolerated and cleared below.
    if let Ok(network) = s.parse::<IpNetwork>() {
        return rebase(network);
    }

    // Interface notation: the part after the slash is itself an address.
    // Families are never mixed; an IPv6 address only pairs with an IPv6
    // mask and vice versa.
    let addr: IpAddr = addr.parse().ok()?;
    let mask: IpAddr = mask.parse().ok()?;
    match (addr, mask) {
        (IpAddr::V4(addr), IpAddr::V4(mask)) => v4_with_netmask(addr, mask),
        (IpAddr::V6(addr), IpAddr::V6(mask)) => v6_with_netmask(addr, mask),
        _ => None,
    }
}

/// Build a network from an IPv4 address and a dotted netmask.
///
/// Fails if the mask is not contiguous (e.g. `255.0.255.0`).
pub(crate) fn v4_with_netmask(addr: Ipv4Addr, mask: Ipv4Addr) -> Option<IpNetwork> {
    let network = Ipv4Network::with_netmask(addr, mask).ok()?;
    rebase(IpNetwork::V4(network))
}

/// Build a network from an IPv6 address and an address-form netmask.
fn v6_with_netmask(addr: Ipv6Addr, mask: Ipv6Addr) -> Option<IpNetwork> {
    let network = Ipv6Network::with_netmask(addr, mask).ok()?;
    rebase(IpNetwork::V6(network))
}

/// A single address as a network with the maximal prefix length.
fn host_network(ip: IpAddr) -> Option<IpNetwork> {
    match ip {
        IpAddr::V4(addr) => Ipv4Network::new(addr, 32).ok().map(IpNetwork::V4),
        IpAddr::V6(addr) => Ipv6Network::new(addr, 128).ok().map(IpNetwork::V6),
    }
}

/// Re-anchor a network on its masked network address.
fn rebase(network: IpNetwork) -> Option<IpNetwork> {
    match network {
        IpNetwork::V4(n) => Ipv4Network::new(n.network(), n.prefix())
            .ok()
            .map(IpNetwork::V4),
        IpNetwork::V6(n) => Ipv6Network::new(n.network(), n.prefix())
            .ok()
            .map(IpNetwork::V6),
    }
}

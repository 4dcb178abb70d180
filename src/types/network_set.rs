//! Canonical target-network sets.
//!
//! A [`NetworkSet`] holds the networks to match against, split by
//! address family and collapsed into minimal canonical form: sorted by
//! base address, free of overlaps, and with adjacent sibling blocks
//! merged into their parent.

use super::token::Token;
use ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};
use std::fmt;

/// The collapsed IPv4 and IPv6 target networks.
///
/// Built once from raw specification strings and read-only afterwards;
/// matching reuses the same set across any number of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSet {
    v4: Vec<Ipv4Network>,
    v6: Vec<Ipv6Network>,
}

impl NetworkSet {
    /// Build a canonical set from raw network specifications.
    ///
    /// Every string is parsed with [`Token::parse`]; strings with no
    /// network interpretation are returned as the rejected list so the
    /// caller can report them. An empty specification list is not an
    /// error, it simply matches nothing.
    pub fn build<I, S>(specs: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut v4 = Vec::new();
        let mut v6 = Vec::new();
        let mut rejected = Vec::new();

        for spec in specs {
            match Token::parse(spec.as_ref()) {
                Token::Network(IpNetwork::V4(network)) => v4.push(network),
                Token::Network(IpNetwork::V6(network)) => v6.push(network),
                Token::Text(text) => rejected.push(text),
            }
        }

        collapse_v4(&mut v4);
        collapse_v6(&mut v6);

        (Self { v4, v6 }, rejected)
    }

    /// Test whether a candidate network lies inside one of the targets.
    ///
    /// Containment never crosses address families; the first covering
    /// target ends the scan.
    pub fn contains(&self, candidate: IpNetwork) -> bool {
        match candidate {
            IpNetwork::V4(net) => self.v4.iter().any(|target| net.is_subnet_of(*target)),
            IpNetwork::V6(net) => self.v6.iter().any(|target| net.is_subnet_of(*target)),
        }
    }

    /// The collapsed IPv4 targets, sorted by base address.
    pub fn v4(&self) -> &[Ipv4Network] {
        &self.v4
    }

    /// The collapsed IPv6 targets, sorted by base address.
    pub fn v6(&self) -> &[Ipv6Network] {
        &self.v6
    }

    /// Total number of networks across both families.
    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }

    /// True when neither family has any target network.
    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }
}

impl fmt::Display for NetworkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.v4.iter().map(|n| n.to_string()).collect();
        parts.extend(self.v6.iter().map(|n| n.to_string()));
        write!(f, "{}", parts.join(", "))
    }
}

/// Collapse IPv4 networks into minimal canonical form.
///
/// Single sorted pass with backward merging: each incoming block is
/// dropped if the previous block already covers it, then repeatedly
/// merged with the previous block while the two are siblings. The
/// result is idempotent and independent of input order.
fn collapse_v4(networks: &mut Vec<Ipv4Network>) {
    networks.sort_by_key(|n| (u32::from(n.network()), n.prefix()));
    networks.dedup();

    let mut collapsed: Vec<Ipv4Network> = Vec::with_capacity(networks.len());
    for &network in networks.iter() {
        if let Some(&last) = collapsed.last() {
            if network.is_subnet_of(last) {
                continue;
            }
        }
        let mut current = network;
        while let Some(&last) = collapsed.last() {
            match merged_v4_sibling(last, current) {
                Some(parent) => {
                    collapsed.pop();
                    current = parent;
                }
                None => break,
            }
        }
        collapsed.push(current);
    }
    *networks = collapsed;
}

/// Collapse IPv6 networks into minimal canonical form.
fn collapse_v6(networks: &mut Vec<Ipv6Network>) {
    networks.sort_by_key(|n| (u128::from(n.network()), n.prefix()));
    networks.dedup();

    let mut collapsed: Vec<Ipv6Network> = Vec::with_capacity(networks.len());
    for &network in networks.iter() {
        if let Some(&last) = collapsed.last() {
            if network.is_subnet_of(last) {
                continue;
            }
        }
        let mut current = network;
        while let Some(&last) = collapsed.last() {
            match merged_v6_sibling(last, current) {
                Some(parent) => {
                    collapsed.pop();
                    current = parent;
                }
                None => break,
            }
        }
        collapsed.push(current);
    }
    *networks = collapsed;
}

/// Merge two equal-size adjacent halves of one parent block.
///
/// `low` must be the aligned lower half and `high` the block that starts
/// immediately after it; anything else (unaligned neighbours, different
/// sizes) does not merge.
fn merged_v4_sibling(low: Ipv4Network, high: Ipv4Network) -> Option<Ipv4Network> {
    if low.prefix() == 0 || low.prefix() != high.prefix() {
        return None;
    }
    let parent = Ipv4Network::new(low.network(), low.prefix() - 1).ok()?;
    if parent.network() != low.network() {
        return None;
    }
    let half = 1u64 << (32 - low.prefix());
    if u64::from(u32::from(low.network())) + half != u64::from(u32::from(high.network())) {
        return None;
    }
    Some(parent)
}

fn merged_v6_sibling(low: Ipv6Network, high: Ipv6Network) -> Option<Ipv6Network> {
    if low.prefix() == 0 || low.prefix() != high.prefix() {
        return None;
    }
    let parent = Ipv6Network::new(low.network(), low.prefix() - 1).ok()?;
    if parent.network() != low.network() {
        return None;
    }
    let half = 1u128 << (128 - low.prefix());
    if u128::from(low.network()).checked_add(half)? != u128::from(high.network()) {
        return None;
    }
    Some(parent)
}

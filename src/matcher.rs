//! Line matching against the target-network sets.
//!
//! The matcher is a pure function over one line's tokens: it never
//! performs I/O and holds no state between lines.

use crate::types::{token, NetworkSet, Token};
use ipnetwork::IpNetwork;

/// Find the token positions of a line that fall inside a target network.
///
/// Tokens are scanned left to right. A token with no network
/// interpretation is skipped. A token that parses as an IPv4 host
/// address (/32) and is immediately followed by another /32 token is
/// first reinterpreted as an `address netmask` field pair; the merged
/// network then stands for both positions and the second token is
/// consumed rather than re-evaluated.
///
/// The returned positions are 0-based and ascending.
pub fn search_line<S: AsRef<str>>(tokens: &[S], networks: &NetworkSet) -> Vec<usize> {
    let parsed: Vec<Option<IpNetwork>> = tokens
        .iter()
        .map(|t| Token::parse(t.as_ref()).network())
        .collect();

    let mut matched = Vec::new();
    let mut i = 0;
    while i < parsed.len() {
        let Some(network) = parsed[i] else {
            i += 1;
            continue;
        };

        let lookahead = parsed.get(i + 1).copied().flatten();
        let (network, span) = match merge_with_lookahead(network, lookahead) {
            Some(merged) => (merged, 2),
            None => (network, 1),
        };

        if networks.contains(network) {
            matched.extend(i..i + span);
        }
        i += span;
    }
    matched
}

/// Reinterpret two consecutive IPv4 host tokens as address plus netmask.
///
/// Logs and configuration dumps often carry `10.0.0.1 255.255.255.0` as
/// two space-separated fields instead of CIDR notation. Both tokens
/// must independently be /32 host networks and the second must be a
/// contiguous dotted mask. The heuristic is IPv4-only and looks forward
/// only; a mask written before its address, or an IPv6 equivalent, is
/// not recognized.
fn merge_with_lookahead(current: IpNetwork, next: Option<IpNetwork>) -> Option<IpNetwork> {
    let (IpNetwork::V4(host), Some(IpNetwork::V4(mask))) = (current, next) else {
        return None;
    };
    if host.prefix() != 32 || mask.prefix() != 32 {
        return None;
    }
    token::v4_with_netmask(host.ip(), mask.ip())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(specs: &[&str]) -> NetworkSet {
        let (set, rejected) = NetworkSet::build(specs);
        assert!(rejected.is_empty(), "bad test fixture: {:?}", rejected);
        set
    }

    #[test]
    fn test_host_address_inside_target() {
        let set = targets(&["10.0.0.0/24"]);
        let tokens = ["checking", "10.0.0.5", "now"];
        assert_eq!(search_line(&tokens, &set), vec![1]);
    }

    #[test]
    fn test_host_address_outside_target() {
        let set = targets(&["10.0.0.0/24"]);
        assert_eq!(search_line(&["10.0.1.5"], &set), Vec::<usize>::new());
    }

    #[test]
    fn test_address_mask_pair_matches_both_positions() {
        let set = targets(&["192.168.1.0/24"]);
        let tokens = ["192.168.1.1", "255.255.255.0"];
        assert_eq!(search_line(&tokens, &set), vec![0, 1]);
    }

    #[test]
    fn test_ipv6_host_inside_target() {
        let set = targets(&["2001:db8::/32"]);
        assert_eq!(search_line(&["2001:db8::1"], &set), vec![0]);
    }

    #[test]
    fn test_cidr_token_inside_target() {
        let set = targets(&["10.0.0.0/16"]);
        assert_eq!(search_line(&["10.0.4.0/24"], &set), vec![0]);
    }

    #[test]
    fn test_wider_token_than_target_is_no_match() {
        let set = targets(&["10.0.4.0/24"]);
        assert_eq!(search_line(&["10.0.0.0/16"], &set), Vec::<usize>::new());
    }

    #[test]
    fn test_no_merge_when_second_token_is_text() {
        let set = targets(&["10.0.0.0/24"]);
        let tokens = ["10.0.0.5", "established"];
        assert_eq!(search_line(&tokens, &set), vec![0]);
    }

    #[test]
    fn test_no_merge_when_second_address_is_not_a_mask() {
        // Two plain peer addresses: each is judged on its own.
        let set = targets(&["10.0.0.0/24"]);
        let tokens = ["10.0.0.5", "10.0.0.9"];
        assert_eq!(search_line(&tokens, &set), vec![0, 1]);
    }

    #[test]
    fn test_merged_pair_replaces_host_interpretation() {
        // The merged /16 is wider than the target, so neither position
        // matches even though the bare host address alone would have.
        let set = targets(&["10.0.0.0/24"]);
        let tokens = ["10.0.0.5", "255.255.0.0"];
        assert_eq!(search_line(&tokens, &set), Vec::<usize>::new());
    }

    #[test]
    fn test_mask_before_address_is_not_merged() {
        let set = targets(&["192.168.1.0/24"]);
        let tokens = ["255.255.255.0", "192.168.1.1"];
        // The mask token parses as a host address outside the target;
        // only the real address matches.
        assert_eq!(search_line(&tokens, &set), vec![1]);
    }

    #[test]
    fn test_no_merge_for_ipv6_pair() {
        let set = targets(&["2001:db8::/32"]);
        let tokens = ["2001:db8::1", "ffff:ffff::"];
        assert_eq!(search_line(&tokens, &set), vec![0]);
    }

    #[test]
    fn test_family_isolation() {
        let set = targets(&["0.0.0.0/0"]);
        assert_eq!(search_line(&["2001:db8::1"], &set), Vec::<usize>::new());

        let set = targets(&["::/0"]);
        assert_eq!(search_line(&["10.0.0.5"], &set), Vec::<usize>::new());
    }

    #[test]
    fn test_multiple_matches_in_one_line() {
        let set = targets(&["10.0.0.0/24", "192.168.0.0/16"]);
        let tokens = ["from", "10.0.0.1", "to", "192.168.7.9", "port", "443"];
        assert_eq!(search_line(&tokens, &set), vec![1, 3]);
    }

    #[test]
    fn test_empty_line() {
        let set = targets(&["10.0.0.0/24"]);
        assert_eq!(search_line(&[] as &[&str], &set), Vec::<usize>::new());
    }

    #[test]
    fn test_trailing_pair_at_end_of_line() {
        let set = targets(&["10.0.0.0/8"]);
        let tokens = ["route", "10.1.2.0", "255.255.255.0"];
        assert_eq!(search_line(&tokens, &set), vec![1, 2]);
    }
}

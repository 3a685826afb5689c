use crate::config::AddressLists;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outbound,
    Inbound,
}

/// The address selected as the subject of accounting for one packet,
/// the direction relative to it, and the bytes to credit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub address: String,
    pub direction: Direction,
    pub bytes: u64,
}

/// Decides which side of a packet, if any, is a monitored local address.
///
/// Prefixes are literal text prefixes, not subnet masks: a configured
/// `"10.1"` matches `10.10.0.1` as well as `10.1.2.3`. This mirrors the
/// deployed matching semantics and is kept on purpose; configure
/// prefixes with a trailing dot to get octet-boundary behavior.
pub struct OwnershipResolver {
    local_ips: Vec<String>,
    local_nets: Vec<String>,
}

impl OwnershipResolver {
    pub fn new(lists: AddressLists) -> Self {
        Self {
            local_ips: lists.local_ips,
            local_nets: lists.local_nets,
        }
    }

    /// First matching prefix wins, source side checked before
    /// destination, and only one side is ever credited per packet.
    pub fn resolve(&self, src: &str, dst: &str, wire_len: u64) -> Option<Attribution> {
        for net in &self.local_nets {
            if matches_prefix(src, net) && self.not_excluded(src) {
                return Some(Attribution {
                    address: src.to_string(),
                    direction: Direction::Outbound,
                    bytes: wire_len,
                });
            }
            if matches_prefix(dst, net) && self.not_excluded(dst) {
                return Some(Attribution {
                    address: dst.to_string(),
                    direction: Direction::Inbound,
                    bytes: wire_len,
                });
            }
        }
        None
    }

    fn not_excluded(&self, address: &str) -> bool {
        !self.local_ips.iter().any(|ip| ip == address)
    }
}

// An empty prefix never matches; empty tokens can reach the list when
// the configured string contains doubled spaces.
fn matches_prefix(address: &str, prefix: &str) -> bool {
    !prefix.is_empty() && address.starts_with(prefix)
}

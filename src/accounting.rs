use std::collections::HashMap;

/// Cumulative per-address counters. All fields only ever grow while the
/// process runs; the persisted snapshot is cumulative, never incremental.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    pub out_bytes: u64,
    pub in_bytes: u64,
    pub pkts: u64,
}

/// Address-text keyed counter table. Entries are created lazily on the
/// first packet attributed to an address and never evicted.
#[derive(Debug, Default)]
pub struct CounterTable {
    entries: HashMap<String, Counter>,
}

impl CounterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exactly one of `out_bytes`/`in_bytes` is non-zero per call; the
    /// resolver credits a single direction per packet.
    pub fn record(&mut self, address: &str, out_bytes: u64, in_bytes: u64) {
        let entry = self.entries.entry(address.to_string()).or_default();
        entry.out_bytes += out_bytes;
        entry.in_bytes += in_bytes;
        entry.pkts += 1;
    }

    pub fn get(&self, address: &str) -> Option<&Counter> {
        self.entries.get(address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iteration order is not meaningful; the snapshot format is one
    /// self-contained line per entry in whatever order the map yields.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Counter)> {
        self.entries.iter().map(|(addr, counter)| (addr.as_str(), counter))
    }
}

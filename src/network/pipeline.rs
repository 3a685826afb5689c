use crate::accounting::CounterTable;
use crate::config::Settings;
use crate::network::classifier;
use crate::network::resolver::{Direction, OwnershipResolver};
use crate::snapshot::SnapshotWriter;
use crate::Result;

/// The per-packet entry point. Owns the resolver, the counter table and
/// the snapshot writer; the capture driver hands it one frame at a time
/// on a single thread, so none of this needs locking.
pub struct Accountant {
    resolver: OwnershipResolver,
    table: CounterTable,
    writer: SnapshotWriter,
}

impl Accountant {
    pub fn new(settings: &Settings) -> Self {
        Self {
            resolver: OwnershipResolver::new(settings.addresses.clone()),
            table: CounterTable::new(),
            writer: SnapshotWriter::new(&settings.output_path, settings.write_timeout),
        }
    }

    /// Classify, resolve ownership, accumulate, then check the snapshot
    /// timer. Frames that are not IP or match no configured prefix are
    /// dropped silently before the timer check, matching the deployed
    /// behavior of only flushing on attributed traffic.
    pub fn handle_frame(&mut self, frame: &[u8], wire_len: u64) -> Result<()> {
        let Some(classified) = classifier::classify(frame, wire_len) else {
            return Ok(());
        };

        let Some(attribution) =
            self.resolver
                .resolve(&classified.src, &classified.dst, classified.wire_len)
        else {
            return Ok(());
        };

        let (out_bytes, in_bytes) = match attribution.direction {
            Direction::Outbound => (attribution.bytes, 0),
            Direction::Inbound => (0, attribution.bytes),
        };
        self.table.record(&attribution.address, out_bytes, in_bytes);

        self.writer.maybe_write(&self.table)?;
        Ok(())
    }

    pub fn table(&self) -> &CounterTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::packet::ethernet::{EtherTypes, MutableEthernetPacket};
    use pnet::packet::ipv4::MutableIpv4Packet;
    use std::net::Ipv4Addr;

    const ETHER_HDR_LEN: usize = 14;

    fn ipv4_frame(src: &str, dst: &str) -> Vec<u8> {
        let src: Ipv4Addr = src.parse().unwrap();
        let dst: Ipv4Addr = dst.parse().unwrap();
        let mut buf = vec![0u8; ETHER_HDR_LEN + 20];
        {
            let mut ethernet = MutableEthernetPacket::new(&mut buf).unwrap();
            ethernet.set_ethertype(EtherTypes::Ipv4);
        }
        {
            let mut ip = MutableIpv4Packet::new(&mut buf[ETHER_HDR_LEN..]).unwrap();
            ip.set_version(4);
            ip.set_header_length(5);
            ip.set_source(src);
            ip.set_destination(dst);
        }
        buf
    }

    fn accountant(local_ips: &str, local_nets: &str) -> (Accountant, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("acct");
        let settings =
            Settings::new("eth0", out.to_str().unwrap(), 5, local_ips, local_nets).unwrap();
        (Accountant::new(&settings), dir)
    }

    #[test]
    fn test_outbound_then_inbound_accumulates() {
        let (mut accountant, _dir) = accountant("", "192.168");

        accountant
            .handle_frame(&ipv4_frame("192.168.1.5", "8.8.8.8"), 100)
            .unwrap();
        let counter = accountant.table().get("192.168.1.5").unwrap();
        assert_eq!((counter.out_bytes, counter.in_bytes, counter.pkts), (100, 0, 1));

        accountant
            .handle_frame(&ipv4_frame("8.8.8.8", "192.168.1.5"), 200)
            .unwrap();
        let counter = accountant.table().get("192.168.1.5").unwrap();
        assert_eq!((counter.out_bytes, counter.in_bytes, counter.pkts), (100, 200, 2));
        assert_eq!(accountant.table().len(), 1);
    }

    #[test]
    fn test_unmatched_packet_leaves_table_untouched() {
        let (mut accountant, _dir) = accountant("", "192.168");
        accountant
            .handle_frame(&ipv4_frame("8.8.8.8", "1.1.1.1"), 100)
            .unwrap();
        assert!(accountant.table().is_empty());
    }

    #[test]
    fn test_non_ip_frame_leaves_table_untouched() {
        let (mut accountant, _dir) = accountant("", "192.168");
        let mut buf = vec![0u8; ETHER_HDR_LEN + 28];
        {
            let mut ethernet = MutableEthernetPacket::new(&mut buf).unwrap();
            ethernet.set_ethertype(EtherTypes::Arp);
        }
        accountant.handle_frame(&buf, 42).unwrap();
        assert!(accountant.table().is_empty());
    }

    #[test]
    fn test_excluded_address_never_credited() {
        let (mut accountant, _dir) = accountant("192.168.1.1", "192.168");
        accountant
            .handle_frame(&ipv4_frame("192.168.1.1", "8.8.8.8"), 100)
            .unwrap();
        assert!(accountant.table().is_empty());
    }

    #[test]
    fn test_declared_length_credited_not_buffer_size() {
        let (mut accountant, _dir) = accountant("", "10.");
        let frame = ipv4_frame("10.0.0.1", "8.8.8.8");
        accountant.handle_frame(&frame, 1514).unwrap();
        assert_eq!(accountant.table().get("10.0.0.1").unwrap().out_bytes, 1514);
    }
}

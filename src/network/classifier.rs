use pnet::packet::ethernet::{EtherTypes, EthernetPacket};
use pnet::packet::ipv4::Ipv4Packet;
use pnet::packet::ipv6::Ipv6Packet;
use pnet::packet::Packet;

/// Source and destination address text of one IP frame plus the wire
/// length the capture facility declared for it. Accounting uses the
/// declared length, never the captured buffer size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFrame {
    pub src: String,
    pub dst: String,
    pub wire_len: u64,
}

/// Extracts addresses from a raw link-layer frame. Non-IP ethertypes
/// return `None` — the normal path for ARP and the like, not an error.
/// Buffers too short for the ethernet or IP header also return `None`
/// rather than reading past the frame.
pub fn classify(frame: &[u8], wire_len: u64) -> Option<ClassifiedFrame> {
    let ethernet = EthernetPacket::new(frame)?;

    match ethernet.get_ethertype() {
        EtherTypes::Ipv4 => {
            let ip = Ipv4Packet::new(ethernet.payload())?;
            Some(ClassifiedFrame {
                src: ip.get_source().to_string(),
                dst: ip.get_destination().to_string(),
                wire_len,
            })
        }
        EtherTypes::Ipv6 => {
            let ip = Ipv6Packet::new(ethernet.payload())?;
            Some(ClassifiedFrame {
                src: ip.get_source().to_string(),
                dst: ip.get_destination().to_string(),
                wire_len,
            })
        }
        _ => None,
    }
}

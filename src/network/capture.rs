use std::io;
use std::time::Duration;

use log::info;
use pnet::datalink::{self, Channel, Config, NetworkInterface};

use crate::network::pipeline::Accountant;
use crate::{NetacctError, Result};

// Short poll timeout keeps the blocking wait responsive to signals.
// Timeouts never drive the snapshot timer; only received frames do.
const READ_TIMEOUT: Duration = Duration::from_millis(1000);

pub fn find_interface(name: &str) -> Result<NetworkInterface> {
    datalink::interfaces()
        .into_iter()
        .find(|iface| iface.name == name)
        .ok_or_else(|| NetacctError::Capture(format!("interface {} not found", name)))
}

/// Opens the interface non-promiscuously and feeds every received frame
/// to the accountant, synchronously, forever. Returns only on a fatal
/// channel error; there is no shutdown path.
pub fn run(interface: &NetworkInterface, accountant: &mut Accountant) -> Result<()> {
    let config = Config {
        promiscuous: false,
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
    };

    let (_tx, mut rx) = match datalink::channel(interface, config) {
        Ok(Channel::Ethernet(tx, rx)) => (tx, rx),
        Ok(_) => {
            return Err(NetacctError::Capture(format!(
                "unhandled channel type on {}",
                interface.name
            )))
        }
        Err(e) => {
            return Err(NetacctError::Capture(format!(
                "failed to open {}: {}",
                interface.name, e
            )))
        }
    };

    info!("capturing on {}", interface.name);
    loop {
        match rx.next() {
            Ok(frame) => accountant.handle_frame(frame, frame.len() as u64)?,
            Err(e)
                if e.kind() == io::ErrorKind::TimedOut
                    || e.kind() == io::ErrorKind::Interrupted =>
            {
                continue;
            }
            Err(e) => {
                return Err(NetacctError::Capture(format!(
                    "receive on {} failed: {}",
                    interface.name, e
                )))
            }
        }
    }
}

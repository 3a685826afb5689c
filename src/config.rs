use std::path::PathBuf;

use crate::{NetacctError, Result};

pub const MIN_WRITE_TIMEOUT: u64 = 5;
pub const MAX_WRITE_TIMEOUT: u64 = 216000;

/// The two ordered address lists configured at startup: exact-match
/// exclusions and local network prefixes. Prefix order matters (first
/// match wins); exclusion order does not (membership test only).
#[derive(Debug, Clone)]
pub struct AddressLists {
    pub local_ips: Vec<String>,
    pub local_nets: Vec<String>,
}

impl AddressLists {
    pub fn parse(local_ips: &str, local_nets: &str) -> Self {
        Self {
            local_ips: split_tokens(local_ips),
            local_nets: split_tokens(local_nets),
        }
    }
}

/// Splits a space-separated list into tokens, copied verbatim: no
/// normalization, no validation. Doubled spaces yield empty tokens;
/// an empty token never matches anything downstream.
fn split_tokens(input: &str) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    input.split(' ').map(str::to_string).collect()
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub interface: String,
    pub output_path: PathBuf,
    pub write_timeout: u64,
    pub addresses: AddressLists,
}

impl Settings {
    pub fn new(
        interface: &str,
        output_path: &str,
        write_timeout: u64,
        local_ips: &str,
        local_nets: &str,
    ) -> Result<Self> {
        if !(MIN_WRITE_TIMEOUT..=MAX_WRITE_TIMEOUT).contains(&write_timeout) {
            return Err(NetacctError::Usage(format!(
                "write timeout can be between {} and {}",
                MIN_WRITE_TIMEOUT, MAX_WRITE_TIMEOUT
            )));
        }

        Ok(Self {
            interface: interface.to_string(),
            output_path: PathBuf::from(output_path),
            write_timeout,
            addresses: AddressLists::parse(local_ips, local_nets),
        })
    }
}

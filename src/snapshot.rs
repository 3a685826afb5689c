use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::debug;

use crate::accounting::CounterTable;
use crate::{NetacctError, Result};

/// Periodically publishes the counter table as a flat file.
///
/// Every write goes to `<output>.tmp` and is renamed onto the output
/// path, so a concurrent reader sees either the previous complete
/// snapshot or the new one, never a partial file. The timer is gated on
/// a monotonic clock and checked only when a packet is processed; with
/// sparse traffic, writes are correspondingly delayed.
pub struct SnapshotWriter {
    out_path: PathBuf,
    tmp_path: PathBuf,
    write_timeout: u64,
    last_write: Instant,
}

impl SnapshotWriter {
    pub fn new(out_path: impl AsRef<Path>, write_timeout: u64) -> Self {
        let out_path = out_path.as_ref().to_path_buf();
        let mut tmp = out_path.as_os_str().to_os_string();
        tmp.push(".tmp");
        Self {
            out_path,
            tmp_path: PathBuf::from(tmp),
            write_timeout,
            last_write: Instant::now(),
        }
    }

    /// Writes a snapshot if more than `write_timeout` whole seconds have
    /// passed since the last one (strict inequality). Returns whether a
    /// write happened.
    pub fn maybe_write(&mut self, table: &CounterTable) -> Result<bool> {
        if self.last_write.elapsed().as_secs() <= self.write_timeout {
            return Ok(false);
        }
        self.write_snapshot(table)?;
        self.last_write = Instant::now();
        Ok(true)
    }

    /// Unconditional write: temp file, one line per entry, atomic rename.
    pub fn write_snapshot(&self, table: &CounterTable) -> Result<()> {
        let file = File::create(&self.tmp_path).map_err(|e| {
            NetacctError::Snapshot(format!(
                "file {} could not be opened: {}",
                self.tmp_path.display(),
                e
            ))
        })?;

        let mut out = BufWriter::new(file);
        for (address, counter) in table.iter() {
            writeln!(
                out,
                "{} {} {} {}",
                address, counter.out_bytes, counter.in_bytes, counter.pkts
            )
            .map_err(|e| {
                NetacctError::Snapshot(format!(
                    "failed to write {}: {}",
                    self.tmp_path.display(),
                    e
                ))
            })?;
        }
        out.into_inner().map_err(|e| {
            NetacctError::Snapshot(format!("failed to write {}: {}", self.tmp_path.display(), e))
        })?;

        fs::rename(&self.tmp_path, &self.out_path).map_err(|e| {
            NetacctError::Snapshot(format!(
                "failed to move file {} to file {}: {}",
                self.tmp_path.display(),
                self.out_path.display(),
                e
            ))
        })?;

        debug!(
            "snapshot of {} entries written to {}",
            table.len(),
            self.out_path.display()
        );
        Ok(())
    }

    #[cfg(test)]
    fn backdate(&mut self, secs: u64) {
        self.last_write = Instant::now()
            .checked_sub(std::time::Duration::from_secs(secs))
            .unwrap();
    }
}

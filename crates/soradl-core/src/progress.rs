//! Transfer progress snapshots (bytes done, rate, ETA).
//!
//! The downloader emits one periodically while bytes arrive and a final one
//! when the transfer ends.

use std::fmt;
use std::time::Duration;

/// Minimum time between two periodic snapshots.
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferProgress {
    /// Bytes in the part file, including a resumed prefix.
    pub bytes_done: u64,
    /// Bytes received by this transfer.
    pub bytes_fetched: u64,
    /// Expected final size, when the server announced a length.
    pub total_bytes: Option<u64>,
    pub elapsed_secs: f64,
}

impl TransferProgress {
    /// Rate of this transfer in bytes per second (0 if no time has passed).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes_fetched as f64 / self.elapsed_secs
    }

    /// Percent complete in [0, 100], if the total is known.
    pub fn percent(&self) -> Option<f64> {
        let total = self.total_bytes?;
        if total == 0 {
            return Some(100.0);
        }
        Some((self.bytes_done as f64 / total as f64 * 100.0).min(100.0))
    }

    /// Estimated seconds remaining (None if the total or the rate is unknown).
    pub fn eta_secs(&self) -> Option<f64> {
        let remaining = self.total_bytes?.saturating_sub(self.bytes_done);
        if remaining == 0 {
            return Some(0.0);
        }
        let rate = self.bytes_per_sec();
        if rate <= 0.0 {
            return None;
        }
        Some(remaining as f64 / rate)
    }
}

impl fmt::Display for TransferProgress {
    /// `42.0% | 1.5 MiB/s | ETA 12s`, or bytes and rate when the size is unknown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mib_s = self.bytes_per_sec() / (1024.0 * 1024.0);
        match (self.percent(), self.eta_secs()) {
            (Some(pct), Some(eta)) => {
                write!(f, "{:.1}% | {:.1} MiB/s | ETA {:.0}s", pct, mib_s, eta)
            }
            (Some(pct), None) => write!(f, "{:.1}% | {:.1} MiB/s", pct, mib_s),
            _ => write!(f, "{} bytes | {:.1} MiB/s", self.bytes_done, mib_s),
        }
    }
}

//! Download file lifecycle.
//!
//! Bytes are appended to `<final>.part`; once the transfer succeeds the part
//! file is synced and atomically renamed to the final name. A failed
//! transfer leaves the part file in place for the next run.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.mp4` → `a.mp4.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Append-only writer for a `.part` file.
#[derive(Debug)]
pub struct PartFile {
    file: File,
    path: PathBuf,
    len: u64,
}

impl PartFile {
    /// Opens the part file for `final_path`.
    ///
    /// With `keep_existing`, bytes already on disk are kept and new data is
    /// appended after them; otherwise the file is truncated.
    pub fn open(final_path: &Path, keep_existing: bool) -> Result<Self> {
        let path = temp_path(final_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut file = File::options()
            .create(true)
            .write(true)
            .truncate(!keep_existing)
            .open(&path)
            .with_context(|| format!("failed to open temp file: {}", path.display()))?;
        let len = file
            .seek(SeekFrom::End(0))
            .with_context(|| format!("failed to seek {}", path.display()))?;
        Ok(Self { file, path, len })
    }

    /// Bytes currently in the part file.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drops everything written so far (server ignored our Range request).
    pub fn restart(&mut self) -> Result<()> {
        self.file.set_len(0).context("storage truncate failed")?;
        self.file.seek(SeekFrom::Start(0)).context("storage seek failed")?;
        self.len = 0;
        Ok(())
    }

    pub fn append(&mut self, data: &[u8]) -> Result<()> {
        self.file.write_all(data).context("storage write failed")?;
        self.len += data.len() as u64;
        Ok(())
    }

    /// Syncs and renames the part file to `final_path`. Consumes the writer.
    pub fn finalize(self, final_path: &Path) -> Result<()> {
        self.file.sync_all().context("storage sync failed")?;
        drop(self.file);
        std::fs::rename(&self.path, final_path).with_context(|| {
            format!(
                "failed to rename {} to {}",
                self.path.display(),
                final_path.display()
            )
        })?;
        Ok(())
    }
}

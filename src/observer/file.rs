//! Append-only battle log

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;

use crate::core::sync::lock;
use crate::entity::NpcHandle;
use crate::observer::KillObserver;

/// Appends `[YYYY-MM-DD HH:MM:SS] <killer> killed <victim>` to a file.
///
/// The file is opened per kill so the log survives across resets and
/// external truncation.
pub struct FileObserver {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let _guard = lock(&self.write_lock);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

impl KillObserver for FileObserver {
    fn on_kill(&self, killer: &NpcHandle, victim: &NpcHandle) {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("[{stamp}] {} killed {}", killer.name(), victim.name());
        if let Err(e) = self.append(&line) {
            tracing::warn!(path = %self.path.display(), "Failed to write battle log: {}", e);
        }
    }
}

//! Size-based rotating file output
//!
//! Append-only UTF-8 text, one line per record. When a write would push
//! the file past its size cap the live file is renamed to `<name>.1`,
//! existing backups shift up one slot, and anything beyond the backup
//! count is discarded.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A log file writer with size-based rotation.
///
/// `max_bytes == 0` disables rotation entirely. With `backup_count == 0`
/// rotation truncates the live file without keeping a backup. Write and
/// rotation errors are swallowed: a logger must not take down its host
/// process.
#[derive(Debug)]
pub struct RotatingFileWriter {
    path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    file: File,
    size: u64,
}

impl RotatingFileWriter {
    /// Open (or create) the log file in append mode
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, backup_count: usize) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            path,
            max_bytes,
            backup_count,
            inner: Mutex::new(Inner { file, size }),
        })
    }

    /// Path of the live log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line, rotating first if the write would exceed the cap
    pub fn write_line(&self, line: &str) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };

        let incoming = line.len() as u64 + 1;
        if self.max_bytes > 0 && inner.size > 0 && inner.size + incoming > self.max_bytes {
            // On rotation failure keep appending to the oversized file
            // rather than dropping records
            if self.rotate(&mut inner).is_ok() {
                inner.size = 0;
            }
        }

        let _ = inner.file.write_all(line.as_bytes());
        let _ = inner.file.write_all(b"\n");
        let _ = inner.file.flush();
        inner.size += incoming;
    }

    /// Shift backups up one generation and reopen the live file truncated
    fn rotate(&self, inner: &mut Inner) -> io::Result<()> {
        let _ = inner.file.flush();

        if self.backup_count > 0 {
            let oldest = self.backup_path(self.backup_count);
            if oldest.exists() {
                let _ = fs::remove_file(&oldest);
            }
            for i in (1..self.backup_count).rev() {
                let src = self.backup_path(i);
                if src.exists() {
                    let _ = fs::rename(&src, self.backup_path(i + 1));
                }
            }
            fs::rename(&self.path, self.backup_path(1))?;
        }

        inner.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        Ok(())
    }

    fn backup_path(&self, generation: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{generation}"));
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_lines_without_rotation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let writer = RotatingFileWriter::open(&path, 0, 5).unwrap();

        writer.write_line("first");
        writer.write_line("second");

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
        assert!(!dir.path().join("app.log.1").exists());
    }

    #[test]
    fn test_exceeding_max_bytes_creates_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let writer = RotatingFileWriter::open(&path, 64, 3).unwrap();

        // 21 bytes per line with the newline; the fourth write would pass 64
        for i in 0..4 {
            writer.write_line(&format!("record number {i:05}"));
        }

        let backup = dir.path().join("app.log.1");
        assert!(backup.exists());
        let rotated = fs::read_to_string(&backup).unwrap();
        assert!(rotated.contains("record number 00000"));
        let live = fs::read_to_string(&path).unwrap();
        assert!(live.contains("record number 00003"));
    }

    #[test]
    fn test_retained_backups_never_exceed_backup_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let writer = RotatingFileWriter::open(&path, 32, 2).unwrap();

        for i in 0..30 {
            writer.write_line(&format!("record number {i:05}"));
        }

        assert!(dir.path().join("app.log.1").exists());
        assert!(dir.path().join("app.log.2").exists());
        assert!(!dir.path().join("app.log.3").exists());

        let files = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 3);
    }

    #[test]
    fn test_oldest_generation_is_discarded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let writer = RotatingFileWriter::open(&path, 24, 1).unwrap();

        writer.write_line("generation one record");
        writer.write_line("generation two record");
        writer.write_line("generation three rec.");

        // Only the most recent backup survives
        let backup = fs::read_to_string(dir.path().join("app.log.1")).unwrap();
        assert!(backup.contains("generation two record"));
        assert!(!dir.path().join("app.log.2").exists());
    }

    #[test]
    fn test_zero_backup_count_truncates_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let writer = RotatingFileWriter::open(&path, 24, 0).unwrap();

        writer.write_line("first oversized entry");
        writer.write_line("second entry arrives!");

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "second entry arrives!\n");
        assert!(!dir.path().join("app.log.1").exists());
    }

    #[test]
    fn test_reopen_accounts_for_existing_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");

        {
            let writer = RotatingFileWriter::open(&path, 40, 2).unwrap();
            writer.write_line("persisted before restart");
        }
        let writer = RotatingFileWriter::open(&path, 40, 2).unwrap();
        writer.write_line("written after restart!!!");

        // The pre-existing bytes counted toward the cap, forcing a rotation
        assert!(dir.path().join("app.log.1").exists());
    }
}

//! File writer implementation

use crate::core::{Envelope, LogWriter, LoggerError, TimestampFormat};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one line per envelope to a file
///
/// The file is opened in [`init`](LogWriter::init) and closed in
/// [`destroy`](LogWriter::destroy). If it cannot be opened, or a write
/// fails, the writer reports on stderr and drops output until writes
/// succeed again.
pub struct FileWriter {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    timestamp_format: TimestampFormat,
    lock: bool,
    locked: bool,
    failing: bool,
}

impl FileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
            timestamp_format: TimestampFormat::default(),
            lock: true,
            locked: false,
            failing: false,
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Take an advisory exclusive lock on the file while it is open (default: on)
    #[must_use]
    pub fn with_lock(mut self, lock: bool) -> Self {
        self.lock = lock;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    fn report(&mut self, err: LoggerError) {
        if !self.failing {
            eprintln!("[LOGGER ERROR] {}", err);
        }
        self.failing = true;
    }
}

impl LogWriter for FileWriter {
    fn init(&mut self) {
        match OpenOptions::new().create(true).append(true).open(&self.path) {
            Ok(file) => {
                if self.lock {
                    match file.try_lock_exclusive() {
                        Ok(()) => self.locked = true,
                        Err(_) => eprintln!(
                            "[LOGGER WARNING] '{}' is locked by another process; writing without a lock",
                            self.path.display()
                        ),
                    }
                }
                self.writer = Some(BufWriter::new(file));
            }
            Err(e) => {
                let err = LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", self.path.display()),
                    e,
                );
                self.report(err);
            }
        }
    }

    fn write_msg(&mut self, envelope: &Envelope) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        let line = format!(
            "{} {}\n",
            self.timestamp_format.format(envelope.timestamp()),
            envelope.message()
        );
        match writer.write_all(line.as_bytes()) {
            Ok(()) => self.failing = false,
            Err(e) => {
                let err = LoggerError::io_operation(
                    "writing log file",
                    format!("cannot append to '{}'", self.path.display()),
                    e,
                );
                self.report(err);
            }
        }
    }

    fn flush(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            if let Err(e) = writer.flush() {
                let err = LoggerError::io_operation(
                    "flushing log file",
                    format!("cannot flush '{}'", self.path.display()),
                    e,
                );
                self.report(err);
            }
        }
    }

    fn destroy(&mut self) {
        let Some(writer) = self.writer.take() else {
            return;
        };
        match writer.into_inner() {
            Ok(file) => {
                if self.locked {
                    let _ = FileExt::unlock(&file);
                    self.locked = false;
                }
            }
            Err(e) => eprintln!(
                "[LOGGER ERROR] Failed to flush '{}' on close: {}",
                self.path.display(),
                e.error()
            ),
        }
    }
}

impl Drop for FileWriter {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use tempfile::TempDir;

    #[test]
    fn test_lines_are_appended() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("app.log");

        let mut writer = FileWriter::new(&path);
        writer.init();
        assert!(writer.is_open());
        writer.write_msg(&Envelope::new(LogLevel::Info, "[I] first"));
        writer.write_msg(&Envelope::new(LogLevel::Warn, "[W] second"));
        writer.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" [I] first"));
        assert!(lines[1].ends_with(" [W] second"));

        writer.destroy();
        assert!(!writer.is_open());
    }

    #[test]
    fn test_existing_content_is_kept() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("app.log");
        std::fs::write(&path, "earlier\n").unwrap();

        let mut writer = FileWriter::new(&path).with_lock(false);
        writer.init();
        writer.write_msg(&Envelope::new(LogLevel::Info, "[I] later"));
        writer.destroy();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("earlier\n"));
        assert!(content.trim_end().ends_with("[I] later"));
    }

    #[test]
    fn test_unopenable_path_drops_output() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("missing").join("app.log");

        let mut writer = FileWriter::new(&path);
        writer.init();
        assert!(!writer.is_open());
        writer.write_msg(&Envelope::new(LogLevel::Error, "[E] lost"));
        writer.flush();
        writer.destroy();

        assert!(!path.exists());
    }
}

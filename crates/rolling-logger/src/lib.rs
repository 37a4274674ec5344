//! Rolling Logger
//!
//! Installs a `tracing` subscriber that mirrors every formatted line to stderr
//! and keeps the most recent lines in a bounded in-memory buffer, so a host can
//! show or attach recent activity after a failed save.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Logger setup errors
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("Invalid log filter: {0}")]
    Filter(String),
    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(String),
    #[error("Failed to write log dump: {0}")]
    Io(#[from] io::Error),
}

/// One captured log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub line: String,
}

/// Bounded, shareable buffer of recent log lines
#[derive(Debug, Clone)]
pub struct LogBuffer {
    inner: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
    echo: bool,
}

impl LogBuffer {
    /// Buffer that also echoes each line to stderr
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
            echo: true,
        }
    }

    /// Buffer that only captures
    pub fn silent(capacity: usize) -> Self {
        Self {
            echo: false,
            ..Self::new(capacity)
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        // A panic mid-push leaves the deque intact, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append a line, evicting the oldest one when full
    pub fn push(&self, line: &str) {
        if self.echo {
            eprintln!("{}", line);
        }
        let mut entries = self.lock();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(LogEntry {
            at: Local::now(),
            line: line.to_string(),
        });
    }

    /// Snapshot of the buffered lines, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Write all buffered lines to `path`, one per line with a timestamp prefix
    pub fn dump_to(&self, path: &Path) -> Result<(), LoggerError> {
        let mut file = File::create(path)?;
        for entry in self.entries() {
            writeln!(file, "{} {}", entry.at.to_rfc3339(), entry.line)?;
        }
        file.flush()?;
        Ok(())
    }
}

/// Per-event writer handed out by [`LogBuffer`]
///
/// Collects the bytes of one formatted event and pushes complete lines into
/// the buffer; anything left over is pushed when the writer is dropped.
pub struct BufferWriter {
    buffer: LogBuffer,
    pending: Vec<u8>,
}

impl BufferWriter {
    fn drain_lines(&mut self) {
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..line.len() - 1]);
            self.buffer.push(text.trim_end_matches('\r'));
        }
    }
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.drain_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.drain_lines();
        Ok(())
    }
}

impl Drop for BufferWriter {
    fn drop(&mut self) {
        self.drain_lines();
        if !self.pending.is_empty() {
            let rest = String::from_utf8_lossy(&self.pending).into_owned();
            self.buffer.push(&rest);
            self.pending.clear();
        }
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter {
            buffer: self.clone(),
            pending: Vec::new(),
        }
    }
}

/// Install the global subscriber
///
/// `filter` uses `EnvFilter` directive syntax (`"info"`, `"storefront_core=debug"`).
pub fn init(filter: &str, capacity: usize) -> Result<LogBuffer, LoggerError> {
    let env_filter = EnvFilter::try_new(filter).map_err(|e| LoggerError::Filter(e.to_string()))?;
    let buffer = LogBuffer::new(capacity);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(buffer.clone())
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;

    Ok(buffer)
}

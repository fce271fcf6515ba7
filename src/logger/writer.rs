//! Log writer module
//!
//! Thread-safe log output to stdout, optionally mirrored to a file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::config::{LogFormat, LogLevel};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Thread-safe log writer
pub struct LogWriter {
    format: LogFormat,
    level: LogLevel,
    /// Extra file target, written in addition to stdout
    file: Option<Mutex<File>>,
}

impl LogWriter {
    fn new(format: LogFormat, level: LogLevel, log_file: Option<&str>) -> io::Result<Self> {
        let file = match log_file {
            Some(path) => Some(Mutex::new(open_log_file(path)?)),
            None => None,
        };
        Ok(Self {
            format,
            level,
            file,
        })
    }

    pub const fn format(&self) -> LogFormat {
        self.format
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    /// Write one already-formatted line to every target
    pub fn write_line(&self, line: &str) {
        {
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "{line}");
        }
        if let Some(file) = &self.file {
            let mut f = file.lock().unwrap_or_else(PoisonError::into_inner);
            let _ = writeln!(f, "{line}");
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global log writer
///
/// This should be called once at application startup.
/// Returns error if the log file cannot be opened.
pub fn init(format: LogFormat, level: LogLevel, log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter::new(format, level, log_file)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer, if initialized
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}

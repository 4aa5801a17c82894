use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Where log lines go for a given run mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Discard,
}

impl LogTarget {
    /// The TUI owns the terminal, so it must never log to stderr.
    pub fn for_mode(interactive: bool) -> Self {
        if !interactive {
            return LogTarget::Stderr;
        }
        match Self::log_path() {
            Some(path) => LogTarget::File(path),
            None => LogTarget::Discard,
        }
    }

    fn log_path() -> Option<PathBuf> {
        let dir = dirs::state_dir().or_else(dirs::cache_dir)?.join("genodash");
        std::fs::create_dir_all(&dir).ok()?;
        Some(dir.join("genodash.log"))
    }

    fn make_writer(&self) -> BoxMakeWriter {
        match self {
            LogTarget::Stderr => BoxMakeWriter::new(io::stderr),
            LogTarget::File(path) => {
                match OpenOptions::new().create(true).append(true).open(path) {
                    Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
                    Err(_) => BoxMakeWriter::new(io::sink),
                }
            }
            LogTarget::Discard => BoxMakeWriter::new(io::sink),
        }
    }
}

pub fn init(target: &LogTarget) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(target.make_writer())
                .with_ansi(*target == LogTarget::Stderr),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

//! Mission log file writer.
//!
//! One plain-text file per run, `log_<mission>.txt`, with a four-line `%`
//! header followed by one record per line:
//!
//! ```text
//! % Mission plan401 logfile
//! % 1 	Time (sec)
//! % 2 	Mission state
//! % 3 	% Mission status (mostly for debug)
//! 0.0000 10 % plan401 started
//! 2.5040 10 % state change from 10 to 11
//! ```
//!
//! Time is seconds since mission start with a 4-digit fraction in 100 µs
//! units. Console mirroring prints the same records without the header.

use crate::error::LogSinkFailure;
use crate::program::StateId;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

type Sink = Box<dyn Write + Send>;

/// Stream that console records are mirrored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleStream {
    #[default]
    Stdout,
    /// Keeps stdout free for machine-readable output
    Stderr,
}

/// Best-effort record writer with an optional file sink and an optional
/// console mirror.
pub struct MissionLogger {
    file: Option<Sink>,
    console: Option<Sink>,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for MissionLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MissionLogger")
            .field("file", &self.file.is_some())
            .field("console", &self.console.is_some())
            .field("path", &self.path)
            .finish()
    }
}

impl MissionLogger {
    /// Logger that writes nowhere.
    pub fn disabled() -> Self {
        Self {
            file: None,
            console: None,
            path: None,
        }
    }

    /// Create `dir/log_<mission>.txt` (truncating) and write the header.
    ///
    /// # Errors
    /// Returns error if the directory or file cannot be created.
    pub fn open(
        dir: &Path,
        mission: &str,
        console: Option<ConsoleStream>,
    ) -> Result<Self, LogSinkFailure> {
        Self::create(&dir.join(log_file_name(mission)), mission, console)
    }

    /// Create the log file at an explicit path (truncating), creating parent
    /// directories, and write the header.
    ///
    /// # Errors
    /// Returns error if the directory or file cannot be created.
    pub fn create(
        path: &Path,
        mission: &str,
        console: Option<ConsoleStream>,
    ) -> Result<Self, LogSinkFailure> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = BufWriter::new(File::create(path)?);
        let mut logger = Self::with_sinks(Some(Box::new(file)), console_sink(console));
        logger.path = Some(path.to_path_buf());
        logger.write_header(mission)?;
        Ok(logger)
    }

    /// Console-only logger, used when file logging is off.
    pub fn console_only(console: Option<ConsoleStream>) -> Self {
        Self::with_sinks(None, console_sink(console))
    }

    /// Logger over arbitrary sinks. The header is not written.
    pub fn with_sinks(file: Option<Sink>, console: Option<Sink>) -> Self {
        Self {
            file,
            console,
            path: None,
        }
    }

    /// Path of the log file, when writing to one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    /// Write the header to the file sink.
    ///
    /// # Errors
    /// Returns error if the write fails.
    pub fn write_header(&mut self, mission: &str) -> Result<(), LogSinkFailure> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        writeln!(file, "% Mission {mission} logfile")?;
        writeln!(file, "% 1 \tTime (sec)")?;
        writeln!(file, "% 2 \tMission state")?;
        writeln!(file, "% 3 \t% Mission status (mostly for debug)")?;
        file.flush()?;
        Ok(())
    }

    /// Append one record. The console mirror is best effort and never fails
    /// the call; a file write failure is returned.
    ///
    /// # Errors
    /// Returns error if writing or flushing the file sink fails.
    pub fn record(
        &mut self,
        at: Duration,
        state: StateId,
        message: &str,
    ) -> Result<(), LogSinkFailure> {
        let line = format_record(at, state, message);
        if let Some(console) = self.console.as_mut() {
            if writeln!(console, "{line}").is_ok() {
                let _ = console.flush();
            }
        }
        if let Some(file) = self.file.as_mut() {
            writeln!(file, "{line}")?;
            file.flush()?;
        }
        Ok(())
    }

    /// Stop writing to the file sink for the rest of the run.
    pub fn drop_file_sink(&mut self) {
        self.file = None;
    }
}

/// Log file name for a mission.
pub fn log_file_name(mission: &str) -> String {
    format!("log_{mission}.txt")
}

/// Render one record line without the trailing newline.
pub fn format_record(at: Duration, state: StateId, message: &str) -> String {
    format!(
        "{}.{:04} {} % {}",
        at.as_secs(),
        at.subsec_micros() / 100,
        state,
        message
    )
}

fn console_sink(stream: Option<ConsoleStream>) -> Option<Sink> {
    stream.map(|stream| match stream {
        ConsoleStream::Stdout => Box::new(io::stdout()) as Sink,
        ConsoleStream::Stderr => Box::new(io::stderr()) as Sink,
    })
}

/// Shared in-memory sink for capturing transcripts.
#[derive(Debug, Clone, Default)]
pub struct MemorySink(Arc<Mutex<Vec<u8>>>);

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let buf = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for MemorySink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_record_format() {
        let at = Duration::from_micros(2_504_070);
        assert_eq!(
            format_record(at, StateId(10), "state change from 10 to 11"),
            "2.5040 10 % state change from 10 to 11"
        );
        assert_eq!(format_record(Duration::ZERO, StateId(5), "x"), "0.0000 5 % x");
        assert_eq!(
            format_record(Duration::from_millis(61_007), StateId(1), "y"),
            "61.0070 1 % y"
        );
    }

    #[test]
    fn test_open_writes_header_and_records() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("log");
        let mut logger = MissionLogger::open(&log_dir, "plan401", None).unwrap();
        logger
            .record(Duration::ZERO, StateId(10), "plan401 started")
            .unwrap();
        logger
            .record(Duration::from_millis(1500), StateId(10), "plan401 finished")
            .unwrap();

        let path = logger.path().unwrap().to_path_buf();
        assert_eq!(path, log_dir.join("log_plan401.txt"));
        drop(logger);

        let text = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "% Mission plan401 logfile");
        assert_eq!(lines[1], "% 1 \tTime (sec)");
        assert_eq!(lines[2], "% 2 \tMission state");
        assert_eq!(lines[3], "% 3 \t% Mission status (mostly for debug)");
        assert_eq!(lines[4], "0.0000 10 % plan401 started");
        assert_eq!(lines[5], "1.5000 10 % plan401 finished");
    }

    #[test]
    fn test_console_mirror_has_no_header() {
        let file = MemorySink::new();
        let console = MemorySink::new();
        let mut logger =
            MissionLogger::with_sinks(Some(Box::new(file.clone())), Some(Box::new(console.clone())));
        logger.write_header("m").unwrap();
        logger.record(Duration::ZERO, StateId(1), "m started").unwrap();

        assert_eq!(file.lines().len(), 5);
        assert_eq!(console.lines(), vec!["0.0000 1 % m started".to_string()]);
    }

    #[test]
    fn test_file_failure_is_reported() {
        let console = MemorySink::new();
        let mut logger =
            MissionLogger::with_sinks(Some(Box::new(FailingSink)), Some(Box::new(console.clone())));
        let result = logger.record(Duration::ZERO, StateId(1), "hello");
        assert!(result.is_err());
        // Console still mirrors the record.
        assert_eq!(console.lines().len(), 1);

        logger.drop_file_sink();
        assert!(!logger.has_file());
        assert!(logger.record(Duration::ZERO, StateId(1), "again").is_ok());
    }

    #[test]
    fn test_disabled_logger_accepts_records() {
        let mut logger = MissionLogger::disabled();
        assert!(logger.record(Duration::ZERO, StateId(1), "x").is_ok());
        assert!(logger.path().is_none());
    }
}

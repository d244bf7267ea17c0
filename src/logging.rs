//! Event log sink.
//!
//! Request and connection handlers hand their log lines to a [`Logger`];
//! a single consumer task writes them out, so a slow backend never stalls
//! the handlers beyond the queue depth.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tokio::sync::mpsc;

/// Queue depth between producers and the sink.
pub const QUEUE_CAPACITY: usize = 10;

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Notice,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Notice => "notice",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug)]
struct LogMsg {
    severity: Severity,
    message: String,
}

/// Destination the sink writes to.
pub trait LogBackend: Send + 'static {
    fn write(&mut self, severity: Severity, message: &str) -> io::Result<()>;
}

/// Writes through the process-wide tracing subscriber.
#[derive(Debug, Default)]
pub struct ConsoleBackend;

impl LogBackend for ConsoleBackend {
    fn write(&mut self, severity: Severity, message: &str) -> io::Result<()> {
        match severity {
            Severity::Notice => tracing::info!("{}", message),
            Severity::Error => tracing::error!("{}", message),
        }
        Ok(())
    }
}

/// Appends timestamped lines to a file.
#[derive(Debug)]
pub struct FileBackend {
    file: File,
}

impl FileBackend {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl LogBackend for FileBackend {
    fn write(&mut self, severity: Severity, message: &str) -> io::Result<()> {
        writeln!(
            self.file,
            "{} {} {}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%z"),
            severity.as_str(),
            message
        )
    }
}

/// Picks the backend once: the file when it can be opened, else the console.
pub fn select_backend(log_file: Option<&Path>) -> Box<dyn LogBackend> {
    let Some(path) = log_file else {
        return Box::new(ConsoleBackend);
    };

    match FileBackend::open(path) {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Unable to open log file, logging to console"
            );
            Box::new(ConsoleBackend)
        }
    }
}

/// Handle used to queue log lines.
#[derive(Debug, Clone)]
pub struct Logger {
    tx: mpsc::Sender<LogMsg>,
}

impl Logger {
    /// Starts the sink task writing to `backend`.
    pub fn spawn(backend: Box<dyn LogBackend>) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        tokio::spawn(run(rx, backend));
        Self { tx }
    }

    pub async fn notice(&self, message: impl Into<String>) {
        self.emit(Severity::Notice, message.into()).await;
    }

    pub async fn error(&self, message: impl Into<String>) {
        self.emit(Severity::Error, message.into()).await;
    }

    pub async fn emit(&self, severity: Severity, message: String) {
        if let Err(e) = self.tx.send(LogMsg { severity, message }).await {
            // Sink is gone; keep the line rather than lose it.
            tracing::warn!("log sink stopped: {}", e.0.message);
        }
    }
}

/// Backend writes are blocking IO, so each one runs on the blocking pool and
/// hands the backend back when done.
async fn run(mut rx: mpsc::Receiver<LogMsg>, mut backend: Box<dyn LogBackend>) {
    while let Some(msg) = rx.recv().await {
        let write = tokio::task::spawn_blocking(move || {
            let res = backend.write(msg.severity, &msg.message);
            (backend, res)
        });

        match write.await {
            Ok((returned, res)) => {
                backend = returned;
                if let Err(e) = res {
                    tracing::error!("log backend write failed: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("log backend panicked, sink stopped: {}", e);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<(Severity, String)>>>);

    impl LogBackend for Capture {
        fn write(&mut self, severity: Severity, message: &str) -> io::Result<()> {
            self.0.lock().unwrap().push((severity, message.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn lines_arrive_in_producer_order() {
        let capture = Capture::default();
        let logger = Logger::spawn(Box::new(capture.clone()));

        for i in 0..25 {
            logger.notice(format!("line {}", i)).await;
        }
        logger.error("boom").await;
        drop(logger);

        // The sink drains the queue before it exits.
        for _ in 0..100 {
            if capture.0.lock().unwrap().len() == 26 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let lines = capture.0.lock().unwrap();
        assert_eq!(lines.len(), 26);
        assert_eq!(lines[0], (Severity::Notice, "line 0".to_string()));
        assert_eq!(lines[24].1, "line 24");
        assert_eq!(lines[25], (Severity::Error, "boom".to_string()));
    }

    #[tokio::test]
    async fn file_sink_writes_through_the_queue() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nullserv.log");
        let logger = Logger::spawn(select_backend(Some(&path)));

        logger.notice("queued line").await;
        drop(logger);

        let mut text = String::new();
        for _ in 0..100 {
            text = std::fs::read_to_string(&path).unwrap_or_default();
            if !text.is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert!(text.trim_end().ends_with("notice queued line"));
    }

    #[test]
    fn unopenable_file_falls_back_to_console() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no/such/dir/nullserv.log");
        // Only the file backend can fail to write to a missing directory.
        let mut backend = select_backend(Some(&missing));
        assert!(backend.write(Severity::Notice, "still here").is_ok());
        assert!(!missing.exists());
    }

    #[test]
    fn file_backend_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nullserv.log");
        let mut backend = select_backend(Some(&path));
        backend.write(Severity::Notice, "first").unwrap();
        backend.write(Severity::Error, "second").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("notice first"));
        assert!(lines[1].ends_with("error second"));
    }
}

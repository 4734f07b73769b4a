//! Diagnostic tracing setup and the file+console event log

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::events::{EventSink, SyncEvent};

pub use tracing::{debug, error, info, warn};

/// Initialize the tracing subscriber with environment filter support.
///
/// By default, logs at INFO level and above are displayed. Control the log
/// level with the `RUST_LOG` environment variable:
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=replicr=trace cargo run
/// ```
pub fn init_tracing() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.with_writer(std::io::stderr)
		.init();
}

const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Event log with dual delivery: a buffered log file plus the live console.
///
/// An owned value, not global logger state: constructing a second `LogSink`
/// cannot duplicate output of the first, and dropping it (or calling
/// `close`) releases the file. Every line carries a local timestamp.
pub struct LogSink {
	file: Option<BufWriter<fs::File>>,
}

impl LogSink {
	/// Open (or create, appending) the log file at `path`
	pub fn open(path: &Path) -> io::Result<Self> {
		let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
		Ok(LogSink { file: Some(BufWriter::new(file)) })
	}

	fn line(&mut self, message: &str) {
		let stamped =
			format!("{} - {}", chrono::Local::now().format(TIMESTAMP_FORMAT), message);
		println!("{}", stamped);
		if let Some(file) = &mut self.file {
			// A console line the file missed is better than losing both
			if let Err(e) = writeln!(file, "{}", stamped) {
				eprintln!("Cannot write to log file: {}", e);
			}
		}
	}
}

impl EventSink for LogSink {
	fn event(&mut self, event: &SyncEvent) {
		self.line(&event.to_string());
	}

	fn info(&mut self, message: &str) {
		self.line(message);
	}

	fn warn(&mut self, message: &str) {
		self.line(&format!("WARNING - {}", message));
	}

	fn close(&mut self) -> io::Result<()> {
		if let Some(mut file) = self.file.take() {
			file.flush()?;
		}
		Ok(())
	}
}

impl Drop for LogSink {
	fn drop(&mut self) {
		// Best effort; close() is the checked path
		let _ = self.close();
	}
}


// vim: ts=4

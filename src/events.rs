//! Sync events and the sink trait they are reported through

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Kind of reconciliation action taken during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEventKind {
	/// Directory created in the replica
	DirCreated,

	/// File copied from source to replica
	FileCopied,

	/// Directory (and its contents) removed from the replica
	DirRemoved,

	/// File removed from the replica
	FileRemoved,
}

impl SyncEventKind {
	/// Human-readable action label used in log lines
	pub fn action(&self) -> &'static str {
		match self {
			SyncEventKind::DirCreated => "Created directory",
			SyncEventKind::FileCopied => "Copied file",
			SyncEventKind::DirRemoved => "Removed directory",
			SyncEventKind::FileRemoved => "Removed file",
		}
	}
}

/// One reconciliation action taken during a pass.
///
/// Produced by the synchronizer, consumed by the sink; nothing flows back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEvent {
	pub kind: SyncEventKind,
	pub path: PathBuf,
}

impl SyncEvent {
	pub fn new(kind: SyncEventKind, path: impl Into<PathBuf>) -> Self {
		SyncEvent { kind, path: path.into() }
	}
}

impl fmt::Display for SyncEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: '{}'", self.kind.action(), self.path.display())
	}
}

/// Where the synchronizer reports what it did.
///
/// Implementations own whatever resources they write to; `close` must leave
/// no buffered line behind.
pub trait EventSink {
	/// Called for every mutating reconciliation action
	fn event(&mut self, event: &SyncEvent);

	/// Session and per-pass status lines
	fn info(&mut self, _message: &str) {}

	/// Non-fatal problems (skipped entries, per-entry I/O errors)
	fn warn(&mut self, _message: &str) {}

	/// Flush and release the sink's resources
	fn close(&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// Sink that discards everything
pub struct NullSink;

impl EventSink for NullSink {
	fn event(&mut self, _event: &SyncEvent) {}
}

/// Sink that records events in memory, for tests and embedding
#[derive(Default)]
pub struct MemorySink {
	pub events: Vec<SyncEvent>,
	pub warnings: Vec<String>,
}

impl MemorySink {
	pub fn new() -> Self {
		MemorySink::default()
	}

	/// Events of one kind, in emission order
	pub fn of_kind(&self, kind: SyncEventKind) -> Vec<&SyncEvent> {
		self.events.iter().filter(|e| e.kind == kind).collect()
	}
}

impl EventSink for MemorySink {
	fn event(&mut self, event: &SyncEvent) {
		self.events.push(event.clone());
	}

	fn warn(&mut self, message: &str) {
		self.warnings.push(message.to_string());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::Path;

	#[test]
	fn test_event_line_format() {
		let event = SyncEvent::new(SyncEventKind::FileCopied, "/tmp/replica/a/b.txt");
		assert_eq!(event.to_string(), "Copied file: '/tmp/replica/a/b.txt'");

		let event = SyncEvent::new(SyncEventKind::DirRemoved, "/tmp/replica/junk");
		assert_eq!(event.to_string(), "Removed directory: '/tmp/replica/junk'");
	}

	#[test]
	fn test_memory_sink_records_in_order() {
		let mut sink = MemorySink::new();
		sink.event(&SyncEvent::new(SyncEventKind::DirCreated, "a"));
		sink.event(&SyncEvent::new(SyncEventKind::FileCopied, "a/b.txt"));

		assert_eq!(sink.events.len(), 2);
		assert_eq!(sink.events[0].kind, SyncEventKind::DirCreated);
		assert_eq!(sink.events[1].path, Path::new("a/b.txt"));
	}

	#[test]
	fn test_null_sink_accepts_everything() {
		let mut sink = NullSink;
		sink.event(&SyncEvent::new(SyncEventKind::DirCreated, "a"));
		sink.info("status");
		sink.warn("problem");
		assert!(sink.close().is_ok());
	}

	#[test]
	fn test_memory_sink_of_kind() {
		let mut sink = MemorySink::new();
		sink.event(&SyncEvent::new(SyncEventKind::FileRemoved, "x"));
		sink.event(&SyncEvent::new(SyncEventKind::FileCopied, "y"));
		sink.event(&SyncEvent::new(SyncEventKind::FileRemoved, "z"));

		let removed = sink.of_kind(SyncEventKind::FileRemoved);
		assert_eq!(removed.len(), 2);
		assert_eq!(removed[1].path, Path::new("z"));
	}
}

// vim: ts=4

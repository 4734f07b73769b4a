//! # replicr - One-Way Periodic Folder Mirroring
//!
//! replicr keeps a replica directory tree identical to a source tree:
//! every pass propagates new and changed content from the source, then
//! prunes replica entries the source no longer has. Content equality is
//! decided by a streaming blake3 fingerprint, never by size or timestamp.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use replicr::{MemorySink, Synchronizer};
//!
//! fn main() -> Result<(), replicr::SyncError> {
//!     let sync = Synchronizer::new("./source", "./replica");
//!     let mut sink = MemorySink::new();
//!     let summary = sync.run(&mut sink)?;
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```
//!
//! The binary wraps this in a fixed-interval scheduler with a dual
//! file/console event log; see [`scheduler`] and [`logging::LogSink`].

pub mod config;
pub mod error;
pub mod events;
pub mod fingerprint;
pub mod logging;
pub mod scheduler;
pub mod sync;

// Re-export commonly used types and functions
pub use config::Config;
pub use error::SyncError;
pub use events::{EventSink, MemorySink, NullSink, SyncEvent, SyncEventKind};
pub use sync::{PassSummary, Synchronizer};

// vim: ts=4

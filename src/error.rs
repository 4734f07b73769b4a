//! Error types for replicr operations

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for mirroring operations
#[derive(Debug)]
pub enum SyncError {
	/// A tree root itself could not be listed; fatal for the current pass
	RootInaccessible { root: PathBuf, source: io::Error },

	/// Invalid configuration
	InvalidConfig { message: String },

	/// I/O error
	Io(io::Error),
}

impl fmt::Display for SyncError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SyncError::RootInaccessible { root, source } => {
				write!(f, "Cannot access root '{}': {}", root.display(), source)
			}
			SyncError::InvalidConfig { message } => {
				write!(f, "Invalid configuration: {}", message)
			}
			SyncError::Io(e) => write!(f, "I/O error: {}", e),
		}
	}
}

impl Error for SyncError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			SyncError::RootInaccessible { source, .. } => Some(source),
			SyncError::Io(e) => Some(e),
			SyncError::InvalidConfig { .. } => None,
		}
	}
}

impl From<io::Error> for SyncError {
	fn from(e: io::Error) -> Self {
		SyncError::Io(e)
	}
}

impl From<String> for SyncError {
	fn from(e: String) -> Self {
		SyncError::InvalidConfig { message: e }
	}
}

// vim: ts=4

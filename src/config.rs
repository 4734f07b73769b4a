//! Runtime configuration for the mirroring loop

use std::path::PathBuf;
use std::time::Duration;

/// Fixed parameters of one mirroring process: the four positional CLI
/// arguments, validated once at startup.
#[derive(Debug, Clone)]
pub struct Config {
	/// Authoritative tree being mirrored from
	pub source: PathBuf,

	/// Tree kept identical to the source
	pub replica: PathBuf,

	/// Sleep between passes
	pub interval: Duration,

	/// Destination of the event log (console delivery is implicit)
	pub log_file: PathBuf,
}

impl Config {
	/// Validate the configuration
	pub fn validate(&self) -> Result<(), String> {
		if self.interval.as_secs() == 0 {
			return Err("interval must be a positive number of seconds".to_string());
		}
		if !self.source.is_dir() {
			return Err(format!("source '{}' is not a directory", self.source.display()));
		}
		if self.source == self.replica {
			return Err("source and replica must be different directories".to_string());
		}
		// Mirroring into a subtree of the source would feed the replica
		// back into itself on the next pass.
		if self.replica.starts_with(&self.source) {
			return Err(format!(
				"replica '{}' must not be inside source '{}'",
				self.replica.display(),
				self.source.display()
			));
		}
		if self.source.starts_with(&self.replica) {
			return Err(format!(
				"source '{}' must not be inside replica '{}'",
				self.source.display(),
				self.replica.display()
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	fn config(source: PathBuf, replica: PathBuf) -> Config {
		Config { source, replica, interval: Duration::from_secs(5), log_file: "sync.log".into() }
	}

	#[test]
	fn test_valid_config() {
		let source = TempDir::new().unwrap();
		let replica = TempDir::new().unwrap();
		let config = config(source.path().to_path_buf(), replica.path().to_path_buf());
		assert!(config.validate().is_ok());
	}

	#[test]
	fn test_zero_interval_rejected() {
		let source = TempDir::new().unwrap();
		let replica = TempDir::new().unwrap();
		let mut config = config(source.path().to_path_buf(), replica.path().to_path_buf());
		config.interval = Duration::from_secs(0);
		assert!(config.validate().unwrap_err().contains("interval"));
	}

	#[test]
	fn test_missing_source_rejected() {
		let replica = TempDir::new().unwrap();
		let config = config("/no/such/dir".into(), replica.path().to_path_buf());
		assert!(config.validate().unwrap_err().contains("not a directory"));
	}

	#[test]
	fn test_replica_inside_source_rejected() {
		let source = TempDir::new().unwrap();
		let config =
			config(source.path().to_path_buf(), source.path().join("mirror"));
		assert!(config.validate().unwrap_err().contains("inside source"));
	}

	#[test]
	fn test_same_directory_rejected() {
		let source = TempDir::new().unwrap();
		let config = config(source.path().to_path_buf(), source.path().to_path_buf());
		assert!(config.validate().unwrap_err().contains("different"));
	}
}

// vim: ts=4

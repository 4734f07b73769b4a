//! Two-phase tree reconciliation: propagate source to replica, then prune
//! replica entries the source no longer has.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use tracing::debug;

use crate::error::SyncError;
use crate::events::{EventSink, SyncEvent, SyncEventKind};
use crate::fingerprint::fingerprint;

/// Counts of what one pass did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PassSummary {
	pub dirs_created: usize,
	pub files_copied: usize,
	pub dirs_removed: usize,
	pub files_removed: usize,

	/// Per-entry I/O errors that were skipped over
	pub errors: usize,
}

impl PassSummary {
	/// Total number of mutating actions taken
	pub fn actions(&self) -> usize {
		self.dirs_created + self.files_copied + self.dirs_removed + self.files_removed
	}
}

impl fmt::Display for PassSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} directories created, {} files copied, {} directories removed, {} files removed, {} errors",
			self.dirs_created, self.files_copied, self.dirs_removed, self.files_removed, self.errors
		)
	}
}

/// Mirrors a source tree into a replica tree.
///
/// The roots are fixed for the lifetime of the instance; one instance is
/// reused across passes. A pass holds no state beyond its `PassSummary` —
/// every fingerprint is recomputed fresh, nothing persists between passes.
///
/// Limitation: only directories and regular files are mirrored. Symlinks,
/// devices and other special entries in the source are skipped with a
/// warning; in the replica they are treated as stale and pruned.
pub struct Synchronizer {
	source: PathBuf,
	replica: PathBuf,
}

impl Synchronizer {
	pub fn new(source: impl Into<PathBuf>, replica: impl Into<PathBuf>) -> Self {
		Synchronizer { source: source.into(), replica: replica.into() }
	}

	pub fn source(&self) -> &Path {
		&self.source
	}

	pub fn replica(&self) -> &Path {
		&self.replica
	}

	/// Run one full reconciliation pass.
	///
	/// Phase 1 (propagate) always completes before phase 2 (prune) starts,
	/// so a file renamed between passes is copied under its new name before
	/// its old name disappears. Per-entry I/O errors are reported through
	/// the sink and counted; only an unlistable root aborts the pass.
	pub fn run(&self, sink: &mut dyn EventSink) -> Result<PassSummary, SyncError> {
		let mut summary = PassSummary::default();

		// The replica root itself is infrastructure, not a mirrored entry;
		// creating it emits no event.
		if fs::symlink_metadata(&self.replica).is_err() {
			fs::create_dir_all(&self.replica).map_err(|e| SyncError::RootInaccessible {
				root: self.replica.clone(),
				source: e,
			})?;
		}

		let entries = read_entries(&self.source).map_err(|e| SyncError::RootInaccessible {
			root: self.source.clone(),
			source: e,
		})?;
		debug!("Propagating {} -> {}", self.source.display(), self.replica.display());
		self.propagate(Path::new(""), entries, sink, &mut summary);

		let entries = read_entries(&self.replica).map_err(|e| SyncError::RootInaccessible {
			root: self.replica.clone(),
			source: e,
		})?;
		debug!("Pruning {} against {}", self.replica.display(), self.source.display());
		self.prune(Path::new(""), entries, sink, &mut summary);

		Ok(summary)
	}

	/// Phase 1: walk the source tree top-down, creating directories and
	/// copying changed files into the replica. `rel` is the walked
	/// directory's path relative to both roots.
	fn propagate(
		&self,
		rel: &Path,
		entries: Vec<fs::DirEntry>,
		sink: &mut dyn EventSink,
		summary: &mut PassSummary,
	) {
		for entry in entries {
			let rel_child = rel.join(entry.file_name());
			let file_type = match entry.file_type() {
				Ok(t) => t,
				Err(e) => {
					skip(sink, summary, &self.source.join(&rel_child), &e);
					continue;
				}
			};

			if file_type.is_dir() {
				if let Err(e) = self.mirror_dir(&rel_child, sink, summary) {
					skip(sink, summary, &self.replica.join(&rel_child), &e);
					continue;
				}
				match read_entries(&self.source.join(&rel_child)) {
					Ok(children) => self.propagate(&rel_child, children, sink, summary),
					Err(e) => skip(sink, summary, &self.source.join(&rel_child), &e),
				}
			} else if file_type.is_file() {
				if let Err(e) = self.mirror_file(&rel_child, sink, summary) {
					skip(sink, summary, &self.source.join(&rel_child), &e);
				}
			} else {
				sink.warn(&format!(
					"Skipped unsupported entry (not a regular file or directory): '{}'",
					self.source.join(&rel_child).display()
				));
			}
		}
	}

	/// Ensure the replica directory for `rel` exists
	fn mirror_dir(
		&self,
		rel: &Path,
		sink: &mut dyn EventSink,
		summary: &mut PassSummary,
	) -> io::Result<()> {
		let dst = self.replica.join(rel);
		match fs::symlink_metadata(&dst) {
			Ok(meta) if meta.is_dir() => return Ok(()),
			Ok(_) => {
				// Stale file (or symlink) where the source has a directory
				fs::remove_file(&dst)?;
				emit(sink, summary, SyncEventKind::FileRemoved, &dst);
			}
			Err(e) if e.kind() == io::ErrorKind::NotFound => {}
			Err(e) => return Err(e),
		}
		fs::create_dir_all(&dst)?;
		emit(sink, summary, SyncEventKind::DirCreated, &dst);
		Ok(())
	}

	/// Copy the source file for `rel` into the replica when the replica copy
	/// is missing or its content fingerprint differs. Content is the sole
	/// signal: size and mtime are never used as shortcuts, so an external
	/// edit that preserves both is still detected.
	fn mirror_file(
		&self,
		rel: &Path,
		sink: &mut dyn EventSink,
		summary: &mut PassSummary,
	) -> io::Result<()> {
		let src = self.source.join(rel);
		let dst = self.replica.join(rel);

		let needs_copy = match fs::symlink_metadata(&dst) {
			Ok(meta) if meta.is_dir() => {
				// Stale directory where the source has a file
				fs::remove_dir_all(&dst)?;
				emit(sink, summary, SyncEventKind::DirRemoved, &dst);
				true
			}
			Ok(meta) if meta.is_file() => fingerprint(&src)? != fingerprint(&dst)?,
			Ok(_) => {
				// Symlink or special entry in the replica: replace with a
				// real copy rather than writing through it. The copy event
				// covers the mutation.
				fs::remove_file(&dst)?;
				true
			}
			Err(e) if e.kind() == io::ErrorKind::NotFound => true,
			Err(e) => return Err(e),
		};

		if needs_copy {
			fs::copy(&src, &dst)?;
			// Carry the source mtime forward so an unchanged file is a
			// fingerprint match (and a no-op) on the next pass.
			let meta = fs::metadata(&src)?;
			filetime::set_file_mtime(&dst, FileTime::from_last_modification_time(&meta))?;
			emit(sink, summary, SyncEventKind::FileCopied, &dst);
		}
		Ok(())
	}

	/// Phase 2: walk the replica tree top-down, removing entries whose
	/// corresponding source path no longer exists. A removed directory is
	/// one event; its contents are implicitly gone and not descended into.
	fn prune(
		&self,
		rel: &Path,
		entries: Vec<fs::DirEntry>,
		sink: &mut dyn EventSink,
		summary: &mut PassSummary,
	) {
		for entry in entries {
			let rel_child = rel.join(entry.file_name());
			let src = self.source.join(&rel_child);
			let dst = self.replica.join(&rel_child);

			let file_type = match entry.file_type() {
				Ok(t) => t,
				Err(e) => {
					skip(sink, summary, &dst, &e);
					continue;
				}
			};

			if file_type.is_dir() {
				match source_kind(&src) {
					Ok(Some(kind)) if kind.is_dir() => match read_entries(&dst) {
						Ok(children) => self.prune(&rel_child, children, sink, summary),
						Err(e) => skip(sink, summary, &dst, &e),
					},
					Ok(_) => {
						if let Err(e) = fs::remove_dir_all(&dst) {
							skip(sink, summary, &dst, &e);
						} else {
							emit(sink, summary, SyncEventKind::DirRemoved, &dst);
						}
					}
					Err(e) => skip(sink, summary, &src, &e),
				}
			} else {
				match source_kind(&src) {
					Ok(Some(kind)) if kind.is_file() => {}
					Ok(_) => {
						if let Err(e) = fs::remove_file(&dst) {
							skip(sink, summary, &dst, &e);
						} else {
							emit(sink, summary, SyncEventKind::FileRemoved, &dst);
						}
					}
					Err(e) => skip(sink, summary, &src, &e),
				}
			}
		}
	}
}

/// List a directory, surfacing the first error. Listing the whole directory
/// up front keeps the walk's mutations out of the iterator's way.
fn read_entries(dir: &Path) -> io::Result<Vec<fs::DirEntry>> {
	let mut entries = Vec::new();
	for entry in fs::read_dir(dir)? {
		entries.push(entry?);
	}
	Ok(entries)
}

/// Kind of the source entry at `path`, or None if it does not exist
fn source_kind(path: &Path) -> io::Result<Option<fs::Metadata>> {
	match fs::symlink_metadata(path) {
		Ok(meta) => Ok(Some(meta)),
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
		Err(e) => Err(e),
	}
}

fn emit(sink: &mut dyn EventSink, summary: &mut PassSummary, kind: SyncEventKind, path: &Path) {
	match kind {
		SyncEventKind::DirCreated => summary.dirs_created += 1,
		SyncEventKind::FileCopied => summary.files_copied += 1,
		SyncEventKind::DirRemoved => summary.dirs_removed += 1,
		SyncEventKind::FileRemoved => summary.files_removed += 1,
	}
	sink.event(&SyncEvent::new(kind, path));
}

/// Record a per-entry error and move on; the next pass retries.
fn skip(sink: &mut dyn EventSink, summary: &mut PassSummary, path: &Path, err: &io::Error) {
	summary.errors += 1;
	sink.warn(&format!("Skipped '{}': {}", path.display(), err));
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_summary_actions() {
		let summary = PassSummary {
			dirs_created: 1,
			files_copied: 2,
			dirs_removed: 3,
			files_removed: 4,
			errors: 9,
		};
		assert_eq!(summary.actions(), 10);
	}

	#[test]
	fn test_summary_display() {
		let summary = PassSummary { files_copied: 2, ..PassSummary::default() };
		assert_eq!(
			summary.to_string(),
			"0 directories created, 2 files copied, 0 directories removed, 0 files removed, 0 errors"
		);
	}
}

// vim: ts=4

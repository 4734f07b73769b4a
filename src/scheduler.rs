//! The pass loop: run a pass, report, sleep, repeat until shutdown

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::events::EventSink;
use crate::sync::Synchronizer;

/// Receiving half of the shutdown flag, held by the scheduling loop
pub type Shutdown = watch::Receiver<bool>;

/// Create the shutdown flag. The sender side belongs to whoever decides to
/// stop scheduling (normally the signal handler task).
pub fn shutdown_channel() -> (watch::Sender<bool>, Shutdown) {
	watch::channel(false)
}

/// Install SIGINT/SIGTERM handlers that flip the shutdown flag.
///
/// The flag is only observed between passes, so an in-flight pass always
/// runs to completion before the process winds down.
pub fn setup_signal_handlers(shutdown: watch::Sender<bool>) {
	tokio::spawn(async move {
		use tokio::signal;

		let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
			Ok(stream) => stream,
			Err(e) => {
				warn!("Failed to setup SIGTERM handler: {}. Process will not handle SIGTERM gracefully.", e);
				return;
			}
		};

		let mut sigint = match signal::unix::signal(signal::unix::SignalKind::interrupt()) {
			Ok(stream) => stream,
			Err(e) => {
				warn!("Failed to setup SIGINT handler: {}. Process will not handle SIGINT gracefully.", e);
				return;
			}
		};

		tokio::select! {
			_ = sigterm.recv() => debug!("Received SIGTERM, stopping after the current pass..."),
			_ = sigint.recv() => debug!("Received SIGINT, stopping after the current pass..."),
		}
		let _ = shutdown.send(true);
	});
}

/// Run reconciliation passes at a fixed interval until shutdown.
///
/// A pass that fails at the root level is logged and the loop waits for the
/// next tick; the filesystem may well be back by then. The sink is closed
/// on every exit path, so no buffered event line is lost.
pub async fn run(
	sync: &Synchronizer,
	sink: &mut dyn EventSink,
	interval: Duration,
	mut shutdown: Shutdown,
) -> Result<(), SyncError> {
	sink.info("Starting synchronization between folders");

	loop {
		sink.info(&format!(
			"Synchronizing '{}' -> '{}'",
			sync.source().display(),
			sync.replica().display()
		));
		match sync.run(sink) {
			Ok(summary) => {
				sink.info(&format!("Synchronization completed: {}", summary));
			}
			Err(e) => {
				warn!("Pass failed: {}", e);
				sink.warn(&format!("Synchronization pass failed: {}", e));
			}
		}

		if *shutdown.borrow() {
			break;
		}
		sink.info(&format!("Next synchronization in {} seconds", interval.as_secs()));
		tokio::select! {
			_ = tokio::time::sleep(interval) => {}
			changed = shutdown.changed() => {
				// A dropped sender means nobody can ever stop us otherwise;
				// treat it like a stop request.
				if changed.is_err() || *shutdown.borrow() {
					break;
				}
			}
		}
	}

	sink.info("Synchronization stopped by the user");
	sink.close().map_err(SyncError::Io)
}

// vim: ts=4

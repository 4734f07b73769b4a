use clap::{Arg, Command};
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use replicr::config::Config;
use replicr::logging::{self, LogSink};
use replicr::scheduler;
use replicr::sync::Synchronizer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
	logging::init_tracing();

	let matches = Command::new("replicr")
		.version("0.1.0")
		.about("One-way periodic folder mirroring utility")
		.arg(Arg::new("source").required(true).help("Source folder path"))
		.arg(Arg::new("replica").required(true).help("Replica folder path"))
		.arg(
			Arg::new("interval")
				.required(true)
				.value_parser(clap::value_parser!(u64).range(1..))
				.help("Sync interval in seconds"),
		)
		.arg(Arg::new("log_file").required(true).help("Log file path for details"))
		.get_matches();

	let config = Config {
		source: PathBuf::from(
			matches.get_one::<String>("source").ok_or("source argument required")?,
		),
		replica: PathBuf::from(
			matches.get_one::<String>("replica").ok_or("replica argument required")?,
		),
		interval: Duration::from_secs(
			*matches.get_one::<u64>("interval").ok_or("interval argument required")?,
		),
		log_file: PathBuf::from(
			matches.get_one::<String>("log_file").ok_or("log_file argument required")?,
		),
	};
	config.validate()?;

	let mut sink = LogSink::open(&config.log_file)
		.map_err(|e| format!("Cannot open log file '{}': {}", config.log_file.display(), e))?;

	let (stop_tx, stop_rx) = scheduler::shutdown_channel();
	scheduler::setup_signal_handlers(stop_tx);

	let sync = Synchronizer::new(&config.source, &config.replica);
	scheduler::run(&sync, &mut sink, config.interval, stop_rx).await?;

	Ok(())
}

// vim: ts=4

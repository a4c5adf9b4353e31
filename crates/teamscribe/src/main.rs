//! teamscribe: TeamCity service message publisher for test event streams
//!
//! This binary crate reads newline-delimited JSON test lifecycle events from
//! stdin (or a file) and writes `##teamcity[...]` service messages to stdout
//! (or a file), resolving the flow identifiers the TeamCity log consumer
//! requires.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use teamscribe::config::Config;
use teamscribe::pipeline::{RunStats, pump_events};
use teamscribe::publisher::TeamCityPublisher;

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the service message stream.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    if let Err(e) = config.validate() {
        error!(error = %e, "invalid configuration");
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(stats) => {
            info!(
                published = stats.events_published,
                parse_errors = stats.parse_errors,
                "run complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "publishing failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<RunStats> {
    let sink: Box<dyn Write + Send> = match &config.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };
    let publisher = TeamCityPublisher::new(sink);

    let stats = match &config.input {
        Some(path) => pump_events(BufReader::new(File::open(path)?), &publisher)?,
        None => pump_events(io::stdin().lock(), &publisher)?,
    };
    Ok(stats)
}

//! EmailShield CLI
//!
//! Command-line interface for signal extraction, single-email analysis,
//! batch analysis and content fingerprinting.

#![allow(clippy::print_stdout)]

mod io;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use application::services::{AnalysisService, BatchCancelHandle, BatchPipeline, fingerprint};
use chrono::Utc;
use clap::{Parser, Subcommand};
use domain::{
    BatchInput, BatchProgress, BatchReport, BatchStatus, EmailRecord, Report, StrongDigest,
    WeakDigest,
};
use infrastructure::{AppConfig, HttpClassifierAdapter, init_telemetry};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// EmailShield CLI
#[derive(Parser)]
#[command(name = "emailshield-cli")]
#[command(author, version, about = "Spam decision layer with authentication override", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, env = "EMAILSHIELD_CONFIG")]
    config: Option<PathBuf>,

    /// Classifier service base URL, overrides the configuration
    #[arg(long)]
    classifier_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the authentication signals found in an email
    Signals {
        /// Email file (reads stdin if omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Analyse a single email and print its report
    Analyze {
        /// Email file (reads stdin if omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Subject shown in the report
        #[arg(long)]
        subject: Option<String>,

        /// Sender shown in the report
        #[arg(long)]
        sender: Option<String>,

        /// Write the JSON report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyse a batch file
    ///
    /// Format: {"emails": [{"subject": "...", "body": "...", "sender": "..."}]}.
    /// Ctrl-C stops after the email currently being classified.
    Batch {
        /// Batch JSON file (reads stdin if omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Write the JSON batch report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the MD5 and SHA-256 digests of an email
    Fingerprint {
        /// Email file (reads stdin if omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Check whether the classifier service is reachable
    Health,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => AppConfig::load().context("Failed to load configuration")?,
    };
    if let Some(url) = &cli.classifier_url {
        config.classifier.base_url.clone_from(url);
    }
    config.validate()?;
    Ok(config)
}

fn analysis_service(config: &AppConfig) -> anyhow::Result<Arc<AnalysisService>> {
    let adapter = HttpClassifierAdapter::new(config.classifier.clone(), config.retry.clone())?;
    let service = AnalysisService::new(Arc::new(adapter))
        .with_extractor(config.signal_extractor()?)
        .with_engine(config.decision_engine());
    Ok(Arc::new(service))
}

fn spawn_progress_logger(mut rx: mpsc::UnboundedReceiver<BatchProgress>) {
    tokio::spawn(async move {
        while let Some(progress) = rx.recv().await {
            info!(
                processed = progress.processed,
                total = progress.total,
                percent = progress.fraction() * 100.0,
                "Batch progress"
            );
        }
    });
}

fn spawn_interrupt_watcher(cancel: BatchCancelHandle) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current email");
            cancel.cancel();
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let filter =
        log_filter_from_verbosity(cli.verbose).unwrap_or(config.telemetry.log_filter.as_str());
    init_telemetry(filter, config.log_format())?;

    match cli.command {
        Commands::Signals { file } => {
            let text = io::read_input(file.as_deref())?;
            let signals = config.signal_extractor()?.extract(&text);
            for entry in signals.iter() {
                println!("{:<8} {}", entry.protocol, entry.status);
            }
            println!(
                "Safe signals: {} (override at {})",
                signals.safe_count(),
                config.policy.safe_threshold
            );
        },

        Commands::Analyze {
            file,
            subject,
            sender,
            output,
        } => {
            let content = io::read_input(file.as_deref())?;
            let mut record = EmailRecord::new(content);
            record.subject = subject;
            record.sender = sender;

            let analyzed = analysis_service(&config)?
                .analyze_record(0, &record)
                .await?;
            let report = Report::project(&analyzed)
                .with_content(record.content.unwrap_or_default())
                .with_generated_at(Utc::now());
            io::write_output(&report, output.as_deref())?;
        },

        Commands::Batch { file, output } => {
            let input = BatchInput::from_json(&io::read_input(file.as_deref())?)?;
            let pipeline =
                BatchPipeline::new(analysis_service(&config)?).with_max_items(config.batch.max_items);

            let mut job = pipeline.start(input.emails)?;
            if let Some(rx) = job.take_progress_receiver() {
                spawn_progress_logger(rx);
            }
            spawn_interrupt_watcher(job.cancel_handle());

            let result = job.run().await;
            match result.status() {
                BatchStatus::Failed => warn!("Every email in the batch failed"),
                BatchStatus::PartiallyFailed => {
                    warn!(failed = result.failures.len(), "Some emails failed");
                },
                _ => {},
            }
            let report = BatchReport::project(&result).with_generated_at(Utc::now());
            io::write_output(&report, output.as_deref())?;
        },

        Commands::Fingerprint { file } => {
            let content = io::read_input(file.as_deref())?;
            let fp = fingerprint(&content);
            println!("{:<24} {}", WeakDigest::ALGORITHM, fp.weak);
            println!("{:<24} {}", StrongDigest::ALGORITHM, fp.strong);
        },

        Commands::Health => {
            let healthy = analysis_service(&config)?.is_classifier_healthy().await;
            println!(
                "Classifier at {}: {}",
                config.classifier.base_url,
                if healthy { "reachable" } else { "unreachable" }
            );
            if !healthy {
                anyhow::bail!("classifier service is unreachable");
            }
        },
    }

    Ok(())
}

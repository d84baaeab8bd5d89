mod cli;
mod scan;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bdrip_core::{
    find_blu_ray_discs, find_makemkv_binary, load_config, validate_config, BatchJob,
    ConversionBatch, MakemkvRunner, NzbgetReporter, PostProcessStatus, Reporter, TitleScanner,
    TracingReporter,
};

use cli::{Cli, Command};
use scan::{render_table, DiscScan};

/// Set by NZBGet for every post-processing script.
const NZBGET_MARKER_VARIABLE: &str = "NZBPP_DIRECTORY";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let nzbget = cli.nzbget || std::env::var_os(NZBGET_MARKER_VARIABLE).is_some();
    let reporter: Arc<dyn Reporter> = if nzbget {
        Arc::new(NzbgetReporter)
    } else {
        Arc::new(TracingReporter)
    };

    match cli.command.clone().unwrap_or(Command::Run) {
        Command::Run => {
            let status = match convert(cli.config.as_deref(), Arc::clone(&reporter)).await {
                Ok(status) => status,
                Err(e) => {
                    reporter.error(&format!("{:#}", e));
                    PostProcessStatus::Error
                }
            };
            std::process::exit(status.exit_code());
        }
        Command::Scan { root, discs, json } => {
            if let Err(e) = scan(cli.config.as_deref(), &root, discs, json, reporter).await {
                error!("{:#}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Converts the download described by the configuration.
async fn convert(config_path: Option<&Path>, reporter: Arc<dyn Reporter>) -> Result<PostProcessStatus> {
    let config = load_config(config_path).context("Failed to load configuration")?;
    validate_config(&config).context("Configuration validation failed")?;

    let runner = MakemkvRunner::new(makemkv_binary(config.makemkv.binary.as_deref())?);
    info!("Using MakeMKV binary {}", runner.binary().display());
    let job = BatchJob::from_config(&config)?;
    info!(
        "Converting {} from {:?} into {:?}",
        job.movie_name, job.download_directory, job.output_directory
    );

    let batch = ConversionBatch::new(runner, reporter);
    let report = batch
        .run(&job)
        .await
        .with_context(|| format!("Failed to convert {}", job.movie_name))?;

    Ok(report.status())
}

/// Prints the titles of every disc below `root`.
async fn scan(
    config_path: Option<&Path>,
    root: &Path,
    discs: i32,
    json: bool,
    reporter: Arc<dyn Reporter>,
) -> Result<()> {
    let config = load_config(config_path).context("Failed to load configuration")?;
    let binary = makemkv_binary(config.makemkv.binary.as_deref())?;
    let profile = config.makemkv.profile.as_deref();

    let found = find_blu_ray_discs(root, discs, reporter.as_ref())
        .with_context(|| format!("Failed to search {:?} for discs", root))?;
    if found.is_empty() {
        anyhow::bail!("No Blu-Ray disc found in {:?}", root);
    }

    let scanner = TitleScanner::new(MakemkvRunner::new(binary), Arc::clone(&reporter));
    let mut scans = Vec::with_capacity(found.len());
    for disc in found {
        let titles = scanner
            .scan(&disc, profile)
            .await
            .with_context(|| format!("Failed to scan {:?}", disc.location()))?;
        let selection = scanner.selector().select(&titles.records, 0, reporter.as_ref());
        scans.push(DiscScan::new(disc, titles, &selection));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&scans)?);
    } else {
        print!("{}", render_table(&scans));
    }
    Ok(())
}

fn makemkv_binary(configured: Option<&Path>) -> Result<PathBuf> {
    find_makemkv_binary(configured).with_context(|| match configured {
        Some(path) => format!("MakeMKV binary not found at {:?}", path),
        None => "makemkvcon not found on PATH".to_string(),
    })
}

// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Command-line interface for the OHPM dashboard generator.
//!
//! The binary collects packages of the given publishers and package names,
//! renders the dashboard table and patches it into a README. Every option can
//! also be supplied through the environment or a YAML settings file; explicit
//! flags take precedence over the file.

use std::{
    io::{self, Write},
    path::PathBuf,
    process,
};

use clap::{ArgAction, Parser};
use ohpm_dashboard::{
    Dashboard, DashboardConfig, DashboardSettings, Error, PackageRecord, load_settings,
    update_readme,
};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

/// Generate an OHPM package dashboard inside a README.
#[derive(Debug, Parser,)]
#[command(name = "ohpm-dashboard", version, about = "Render an OHPM package dashboard")]
struct Cli
{
    /// GitHub token; requests are anonymous without it.
    #[arg(long = "github-token", env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String,>,

    /// Markdown file containing the dashboard sentinels [default: README.md].
    #[arg(long = "filename", env = "OHPM_FILENAME", value_name = "PATH")]
    filename: Option<PathBuf,>,

    /// Comma-separated publisher IDs.
    #[arg(long = "publisher-list", env = "OHPM_PUBLISHER_LIST", value_name = "IDS")]
    publisher_list: Option<String,>,

    /// Comma-separated package names.
    #[arg(long = "package-list", env = "OHPM_PACKAGE_LIST", value_name = "NAMES")]
    package_list: Option<String,>,

    /// name | publishTime | ohpmLikes | ohpmDownloads | githubStars [default: name].
    #[arg(long = "sort-field", env = "OHPM_SORT_FIELD", value_name = "FIELD")]
    sort_field: Option<String,>,

    /// asc | desc [default: asc].
    #[arg(long = "sort-mode", env = "OHPM_SORT_MODE", value_name = "MODE")]
    sort_mode: Option<String,>,

    /// Packages fetched concurrently [default: 4].
    #[arg(long = "concurrency", env = "OHPM_CONCURRENCY", value_name = "N")]
    concurrency: Option<usize,>,

    /// Per-request registry timeout in seconds [default: 30].
    #[arg(long = "timeout", env = "OHPM_TIMEOUT", value_name = "SECS")]
    timeout_secs: Option<u64,>,

    /// YAML settings file; flags override its values.
    #[arg(long = "config", env = "OHPM_CONFIG", value_name = "PATH")]
    config: Option<PathBuf,>,

    /// Registry open API base URL.
    #[arg(long = "registry-url", env = "OHPM_REGISTRY_URL", value_name = "URL")]
    registry_url: Option<String,>,

    /// GitHub REST API base URL.
    #[arg(long = "github-api-url", env = "GITHUB_API_URL", value_name = "URL")]
    github_api_url: Option<String,>,

    /// Print the table to stdout instead of patching the file.
    #[arg(long = "dry-run", action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Print the sorted records as JSON instead of patching the file.
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors.
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,
}

impl Cli
{
    /// Settings explicitly provided on the command line or environment.
    fn overrides(&self,) -> DashboardSettings
    {
        DashboardSettings {
            github_token:   self.github_token.clone(),
            filename:       self.filename.clone(),
            publisher_list: self.publisher_list.clone(),
            package_list:   self.package_list.clone(),
            sort_field:     self.sort_field.clone(),
            sort_mode:      self.sort_mode.clone(),
            concurrency:    self.concurrency,
            registry_url:   self.registry_url.clone(),
            github_api_url: self.github_api_url.clone(),
            timeout_secs:   self.timeout_secs,
        }
    }

    fn log_level(&self,) -> LevelFilter
    {
        match (self.quiet, self.verbose,) {
            (true, _,) => LevelFilter::ERROR,
            (false, 0,) => LevelFilter::INFO,
            (false, 1,) => LevelFilter::DEBUG,
            (false, _,) => LevelFilter::TRACE,
        }
    }

    fn prints_to_stdout(&self,) -> bool
    {
        self.dry_run || self.json
    }
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    let cli = Cli::parse();
    init_tracing(cli.log_level(),);

    if let Err(error,) = run(cli,).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing(level: LevelFilter,)
{
    let filter = EnvFilter::builder().with_default_directive(level.into(),).from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter,)
        .with_target(false,)
        .with_writer(io::stderr,)
        .init();
}

/// Executes a dashboard run using parsed arguments.
///
/// # Errors
///
/// Propagates settings, validation and README I/O errors. Remote API failures
/// are logged by the pipeline and never surface here.
async fn run(cli: Cli,) -> Result<(), Error,>
{
    let config = resolve_config(&cli,)?;
    let filename = config.filename.clone();
    let show_progress = !cli.quiet && !cli.prints_to_stdout();

    let dashboard = Dashboard::new(config,)?.with_progress(show_progress,);
    let report = dashboard.build().await;

    if cli.json {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        return write_records(&mut handle, &report.records,);
    }

    if cli.dry_run {
        println!("{}", report.table);
        return Ok((),);
    }

    if update_readme(&filename, &report.table, report.total(),)? {
        info!("Dashboard with {} package(s) written to {}", report.total(), filename.display());
    }

    Ok((),)
}

/// Layers defaults, the optional settings file and command-line values.
fn resolve_config(cli: &Cli,) -> Result<DashboardConfig, Error,>
{
    let file_settings = match cli.config.as_deref() {
        Some(path,) => load_settings(path,)?,
        None => DashboardSettings::default(),
    };

    DashboardConfig::from_settings(file_settings.merge(cli.overrides(),),)
}

fn write_records<W: io::Write,>(writer: &mut W, records: &[PackageRecord],) -> Result<(), Error,>
{
    serde_json::to_writer_pretty(&mut *writer, records,)?;
    writeln!(writer).map_err(|source| Error::service(format!("failed to write stdout: {source}"),),)
}

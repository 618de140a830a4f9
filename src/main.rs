use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use hubaudit::Visibility;

mod cli;

#[derive(Parser)]
#[command(name = "hubaudit")]
#[command(about = "Audit Docker Hub repositories for required collaborators and visibility")]
#[command(version)]
struct Cli {
    /// Docker Hub username
    #[arg(short, long)]
    username: String,

    /// Docker Hub password or access token
    #[arg(short, long)]
    password: String,

    /// Collaborators to ensure on each repository (repeatable or comma separated)
    #[arg(short, long, num_args = 1..)]
    collaborators: Vec<String>,

    /// The maximum visibility allowed on repositories (public or private)
    #[arg(short, long)]
    visibility: Option<Visibility>,

    /// Check only one repository
    #[arg(short, long)]
    repository: Option<String>,

    /// Do not change the repositories, only warn of required changes
    #[arg(short, long = "dryrun", action = ArgAction::Count)]
    dryrun: u8,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Datadog API key for submitting the quota metric
    #[arg(long)]
    datadog_api_key: Option<String>,

    /// Datadog application key for submitting the quota metric
    #[arg(long)]
    datadog_app_key: Option<String>,

    /// Path to the config file (defaults to ~/.hubaudit/config.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exit with status 2 when any check failed or any violation was found
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    let args = cli::audit::AuditArgs {
        username: cli.username,
        password: cli.password,
        collaborators: cli.collaborators,
        visibility: cli.visibility,
        repository: cli.repository,
        dry_run: cli.dryrun > 0,
        datadog_api_key: cli.datadog_api_key,
        datadog_app_key: cli.datadog_app_key,
        config: cli.config,
        strict: cli.strict,
    };

    let code = cli::audit::audit_command(args).await?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

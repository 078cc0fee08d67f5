use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{error, info};

mod cli;

use cli::Cli;
use close_sub_issues::config::Config;
use close_sub_issues::logging::{LogLevelControl, report_fatal, setup_logging};
use close_sub_issues::tracker::GitHubClient;
use close_sub_issues::{output, pipeline};

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    // Validate before any client exists or any request goes out
    let parent = cli.inputs().validate()?;

    let tracker = GitHubClient::new(&cli.github_token, &config.github).context("Failed to create GitHub client")?;
    let mut sink = output::from_env();

    let result = pipeline::run(&tracker, &parent, &config.batch, sink.as_mut()).await?;

    if cli.is_verbose() {
        let line = format!("{} closed {}/{}", parent, result.closed_count(), result.total_count);
        if result.has_failures() {
            eprintln!("{}", line.yellow());
        } else {
            eprintln!("{}", line.green());
        }
    }
    Ok(())
}

fn execute(cli: &Cli, level_control: LogLevelControl) -> Result<()> {
    if let Some(path) = &cli.config {
        info!("Loading config from: {}", path.display());
    }
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    level_control.apply_config_level(config.log_level.as_deref());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run_application(cli, &config))
}

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging first
    let level_control = setup_logging(cli.is_verbose());

    if let Err(err) = execute(&cli, level_control) {
        error!("Error details: {:?}", err);
        report_fatal(&format!("Action failed: {:#}", err));
        std::process::exit(1);
    }
}

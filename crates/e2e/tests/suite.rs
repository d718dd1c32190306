//! Suite entry point
//!
//! This file is the test binary that drives the app on a live device
//! through the automation server. Run with:
//! `cargo test --package meridian-e2e --test suite -- --tag transaction`

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use meridian_common::{Fixtures, SuiteConfig};
use meridian_e2e::{E2eResult, SuiteRunner, Tag};

#[derive(Parser, Debug)]
#[command(name = "meridian-e2e")]
#[command(about = "UI end-to-end suite for the Meridian mobile app")]
struct Args {
    /// Path to the suite configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run only scenarios carrying this tag (all, transaction)
    #[arg(short, long)]
    tag: Option<String>,

    /// Run only a specific scenario by name
    #[arg(short, long)]
    scenario: Option<String>,

    /// Narrow --scenario to a single case
    #[arg(long, requires = "scenario")]
    case: Option<String>,

    /// Output directory for screenshots and the results report
    #[arg(short, long)]
    artifacts: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = rt.block_on(async_main(args));

    match result {
        Ok(success) => {
            if success {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> E2eResult<bool> {
    let mut config = SuiteConfig::load(args.config.as_deref())?;
    if let Some(artifacts) = args.artifacts {
        config.artifacts_dir = artifacts;
    }

    let fixtures = Fixtures::load()?;
    let runner = SuiteRunner::new(config, fixtures)?;

    let results = if let Some(name) = args.scenario.as_deref() {
        runner.run_scenario(name, args.case.as_deref()).await?
    } else if let Some(tag) = args.tag.as_deref() {
        runner.run_tagged(tag.parse::<Tag>()?).await
    } else {
        runner.run_all().await
    };

    runner.write_results(&results)?;

    Ok(results.failed == 0)
}

use std::process::ExitCode;

use anyhow::Context;
use log::{LevelFilter, error, info, warn};
use topic_sync::{PortalConfig, RequestClient, load_schedule, run};

extern crate env_logger;
extern crate log;

async fn run_job() -> anyhow::Result<()> {
    let config = PortalConfig::new().context("failed to load configuration")?;
    let topics = load_schedule(&config.schedule_path).with_context(|| {
        format!(
            "failed to read schedule from {}",
            config.schedule_path.display()
        )
    })?;
    info!(
        "Loaded {} topics from {}",
        topics.len(),
        config.schedule_path.display()
    );

    let client = RequestClient::new().context("failed to build HTTP client")?;
    run(&client, &config, &topics)
        .await
        .context("topic update aborted")?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    tokio::select! {
        result = run_job() => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{e:#}");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted; lessons already submitted keep their new topic");
            ExitCode::from(130)
        }
    }
}

//! ghdeploy - Entry Point
//!
//! One-shot deployment orchestrator: fetches the `dist` artifact produced
//! by the Actions run a deployment points at, stages it into a target
//! directory, and reports status transitions back to the deployment.

use clap::Parser;
use tracing::{error, info};

use ghdeploy::app::options::{AppOptions, Cli};
use ghdeploy::app::run::run;
use ghdeploy::logs::init_logging;
use ghdeploy::utils::version_info;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging("info") {
        eprintln!("Failed to initialize logging: {e}");
    }

    let options = match AppOptions::from_cli(cli) {
        Ok(options) => options,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let version = version_info();
    info!(
        "ghdeploy {} ({}): deploying {}/{} deployment {} into {}",
        version.version,
        version.git_hash,
        options.owner,
        options.repo,
        options.deployment_id,
        options.deploy_dir.display()
    );

    if run(options).await.is_err() {
        std::process::exit(1);
    }
}

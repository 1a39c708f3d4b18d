//! Project Operator
//!
//! Command-line entry point: runs the controller or prints manifests.

use anyhow::Result;
use clap::{Parser, Subcommand};
use project_operator::config::OperatorConfig;
use project_operator::kubernetes::{crd, K8sClient, KubeCluster};
use project_operator::shutdown::ShutdownCoordinator;
use project_operator::{controller, logging, OperatorError};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "PROJECT_OPERATOR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Project controller (default)
    Run,
    /// Print the Project CustomResourceDefinition as YAML
    Crd,
    /// Print a sample configuration file
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Crd => {
            print!("{}", crd::project_crd_yaml()?);
            Ok(())
        }
        Commands::Config => {
            print!("{}", OperatorConfig::generate_sample());
            Ok(())
        }
        Commands::Run => Ok(run(cli.config).await?),
    }
}

async fn run(config_path: Option<PathBuf>) -> project_operator::Result<()> {
    let config = OperatorConfig::load(config_path.as_deref())?;
    let _guard = logging::init(&config.logging)?;

    let client = K8sClient::connect(&config.kubernetes).await?;

    match client.server_version().await {
        Ok(version) => info!(
            api_server = %client.api_server(),
            version = %version,
            "Connected to Kubernetes"
        ),
        Err(e) => warn!(api_server = %client.api_server(), error = %e, "API server version check failed"),
    }

    let shutdown = ShutdownCoordinator::with_timeout(config.controller.shutdown_timeout());
    let cluster = KubeCluster::new(client);

    let controller_config = config.controller.clone();
    let controller_shutdown = shutdown.clone();
    let mut handle = tokio::spawn(async move {
        controller::run(cluster, &controller_config, controller_shutdown).await;
    });

    tokio::select! {
        _ = shutdown.wait_for_signal() => {
            match tokio::time::timeout(shutdown.timeout(), &mut handle).await {
                Ok(Ok(())) => info!("Shutdown complete"),
                Ok(Err(e)) => error!("Controller task failed: {}", e),
                Err(_) => {
                    warn!("Controller did not stop within {:?}, aborting", shutdown.timeout());
                    handle.abort();
                }
            }
        }
        result = &mut handle => {
            result.map_err(|e| OperatorError::Task(e.to_string()))?;
            warn!("Controller stopped unexpectedly");
        }
    }

    Ok(())
}

//! Multisig CLI - Main entry point

use clap::{Parser, Subcommand};
use multisig_core::Amount;
use multisig_rpc::{commands, AppContext};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "multisig")]
#[command(about = "Multisig - quorum-authorized transaction execution", long_about = None)]
struct Cli {
    /// Wallet config (JSON: owners, min_approvals)
    #[arg(short, long, env = "MULTISIG_CONFIG", default_value = "wallet.json")]
    config: PathBuf,

    /// Starting treasury balance used to pay executed transactions
    #[arg(long, default_value = "1000")]
    treasury: Amount,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the wallet config and list its owners
    Validate,

    /// Run a JSONL call script against a fresh wallet
    Run {
        /// Script path, one call per line
        script: PathBuf,
    },

    /// Run the submit/approve/revoke/execute walkthrough
    Demo {
        /// Value transferred by the demo transaction
        #[arg(long, default_value = "1")]
        value: Amount,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate => {
            commands::validate(&cli.config)?;
        }

        Commands::Run { script } => {
            let mut ctx = AppContext::from_config_file(&cli.config, cli.treasury)?;
            let summary = commands::run(&mut ctx, &script).await?;
            if summary.rejected > 0 {
                tracing::warn!(rejected = summary.rejected, "Some calls were rejected");
            }
        }

        Commands::Demo { value } => {
            let mut ctx = AppContext::from_config_file(&cli.config, cli.treasury)?;
            commands::demo(&mut ctx, value).await?;
        }
    }

    Ok(())
}

mod repl;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use subclaim_core::commands::Command;
use subclaim_core::{ClaimConfig, ClaimService, ClaimSession, RpcBackend};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "subclaim", about = "Claim a test.eth subdomain with your Lil Noun", version)]
pub(crate) struct Cli {
    /// Config file (default: <config dir>/subclaim/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wallet JSON-RPC endpoint, e.g. Frame
    #[arg(long, env = "SUBCLAIM_WALLET_URL")]
    wallet_url: Option<String>,

    /// Separate node for read-only calls (default: the wallet endpoint)
    #[arg(long, env = "SUBCLAIM_RPC_URL")]
    rpc_url: Option<String>,

    /// Allow plain-HTTP endpoints on non-loopback hosts
    #[arg(long)]
    insecure: bool,

    /// Run a single command and exit
    #[arg(long)]
    cmd: Option<String>,

    /// Output in JSON format (useful with --cmd)
    #[arg(long)]
    json: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    /// Defaults, then the config file, then flags and environment.
    fn claim_config(&self) -> Result<ClaimConfig> {
        let mut config = ClaimConfig::load(self.config.as_deref())?;
        if let Some(url) = &self.wallet_url {
            config.wallet_url = url.clone();
        }
        if let Some(url) = &self.rpc_url {
            config.rpc_url = Some(url.clone());
        }
        Ok(config)
    }

    fn service(&self) -> Result<ClaimService<RpcBackend>> {
        let config = self.claim_config()?;
        let backend = RpcBackend::new(&config, self.insecure)
            .context("Failed to set up wallet connection")?;
        Ok(ClaimService::new(backend, config))
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(cmd_str) = &cli.cmd {
        // One-shot mode
        run_oneshot(&cli, cmd_str).await
    } else {
        // REPL mode
        repl::run_repl(&cli).await
    }
}

async fn run_oneshot(cli: &Cli, cmd_str: &str) -> Result<()> {
    let service = cli.service()?;
    let mut session = ClaimSession::new(service.config().clone());

    let command = Command::parse(cmd_str)?;
    if command == Command::Exit {
        return Ok(());
    }

    let output = command
        .execute(&service, &mut session, cli.json, &mut |line: &str| {
            println!("{line}")
        })
        .await;
    let output = match output {
        Ok(output) => output,
        Err(e) if cli.json => {
            println!("{}", serde_json::json!({ "error": e.to_string() }));
            std::process::exit(1);
        }
        Err(e) => return Err(e),
    };
    if !output.is_empty() {
        println!("{output}");
    }

    // A claim that did not end registered is a failed run.
    if matches!(command, Command::Claim { .. }) && !session.is_registered() {
        std::process::exit(1);
    }
    Ok(())
}

//! pai-cli: command-line client for the Pai-Chain token ledger.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pai_telemetry::{init_logging, TelemetryConfig};
use pc_02_client::prelude::*;

/// Pai-Chain command-line client
#[derive(Parser, Debug)]
#[command(name = "pai-cli", version, about = "Command-line client for the Pai-Chain token ledger")]
struct Cli {
    /// Ledger JSON-RPC endpoint (overrides PAI_RPC_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Target chaincode id (overrides PAI_CHAINCODE_ID)
    #[arg(long)]
    chaincode: Option<String>,

    /// Hex-encoded secp256k1 private key
    #[arg(long, env = "PAI_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// rpc commands
    Rpc {
        #[command(subcommand)]
        command: RpcCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RpcCommand {
    /// User commands
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// Query the status of the chaincode
    Query,
    /// Show the chaincode id, or check a new one for this invocation only
    Chaincode {
        /// Chaincode id (use --chaincode or PAI_CHAINCODE_ID to keep it)
        id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Register the loaded public key
    Register,
    /// Fund another user: <to> <amount> [message]
    Fund {
        /// Fund arguments
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Query the status of a user
    Query {
        /// User id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&TelemetryConfig::for_service("pai-cli")).context("failed to initialize logging")?;

    let mut config = ClientConfig::from_env();
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(chaincode) = cli.chaincode {
        config.chaincode_name = chaincode;
    }

    let signer = match cli.private_key.as_deref() {
        Some(key) => LocalKeySigner::from_hex(key).context("invalid private key")?,
        None => LocalKeySigner::empty(),
    };
    if let Some(address) = signer.address() {
        tracing::info!(%address, "key loaded");
    }

    let transport = JsonRpcTransport::new(config.endpoint.clone(), config.request_timeout)
        .context("failed to create RPC transport")?;
    let mut manager = RpcManager::new(
        TransactionBuilder::new(HexAddressValidator, signer),
        RpcFireClient::new(transport, config.chaincode_name.clone()),
    );

    let Command::Rpc { command } = cli.command;
    match command {
        RpcCommand::Chaincode { id } => {
            let changed = id.is_some();
            if let Some(id) = id {
                manager.client_mut().set_chaincode_name(id);
            }
            println!("{}", chaincode_report(manager.client().chaincode_name(), changed));
        }
        RpcCommand::Query => {
            let status = manager.query_global().await?;
            println!("---------------- Chaincode status ----------------");
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        RpcCommand::User { command } => match command {
            UserCommand::Register => {
                let tx_id = manager.register(&[]).await?;
                println!("Registry public key ok, TX id is {tx_id}");
            }
            UserCommand::Fund { args } => {
                let tx_id = manager.fund(&args).await?;
                println!("Fund ok, TX id is {tx_id}");
            }
            UserCommand::Query { id } => {
                let user = manager.query_user(&id).await?;
                println!("---------------- Query user {id} ----------------");
                println!("{}", serde_json::to_string_pretty(&user)?);
            }
        },
    }

    Ok(())
}

/// Output of `rpc chaincode [id]`. A new id only lives for this process.
fn chaincode_report(current: &str, changed: bool) -> String {
    if changed {
        format!(
            "Set chaincode id as {current}\n\
             The id is not saved; pass --chaincode or set PAI_CHAINCODE_ID for later commands"
        )
    } else {
        format!("Current chaincode id is {current}")
    }
}

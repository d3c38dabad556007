//! Command-line front end for the bridge API.
//!
//! Mirrors the bridge page: connect a wallet, check the current account,
//! request a transfer, or follow account changes.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::debug;

use unicoin_bridge::{
    BridgeClient, BridgeError, Config, JsonRpcProvider, WalletAdapter, WalletProvider, WalletState,
};

#[derive(Parser)]
#[command(name = "bridge-cli")]
#[command(about = "UNICOIN cross-chain transfer client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Bridge API base url (defaults to the local bridge server)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Wallet JSON-RPC endpoint; without one no wallet is available
    #[arg(long, global = true)]
    wallet_rpc: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Request account access from the wallet
    Connect,

    /// Show the already authorised account
    Account,

    /// Request a cross-chain transfer
    Transfer {
        /// Receiver address
        #[arg(long, default_value = "")]
        to: String,

        /// Amount of tokens, e.g. 1000
        #[arg(long, default_value = "")]
        amount: String,

        /// ethToBsc or bscToEth
        #[arg(long, default_value = "ethToBsc")]
        direction: String,

        /// Sender address; defaults to the connected wallet account
        #[arg(long)]
        from: Option<String>,
    },

    /// Print wallet state whenever the account changes (Ctrl-C to stop)
    Watch,
}

fn print_wallet(state: &WalletState) {
    if state.is_connected() {
        println!("Connected: {}", state.short_address());
    } else {
        println!("Connect Wallet");
    }
    println!("{}", state.status);
}

#[tokio::main]
async fn main() -> Result<ExitCode, BridgeError> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.bridge_base_url = base_url;
    }
    if let Some(wallet_rpc) = cli.wallet_rpc {
        config.wallet_rpc_url = Some(wallet_rpc);
    }

    let rpc = config.wallet_rpc_url.as_deref().map(JsonRpcProvider::new).map(Arc::new);
    let adapter = WalletAdapter::new(
        rpc.clone()
            .map(|provider| provider as Arc<dyn WalletProvider>),
    );

    match cli.command {
        Commands::Connect => {
            let state = adapter.connect().await;
            print_wallet(&state);
            Ok(exit_code(state.is_connected()))
        }
        Commands::Account => {
            let state = adapter.current_account().await;
            print_wallet(&state);
            Ok(exit_code(state.is_connected()))
        }
        Commands::Transfer {
            to,
            amount,
            direction,
            from,
        } => {
            let from = match from {
                Some(from) => from,
                None => adapter.current_account().await.address,
            };
            let base_url = config.resolved_base_url();
            debug!("using bridge API at {}", base_url);

            let result = BridgeClient::http(base_url)
                .bridge_transfer(&from, &to, &amount, &direction)
                .await;
            println!("{}", result.status);
            Ok(exit_code(result.success))
        }
        Commands::Watch => {
            let initial = adapter.current_account().await;
            print_wallet(&initial);

            let Some(rpc) = rpc else {
                return Ok(ExitCode::FAILURE);
            };
            let poller = rpc.spawn_account_poller(config.wallet_poll_interval);
            let mut subscription = adapter.watch_accounts(initial);

            loop {
                tokio::select! {
                    changed = subscription.changed() => match changed {
                        Some(state) => print_wallet(&state),
                        None => break,
                    },
                    _ = tokio::signal::ctrl_c() => break,
                }
            }

            subscription.unsubscribe().await;
            poller.abort();
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

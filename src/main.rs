// fundme CLI - Drive the harness from the command line
//
// Deploys FundMe onto the persisted local chain, sends contributions,
// withdraws as the owner, and reports status. Failures print a
// diagnostic and exit non-zero.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::process;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use fundme::account::Accounts;
use fundme::chain::LocalChain;
use fundme::config::HarnessConfig;
use fundme::deploy::{MockExplorer, Orchestrator};
use fundme::oracle::{parse_units, WEI_PER_UNIT};
use fundme::storage::HarnessStore;

/// Accounts seeded on a fresh development chain
const ACCOUNT_COUNT: usize = 10;

/// Starting balance per seeded account, in whole units
const INITIAL_BALANCE_UNITS: u128 = 10_000;

#[derive(Parser)]
#[command(name = "fundme", version, about = "Development harness for the FundMe contract")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Network to operate on (overrides the config file)
    #[arg(long)]
    network: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Deploy FundMe (plus a mock price feed on development chains)
    Deploy,
    /// Send a contribution from the deployer account
    Fund {
        /// Amount in whole native units, e.g. "0.1"
        #[arg(long)]
        amount: String,
    },
    /// Drain the contract balance to the owner
    Withdraw {
        /// Use the storage-lean withdrawal variant
        #[arg(long)]
        cheaper: bool,
    },
    /// Show chain and contract status
    Status,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = HarnessConfig::load(cli.config.as_deref())?;
    if let Some(network) = cli.network {
        config.network = network;
    }

    let network = config.resolve_network()?;
    let store = HarnessStore::open(&config.data_dir)?;
    let accounts = Accounts::development(ACCOUNT_COUNT);

    let mut chain = match store.load_chain()? {
        Some(chain) if chain.chain_id() == network.chain_id => chain,
        Some(stale) => {
            warn!(
                stored = stale.chain_id(),
                selected = network.chain_id,
                "stored chain belongs to another network, starting fresh"
            );
            fresh_chain(network.chain_id, &accounts)
        }
        None => fresh_chain(network.chain_id, &accounts),
    };

    match cli.command {
        Command::Deploy => {
            let orchestrator = Orchestrator::new(config.clone())?;
            let explorer = MockExplorer::new();
            let record = orchestrator
                .deploy(&mut chain, accounts.deployer(), &explorer)
                .await?;

            store.save_deployment(&record)?;
            println!("FundMe deployed at {}", record.contract);
            println!("Price feed at     {}", record.price_feed);
        }
        Command::Fund { amount } => {
            let value = parse_units(&amount)?;
            let sender = accounts.deployer();
            println!("Funding contract with {amount} units...");
            chain.fund(sender, value)?;
            println!("Funded!");
        }
        Command::Withdraw { cheaper } => {
            let owner = accounts.deployer();
            let amount = if cheaper {
                chain.cheaper_withdraw(owner)?
            } else {
                chain.withdraw(owner)?
            };
            println!("Withdrew {} units", format_units(amount));
        }
        Command::Status => {
            println!("network:  {} (chain id {})", network.name, network.chain_id);
            match chain.contract_address() {
                Some(address) => {
                    let contract = chain.contract()?;
                    println!("contract: {address}");
                    println!("owner:    {}", contract.owner());
                    println!("balance:  {} units", format_units(contract.balance()));
                    println!("funders:  {}", contract.funder_count());
                }
                None => println!("contract: not deployed"),
            }
            if let Some(record) = store.load_deployment(network.chain_id)? {
                println!("deployed: {} (verified: {})", record.deployed_at, record.verified);
            }
            let stats = store.stats()?;
            println!(
                "storage:  {} keys, {} bytes on disk",
                stats.key_count, stats.disk_size_bytes
            );
        }
    }

    store.save_chain(&chain)?;
    store.flush()?;
    Ok(())
}

fn fresh_chain(chain_id: u64, accounts: &Accounts) -> LocalChain {
    LocalChain::new(chain_id).with_accounts(accounts.all(), INITIAL_BALANCE_UNITS * WEI_PER_UNIT)
}

/// Render smallest units as a whole-unit decimal string
fn format_units(amount: u128) -> String {
    let whole = amount / WEI_PER_UNIT;
    let frac = amount % WEI_PER_UNIT;
    if frac == 0 {
        whole.to_string()
    } else {
        let s = format!("{whole}.{frac:018}");
        s.trim_end_matches('0').to_string()
    }
}

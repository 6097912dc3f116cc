use clap::{Parser, Subcommand};
use coinbase_checkout::application::gateway::CoinbaseGateway;
use coinbase_checkout::config::GatewayConfig;
use coinbase_checkout::domain::payment::Payment;
use coinbase_checkout::domain::ports::PaymentStoreBox;
use coinbase_checkout::infrastructure::in_memory::InMemoryPaymentStore;
#[cfg(feature = "storage-rocksdb")]
use coinbase_checkout::infrastructure::rocksdb::RocksDBStore;
use coinbase_checkout::interfaces::json::payment_reader::PaymentReader;
use coinbase_checkout::interfaces::web::{checkout_redirect, handle_callback};
use miette::{IntoDiagnostic, Result, miette};
use std::fs::File;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Gateway configuration file (TOML). `COINBASE_*` variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the custom token derived for a payment
    Token {
        /// Payment record (JSON)
        payment: PathBuf,
    },
    /// Register a payment with the provider and print the checkout URL
    Checkout {
        /// Payment record (JSON)
        payment: PathBuf,
    },
    /// Verify a provider callback body against a payment
    Callback {
        /// Payment record (JSON), used unless the store already holds it
        payment: PathBuf,
        /// Raw callback body as received from the provider
        body: PathBuf,
    },
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(db_path: Option<PathBuf>) -> Result<PaymentStoreBox> {
    match db_path {
        Some(path) => Ok(Box::new(RocksDBStore::open(path).into_diagnostic()?)),
        None => Ok(Box::new(InMemoryPaymentStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(db_path: Option<PathBuf>) -> Result<PaymentStoreBox> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(Box::new(InMemoryPaymentStore::new()))
}

fn read_payment(path: PathBuf) -> Result<Payment> {
    let file = File::open(path).into_diagnostic()?;
    PaymentReader::new(file).read().into_diagnostic()
}

/// Returns the stored copy of `payment` if there is one, storing it otherwise.
async fn register(gateway: &CoinbaseGateway, payment: Payment) -> Result<Payment> {
    if let Some(stored) = gateway.store().get(&payment.token).await.into_diagnostic()? {
        return Ok(stored);
    }
    gateway
        .store()
        .save(payment.clone())
        .await
        .into_diagnostic()?;
    Ok(payment)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let config = GatewayConfig::load(cli.config.as_deref()).into_diagnostic()?;
    let store = open_store(cli.db_path)?;
    let gateway = CoinbaseGateway::new(config, store).into_diagnostic()?;

    match cli.command {
        Command::Token { payment } => {
            let payment = read_payment(payment)?;
            println!("{}", gateway.custom_token(&payment));
        }
        Command::Checkout { payment } => {
            let payment = register(&gateway, read_payment(payment)?).await?;
            let url = checkout_redirect(&gateway, &payment.token)
                .await
                .into_diagnostic()?
                .ok_or_else(|| miette!("payment {} is not stored", payment.token))?;
            println!("{}", url);
        }
        Command::Callback { payment, body } => {
            let payment = register(&gateway, read_payment(payment)?).await?;
            let body = std::fs::read(body).into_diagnostic()?;

            let response = handle_callback(&gateway, &payment.token, &body)
                .await
                .into_diagnostic()?;
            println!("{}", response.status);

            let stored = gateway
                .store()
                .get(&payment.token)
                .await
                .into_diagnostic()?
                .ok_or_else(|| miette!("payment {} is not stored", payment.token))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&stored).into_diagnostic()?
            );

            if !response.status.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

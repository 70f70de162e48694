use std::env;
use std::process;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use kerana::{Cli, Command, Dependencies, KeranaError, Settings};
use kerana_pipeline::TransferSummary;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("LOG_FORMAT").map(|f| f == "json").unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run(cli: Cli) -> Result<TransferSummary, KeranaError> {
    let settings = cli.connection.apply(Settings::from_env());
    let (database, collection) = cli.command.source();
    let config = cli.command.transfer_config();

    let dependencies = Dependencies::connect(&settings, database, collection).await?;

    let transfer = match &cli.command {
        Command::Transfer(_) => dependencies.generic_transfer(config),
        Command::Persons(_) => dependencies.person_transfer(config),
    };

    tokio::select! {
        result = transfer.run() => Ok(result?),
        _ = tokio::signal::ctrl_c() => {
            warn!("Received shutdown signal, stopping transfer");
            Err(KeranaError::Interrupted)
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(summary) => {
            info!(
                documents = summary.documents,
                batches = summary.batches,
                skipped = summary.skipped,
                "Transfer finished"
            );
        }
        Err(e) => {
            error!(error = %e, "Transfer failed");
            process::exit(1);
        }
    }
}

//! Command line interface.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use kerana_pipeline::TransferConfig;

use crate::config::Settings;

#[derive(Debug, Parser)]
#[command(name = "kerana")]
#[command(about = "Load MongoDB collections into an Elasticsearch-compatible search index", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection overrides. Unset flags fall back to the environment.
#[derive(Debug, Default, Args)]
pub struct ConnectionArgs {
    /// MongoDB connection string [env: MONGODB_URI]
    #[arg(long, global = true)]
    pub mongodb_uri: Option<String>,

    /// Search index URL [env: ELASTICSEARCH_URL]
    #[arg(long, global = true)]
    pub elasticsearch_url: Option<String>,

    /// Search index user [env: ELASTICSEARCH_USER]
    #[arg(long, global = true)]
    pub elasticsearch_user: Option<String>,

    /// Search index password [env: ELASTICSEARCH_PASSWORD]
    #[arg(long, global = true)]
    pub elasticsearch_password: Option<String>,
}

impl ConnectionArgs {
    /// Apply the flags that were given on top of `settings`.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(uri) = &self.mongodb_uri {
            settings.mongodb_uri = uri.clone();
        }
        if let Some(url) = &self.elasticsearch_url {
            settings.elasticsearch_url = url.clone();
        }
        if let Some(user) = &self.elasticsearch_user {
            settings.elasticsearch_user = user.clone();
        }
        if let Some(password) = &self.elasticsearch_password {
            settings.elasticsearch_password = password.clone();
        }
        settings
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Copy every document of a collection into an index
    Transfer(TransferArgs),
    /// Build the person name completion index
    Persons(PersonsArgs),
}

#[derive(Debug, Args)]
pub struct TransferArgs {
    /// Source database
    #[arg(long)]
    pub database: String,

    /// Source collection
    #[arg(long)]
    pub collection: String,

    /// Destination index
    #[arg(long)]
    pub index: String,

    /// Documents per bulk request [default: 10, or 100 for persons]
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Keep the existing index instead of recreating it
    #[arg(long)]
    pub no_reset: bool,

    /// Bulk request timeout in seconds
    #[arg(long, default_value = "60")]
    pub timeout: u64,
}

#[derive(Debug, Args)]
pub struct PersonsArgs {
    #[command(flatten)]
    pub transfer: TransferArgs,

    /// Log and skip records that cannot be shaped instead of stopping
    #[arg(long)]
    pub skip_malformed: bool,
}

impl TransferArgs {
    fn apply(&self, config: TransferConfig) -> TransferConfig {
        let batch_size = self.batch_size.unwrap_or(config.batch_size);
        config
            .with_batch_size(batch_size)
            .with_reset_index(!self.no_reset)
            .with_request_timeout(Duration::from_secs(self.timeout))
    }
}

impl Command {
    /// Source database and collection of the run.
    pub fn source(&self) -> (&str, &str) {
        let args = self.transfer_args();
        (&args.database, &args.collection)
    }

    /// Transfer settings for the run.
    pub fn transfer_config(&self) -> TransferConfig {
        match self {
            Command::Transfer(args) => args.apply(TransferConfig::generic(&args.index)),
            Command::Persons(args) => args
                .transfer
                .apply(TransferConfig::person(&args.transfer.index))
                .with_skip_malformed(args.skip_malformed),
        }
    }

    fn transfer_args(&self) -> &TransferArgs {
        match self {
            Command::Transfer(args) => args,
            Command::Persons(args) => &args.transfer,
        }
    }
}

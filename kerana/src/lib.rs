//! # Kerana
//!
//! Entry point library for the Kerana loader.
//!
//! This crate provides configuration, dependency wiring and the command line
//! for copying MongoDB collections into a search index.

pub mod cli;
pub mod config;

pub use cli::{Cli, Command, ConnectionArgs, TransferArgs};
pub use config::{Dependencies, Settings};

use kerana_pipeline::PipelineError;
use kerana_repository::{IndexStoreError, SourceError};
use thiserror::Error;

/// Errors that can occur while starting or running a transfer.
#[derive(Error, Debug)]
pub enum KeranaError {
    /// Source connection error.
    #[error("Source error: {0}")]
    SourceError(#[from] SourceError),

    /// Index store connection error.
    #[error("Index store error: {0}")]
    IndexStoreError(#[from] IndexStoreError),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] PipelineError),

    /// The run was interrupted before it finished.
    #[error("Interrupted")]
    Interrupted,
}

//! Configuration for the Kerana loader.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::Settings;

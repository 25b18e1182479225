//! PocketDoc command-line flows
//!
//! Each subcommand mirrors one screen of the mobile app: pick inputs, run
//! one transform into the managed library, report the result.

pub mod cli;
pub mod config;
pub mod flows;
pub mod logging;

pub use config::Config;
pub use flows::App;

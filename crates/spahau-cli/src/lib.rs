//! # spahau-cli
//!
//! Command-line client for the Spamhaus DNS blocklists.
//!
//! ## Modes
//!
//! - **Query** (default): look each address up and decode the answers
//! - **Hostname** (`-H`): print the reversed-octet query names only
//! - **Describe** (`-D`): decode return codes given on the command line
//! - **Self test** (`-T`): compare live answers for known addresses
//!
//! Results are printed as sentences or, with `--output json`, as a single
//! JSON object keyed by address.

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;

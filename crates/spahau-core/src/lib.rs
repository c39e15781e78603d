//! DNSBL lookups against Spamhaus-style zones.
//!
//! The pipeline for one address:
//!
//! ```text
//! "127.0.0.2"
//!   -> address::parse          127.0.0.2 (0x7F000002)
//!   -> hostname::build         2.0.0.127.zen.spamhaus.org
//!   -> Resolve::lookup         A records, capped, IPv4 only
//!   -> response::normalize     error short-circuit, sort, dedup
//!   -> classify::classify      "SBL - Spamhaus SBL Data"
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use spahau_core::{DnsblClient, QueryConfig, Response};
//!
//! async fn check() -> spahau_core::Result<()> {
//!     let client = DnsblClient::system(QueryConfig::default())?;
//!     for &code in &client.lookup("127.0.0.2").await? {
//!         println!("{}", Response::new(code));
//!     }
//!     Ok(())
//! }
//! ```

pub mod address;
pub mod classify;
pub mod client;
mod error;
pub mod hostname;
pub mod resolver;
pub mod response;
pub mod selftest;

pub use classify::{classify, Classification, Response};
pub use client::{DnsblClient, QueryConfig};
pub use error::{Result, SpahauError};
pub use hostname::DEFAULT_ZONE;
pub use resolver::{DnsResolver, RawResult, Resolve, StaticResolver, DEFAULT_MAX_ANSWERS};
pub use response::{normalize, ResponseCode, ResponseSet};

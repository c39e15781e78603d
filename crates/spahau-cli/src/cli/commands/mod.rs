//! Command implementations, one per mode.

pub mod describe;
pub mod hostname;
pub mod query;
pub mod selftest;

use spahau_core::{DnsblClient, QueryConfig};

use crate::output::{OutputFormat, Printer};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Zone and resolver settings
    pub query: QueryConfig,

    /// Output format
    pub output_format: OutputFormat,
}

impl Context {
    /// Create a DNSBL client backed by the system resolver.
    pub fn client(&self) -> anyhow::Result<DnsblClient> {
        Ok(DnsblClient::system(self.query.clone())?)
    }

    /// Create a printer for the configured output format.
    pub fn printer(&self) -> Printer {
        Printer::new(self.output_format)
    }
}

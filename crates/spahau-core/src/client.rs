//! The query pipeline: address text in, canonical response set out.

use tracing::{debug, instrument};

use crate::address;
use crate::error::Result;
use crate::hostname::{self, DEFAULT_ZONE};
use crate::resolver::{DnsResolver, RawResult, Resolve, DEFAULT_MAX_ANSWERS};
use crate::response::{normalize, ResponseSet};

/// Settings for a [`DnsblClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// DNSBL zone the reversed address is queried under.
    pub domain: String,
    /// Maximum number of address records examined per lookup.
    pub max_answers: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_ZONE.to_string(),
            max_answers: DEFAULT_MAX_ANSWERS,
        }
    }
}

impl QueryConfig {
    /// Use `domain` as the DNSBL zone.
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Examine at most `max_answers` address records per lookup.
    #[must_use]
    pub fn max_answers(mut self, max_answers: usize) -> Self {
        self.max_answers = max_answers;
        self
    }
}

/// DNSBL lookup client.
///
/// One lookup per call; nothing is cached between calls.
pub struct DnsblClient<R = DnsResolver> {
    config: QueryConfig,
    resolver: R,
}

impl DnsblClient<DnsResolver> {
    /// Create a client using the system DNS configuration.
    ///
    /// # Errors
    ///
    /// Returns `SpahauError::ResolverInit` if the system resolver cannot be
    /// created.
    pub fn system(config: QueryConfig) -> Result<Self> {
        let resolver = DnsResolver::system(config.max_answers)?;
        Ok(Self::new(config, resolver))
    }
}

impl<R: Resolve> DnsblClient<R> {
    /// Create a client with an explicit resolver.
    pub const fn new(config: QueryConfig, resolver: R) -> Self {
        Self { config, resolver }
    }

    /// The active configuration.
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Look up `address` in the configured zone.
    ///
    /// # Errors
    ///
    /// Returns `SpahauError::InvalidAddress` for malformed input and
    /// `SpahauError::ResolutionFailed` for DNS failures other than
    /// "no such name".
    #[instrument(skip(self), fields(zone = %self.config.domain))]
    pub async fn lookup(&self, address: &str) -> Result<ResponseSet> {
        let ip = address::parse(address)?;
        let name = hostname::build(ip, &self.config.domain);

        let raw = self.resolver.lookup(&name).await?;
        if raw == RawResult::NotFound {
            debug!(hostname = %name, "not listed");
        }
        Ok(normalize(raw.into_codes()))
    }
}

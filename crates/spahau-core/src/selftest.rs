//! Known answers for checking a live DNSBL.
//!
//! Spamhaus keeps `127.0.0.1` unlisted and `127.0.0.2` listed in the SBL,
//! XBL and PBL zones so that clients can verify their setup.

use tracing::debug;

use crate::classify::Response;
use crate::client::DnsblClient;
use crate::error::{Result, SpahauError};
use crate::resolver::Resolve;
use crate::response::{ResponseCode, ResponseSet};

/// A test address and the responses it must produce.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    /// Address to look up
    pub address: &'static str,
    /// Expected normalized response codes
    pub expected: &'static [u32],
}

impl Fixture {
    /// The expected result as a [`ResponseSet`].
    #[must_use]
    pub fn expected_set(&self) -> ResponseSet {
        self.expected.iter().copied().map(ResponseCode).collect()
    }
}

/// Fixture table.
pub const FIXTURES: &[Fixture] = &[
    Fixture {
        address: "127.0.0.1",
        expected: &[],
    },
    Fixture {
        address: "127.0.0.2",
        expected: &[0x7F00_0002, 0x7F00_0004, 0x7F00_000A],
    },
];

/// Find the fixture for `address`.
///
/// # Errors
///
/// Returns `SpahauError::UnknownFixture` if the table has no entry.
pub fn fixture(address: &str) -> Result<&'static Fixture> {
    FIXTURES
        .iter()
        .find(|f| f.address == address)
        .ok_or_else(|| SpahauError::UnknownFixture(address.to_string()))
}

/// Render a set as `'a.b.c.d - desc' ...` for progress and error messages.
#[must_use]
pub fn render(set: &ResponseSet) -> String {
    set.iter()
        .map(|&code| format!("'{}'", Response::new(code)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Outcome of one self-test lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfTestReport {
    pub address: String,
    pub expected: ResponseSet,
    pub actual: ResponseSet,
}

impl SelfTestReport {
    /// True if actual and expected agree in count and content.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }

    /// Convert a failed report into a `SelfTestMismatch` error.
    ///
    /// # Errors
    ///
    /// Returns `SpahauError::SelfTestMismatch` when the report did not pass.
    pub fn into_result(self) -> Result<Self> {
        if self.passed() {
            return Ok(self);
        }
        Err(SpahauError::SelfTestMismatch {
            expected: render(&self.expected),
            actual: render(&self.actual),
            address: self.address,
        })
    }
}

/// Look up a fixture address and compare against the table.
///
/// A lookup failure is fatal here, unlike in normal mode.
///
/// # Errors
///
/// Returns `SpahauError::UnknownFixture` for addresses outside the table and
/// propagates lookup failures.
pub async fn run<R: Resolve>(client: &DnsblClient<R>, address: &str) -> Result<SelfTestReport> {
    let fixture = fixture(address)?;
    let expected = fixture.expected_set();
    debug!(address, expected = expected.len(), "running self test");

    let actual = client.lookup(fixture.address).await?;
    Ok(SelfTestReport {
        address: fixture.address.to_string(),
        expected,
        actual,
    })
}

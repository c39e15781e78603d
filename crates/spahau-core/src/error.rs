use thiserror::Error;

/// Result type alias for DNSBL operations
pub type Result<T> = std::result::Result<T, SpahauError>;

/// Errors that can occur while querying a DNSBL zone
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpahauError {
    /// The input text is not a dotted-quad IPv4 address
    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    /// DNS infrastructure failure (anything but "no such name")
    #[error("could not query '{hostname}': {reason}")]
    ResolutionFailed {
        /// The DNSBL hostname that was being resolved
        hostname: String,
        /// Resolver-provided description of the failure
        reason: String,
    },

    /// The system resolver could not be set up
    #[error("could not initialize the DNS resolver: {0}")]
    ResolverInit(String),

    /// Self-test requested for an address with no fixture
    #[error("no selftest definition for address '{0}'")]
    UnknownFixture(String),

    /// Self-test result differs from the fixture
    #[error("mismatch for {address}: expected [{expected}], got [{actual}]")]
    SelfTestMismatch {
        /// The fixture address
        address: String,
        /// Expected responses, rendered for display
        expected: String,
        /// Actual responses, rendered for display
        actual: String,
    },
}

impl SpahauError {
    /// Returns true if the error only affects the address being processed
    /// and the remaining addresses should still be handled
    #[must_use]
    pub const fn is_per_address(&self) -> bool {
        matches!(
            self,
            Self::InvalidAddress(_) | Self::ResolutionFailed { .. }
        )
    }
}

//! DNSBL query name construction.
//!
//! Standard DNSBL pattern: reverse the IP octets and query under the zone.
//! Example: checking 1.2.3.4 against `zen.spamhaus.org` queries
//! `4.3.2.1.zen.spamhaus.org`.

use std::net::Ipv4Addr;

use tracing::debug;

use crate::address;
use crate::error::Result;

/// Default DNSBL zone.
pub const DEFAULT_ZONE: &str = "zen.spamhaus.org";

/// Reverse an IPv4 address for DNSBL lookup.
///
/// Converts `1.2.3.4` into `4.3.2.1` (without zone suffix).
#[must_use]
pub fn reverse_ipv4(ip: Ipv4Addr) -> String {
    let octets = ip.octets();
    format!("{}.{}.{}.{}", octets[3], octets[2], octets[1], octets[0])
}

/// Build the full DNSBL query name for an address under a zone.
#[must_use]
pub fn build(ip: Ipv4Addr, zone: &str) -> String {
    let hostname = format!("{}.{zone}", reverse_ipv4(ip));
    debug!(address = %ip, zone, hostname = %hostname, "built DNSBL hostname");
    hostname
}

/// Parse `text` and build its DNSBL query name.
///
/// # Errors
///
/// Returns `SpahauError::InvalidAddress` if `text` is not a dotted quad.
pub fn build_from_text(text: &str, zone: &str) -> Result<String> {
    address::parse(text).map(|ip| build(ip, zone))
}

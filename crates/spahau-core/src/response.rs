//! DNSBL response codes and normalization of raw resolver answers.
//!
//! A DNSBL answers a listed address with one or more `127.x.x.x` records.
//! The canonical [`ResponseSet`] is one of:
//!
//! - empty: the address is not listed
//! - a single error code (`127.255.255.x`), which supersedes everything else
//! - one or more classification codes, sorted ascending with no repeats

use std::fmt;
use std::net::Ipv4Addr;
use std::slice;

use serde::{Serialize, Serializer};
use tracing::debug;

/// Mask selecting the zone part of a response code.
pub const ZONE_MASK: u32 = 0xFFFF_FF00;

/// Zone part of the `127.255.255.x` error range.
pub const ERROR_ZONE: u32 = 0x7FFF_FF00;

/// A 32-bit response code returned for a DNSBL query.
///
/// Semantically an IPv4 address in big-endian order, interpreted as a
/// classification code rather than a routable address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResponseCode(pub u32);

impl ResponseCode {
    /// Raw 32-bit value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Zone part of the code (low octet cleared).
    #[must_use]
    pub const fn zone(self) -> u32 {
        self.0 & ZONE_MASK
    }

    /// True for the `127.255.255.x` provider error range.
    #[must_use]
    pub const fn is_error(self) -> bool {
        self.zone() == ERROR_ZONE
    }

    /// The code as an IPv4 address.
    #[must_use]
    pub fn to_ipv4(self) -> Ipv4Addr {
        Ipv4Addr::from(self.0)
    }
}

impl From<Ipv4Addr> for ResponseCode {
    fn from(addr: Ipv4Addr) -> Self {
        Self(u32::from(addr))
    }
}

impl From<u32> for ResponseCode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_ipv4(), f)
    }
}

impl Serialize for ResponseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The canonical result of a single DNSBL lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResponseSet {
    /// No records: the address is not listed.
    #[default]
    NotListed,
    /// The provider rejected the query; reported alone.
    Error(ResponseCode),
    /// Classification codes, sorted ascending and deduplicated. Never empty.
    Listed(Vec<ResponseCode>),
}

impl ResponseSet {
    /// The codes in the set, in canonical order.
    #[must_use]
    pub fn codes(&self) -> &[ResponseCode] {
        match self {
            Self::NotListed => &[],
            Self::Error(code) => slice::from_ref(code),
            Self::Listed(codes) => codes,
        }
    }

    /// Number of codes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes().len()
    }

    /// True when the address is not listed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::NotListed)
    }

    /// The error code, if the provider rejected the query.
    #[must_use]
    pub const fn error(&self) -> Option<ResponseCode> {
        match self {
            Self::Error(code) => Some(*code),
            _ => None,
        }
    }

    /// Iterate over the codes in canonical order.
    pub fn iter(&self) -> slice::Iter<'_, ResponseCode> {
        self.codes().iter()
    }
}

impl<'a> IntoIterator for &'a ResponseSet {
    type Item = &'a ResponseCode;
    type IntoIter = slice::Iter<'a, ResponseCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<ResponseCode> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = ResponseCode>>(iter: I) -> Self {
        normalize(iter)
    }
}

/// Normalize raw resolver answers into a [`ResponseSet`].
///
/// Answers are scanned in resolver order. The first error code stops the
/// scan and is returned alone. Otherwise all codes are sorted ascending and
/// exact duplicates removed.
pub fn normalize<I>(raw: I) -> ResponseSet
where
    I: IntoIterator<Item = ResponseCode>,
{
    let mut codes = Vec::new();
    for code in raw {
        debug!(code = %code, "got response code");
        if code.is_error() {
            debug!(code = %code, "only returning the error code");
            return ResponseSet::Error(code);
        }
        codes.push(code);
    }

    if codes.is_empty() {
        return ResponseSet::NotListed;
    }

    codes.sort_unstable();
    codes.dedup();
    debug!(count = codes.len(), "normalized responses");
    ResponseSet::Listed(codes)
}

//! Human-readable classification of Spamhaus response codes.
//!
//! Lookup order, first match wins:
//!
//! 1. exact code (list sub-types and specific provider errors)
//! 2. zone part of the code (`code & 0xFFFFFF00`)
//! 3. `UNKNOWN - unexpected Spamhaus response`

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::response::ResponseCode;

/// A blocklist category or provider error for a response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Short list tag (`SBL`, `XBL`, `PBL`, `DBL`, `ZRD`, `ERROR`, `UNKNOWN`)
    pub tag: &'static str,
    /// Longer description within the list
    pub reason: &'static str,
}

impl Classification {
    const fn new(tag: &'static str, reason: &'static str) -> Self {
        Self { tag, reason }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.tag, self.reason)
    }
}

const EXACT: &[(u32, Classification)] = &[
    (0x7F00_0002, Classification::new("SBL", "Spamhaus SBL Data")),
    (0x7F00_0003, Classification::new("SBL", "Spamhaus SBL CSS Data")),
    (0x7F00_0004, Classification::new("XBL", "CBL Data")),
    (0x7F00_0009, Classification::new("SBL", "Spamhaus DROP/EDROP Data")),
    (0x7F00_000A, Classification::new("PBL", "ISP Maintained")),
    (0x7F00_000B, Classification::new("PBL", "Spamhaus Maintained")),
    (0x7F00_0102, Classification::new("DBL", "spam domain")),
    (0x7F00_0104, Classification::new("DBL", "phish domain")),
    (0x7F00_0105, Classification::new("DBL", "malware domain")),
    (0x7F00_0106, Classification::new("DBL", "Internet C&C domain")),
    (0x7F00_0166, Classification::new("DBL", "abused legit spam")),
    (
        0x7F00_0167,
        Classification::new("DBL", "abused spammed redirector domain"),
    ),
    (0x7F00_0168, Classification::new("DBL", "abused legit phish")),
    (0x7F00_0169, Classification::new("DBL", "abused legit malware")),
    (0x7F00_016A, Classification::new("DBL", "abused legit botnet C&C")),
    (0x7F00_01FF, Classification::new("DBL", "IP queries prohibited!")),
    (
        0x7FFF_FFFC,
        Classification::new("ERROR", "Typing error in DNSBL name"),
    ),
    (
        0x7FFF_FFFE,
        Classification::new("ERROR", "Anonymous query through public resolver"),
    ),
    (
        0x7FFF_FFFF,
        Classification::new("ERROR", "Excessive number of queries"),
    ),
];

const ZONES: &[(u32, Classification)] = &[
    (0x7F00_0000, Classification::new("SBL", "Spamhaus IP Blocklists")),
    (
        0x7F00_0100,
        Classification::new("DBL", "Spamhaus Domain Blocklists"),
    ),
    (
        0x7F00_0200,
        Classification::new("ZRD", "Spamhaus Zero Reputation Domains list"),
    ),
    (
        0x7FFF_FF00,
        Classification::new("ERROR", "could not obtain a Spamhaus response"),
    ),
];

/// Fallback for codes matching neither table.
pub const UNKNOWN: Classification = Classification::new("UNKNOWN", "unexpected Spamhaus response");

fn find(table: &[(u32, Classification)], value: u32) -> Option<Classification> {
    table
        .iter()
        .find(|(code, _)| *code == value)
        .map(|(_, class)| *class)
}

/// Classify a response code. Never fails.
#[must_use]
pub fn classify(code: ResponseCode) -> Classification {
    debug!(code = %code, "classifying response");
    find(EXACT, code.value())
        .or_else(|| find(ZONES, code.zone()))
        .unwrap_or(UNKNOWN)
}

/// A response code together with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Response {
    /// The code as returned by the DNSBL
    pub address: ResponseCode,
    #[serde(flatten)]
    pub classification: Classification,
}

impl Response {
    /// Classify `code`.
    #[must_use]
    pub fn new(code: ResponseCode) -> Self {
        Self {
            address: code,
            classification: classify(code),
        }
    }
}

impl From<ResponseCode> for Response {
    fn from(code: ResponseCode) -> Self {
        Self::new(code)
    }
}

/// `a.b.c.d - TAG - reason`
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.address, self.classification)
    }
}

/// Render a response code for display: `"a.b.c.d - <description>"`.
#[must_use]
pub fn format(code: ResponseCode) -> String {
    Response::new(code).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(value: u32) -> String {
        classify(ResponseCode(value)).to_string()
    }

    #[test]
    fn exact_matches() {
        assert_eq!(desc(0x7F00_0002), "SBL - Spamhaus SBL Data");
        assert_eq!(desc(0x7F00_0004), "XBL - CBL Data");
        assert_eq!(desc(0x7F00_000A), "PBL - ISP Maintained");
        assert_eq!(desc(0x7F00_0106), "DBL - Internet C&C domain");
        assert_eq!(desc(0x7F00_01FF), "DBL - IP queries prohibited!");
        assert_eq!(desc(0x7FFF_FFFF), "ERROR - Excessive number of queries");
        assert_eq!(
            desc(0x7FFF_FFFE),
            "ERROR - Anonymous query through public resolver"
        );
    }

    #[test]
    fn zone_matches() {
        assert_eq!(desc(0x7F00_0005), "SBL - Spamhaus IP Blocklists");
        assert_eq!(desc(0x7F00_0103), "DBL - Spamhaus Domain Blocklists");
        assert_eq!(
            desc(0x7F00_0202),
            "ZRD - Spamhaus Zero Reputation Domains list"
        );
        assert_eq!(
            desc(0x7FFF_FF01),
            "ERROR - could not obtain a Spamhaus response"
        );
    }

    #[test]
    fn unknown_codes() {
        assert_eq!(desc(0x7F00_0300), "UNKNOWN - unexpected Spamhaus response");
        assert_eq!(desc(0x0A00_0001), "UNKNOWN - unexpected Spamhaus response");
        assert_eq!(classify(ResponseCode(0)), UNKNOWN);
    }

    #[test]
    fn exact_codes_are_unique() {
        for (idx, (code, _)) in EXACT.iter().enumerate() {
            assert!(
                EXACT[idx + 1..].iter().all(|(other, _)| other != code),
                "duplicate exact code {code:08X}"
            );
        }
    }

    #[test]
    fn formatted_response() {
        assert_eq!(format(ResponseCode(0x7F00_0002)), "127.0.0.2 - SBL - Spamhaus SBL Data");
        assert_eq!(
            format(ResponseCode(0x7F00_0300)),
            "127.0.3.0 - UNKNOWN - unexpected Spamhaus response"
        );
    }

    #[test]
    fn response_serializes_flat() {
        let json = serde_json::to_value(Response::new(ResponseCode(0x7F00_000A))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "address": "127.0.0.10",
                "tag": "PBL",
                "reason": "ISP Maintained",
            })
        );
    }
}

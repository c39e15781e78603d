//! Dotted-quad IPv4 text <-> 32-bit value conversion.
//!
//! Values keep network byte order semantics: `a.b.c.d` is
//! `a << 24 | b << 16 | c << 8 | d`.
//!
//! Parsing is strict decimal: exactly four octets in `0..=255`, no
//! leading zeros, no surrounding whitespace, no hex/octal/short forms.

use std::net::Ipv4Addr;

use tracing::debug;

use crate::error::{Result, SpahauError};

/// Parse a dotted-quad IPv4 address.
///
/// # Errors
///
/// Returns `SpahauError::InvalidAddress` for anything that is not exactly
/// four decimal octets separated by dots.
pub fn parse(text: &str) -> Result<Ipv4Addr> {
    debug!(address = text, "converting address");
    let addr: Ipv4Addr = text
        .parse()
        .map_err(|_| SpahauError::InvalidAddress(text.to_string()))?;
    debug!(address = text, value = %format_args!("{:08X}", u32::from(addr)), "converted address");
    Ok(addr)
}

/// Parse a dotted-quad IPv4 address into its big-endian numeric value.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_value(text: &str) -> Result<u32> {
    parse(text).map(u32::from)
}

/// Render a 32-bit value as a dotted quad.
#[must_use]
pub fn format(value: u32) -> String {
    Ipv4Addr::from(value).to_string()
}

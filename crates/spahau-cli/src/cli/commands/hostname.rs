//! `spahau -H ADDRESS...` - print the DNSBL query names, no DNS traffic.

use anyhow::Result;
use spahau_core::hostname;

use super::Context;
use crate::output::warn;

pub fn execute(ctx: &Context, addresses: &[String]) -> Result<()> {
    let mut printer = ctx.printer();
    for address in addresses {
        match hostname::build_from_text(address, &ctx.query.domain) {
            Ok(name) => printer.hostname(address, &name),
            Err(e) => {
                warn(&e);
                printer.failed(address);
            }
        }
    }
    printer.finish()
}

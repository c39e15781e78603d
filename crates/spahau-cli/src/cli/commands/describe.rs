//! `spahau -D CODE...` - describe DNSBL return codes.

use anyhow::Result;
use spahau_core::{address, Response, ResponseCode};

use super::Context;
use crate::output::warn;

pub fn execute(ctx: &Context, codes: &[String]) -> Result<()> {
    let mut printer = ctx.printer();
    for text in codes {
        match address::parse_value(text) {
            Ok(value) => printer.describe(text, &Response::new(ResponseCode(value)))?,
            Err(_) => {
                warn(format_args!("could not parse '{text}'"));
                printer.failed(text);
            }
        }
    }
    printer.finish()
}

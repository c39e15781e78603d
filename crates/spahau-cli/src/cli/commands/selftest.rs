//! `spahau -T ADDRESS...` - check a live zone against known answers.

use anyhow::Result;
use spahau_core::{selftest, DnsblClient, Resolve};

use super::Context;
use crate::output::{count_line, Printer};

pub async fn execute(ctx: &Context, addresses: &[String]) -> Result<()> {
    let client = ctx.client()?;
    let mut printer = ctx.printer();
    run(&client, addresses, &mut printer).await?;
    printer.finish()
}

/// Any lookup failure, unknown address or mismatch aborts the run.
pub async fn run<R: Resolve>(
    client: &DnsblClient<R>,
    addresses: &[String],
    printer: &mut Printer,
) -> Result<()> {
    for address in addresses {
        let fixture = selftest::fixture(address)?;
        if printer.is_pretty() {
            println!(
                "Querying '{}', {}",
                fixture.address,
                count_line("expecting", &fixture.expected_set())
            );
        }

        let report = selftest::run(client, address).await?;
        if printer.is_pretty() {
            println!("{}", count_line("...got", &report.actual));
        }

        let report = report.into_result()?;
        printer.lookup(&report.address, &report.actual)?;
    }
    Ok(())
}

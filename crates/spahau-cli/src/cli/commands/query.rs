//! `spahau ADDRESS...` - look addresses up in the DNSBL zone.

use anyhow::Result;
use spahau_core::{DnsblClient, Resolve};
use tracing::debug;

use super::Context;
use crate::output::{warn, Printer};

pub async fn execute(ctx: &Context, addresses: &[String]) -> Result<()> {
    let client = ctx.client()?;
    let mut printer = ctx.printer();
    run(&client, addresses, &mut printer).await?;
    printer.finish()
}

/// Look up each address in turn. Per-address failures are reported as
/// warnings and do not stop the batch.
pub async fn run<R: Resolve>(
    client: &DnsblClient<R>,
    addresses: &[String],
    printer: &mut Printer,
) -> Result<()> {
    for address in addresses {
        debug!(address = %address, "about to check");
        match client.lookup(address).await {
            Ok(set) => printer.lookup(address, &set)?,
            Err(e) if e.is_per_address() => {
                warn(&e);
                warn(format_args!("could not obtain a result for '{address}'"));
                printer.failed(address);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use spahau_core::{QueryConfig, StaticResolver};

    use super::*;
    use crate::output::OutputFormat;

    #[tokio::test]
    async fn failures_do_not_stop_the_batch() {
        let resolver = StaticResolver::new()
            .with_failure("2.0.0.127.zen.spamhaus.org", "SERVFAIL")
            .with_codes("4.0.0.127.zen.spamhaus.org", &[0x7F00_0004]);
        let client = DnsblClient::new(QueryConfig::default(), resolver);
        let addresses: Vec<String> = ["127.0.0.2", "not-an-address", "127.0.0.4", "127.0.0.1"]
            .iter()
            .map(ToString::to_string)
            .collect();

        let mut printer = Printer::new(OutputFormat::Json);
        run(&client, &addresses, &mut printer).await.unwrap();

        let collected = printer.collected();
        assert_eq!(collected.len(), 4);
        assert_eq!(collected["127.0.0.2"], Value::Null);
        assert_eq!(collected["not-an-address"], Value::Null);
        assert_eq!(
            collected["127.0.0.4"],
            json!([{"address": "127.0.0.4", "tag": "XBL", "reason": "CBL Data"}])
        );
        assert_eq!(collected["127.0.0.1"], json!([]));
    }
}

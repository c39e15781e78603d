//! spahau - check IPv4 addresses against the Spamhaus DNS blocklists.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    spahau_cli::run().await
}

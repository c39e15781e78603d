//! Command-line argument definitions using clap.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::output::OutputFormat;

/// Check IPv4 addresses against the Spamhaus DNS blocklists
///
/// Each address is reversed and looked up under the RBL zone
/// (default: zen.spamhaus.org); any returned 127.x.x.x codes are
/// decoded into blocklist categories or provider errors.
#[derive(Parser, Debug)]
#[command(name = "spahau")]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").args(["describe", "hostname", "selftest"])))]
pub struct Cli {
    /// Describe the specified RBL return codes/addresses
    #[arg(short = 'D', long)]
    pub describe: bool,

    /// Specify the RBL domain to test against (default: zen.spamhaus.org)
    #[arg(short = 'd', long, env = "SPAHAU_DOMAIN", value_name = "RBL.DOMAIN")]
    pub domain: Option<String>,

    /// Only output the RBL hostnames, do not send queries
    #[arg(short = 'H', long)]
    pub hostname: bool,

    /// Run a self test: try to obtain some expected responses
    #[arg(short = 'T', long)]
    pub selftest: bool,

    /// Verbose operation; display diagnostic output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Examine at most this many address records per lookup (default: 15)
    #[arg(long, value_name = "N", value_parser = parse_max_answers)]
    pub max_answers: Option<usize>,

    /// Configuration file (default: platform config dir)
    #[arg(long, env = "SPAHAU_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Display the features supported by the program and exit
    #[arg(long)]
    pub features: bool,

    /// Addresses to check
    #[arg(value_name = "ADDRESS", required_unless_present = "features")]
    pub addresses: Vec<String>,
}

/// What to do with each address argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Query,
    Describe,
    Hostname,
    SelfTest,
}

impl Cli {
    /// The selected mode; the flags are mutually exclusive.
    pub const fn mode(&self) -> Mode {
        if self.describe {
            Mode::Describe
        } else if self.hostname {
            Mode::Hostname
        } else if self.selftest {
            Mode::SelfTest
        } else {
            Mode::Query
        }
    }
}

fn parse_max_answers(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_mode_is_query() {
        let cli = Cli::try_parse_from(["spahau", "127.0.0.2"]).unwrap();
        assert_eq!(cli.mode(), Mode::Query);
        assert_eq!(cli.addresses, ["127.0.0.2"]);
    }

    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from(["spahau", "-v", "-d", "bl.example.org", "-H", "1.2.3.4"])
            .unwrap();
        assert_eq!(cli.mode(), Mode::Hostname);
        assert!(cli.verbose);
        assert_eq!(cli.domain.as_deref(), Some("bl.example.org"));

        let cli = Cli::try_parse_from(["spahau", "-D", "127.0.0.2"]).unwrap();
        assert_eq!(cli.mode(), Mode::Describe);

        let cli = Cli::try_parse_from(["spahau", "-T", "127.0.0.2"]).unwrap();
        assert_eq!(cli.mode(), Mode::SelfTest);
    }

    #[test]
    fn modes_conflict() {
        assert!(Cli::try_parse_from(["spahau", "-D", "-H", "127.0.0.2"]).is_err());
        assert!(Cli::try_parse_from(["spahau", "-T", "-H", "127.0.0.2"]).is_err());
    }

    #[test]
    fn addresses_are_required() {
        assert!(Cli::try_parse_from(["spahau"]).is_err());
        assert!(Cli::try_parse_from(["spahau", "-v"]).is_err());
        assert!(Cli::try_parse_from(["spahau", "--features"]).is_ok());
    }

    #[test]
    fn max_answers_must_be_positive() {
        assert!(Cli::try_parse_from(["spahau", "--max-answers", "0", "1.2.3.4"]).is_err());
        let cli = Cli::try_parse_from(["spahau", "--max-answers", "32", "1.2.3.4"]).unwrap();
        assert_eq!(cli.max_answers, Some(32));
    }
}

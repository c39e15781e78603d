//! DNS resolution of DNSBL query names.
//!
//! Only `A` records are of interest. NXDOMAIN and empty answers mean the
//! address is not listed; every other DNS failure is reported as
//! [`SpahauError::ResolutionFailed`].

use std::collections::HashMap;

use async_trait::async_trait;
use hickory_resolver::proto::op::ResponseCode as Rcode;
use hickory_resolver::proto::rr::rdata::A;
use hickory_resolver::proto::rr::{Name, RData, RecordType};
use hickory_resolver::proto::ProtoErrorKind;
use hickory_resolver::{ResolveError, TokioResolver};
use tracing::{debug, warn};

use crate::error::{Result, SpahauError};
use crate::response::ResponseCode;

/// Default cap on the number of address records examined per lookup.
pub const DEFAULT_MAX_ANSWERS: usize = 15;

/// Outcome of a successful DNS lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResult {
    /// The name does not exist: not listed.
    NotFound,
    /// Address records in resolver order, already capped.
    Addresses(Vec<ResponseCode>),
}

impl RawResult {
    /// The returned codes; empty for [`RawResult::NotFound`].
    #[must_use]
    pub fn into_codes(self) -> Vec<ResponseCode> {
        match self {
            Self::NotFound => Vec::new(),
            Self::Addresses(codes) => codes,
        }
    }
}

/// Something that can resolve a DNSBL query name to IPv4 records.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Look up the `A` records for `hostname`.
    async fn lookup(&self, hostname: &str) -> Result<RawResult>;
}

/// Collect `A` records from an answer section.
///
/// `CNAME` records are aliases already chased by the resolver and are
/// skipped. Any other record type makes the whole answer count as empty and
/// stops the scan. At most `max_answers` address records are taken.
pub fn collect_answers<'a, I>(records: I, max_answers: usize) -> RawResult
where
    I: IntoIterator<Item = &'a RData>,
{
    let mut codes = Vec::new();
    for rdata in records {
        if codes.len() >= max_answers {
            debug!(max_answers, "ignoring records past the cap");
            break;
        }
        match rdata {
            RData::A(A(addr)) => {
                let code = ResponseCode::from(*addr);
                debug!(code = %code, value = %format_args!("{:08X}", code.value()), "got address record");
                codes.push(code);
            }
            RData::CNAME(_) => {}
            other => {
                warn!(
                    record_type = %other.record_type(),
                    "DNS returned a non-IPv4 record, ignoring the answer"
                );
                return RawResult::Addresses(Vec::new());
            }
        }
    }
    debug!(count = codes.len(), "out of the answer loop");
    RawResult::Addresses(codes)
}

/// NXDOMAIN and NOERROR-without-records mean "not listed". hickory reports
/// SERVFAIL, REFUSED and the other server failures as "no records" too, so
/// the response code has to be checked.
fn is_not_found(err: &ResolveError) -> bool {
    err.proto().is_some_and(|proto| {
        matches!(
            proto.kind(),
            ProtoErrorKind::NoRecordsFound {
                response_code: Rcode::NXDomain | Rcode::NoError,
                ..
            }
        )
    })
}

/// Resolver backed by the system DNS configuration.
pub struct DnsResolver {
    inner: TokioResolver,
    max_answers: usize,
}

impl DnsResolver {
    /// Create a resolver from the system configuration, with the response
    /// cache disabled.
    ///
    /// # Errors
    ///
    /// Returns `SpahauError::ResolverInit` if the system resolver
    /// configuration cannot be read.
    pub fn system(max_answers: usize) -> Result<Self> {
        let mut builder = TokioResolver::builder_tokio()
            .map_err(|e| SpahauError::ResolverInit(e.to_string()))?;
        builder.options_mut().cache_size = 0;
        let inner = builder.build();
        Ok(Self { inner, max_answers })
    }
}

#[async_trait]
impl Resolve for DnsResolver {
    async fn lookup(&self, hostname: &str) -> Result<RawResult> {
        let failed = |reason: String| SpahauError::ResolutionFailed {
            hostname: hostname.to_string(),
            reason,
        };

        let mut name = Name::from_ascii(hostname).map_err(|e| failed(e.to_string()))?;
        name.set_fqdn(true);
        debug!(name = %name, "querying A records");

        match self.inner.lookup(name, RecordType::A).await {
            Ok(lookup) => Ok(collect_answers(lookup.iter(), self.max_answers)),
            Err(e) if is_not_found(&e) => {
                debug!(hostname, error = %e, "no such name");
                Ok(RawResult::NotFound)
            }
            Err(e) => Err(failed(e.to_string())),
        }
    }
}

/// Canned answer for [`StaticResolver`].
#[derive(Debug, Clone)]
enum StaticAnswer {
    Records(Vec<RData>),
    Failure(String),
}

/// In-memory resolver answering from a fixed table.
///
/// Names with no entry resolve to [`RawResult::NotFound`].
#[derive(Debug, Clone)]
pub struct StaticResolver {
    answers: HashMap<String, StaticAnswer>,
    max_answers: usize,
}

impl Default for StaticResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticResolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            max_answers: DEFAULT_MAX_ANSWERS,
        }
    }

    /// Set the record cap.
    #[must_use]
    pub fn max_answers(mut self, max_answers: usize) -> Self {
        self.max_answers = max_answers;
        self
    }

    /// Answer `hostname` with `A` records for `codes`, in order.
    #[must_use]
    pub fn with_codes(self, hostname: &str, codes: &[u32]) -> Self {
        let records = codes
            .iter()
            .map(|&value| RData::A(A::from(std::net::Ipv4Addr::from(value))))
            .collect();
        self.with_records(hostname, records)
    }

    /// Answer `hostname` with arbitrary records, in order.
    #[must_use]
    pub fn with_records(mut self, hostname: &str, records: Vec<RData>) -> Self {
        self.answers
            .insert(hostname.to_string(), StaticAnswer::Records(records));
        self
    }

    /// Fail lookups of `hostname` with `reason`.
    #[must_use]
    pub fn with_failure(mut self, hostname: &str, reason: &str) -> Self {
        self.answers.insert(
            hostname.to_string(),
            StaticAnswer::Failure(reason.to_string()),
        );
        self
    }
}

#[async_trait]
impl Resolve for StaticResolver {
    async fn lookup(&self, hostname: &str) -> Result<RawResult> {
        match self.answers.get(hostname) {
            None => Ok(RawResult::NotFound),
            Some(StaticAnswer::Records(records)) => {
                Ok(collect_answers(records, self.max_answers))
            }
            Some(StaticAnswer::Failure(reason)) => Err(SpahauError::ResolutionFailed {
                hostname: hostname.to_string(),
                reason: reason.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv6Addr;

    use hickory_resolver::proto::op::Query;
    use hickory_resolver::proto::rr::rdata::{AAAA, CNAME};
    use hickory_resolver::proto::ProtoError;

    use super::*;

    fn a(value: u32) -> RData {
        RData::A(A::from(std::net::Ipv4Addr::from(value)))
    }

    fn values(result: RawResult) -> Vec<u32> {
        result.into_codes().into_iter().map(ResponseCode::value).collect()
    }

    #[test]
    fn collects_a_records_in_order() {
        let records = [a(0x7F00_000A), a(0x7F00_0002), a(0x7F00_0004)];
        assert_eq!(
            values(collect_answers(&records, DEFAULT_MAX_ANSWERS)),
            [0x7F00_000A, 0x7F00_0002, 0x7F00_0004]
        );
    }

    #[test]
    fn caps_the_number_of_records() {
        let records: Vec<RData> = (1..=20).map(|n| a(0x7F00_0000 + n)).collect();
        let codes = values(collect_answers(&records, DEFAULT_MAX_ANSWERS));
        assert_eq!(codes.len(), 15);
        assert_eq!(codes.last(), Some(&0x7F00_000F));

        assert_eq!(values(collect_answers(&records, 2)), [0x7F00_0001, 0x7F00_0002]);
    }

    #[test]
    fn skips_cname_records() {
        let alias = Name::from_ascii("alias.example.org.").unwrap();
        let records = [RData::CNAME(CNAME(alias)), a(0x7F00_0002)];
        assert_eq!(
            values(collect_answers(&records, DEFAULT_MAX_ANSWERS)),
            [0x7F00_0002]
        );
    }

    #[test]
    fn foreign_record_empties_the_answer() {
        let records = [
            a(0x7F00_0002),
            RData::AAAA(AAAA::from(Ipv6Addr::LOCALHOST)),
            a(0x7F00_0004),
        ];
        assert_eq!(
            collect_answers(&records, DEFAULT_MAX_ANSWERS),
            RawResult::Addresses(Vec::new())
        );
    }

    fn no_records(response_code: Rcode) -> ResolveError {
        let name = Name::from_ascii("2.0.0.127.zen.spamhaus.org.").unwrap();
        ProtoError::nx_error(
            Box::new(Query::query(name, RecordType::A)),
            None,
            None,
            None,
            response_code,
            false,
            None,
        )
        .into()
    }

    #[test]
    fn nxdomain_and_nodata_mean_not_listed() {
        assert!(is_not_found(&no_records(Rcode::NXDomain)));
        assert!(is_not_found(&no_records(Rcode::NoError)));
    }

    #[test]
    fn server_failures_are_not_not_found() {
        for code in [
            Rcode::ServFail,
            Rcode::Refused,
            Rcode::FormErr,
            Rcode::NotImp,
            Rcode::YXDomain,
            Rcode::NotAuth,
        ] {
            assert!(!is_not_found(&no_records(code)), "{code:?}");
        }
    }

    #[test]
    fn transport_errors_are_not_not_found() {
        assert!(!is_not_found(&ResolveError::from("no connections available")));
        assert!(!is_not_found(&ProtoError::from(ProtoErrorKind::Busy).into()));
    }

    #[tokio::test]
    async fn static_resolver_answers() {
        let resolver = StaticResolver::new()
            .with_codes("2.0.0.127.zen.spamhaus.org", &[0x7F00_0002])
            .with_failure("3.0.0.127.zen.spamhaus.org", "SERVFAIL");

        assert_eq!(
            resolver.lookup("2.0.0.127.zen.spamhaus.org").await.unwrap(),
            RawResult::Addresses(vec![ResponseCode(0x7F00_0002)])
        );
        assert_eq!(
            resolver.lookup("1.0.0.127.zen.spamhaus.org").await.unwrap(),
            RawResult::NotFound
        );
        assert!(matches!(
            resolver.lookup("3.0.0.127.zen.spamhaus.org").await,
            Err(SpahauError::ResolutionFailed { .. })
        ));
    }
}

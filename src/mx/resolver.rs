use std::time::Duration;

use tracing::debug;
use trust_dns_resolver::{Resolver, error::ResolveError, system_conf::read_system_conf};

use super::Error;

/// Resolves the mail-exchange hosts advertised by a domain.
///
/// Each lookup builds a fresh system resolver with the configured timeout;
/// host lists are never cached across addresses.
#[derive(Debug, Clone)]
pub struct MxResolver {
    timeout: Duration,
}

impl MxResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Exchange hostnames for `domain`, in the order the resolver returned
    /// them, trailing root dots stripped. Any failure yields an empty list.
    pub fn mail_hosts(&self, domain: &str) -> Vec<String> {
        match self.build_resolver() {
            Ok(resolver) => hosts_with(&resolver, domain),
            Err(err) => {
                debug!(domain, error = %err, "could not build DNS resolver");
                Vec::new()
            }
        }
    }

    fn build_resolver(&self) -> Result<Resolver, Error> {
        let (config, mut options) = read_system_conf().map_err(Error::resolver_init)?;
        options.timeout = self.timeout;
        Resolver::new(config, options).map_err(Error::resolver_init)
    }
}

/// Fail-soft wrapper over [`resolve_with`]: resolution errors are logged and
/// collapsed into the empty list.
pub(crate) fn hosts_with<R>(resolver: &R, domain: &str) -> Vec<String>
where
    R: LookupMx,
{
    match resolve_with(resolver, domain) {
        Ok(hosts) => hosts,
        Err(err) => {
            debug!(domain, error = %err, "MX resolution failed");
            Vec::new()
        }
    }
}

pub(crate) fn resolve_with<R>(resolver: &R, domain: &str) -> Result<Vec<String>, Error>
where
    R: LookupMx,
{
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    resolver.lookup_mx(trimmed).map_err(Error::lookup)
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    exchange.trim_end_matches('.').to_string()
}

pub(crate) trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<String>, ResolveError>;
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<String>, ResolveError> {
        let lookup = Resolver::mx_lookup(self, domain)?;
        Ok(lookup
            .iter()
            .map(|mx| normalize_exchange(mx.exchange().to_utf8()))
            .collect())
    }
}

#[cfg(test)]
impl LookupMx for crate::mx::tests::StubResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<String>, ResolveError> {
        (self.on_lookup)(domain)
    }
}

use tracing::trace;

use crate::mx::MxResolver;
use crate::smtp::{ProbeVerdict, SmtpProber};
use crate::validator::{domain_part, is_valid_format};

use super::types::Outcome;

/// Source of mail-exchange hosts for a domain.
pub trait MailHostSource {
    fn mail_hosts(&self, domain: &str) -> Vec<String>;
}

/// Probes whether any of a domain's exchange hosts accepts the address.
pub trait MailboxCheck {
    fn probe(&self, address: &str, hosts: &[String]) -> ProbeVerdict;
}

impl MailHostSource for MxResolver {
    fn mail_hosts(&self, domain: &str) -> Vec<String> {
        MxResolver::mail_hosts(self, domain)
    }
}

impl MailboxCheck for SmtpProber {
    fn probe(&self, address: &str, hosts: &[String]) -> ProbeVerdict {
        SmtpProber::probe(self, address, hosts)
    }
}

/// Classification of a single address, abstracted over the worker pool.
pub trait ClassifyAddress {
    fn classify(&self, address: &str) -> Outcome;
}

/// Runs one address through the guard chain: blank, format, MX lookup, SMTP
/// probe. Earlier guards short-circuit; the network is only touched once the
/// address is syntactically plausible and its domain is known.
pub struct Classifier<R, P> {
    resolver: R,
    prober: P,
}

impl<R, P> Classifier<R, P>
where
    R: MailHostSource,
    P: MailboxCheck,
{
    pub fn new(resolver: R, prober: P) -> Self {
        Self { resolver, prober }
    }

    pub fn classify(&self, address: &str) -> Outcome {
        if address.trim().is_empty() {
            return Outcome::Blank;
        }
        if !is_valid_format(address) {
            return Outcome::InvalidFormat;
        }
        // The format check guarantees exactly one '@'.
        let Some(domain) = domain_part(address) else {
            return Outcome::InvalidFormat;
        };
        let hosts = self.resolver.mail_hosts(domain);
        if hosts.is_empty() {
            return Outcome::NoMailExchange;
        }
        let outcome = match self.prober.probe(address, &hosts) {
            ProbeVerdict::Deliverable => Outcome::Valid,
            ProbeVerdict::Undeliverable => Outcome::NonValid,
            ProbeVerdict::Inconclusive => Outcome::Unverifiable,
        };
        trace!(address, %outcome, "address classified");
        outcome
    }
}

impl<R, P> ClassifyAddress for Classifier<R, P>
where
    R: MailHostSource,
    P: MailboxCheck,
{
    fn classify(&self, address: &str) -> Outcome {
        Classifier::classify(self, address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fails the test if the network path is reached at all.
    struct UnreachableResolver;

    impl MailHostSource for UnreachableResolver {
        fn mail_hosts(&self, domain: &str) -> Vec<String> {
            panic!("resolver must not be invoked (domain: {domain})");
        }
    }

    struct UnreachableProber;

    impl MailboxCheck for UnreachableProber {
        fn probe(&self, address: &str, _hosts: &[String]) -> ProbeVerdict {
            panic!("prober must not be invoked (address: {address})");
        }
    }

    struct FixedResolver(Vec<String>);

    impl MailHostSource for FixedResolver {
        fn mail_hosts(&self, _domain: &str) -> Vec<String> {
            self.0.clone()
        }
    }

    struct FixedProber(ProbeVerdict);

    impl MailboxCheck for FixedProber {
        fn probe(&self, _address: &str, _hosts: &[String]) -> ProbeVerdict {
            self.0
        }
    }

    fn one_host() -> Vec<String> {
        vec!["mx.example.com".to_string()]
    }

    #[test]
    fn blank_input_short_circuits_before_any_collaborator() {
        let classifier = Classifier::new(UnreachableResolver, UnreachableProber);
        assert_eq!(classifier.classify(""), Outcome::Blank);
        assert_eq!(classifier.classify("   "), Outcome::Blank);
        assert_eq!(classifier.classify("\t"), Outcome::Blank);
    }

    #[test]
    fn invalid_format_short_circuits_before_any_collaborator() {
        let classifier = Classifier::new(UnreachableResolver, UnreachableProber);
        assert_eq!(classifier.classify("not-an-email"), Outcome::InvalidFormat);
        assert_eq!(classifier.classify("user@localhost"), Outcome::InvalidFormat);
    }

    #[test]
    fn empty_host_list_short_circuits_before_probe() {
        let classifier = Classifier::new(FixedResolver(Vec::new()), UnreachableProber);
        assert_eq!(
            classifier.classify("user@domain-with-no-mx.example"),
            Outcome::NoMailExchange
        );
    }

    #[test]
    fn probe_verdict_maps_onto_outcome() {
        let cases = [
            (ProbeVerdict::Deliverable, Outcome::Valid),
            (ProbeVerdict::Undeliverable, Outcome::NonValid),
            (ProbeVerdict::Inconclusive, Outcome::Unverifiable),
        ];
        for (verdict, expected) in cases {
            let classifier = Classifier::new(FixedResolver(one_host()), FixedProber(verdict));
            assert_eq!(classifier.classify("user@example.com"), expected);
        }
    }

    #[test]
    fn classification_is_idempotent_against_fixed_collaborators() {
        let classifier = Classifier::new(
            FixedResolver(one_host()),
            FixedProber(ProbeVerdict::Deliverable),
        );
        let first = classifier.classify("user@example.com");
        let second = classifier.classify("user@example.com");
        assert_eq!(first, second);
    }
}

use native_tls::TlsConnector;
use tracing::debug;

use super::error::SmtpError;
use super::options::ProbeOptions;
use super::session::SmtpSession;
use super::types::ProbeVerdict;

/// Probes mailbox existence by asking each exchange host in turn whether it
/// would accept mail for the target address.
pub struct SmtpProber {
    options: ProbeOptions,
    tls: Option<TlsConnector>,
}

impl SmtpProber {
    /// A failed TLS connector build disables STARTTLS upgrades rather than
    /// failing the prober; probes stay on the plain stream.
    pub fn new(options: ProbeOptions) -> Self {
        let tls = TlsConnector::new().ok();
        Self { options, tls }
    }

    /// Tries `hosts` in order and returns the first decisive verdict, or
    /// [`ProbeVerdict::Inconclusive`] once every host is exhausted.
    pub fn probe(&self, address: &str, hosts: &[String]) -> ProbeVerdict {
        probe_with(self, address, hosts)
    }
}

/// One full attempt against a single host, ending in the `RCPT TO` status
/// code. Every protocol deviation surfaces as an error so the host loop can
/// move on.
pub(crate) trait ProbeHost {
    fn rcpt_code(&self, host: &str, address: &str) -> Result<u16, SmtpError>;
}

impl ProbeHost for SmtpProber {
    fn rcpt_code(&self, host: &str, address: &str) -> Result<u16, SmtpError> {
        let timeout = self.options.timeout;
        let mut session = SmtpSession::connect(host, self.options.port, timeout)?;

        let banner = session.read_banner()?;
        if !banner.is_positive_completion() {
            return Err(SmtpError::Protocol(format!(
                "unexpected greeting: {}",
                banner.code
            )));
        }

        let helo_cmd = format!("EHLO {}", self.options.helo_domain);
        let ehlo = session.send_command(&helo_cmd)?;
        if !ehlo.is_positive_completion() {
            return Err(SmtpError::Protocol(format!("EHLO rejected: {}", ehlo.code)));
        }

        if ehlo.has_capability("STARTTLS") {
            if let Some(connector) = &self.tls {
                let tls_reply = session.starttls(host, connector, timeout)?;
                if tls_reply.is_positive_completion() {
                    // EHLO again over TLS
                    session.send_command(&helo_cmd)?;
                }
            }
        }

        let mail_cmd = format!("MAIL FROM:<{}>", self.options.mail_from);
        let mail_reply = session.send_command(&mail_cmd)?;
        if mail_reply.is_permanent_failure() {
            session.quit().ok();
            return Err(SmtpError::Protocol(format!(
                "MAIL FROM rejected with {}",
                mail_reply.code
            )));
        }

        let rcpt_reply = session.send_command(&format!("RCPT TO:<{address}>"))?;
        session.quit().ok();
        Ok(rcpt_reply.code)
    }
}

/// Host loop over explicit attempt results: 250 and 550 are decisive and
/// stop immediately; any other code or error is inconclusive for that host.
pub(crate) fn probe_with<P>(prober: &P, address: &str, hosts: &[String]) -> ProbeVerdict
where
    P: ProbeHost,
{
    for host in hosts {
        match prober.rcpt_code(host, address) {
            Ok(250) => return ProbeVerdict::Deliverable,
            Ok(550) => return ProbeVerdict::Undeliverable,
            Ok(code) => {
                debug!(%host, code, "inconclusive reply, trying next host");
            }
            Err(err) => {
                debug!(%host, error = %err, "probe attempt failed, trying next host");
            }
        }
    }
    ProbeVerdict::Inconclusive
}

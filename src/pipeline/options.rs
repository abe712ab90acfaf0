use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::smtp::ProbeOptions;

/// Configuration for a verification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOptions {
    /// Number of concurrent workers; values below 1 are clamped to 1.
    pub workers: usize,
    /// Bound on each mail-exchange lookup.
    pub mx_timeout: Duration,
    /// Bound on each SMTP connection attempt and command round-trip.
    pub smtp_timeout: Duration,
    /// Envelope sender used in the SMTP `MAIL FROM` directive.
    pub mail_from: String,
    /// Hostname announced in `EHLO`.
    pub helo_domain: String,
    /// Port probed on each exchange host.
    pub smtp_port: u16,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            workers: 20,
            mx_timeout: Duration::from_secs(5),
            smtp_timeout: Duration::from_secs(10),
            mail_from: "verify@example.com".to_string(),
            helo_domain: "localhost".to_string(),
            smtp_port: 25,
        }
    }
}

impl VerifyOptions {
    pub(crate) fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            port: self.smtp_port,
            helo_domain: self.helo_domain.clone(),
            mail_from: self.mail_from.clone(),
            timeout: self.smtp_timeout,
        }
    }
}

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration knobs for [`SmtpProber`](crate::smtp::SmtpProber).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOptions {
    /// Port probed on each exchange host.
    pub port: u16,
    /// Hostname announced in `EHLO`.
    pub helo_domain: String,
    /// Envelope sender used in `MAIL FROM`.
    pub mail_from: String,
    /// Bound on each connection attempt and each command round-trip.
    pub timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            helo_domain: "localhost".to_string(),
            mail_from: "verify@example.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

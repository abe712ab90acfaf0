use std::fmt;

use serde::{Deserialize, Serialize};

/// Verdict of probing one address across its exchange hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeVerdict {
    /// A host answered `RCPT TO` with 250.
    Deliverable,
    /// A host answered `RCPT TO` with 550.
    Undeliverable,
    /// Every host was exhausted without a decisive reply.
    Inconclusive,
}

impl fmt::Display for ProbeVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deliverable => f.write_str("deliverable"),
            Self::Undeliverable => f.write_str("undeliverable"),
            Self::Inconclusive => f.write_str("inconclusive"),
        }
    }
}

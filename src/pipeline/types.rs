use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of one input line. Exactly one outcome is produced per
/// line; there are no partial or multiple outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The line was empty after trimming.
    Blank,
    /// The address failed the syntactic check; no network access was made.
    InvalidFormat,
    /// No mail-exchange hosts were found (or resolution failed).
    NoMailExchange,
    /// An exchange host accepted the recipient (250).
    Valid,
    /// An exchange host rejected the recipient (550).
    NonValid,
    /// Every exchange host was exhausted without a decisive reply.
    Unverifiable,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blank => "Blank",
            Self::InvalidFormat => "InvalidFormat",
            Self::NoMailExchange => "NoMailExchange",
            Self::Valid => "Valid",
            Self::NonValid => "NonValid",
            Self::Unverifiable => "Unverifiable",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of dispatch: an input line's original position and its address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub index: usize,
    pub address: String,
}

/// The classification of one input line, keyed by its original position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub index: usize,
    pub address: String,
    pub outcome: Outcome,
}

/// All result entries of a finished run, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    entries: Vec<ResultEntry>,
}

impl VerificationReport {
    pub(crate) fn new(entries: Vec<ResultEntry>) -> Self {
        debug_assert!(
            entries.iter().enumerate().all(|(i, e)| e.index == i),
            "entries must be dense and input-ordered"
        );
        Self { entries }
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ResultEntry> {
        self.entries
    }

    pub fn outcomes(&self) -> impl Iterator<Item = Outcome> + '_ {
        self.entries.iter().map(|entry| entry.outcome)
    }

    /// Addresses classified [`Outcome::Valid`], in input order.
    pub fn valid_addresses(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|entry| entry.outcome == Outcome::Valid)
            .map(|entry| entry.address.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: usize, address: &str, outcome: Outcome) -> ResultEntry {
        ResultEntry {
            index,
            address: address.to_string(),
            outcome,
        }
    }

    #[test]
    fn outcome_tokens_are_stable() {
        assert_eq!(Outcome::Valid.to_string(), "Valid");
        assert_eq!(Outcome::NonValid.to_string(), "NonValid");
        assert_eq!(Outcome::InvalidFormat.to_string(), "InvalidFormat");
        assert_eq!(Outcome::NoMailExchange.to_string(), "NoMailExchange");
        assert_eq!(Outcome::Unverifiable.to_string(), "Unverifiable");
    }

    #[test]
    fn valid_addresses_filters_in_input_order() {
        let report = VerificationReport::new(vec![
            entry(0, "a@x.com", Outcome::Valid),
            entry(1, "bad", Outcome::InvalidFormat),
            entry(2, "b@y.com", Outcome::Valid),
            entry(3, "c@z.com", Outcome::Unverifiable),
        ]);
        let valid: Vec<&str> = report.valid_addresses().collect();
        assert_eq!(valid, ["a@x.com", "b@y.com"]);
    }
}

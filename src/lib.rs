#![forbid(unsafe_code)]
//! mailvet: bulk deliverability verification of email address lists.
//!
//! The pipeline classifies each address as one of a closed set of
//! [`Outcome`]s: a syntactic check, an MX lookup for the domain, and a
//! partial SMTP conversation asking whether a receiving server would accept
//! mail for the address. A fixed-size worker pool processes many addresses
//! concurrently while the final report preserves input order exactly.

pub mod mx;
pub mod pipeline;
pub mod smtp;
pub mod validator;

pub use mx::MxResolver;
pub use pipeline::{
    Classifier, ClassifyAddress, Outcome, ResultEntry, VerificationReport, VerifyOptions,
    verify_addresses,
};
pub use smtp::{ProbeOptions, ProbeVerdict, SmtpProber};
pub use validator::is_valid_format;

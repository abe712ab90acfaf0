//! The concurrent verification pipeline.
//!
//! Input lines become enumerated work items on a shared queue; a fixed pool
//! of workers classifies each address (format check, MX lookup, SMTP probe)
//! and sends the outcome, keyed by original index, to a collecting channel.
//! Once the pool drains, results are aggregated strictly in input order.

mod classifier;
mod options;
mod pool;
mod report;
mod types;

pub use classifier::{Classifier, ClassifyAddress, MailHostSource, MailboxCheck};
pub use options::VerifyOptions;
pub use pool::run_pool;
pub use report::{render_status_report, write_ndjson, write_valid_csv};
pub use types::{Outcome, ResultEntry, VerificationReport, WorkItem};

use crate::mx::MxResolver;
use crate::smtp::SmtpProber;

/// Verifies `addresses` with the real resolver and prober, invoking
/// `on_result` as each address completes (in completion order). The returned
/// report is strictly input-ordered.
pub fn verify_addresses<F>(
    addresses: &[String],
    options: &VerifyOptions,
    on_result: F,
) -> VerificationReport
where
    F: FnMut(&ResultEntry),
{
    let resolver = MxResolver::new(options.mx_timeout);
    let prober = SmtpProber::new(options.probe_options());
    let classifier = Classifier::new(resolver, prober);
    let entries = run_pool(addresses, options.workers, &classifier, on_result);
    VerificationReport::new(entries)
}

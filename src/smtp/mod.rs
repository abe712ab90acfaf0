//! Mailbox probing over short-lived SMTP sessions.
//!
//! A probe speaks just enough SMTP to learn whether a server would accept
//! mail for an address: banner, `EHLO`, optional `STARTTLS`, `MAIL FROM`,
//! `RCPT TO`, `QUIT`. Exchange hosts are tried in order until one replies
//! decisively (250 or 550); anything else is inconclusive for that host and
//! the probe moves on.

mod error;
mod options;
mod probe;
mod session;
mod types;

pub use error::SmtpError;
pub use options::ProbeOptions;
pub use probe::SmtpProber;
pub use session::{SmtpReply, SmtpSession};
pub use types::ProbeVerdict;

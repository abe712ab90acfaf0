//! Mail-exchange host resolution.
//!
//! The public entry point is [`MxResolver`], which performs a synchronous MX
//! lookup with a bounded timeout and returns the exchange hostnames in
//! resolver order. Resolution never fails the caller: every error collapses
//! into an empty host list, since "lookup failed" and "no exchange hosts
//! configured" lead to the same terminal outcome upstream.

mod error;
mod resolver;

pub use error::MxError as Error;
pub use resolver::MxResolver;

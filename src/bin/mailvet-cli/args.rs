use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use mailvet::VerifyOptions;

#[derive(Parser)]
#[command(name = "mailvet-cli", version, about = "Verify deliverability of an email address list over SMTP")]
pub struct Cli {
    /// input file, one address per line (blank lines are preserved)
    #[arg(default_value = "input.txt")]
    pub input: PathBuf,

    /// read addresses from stdin instead of a file
    #[arg(long)]
    pub stdin: bool,

    /// per-line status report path
    #[arg(long, default_value = "output.txt")]
    pub out_status: String,

    /// CSV export of valid addresses
    #[arg(long, default_value = "output.csv")]
    pub out_csv: String,

    /// optional NDJSON dump of every result entry
    #[arg(long)]
    pub out_ndjson: Option<String>,

    /// number of concurrent verification workers
    #[arg(long, default_value_t = 20)]
    pub workers: usize,

    /// MX lookup timeout (seconds)
    #[arg(long = "mx-timeout", default_value_t = 5)]
    pub mx_timeout_secs: u64,

    /// per-connection SMTP timeout (seconds)
    #[arg(long = "smtp-timeout", default_value_t = 10)]
    pub smtp_timeout_secs: u64,

    /// envelope sender used in MAIL FROM
    #[arg(long = "from", default_value = "verify@example.com")]
    pub mail_from: String,

    /// hostname announced in EHLO
    #[arg(long, default_value = "localhost")]
    pub helo: String,

    /// SMTP port probed on each exchange host
    #[arg(long, default_value_t = 25)]
    pub port: u16,

    /// suppress per-address progress lines
    #[arg(long)]
    pub quiet: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn verify_options(&self) -> VerifyOptions {
        VerifyOptions {
            workers: self.workers,
            mx_timeout: Duration::from_secs(self.mx_timeout_secs),
            smtp_timeout: Duration::from_secs(self.smtp_timeout_secs),
            mail_from: self.mail_from.clone(),
            helo_domain: self.helo.clone(),
            smtp_port: self.port,
        }
    }
}

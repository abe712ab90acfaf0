use std::io;

use super::types::{Outcome, ResultEntry};

/// Renders the line-oriented status report: one line per input index, in
/// order. Blank input lines stay blank; every other line carries the
/// outcome token.
pub fn render_status_report(entries: &[ResultEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        if entry.outcome != Outcome::Blank {
            out.push_str(entry.outcome.as_str());
        }
        out.push('\n');
    }
    out
}

/// Writes a header row followed by exactly the addresses whose outcome is
/// [`Outcome::Valid`], in input order.
pub fn write_valid_csv<W: io::Write>(entries: &[ResultEntry], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["email address"])?;
    for entry in entries {
        if entry.outcome == Outcome::Valid {
            csv_writer.write_record([entry.address.as_str()])?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes one JSON object per entry, newline-delimited.
pub fn write_ndjson<W: io::Write>(
    entries: &[ResultEntry],
    mut writer: W,
) -> Result<(), serde_json::Error> {
    for entry in entries {
        serde_json::to_writer(&mut writer, entry)?;
        writer.write_all(b"\n").map_err(serde_json::Error::io)?;
    }
    Ok(())
}

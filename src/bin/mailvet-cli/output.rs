use anyhow::{Context, Result};
use mailvet::pipeline::{render_status_report, write_ndjson, write_valid_csv};
use mailvet::ResultEntry;

pub fn write_status_file(path: &str, entries: &[ResultEntry]) -> Result<()> {
    let report = render_status_report(entries);
    write_all_atomically(path, report.as_bytes())
}

pub fn write_csv_file(path: &str, entries: &[ResultEntry]) -> Result<()> {
    let mut buf = Vec::new();
    write_valid_csv(entries, &mut buf).context("render CSV export")?;
    write_all_atomically(path, &buf)
}

pub fn write_ndjson_file(path: &str, entries: &[ResultEntry]) -> Result<()> {
    let mut buf = Vec::new();
    write_ndjson(entries, &mut buf).context("render NDJSON export")?;
    write_all_atomically(path, &buf)
}

fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}

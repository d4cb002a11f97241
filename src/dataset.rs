//! Dataset files: a pretty JSON array, or JSON Lines when the path ends in
//! `.jsonl`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::pipeline::{EnrichedPosting, RawPosting};

fn is_json_lines(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jsonl"))
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = fs::read_to_string(path)?;
    let invalid = |line: Option<usize>, e: serde_json::Error| {
        let at = line.map(|n| format!(" line {}", n)).unwrap_or_default();
        PipelineError::InvalidInput(format!("{}{}: {}", path.display(), at, e))
    };

    if is_json_lines(path) {
        raw.lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(i, l)| serde_json::from_str(l).map_err(|e| invalid(Some(i + 1), e)))
            .collect()
    } else {
        serde_json::from_str(&raw).map_err(|e| invalid(None, e))
    }
}

/// A missing required key anywhere in the file is fatal.
pub fn read_raw(path: &Path) -> Result<Vec<RawPosting>> {
    let records = read_records(path)?;
    info!(path = %path.display(), count = records.len(), "Read raw postings");
    Ok(records)
}

pub fn read_enriched(path: &Path) -> Result<Vec<EnrichedPosting>> {
    read_records(path)
}

pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    if is_json_lines(path) {
        for record in records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
        }
    } else {
        serde_json::to_writer_pretty(&mut out, records)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    info!(path = %path.display(), count = records.len(), "Wrote dataset");
    Ok(())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Enricher;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("remote_jobs_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn reads_raw_fixture() {
        let raw = read_raw(Path::new("tests/fixtures/raw_postings.json")).unwrap();
        assert_eq!(raw.len(), 5);
        // salary given as a bare number is coerced, not rejected
        assert_eq!(raw[3].salary_raw, "95000");
    }

    #[test]
    fn missing_column_is_invalid_input() {
        let err = read_raw(Path::new("tests/fixtures/raw_missing_url.json")).unwrap_err();
        match err {
            PipelineError::InvalidInput(msg) => assert!(msg.contains("url"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn json_lines_reports_line_number() {
        let path = scratch("bad.jsonl");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{}\n").unwrap();
        let err = read_raw(&path).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(ref m) if m.contains("line 1")));
    }

    #[test]
    fn enriched_written_as_jsonl_reads_back() {
        let raw = read_raw(Path::new("tests/fixtures/raw_postings.json")).unwrap();
        let enriched = Enricher::default().process(raw);
        let path = scratch("enriched.jsonl");
        write_records(&path, &enriched).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), enriched.len());
        assert_eq!(read_enriched(&path).unwrap(), enriched);
    }
}

// ============================================================
// Layer 4 — Parallel Corpus Loader
// ============================================================
// Reads a JSON Lines file where every line is one record:
//
//   {"id": "0", "translation": {"en": "Hello.", "it": "Ciao."}}
//
// Blank lines are ignored. A line that does not parse is
// logged and skipped, so one bad row does not sink a whole
// corpus. A missing or unreadable file is an error.
//
// The loaded records are served through Burn's InMemoryDataset,
// which is the raw dataset provider for the example builder.
//
// Reference: serde_json documentation
//            Burn Book §4 (Datasets)

use anyhow::{Context, Result};
use burn::data::dataset::InMemDataset;
use std::{fs, path::Path};

use crate::domain::translation::TranslationRecord;

/// Load every well-formed record from `path`, in file order.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<TranslationRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Cannot read corpus '{}'", path.display()))?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<TranslationRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                tracing::warn!(
                    "Skipping line {} of '{}': {}",
                    line_no + 1,
                    path.display(),
                    e
                );
            }
        }
    }

    tracing::info!(
        "Loaded {} records from '{}' ({} skipped)",
        records.len(),
        path.display(),
        skipped
    );
    Ok(records)
}

/// Load `path` straight into a Burn dataset.
pub fn load_jsonl(path: impl AsRef<Path>) -> Result<InMemDataset<TranslationRecord>> {
    Ok(InMemDataset::new(load_records(path)?))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::data::dataset::Dataset;
    use std::io::Write;

    fn write_corpus(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[test]
    fn test_loads_records_in_order() {
        let file = write_corpus(&[
            r#"{"id": "0", "translation": {"en": "One", "it": "Uno"}}"#,
            r#"{"id": "1", "translation": {"en": "Two", "it": "Due"}}"#,
        ]);
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text("it"), Some("Due"));
    }

    #[test]
    fn test_skips_blank_and_malformed_lines() {
        let file = write_corpus(&[
            r#"{"translation": {"en": "One", "it": "Uno"}}"#,
            "",
            "not json",
            r#"{"no_translation": true}"#,
            r#"{"translation": {"en": "Three", "it": "Tre"}}"#,
        ]);
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text("en"), Some("Three"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records(dir.path().join("absent.jsonl")).unwrap_err();
        assert!(err.to_string().contains("absent.jsonl"));
    }

    #[test]
    fn test_load_jsonl_builds_dataset() {
        let file = write_corpus(&[r#"{"translation": {"en": "One", "it": "Uno"}}"#]);
        let ds = load_jsonl(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.get(0).unwrap().text("it"), Some("Uno"));
    }
}

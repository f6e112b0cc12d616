use std::fs;
use std::path::Path;

use lopdf::Document;

/// Files below this size are rejected before any parsing is attempted.
pub const MIN_PDF_BYTES: u64 = 1024;

#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub valid: bool,
    pub reason: String,
    pub page_count: usize,
}

impl ProbeOutcome {
    fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: reason.into(),
            page_count: 0,
        }
    }
}

/// Read-only integrity probe: size floor first, then page metadata, then a
/// decode of the first page. Never touches the file beyond reading it.
pub fn probe(path: &Path) -> ProbeOutcome {
    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) => return ProbeOutcome::invalid(format!("cannot stat file: {err}")),
    };

    if size < MIN_PDF_BYTES {
        return ProbeOutcome::invalid(format!("too small ({size} bytes)"));
    }

    let doc = match Document::load(path) {
        Ok(doc) => doc,
        Err(err) => return ProbeOutcome::invalid(format!("cannot parse: {err}")),
    };

    let pages = doc.get_pages();
    let first_page = match pages.values().next() {
        Some(&page_id) => page_id,
        None => return ProbeOutcome::invalid("no pages"),
    };

    if doc.get_object(first_page).is_err() || doc.get_page_content(first_page).is_err() {
        return ProbeOutcome::invalid("cannot read pages");
    }

    ProbeOutcome {
        valid: true,
        reason: format!("OK ({} pages)", pages.len()),
        page_count: pages.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::{MIN_PDF_BYTES, probe};
    use crate::test_support::write_sample_pdf;
    use std::fs;

    #[test]
    fn missing_file_is_invalid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outcome = probe(&dir.path().join("absent.pdf"));
        assert!(!outcome.valid);
        assert!(outcome.reason.contains("cannot stat"));
    }

    #[test]
    fn undersized_file_is_invalid_regardless_of_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tiny.pdf");
        fs::write(&path, b"%PDF-1.4 truncated").unwrap();

        let outcome = probe(&path);
        assert!(!outcome.valid);
        assert!(outcome.reason.starts_with("too small"));
    }

    #[test]
    fn garbage_above_size_floor_fails_to_parse() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("garbage.pdf");
        fs::write(&path, vec![0x41; MIN_PDF_BYTES as usize + 100]).unwrap();

        let outcome = probe(&path);
        assert!(!outcome.valid);
        assert!(outcome.reason.starts_with("cannot parse"));
    }

    #[test]
    fn well_formed_pdf_reports_page_count() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ok.pdf");
        write_sample_pdf(&path, 3);

        let outcome = probe(&path);
        assert!(outcome.valid, "reason: {}", outcome.reason);
        assert_eq!(outcome.page_count, 3);
        assert!(outcome.reason.contains("3 pages"));
    }
}

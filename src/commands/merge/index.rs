use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::model::{IndexEntry, PaperEntry};
use crate::util::ensure_directory;

/// Width of the rule line separating the three index blocks. The format is a
/// human-curated convention; keep it byte-stable.
pub const RULE_WIDTH: usize = 70;

/// Specimens first, then ascending year, then June before November. The sort
/// is stable, so equal keys keep their scan order.
pub fn sort_entries(entries: &mut [PaperEntry]) {
    entries.sort_by_key(|entry| (!entry.is_specimen, entry.year, entry.season.sort_rank()));
}

/// Compute running page offsets over `entries`, counting only entries whose
/// path also appears in `valid_files`. The double-check guards against drift
/// between scan and probe results: a divergence would silently corrupt the
/// page-offset mapping.
pub fn build_index(entries: &[PaperEntry], valid_files: &[PathBuf]) -> Vec<IndexEntry> {
    let valid: HashSet<&Path> = valid_files.iter().map(PathBuf::as_path).collect();

    let mut index = Vec::new();
    let mut current_page = 1;
    for entry in entries {
        if !valid.contains(entry.path.as_path()) {
            continue;
        }
        index.push(IndexEntry {
            sequence_number: index.len() + 1,
            exam_label: entry.label.clone(),
            start_page: current_page,
            page_count: entry.page_count,
        });
        current_page += entry.page_count;
    }

    index
}

/// Serialize the index as three blocks (sequence numbers, labels, start
/// pages) separated by a fixed-width rule.
pub fn write_index(path: &Path, entries: &[IndexEntry]) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let rule = "=".repeat(RULE_WIDTH);
    let mut text = String::new();

    for entry in entries {
        text.push_str(&format!("{}\n", entry.sequence_number));
    }
    text.push_str(&format!("\n{rule}\n\n"));
    for entry in entries {
        text.push_str(&format!("{}\n", entry.exam_label));
    }
    text.push_str(&format!("\n{rule}\n\n"));
    for entry in entries {
        text.push_str(&format!("{}\n", entry.start_page));
    }

    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

/// Parse the three-block format back into ordered (label, start page) pairs.
pub fn parse_index(text: &str) -> Result<Vec<(String, usize)>> {
    let rule = "=".repeat(RULE_WIDTH);
    let blocks: Vec<&str> = text.split(rule.as_str()).collect();
    if blocks.len() != 3 {
        bail!("expected three index blocks, found {}", blocks.len());
    }

    let labels: Vec<String> = blocks[1]
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    let mut start_pages = Vec::new();
    for line in blocks[2].lines().map(str::trim).filter(|l| !l.is_empty()) {
        let page: usize = line
            .parse()
            .with_context(|| format!("invalid start page: {line}"))?;
        start_pages.push(page);
    }

    if labels.len() != start_pages.len() {
        bail!(
            "index block mismatch: {} labels vs {} start pages",
            labels.len(),
            start_pages.len()
        );
    }

    Ok(labels.into_iter().zip(start_pages).collect())
}

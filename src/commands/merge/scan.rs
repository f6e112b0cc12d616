use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::commands::check::DAMAGE_DIR_NAME;
use crate::model::{DocType, PaperEntry, SPECIMEN_YEAR, Season};
use crate::probe::probe;

const SPECIMEN_DIR_NAME: &str = "Specimen";

/// Variant codes per paper group; any variant counts as "the same paper" for
/// merge purposes.
pub const PAPER_GROUPS: &[(&str, &[&str])] = &[
    ("2", &["21", "22", "23"]),
    ("4", &["41", "42", "43"]),
    ("6", &["61", "62", "63"]),
];

pub fn group_variants(paper: &str) -> Option<&'static [&'static str]> {
    PAPER_GROUPS
        .iter()
        .find(|(group, _)| *group == paper)
        .map(|(_, variants)| *variants)
}

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub entries: Vec<PaperEntry>,
    pub valid_files: Vec<PathBuf>,
    pub invalid_files: Vec<(PathBuf, String)>,
}

/// Locate every candidate file for one (paper group, doc type): an optional
/// specimen plus the first matching file per (year, season, variant). Each
/// candidate is probed; failures land in `invalid_files` and are excluded
/// from both the merge input and the index.
pub fn scan_paper(root: &Path, paper: &str, doc_type: DocType) -> Result<ScanOutcome> {
    let variants =
        group_variants(paper).with_context(|| format!("unknown paper group: {paper}"))?;

    let mut outcome = ScanOutcome::default();

    if let Some(specimen) = find_specimen(root, paper, doc_type)? {
        let probed = probe(&specimen);
        if probed.valid {
            outcome.entries.push(PaperEntry {
                year: SPECIMEN_YEAR,
                season: Season::Specimen,
                label: format!("Specimen - {paper}"),
                page_count: probed.page_count,
                path: specimen.clone(),
                is_specimen: true,
            });
            outcome.valid_files.push(specimen);
        } else {
            outcome.invalid_files.push((specimen, probed.reason));
        }
    }

    for year_dir in sorted_subdirs(root)? {
        let name = dir_name(&year_dir);
        if name == DAMAGE_DIR_NAME || name == SPECIMEN_DIR_NAME {
            continue;
        }

        let year: u32 = match name.parse() {
            Ok(year) => year,
            Err(_) => {
                warn!(segment = %name, "skipping directory with unparseable year");
                continue;
            }
        };

        for season_dir in sorted_subdirs(&year_dir)? {
            let season_name = dir_name(&season_dir);
            let season = match season_name.as_str() {
                "June" => Season::June,
                "November" => Season::November,
                other => {
                    warn!(year, segment = %other, "skipping unmapped season directory");
                    continue;
                }
            };

            let doc_dir = season_dir.join(doc_type.as_str());
            if !doc_dir.is_dir() {
                continue;
            }

            let filenames = sorted_filenames(&doc_dir)?;
            for variant in variants {
                let needle = format!("_{variant}.pdf");
                // First matching filename per (year, season, variant) wins.
                let matched = match filenames.iter().find(|name| name.contains(&needle)) {
                    Some(name) => doc_dir.join(name),
                    None => continue,
                };

                let probed = probe(&matched);
                if probed.valid && probed.page_count > 0 {
                    outcome.entries.push(PaperEntry {
                        year,
                        season,
                        label: format!("{} {year} - {variant}", season.label()),
                        page_count: probed.page_count,
                        path: matched.clone(),
                        is_specimen: false,
                    });
                    outcome.valid_files.push(matched);
                } else {
                    outcome.invalid_files.push((matched, probed.reason));
                }
            }
        }
    }

    Ok(outcome)
}

/// Specimen files live in a flat `Specimen/<doc type>` folder and are matched
/// case-insensitively on a `paper-<N>` substring.
fn find_specimen(root: &Path, paper: &str, doc_type: DocType) -> Result<Option<PathBuf>> {
    let folder = root.join(SPECIMEN_DIR_NAME).join(doc_type.as_str());
    if !folder.is_dir() {
        return Ok(None);
    }

    let needle = format!("paper-{paper}");
    for name in sorted_filenames(&folder)? {
        if name.to_lowercase().contains(&needle) {
            return Ok(Some(folder.join(name)));
        }
    }

    Ok(None)
}

fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        if entry
            .file_type()
            .with_context(|| format!("failed to inspect {}", entry.path().display()))?
            .is_dir()
        {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn sorted_filenames(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        if entry
            .file_type()
            .with_context(|| format!("failed to inspect {}", entry.path().display()))?
            .is_file()
        {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}

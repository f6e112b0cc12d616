use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::{error, info, warn};

use crate::cli::MergeArgs;
use crate::ghostscript::{self, GS_CANDIDATES, VERSION_PROBE_TIMEOUT};
use crate::model::{DocType, IndexEntry};
use crate::probe::probe;
use crate::util::ensure_directory;

pub mod index;
pub mod scan;

use scan::ScanOutcome;

const DEFAULT_PAPERS: &[&str] = &["2", "4", "6"];

pub fn run(args: MergeArgs) -> Result<()> {
    let papers: Vec<String> = if args.papers.is_empty() {
        DEFAULT_PAPERS.iter().map(|p| (*p).to_string()).collect()
    } else {
        args.papers.clone()
    };

    setup_release_tree(&args.release_dir, &papers)?;

    let gs_path = match args.gs_path.clone() {
        Some(path) => path,
        None => match ghostscript::discover(GS_CANDIDATES, VERSION_PROBE_TIMEOUT) {
            Some(path) => path,
            None => {
                error!("ghostscript not found; install it or pass --gs-path");
                return Ok(());
            }
        },
    };

    for paper in &papers {
        info!(paper = %paper, "processing paper group");

        for doc_type in DocType::ALL {
            let mut outcome = scan::scan_paper(&args.root, paper, doc_type)?;

            for (path, reason) in &outcome.invalid_files {
                warn!(file = %path.display(), reason = %reason, "excluded invalid file");
            }

            if outcome.valid_files.is_empty() {
                warn!(paper = %paper, doc_type = doc_type.as_str(), "no valid files found");
                continue;
            }

            // Sort before deriving the merge input so the file order handed
            // to ghostscript is exactly the order the offsets assume.
            index::sort_entries(&mut outcome.entries);

            let group_dir = args
                .release_dir
                .join(format!("Paper_{paper}"))
                .join(doc_type.as_str());
            let output_pdf =
                group_dir.join(format!("Combined_{}_Paper_{paper}.pdf", doc_type.as_str()));
            let index_path = group_dir.join(format!("INDEX_{}.txt", doc_type.as_str()));

            info!(
                paper = %paper,
                doc_type = doc_type.as_str(),
                files = outcome.valid_files.len(),
                "merging"
            );

            match merge_group(&outcome, &gs_path, &output_pdf) {
                Ok(entries) => {
                    index::write_index(&index_path, &entries)?;
                    info!(
                        output = %output_pdf.display(),
                        index = %index_path.display(),
                        entries = entries.len(),
                        "created merged volume"
                    );
                }
                Err(err) => {
                    error!(
                        paper = %paper,
                        doc_type = doc_type.as_str(),
                        error = %err,
                        "merge failed"
                    );
                }
            }
        }
    }

    Ok(())
}

fn setup_release_tree(release_dir: &Path, papers: &[String]) -> Result<()> {
    for paper in papers {
        for doc_type in DocType::ALL {
            ensure_directory(
                &release_dir
                    .join(format!("Paper_{paper}"))
                    .join(doc_type.as_str()),
            )?;
        }
    }
    Ok(())
}

/// Merge one group's valid files and compute its index. The merge input is
/// derived from the sorted entry list, filtered through the valid-file set,
/// so both stay aligned by construction.
pub(crate) fn merge_group(
    outcome: &ScanOutcome,
    gs_path: &Path,
    output: &Path,
) -> Result<Vec<IndexEntry>> {
    if outcome.valid_files.is_empty() {
        bail!("no output produced");
    }

    let merge_inputs: Vec<PathBuf> = outcome
        .entries
        .iter()
        .map(|entry| entry.path.clone())
        .filter(|path| outcome.valid_files.contains(path))
        .collect();
    if merge_inputs.is_empty() {
        bail!("no output produced");
    }

    ghostscript::merge(gs_path, &merge_inputs, output)?;

    let verified = probe(output);
    if !verified.valid {
        bail!("merged output failed verification: {}", verified.reason);
    }

    Ok(index::build_index(&outcome.entries, &merge_inputs))
}

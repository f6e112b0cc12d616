use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::CheckArgs;
use crate::model::CheckStats;
use crate::probe::probe;
use crate::util::{collect_pdfs, ensure_directory, write_json_pretty};

pub(crate) const DAMAGE_DIR_NAME: &str = "DAMAGED_FILES";
const REPORT_FILE_NAME: &str = "HEALTH_CHECK_REPORT.txt";
const SUMMARY_FILE_NAME: &str = "health_check_summary.json";

pub fn run(args: CheckArgs) -> Result<()> {
    let damage_dir = args.root.join(DAMAGE_DIR_NAME);
    ensure_directory(&damage_dir)?;

    info!(root = %args.root.display(), "starting health check");

    let stats = scan_tree(&args.root, &damage_dir)?;

    info!(
        total = stats.total_files,
        healthy = stats.healthy_files,
        damaged = stats.damaged_files,
        moved = stats.moved_files,
        "health check complete"
    );

    write_report(&args.root, &damage_dir, &stats)?;

    let summary_path = args.root.join(SUMMARY_FILE_NAME);
    write_json_pretty(&summary_path, &stats)?;
    info!(summary = %summary_path.display(), "summary written");

    Ok(())
}

/// Probe every PDF under `root` and quarantine failures. Statistics come back
/// as a value so repeated scans need no shared state.
pub(crate) fn scan_tree(root: &Path, damage_dir: &Path) -> Result<CheckStats> {
    let mut stats = CheckStats::default();

    for file in collect_pdfs(root, &[DAMAGE_DIR_NAME])? {
        stats.total_files += 1;
        let rel = display_relative(root, &file);

        let outcome = probe(&file);
        if outcome.valid {
            stats.healthy_files += 1;
            info!(file = %rel, detail = %outcome.reason, "healthy");
            continue;
        }

        stats.damaged_files += 1;
        warn!(file = %rel, reason = %outcome.reason, "damaged");

        match quarantine(root, damage_dir, &file) {
            Ok(dest) => {
                stats.moved_files += 1;
                info!(file = %rel, moved_to = %display_relative(root, &dest), "quarantined");
            }
            Err(err) => warn!(file = %rel, error = %err, "failed to quarantine"),
        }
    }

    Ok(stats)
}

/// Move a damaged file into the quarantine tree, preserving its path relative
/// to the scan root.
fn quarantine(root: &Path, damage_dir: &Path, file: &Path) -> Result<PathBuf> {
    let rel = file
        .strip_prefix(root)
        .with_context(|| format!("file outside scan root: {}", file.display()))?;
    let dest = damage_dir.join(rel);

    if let Some(parent) = dest.parent() {
        ensure_directory(parent)?;
    }

    fs::rename(file, &dest)
        .with_context(|| format!("failed to move {} to quarantine", file.display()))?;
    Ok(dest)
}

fn write_report(root: &Path, damage_dir: &Path, stats: &CheckStats) -> Result<()> {
    let report_path = root.join(REPORT_FILE_NAME);
    let text = format!(
        "PDF HEALTH CHECK REPORT\n{}\n\n\
         Total PDF Files:     {}\n\
         Healthy Files:       {}\n\
         Damaged Files:       {}\n\
         Files Moved:         {}\n\n\
         Damaged files location: {}\n",
        "=".repeat(80),
        stats.total_files,
        stats.healthy_files,
        stats.damaged_files,
        stats.moved_files,
        damage_dir.display(),
    );

    fs::write(&report_path, text)
        .with_context(|| format!("failed to write {}", report_path.display()))?;
    info!(report = %report_path.display(), "report written");
    Ok(())
}

fn display_relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{DAMAGE_DIR_NAME, run, scan_tree};
    use crate::cli::CheckArgs;
    use crate::test_support::write_sample_pdf;
    use std::fs;

    #[test]
    fn damaged_files_are_quarantined_with_relative_path_preserved() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        let damage_dir = root.join(DAMAGE_DIR_NAME);

        fs::create_dir_all(root.join("2020/June/QP")).unwrap();
        write_sample_pdf(&root.join("2020/June/QP/good.pdf"), 2);
        fs::write(root.join("2020/June/QP/bad.pdf"), b"%PDF- truncated").unwrap();
        fs::create_dir_all(&damage_dir).unwrap();

        let stats = scan_tree(root, &damage_dir).expect("scan");

        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.healthy_files, 1);
        assert_eq!(stats.damaged_files, 1);
        assert_eq!(stats.moved_files, 1);

        assert!(root.join("2020/June/QP/good.pdf").exists());
        assert!(!root.join("2020/June/QP/bad.pdf").exists());
        assert!(damage_dir.join("2020/June/QP/bad.pdf").exists());
    }

    #[test]
    fn quarantine_subtree_is_not_rescanned() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        let damage_dir = root.join(DAMAGE_DIR_NAME);
        fs::create_dir_all(&damage_dir).unwrap();
        fs::write(damage_dir.join("old.pdf"), b"junk").unwrap();

        let stats = scan_tree(root, &damage_dir).expect("scan");
        assert_eq!(stats.total_files, 0);
    }

    #[test]
    fn run_writes_text_report_and_json_summary() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();

        fs::create_dir_all(root.join("2021/June/QP")).unwrap();
        write_sample_pdf(&root.join("2021/June/QP/good.pdf"), 2);
        fs::write(root.join("2021/June/QP/bad.pdf"), b"%PDF- truncated").unwrap();

        run(CheckArgs {
            root: root.to_path_buf(),
        })
        .expect("run");

        assert!(root.join("HEALTH_CHECK_REPORT.txt").exists());

        let text = fs::read_to_string(root.join("health_check_summary.json")).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(summary["total_files"], 2);
        assert_eq!(summary["healthy_files"], 1);
        assert_eq!(summary["damaged_files"], 1);
        assert_eq!(summary["moved_files"], 1);
    }
}

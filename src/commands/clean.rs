use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use lopdf::Document;
use tracing::{info, warn};

use crate::cli::CleanArgs;
use crate::model::CleanStats;
use crate::probe::probe;
use crate::util::{collect_pdfs, ensure_directory, now_utc_string};

const BACKUP_DIR_NAME: &str = "PDF_Backups";
const ERROR_DIR_NAME: &str = "PDF_Errors";

pub fn run(args: CleanArgs) -> Result<()> {
    let backup_dir = args.root.join(BACKUP_DIR_NAME);
    let error_dir = args.root.join(ERROR_DIR_NAME);
    ensure_directory(&backup_dir)?;
    ensure_directory(&error_dir)?;

    let files = collect_pdfs(&args.root, &[BACKUP_DIR_NAME, ERROR_DIR_NAME])?;
    if files.is_empty() {
        warn!(root = %args.root.display(), "no pdf files found");
        return Ok(());
    }

    info!(count = files.len(), root = %args.root.display(), "found pdf files to process");

    if !args.yes && !confirm(files.len())? {
        info!("operation cancelled");
        return Ok(());
    }

    let mut log = CleanLog::open(&args.log_path)?;
    let mut stats = CleanStats::default();

    for file in &files {
        clean_pdf(&args.root, &backup_dir, &error_dir, file, &mut log, &mut stats);
    }

    info!(
        total = stats.total,
        cleaned = stats.cleaned,
        failed = stats.failed,
        backups = %backup_dir.display(),
        errors = %error_dir.display(),
        log = %args.log_path.display(),
        "cleaning complete"
    );
    log.record("INFO", &format!(
        "run complete: total={} cleaned={} failed={}",
        stats.total, stats.cleaned, stats.failed
    ));

    Ok(())
}

fn confirm(count: usize) -> Result<bool> {
    print!("About to process {count} PDF files in place. Continue? (yes/no): ");
    std::io::stdout().flush().context("failed to flush stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "yes" | "y"))
}

fn clean_pdf(
    root: &Path,
    backup_dir: &Path,
    error_dir: &Path,
    file: &Path,
    log: &mut CleanLog,
    stats: &mut CleanStats,
) {
    stats.total += 1;
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    log.record("INFO", &format!("processing [{}]: {name}", stats.total));

    let size = fs::metadata(file).map(|meta| meta.len()).unwrap_or(0);
    if size == 0 {
        log.record("ERROR", &format!("file missing or empty: {name}"));
        stats.failed += 1;
        return;
    }

    let pre = probe(file);
    if pre.valid {
        log.record("INFO", &format!("pre-check: {}", pre.reason));
    } else {
        log.record("WARNING", &format!("pre-check failed: {}", pre.reason));
    }

    if let Err(err) = backup_pdf(root, backup_dir, file) {
        log.record("ERROR", &format!("backup failed for {name}: {err}"));
        stats.failed += 1;
        return;
    }

    let repaired = match rewrite_tolerant(file) {
        Ok(()) => true,
        Err(err) => {
            log.record(
                "WARNING",
                &format!("tolerant rewrite failed for {name}: {err}, trying strict rebuild"),
            );
            match rebuild_strict(file) {
                Ok(()) => true,
                Err(err) => {
                    log.record("ERROR", &format!("strict rebuild failed for {name}: {err}"));
                    false
                }
            }
        }
    };

    if repaired {
        match verify_repaired(file) {
            Ok(pages) => {
                log.record("INFO", &format!("cleaned: OK ({pages} pages)"));
                stats.cleaned += 1;
                return;
            }
            Err(err) => log.record(
                "ERROR",
                &format!("verification failed after cleaning {name}: {err}"),
            ),
        }
    }

    match move_to_errors(root, error_dir, file) {
        Ok(dest) => log.record("WARNING", &format!("moved to errors: {}", dest.display())),
        Err(err) => log.record("ERROR", &format!("failed to move {name} to errors: {err}")),
    }
    stats.failed += 1;
}

/// Copy the original into the backup tree before any modification.
fn backup_pdf(root: &Path, backup_dir: &Path, file: &Path) -> Result<()> {
    let dest = mirrored_path(root, backup_dir, file)?;
    if let Some(parent) = dest.parent() {
        ensure_directory(parent)?;
    }
    fs::copy(file, &dest)
        .with_context(|| format!("failed to back up {}", file.display()))?;
    Ok(())
}

/// First repair strategy: reload and rewrite in place, renumbering objects
/// and recompressing streams. Tolerates most structural damage lopdf can
/// parse around.
pub(crate) fn rewrite_tolerant(file: &Path) -> Result<()> {
    let mut doc =
        Document::load(file).with_context(|| format!("failed to load {}", file.display()))?;
    doc.renumber_objects();
    doc.compress();
    doc.save(file)
        .with_context(|| format!("failed to save {}", file.display()))?;
    Ok(())
}

/// Second strategy: require every page's content stream to decode, then prune
/// unreferenced and empty objects before rewriting.
pub(crate) fn rebuild_strict(file: &Path) -> Result<()> {
    let mut doc =
        Document::load(file).with_context(|| format!("failed to load {}", file.display()))?;

    let pages = doc.get_pages();
    if pages.is_empty() {
        bail!("document has no pages");
    }
    for (page_no, page_id) in &pages {
        doc.get_page_content(*page_id)
            .with_context(|| format!("page {page_no} content does not decode"))?;
    }

    doc.prune_objects();
    doc.delete_zero_length_streams();
    doc.renumber_objects();
    doc.compress();
    doc.save(file)
        .with_context(|| format!("failed to save {}", file.display()))?;
    Ok(())
}

/// Post-repair verification: the rewritten file must parse and keep at least
/// one page. Recompression can legally shrink a small document below the
/// intake size floor, so this does not reuse the probe.
pub(crate) fn verify_repaired(file: &Path) -> Result<usize> {
    let doc =
        Document::load(file).with_context(|| format!("failed to reload {}", file.display()))?;
    let pages = doc.get_pages();
    if pages.is_empty() {
        bail!("document has no pages");
    }
    Ok(pages.len())
}

fn move_to_errors(root: &Path, error_dir: &Path, file: &Path) -> Result<PathBuf> {
    let dest = mirrored_path(root, error_dir, file)?;
    if let Some(parent) = dest.parent() {
        ensure_directory(parent)?;
    }
    fs::rename(file, &dest)
        .with_context(|| format!("failed to move {} to errors", file.display()))?;
    Ok(dest)
}

fn mirrored_path(root: &Path, target_dir: &Path, file: &Path) -> Result<PathBuf> {
    let rel = file
        .strip_prefix(root)
        .with_context(|| format!("file outside root: {}", file.display()))?;
    Ok(target_dir.join(rel))
}

/// Append-only text log of repair events, one timestamped line per event.
struct CleanLog {
    file: File,
}

impl CleanLog {
    fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        Ok(Self { file })
    }

    fn record(&mut self, level: &str, message: &str) {
        if let Err(err) = writeln!(self.file, "{} - {level} - {message}", now_utc_string()) {
            warn!(error = %err, "failed to append to clean log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CleanLog, backup_pdf, clean_pdf, mirrored_path, rebuild_strict, rewrite_tolerant,
        verify_repaired,
    };
    use crate::model::CleanStats;
    use crate::test_support::write_sample_pdf;
    use std::fs;
    use std::path::Path;

    #[test]
    fn tolerant_rewrite_preserves_a_valid_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("doc.pdf");
        write_sample_pdf(&path, 2);

        rewrite_tolerant(&path).expect("rewrite");

        assert_eq!(verify_repaired(&path).expect("verify"), 2);
    }

    #[test]
    fn strict_rebuild_preserves_a_valid_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("doc.pdf");
        write_sample_pdf(&path, 3);

        rebuild_strict(&path).expect("rebuild");

        assert_eq!(verify_repaired(&path).expect("verify"), 3);
    }

    #[test]
    fn document_that_compresses_below_the_intake_floor_still_counts_as_cleaned() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        let backup_dir = root.join("PDF_Backups");
        let error_dir = root.join("PDF_Errors");
        let file = root.join("doc.pdf");
        // Two padded pages deflate to well under the intake size floor.
        write_sample_pdf(&file, 2);

        let mut log = CleanLog::open(&root.join("clean.log")).expect("open log");
        let mut stats = CleanStats::default();
        clean_pdf(root, &backup_dir, &error_dir, &file, &mut log, &mut stats);

        assert_eq!(stats.cleaned, 1);
        assert_eq!(stats.failed, 0);
        assert!(file.exists());
        assert!(!error_dir.join("doc.pdf").exists());
        assert_eq!(verify_repaired(&file).expect("verify"), 2);
    }

    #[test]
    fn both_strategies_reject_garbage() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("junk.pdf");
        fs::write(&path, vec![b'z'; 2048]).unwrap();

        assert!(rewrite_tolerant(&path).is_err());
        assert!(rebuild_strict(&path).is_err());
    }

    #[test]
    fn backup_mirrors_relative_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        let backup_dir = root.join("PDF_Backups");

        fs::create_dir_all(root.join("2020/June")).unwrap();
        let file = root.join("2020/June/a.pdf");
        write_sample_pdf(&file, 1);

        backup_pdf(root, &backup_dir, &file).expect("backup");
        assert!(backup_dir.join("2020/June/a.pdf").exists());
        assert!(file.exists());
    }

    #[test]
    fn mirrored_path_rejects_files_outside_root() {
        let err = mirrored_path(
            Path::new("/root/a"),
            Path::new("/root/a/backups"),
            Path::new("/elsewhere/b.pdf"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("outside root"));
    }
}

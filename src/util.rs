use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

pub fn now_utc_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))
}

pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buf = [0_u8; 8192];

    loop {
        let count = file
            .read(&mut buf)
            .with_context(|| format!("failed to read file for hashing: {}", path.display()))?;
        if count == 0 {
            break;
        }
        hasher.update(&buf[..count]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let data = serde_json::to_vec_pretty(value)
        .with_context(|| format!("failed to serialize json: {}", path.display()))?;

    let mut file = File::create(path)
        .with_context(|| format!("failed to create json file: {}", path.display()))?;
    file.write_all(&data)
        .with_context(|| format!("failed to write json file: {}", path.display()))?;
    file.write_all(b"\n")
        .with_context(|| format!("failed to finalize json file: {}", path.display()))?;

    Ok(())
}

/// Recursively collect PDF files under `root`, skipping any directory whose
/// name appears in `skip_dirs`. The result is sorted for deterministic runs.
pub fn collect_pdfs(root: &Path, skip_dirs: &[&str]) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();
    collect_pdfs_into(root, skip_dirs, &mut pdfs)?;
    pdfs.sort();
    Ok(pdfs)
}

fn collect_pdfs_into(dir: &Path, skip_dirs: &[&str], pdfs: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?;

        if file_type.is_dir() {
            let skip = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| skip_dirs.contains(&name))
                .unwrap_or(false);
            if !skip {
                collect_pdfs_into(&path, skip_dirs, pdfs)?;
            }
            continue;
        }

        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        if file_type.is_file() && is_pdf {
            pdfs.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::collect_pdfs;
    use std::fs;

    #[test]
    fn collect_pdfs_skips_named_directories_and_non_pdfs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();

        fs::create_dir_all(root.join("2020/June")).unwrap();
        fs::create_dir_all(root.join("DAMAGED_FILES")).unwrap();
        fs::write(root.join("2020/June/a.pdf"), b"x").unwrap();
        fs::write(root.join("2020/June/b.PDF"), b"x").unwrap();
        fs::write(root.join("2020/June/notes.txt"), b"x").unwrap();
        fs::write(root.join("DAMAGED_FILES/c.pdf"), b"x").unwrap();

        let pdfs = collect_pdfs(root, &["DAMAGED_FILES"]).expect("collect");
        let names: Vec<_> = pdfs
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();

        assert_eq!(names, vec!["a.pdf", "b.PDF"]);
    }
}

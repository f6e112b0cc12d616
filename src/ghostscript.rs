use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use tracing::info;

/// Candidate executable names probed when no explicit path is given.
pub const GS_CANDIDATES: &[&str] = &["gs", "gswin64c.exe", "gswin32c.exe"];

pub const VERSION_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Probe each candidate with a version query; first responder wins. Pure over
/// its candidate list so discovery is testable without a particular host
/// layout.
pub fn discover(candidates: &[&str], timeout: Duration) -> Option<PathBuf> {
    for candidate in candidates {
        if let Some(version) = probe_version(candidate, timeout) {
            info!(tool = %candidate, version = %version, "ghostscript found");
            return Some(PathBuf::from(candidate));
        }
    }
    None
}

fn probe_version(program: &str, timeout: Duration) -> Option<String> {
    let mut child = Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    return None;
                }
                let mut version = String::new();
                if let Some(mut stdout) = child.stdout.take() {
                    stdout.read_to_string(&mut version).ok()?;
                }
                return Some(version.trim().to_string());
            }
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(_) => {
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
        }
    }
}

/// Merge `inputs` into `output` with the pdfwrite device. Nonzero exit is a
/// failure; there is no retry.
pub fn merge(gs_path: &Path, inputs: &[PathBuf], output: &Path) -> Result<()> {
    if inputs.is_empty() {
        bail!("no input files to merge");
    }

    let mut command = Command::new(gs_path);
    command
        .arg("-q")
        .arg("-dNOPAUSE")
        .arg("-dBATCH")
        .arg("-dSAFER")
        .arg("-sDEVICE=pdfwrite")
        .arg("-dCompatibilityLevel=1.4")
        .arg("-dPDFSETTINGS=/ebook")
        .arg(format!("-sOutputFile={}", output.display()));
    for input in inputs {
        command.arg(input);
    }

    let result = command
        .output()
        .with_context(|| format!("failed to execute {}", gs_path.display()))?;

    if !result.status.success() {
        bail!(
            "ghostscript exited with {}: {}",
            result.status,
            String::from_utf8_lossy(&result.stderr).trim()
        );
    }

    Ok(())
}

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::{info, warn};

use crate::cli::DownloadArgs;
use crate::model::{DownloadSummary, DownloadedFile, Season};
use crate::util::{ensure_directory, now_utc_string, sha256_file, write_json_pretty};

pub(crate) const BASE_URL: &str = "https://pastpapers.papacambridge.com/download_file.php?files=https://pastpapers.papacambridge.com/directories/CAIE/CAIE-pastpapers/upload/";

pub(crate) const DEFAULT_PAPERS: &[&str] = &["21", "22", "41", "42", "61", "62"];

enum FetchStatus {
    Downloaded,
    AlreadyExists,
}

pub fn run(args: DownloadArgs) -> Result<()> {
    let papers = resolve_papers(&args.papers);
    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()
        .context("failed to build http client")?;

    ensure_directory(&args.out)?;

    let mut summary = DownloadSummary {
        manifest_version: 1,
        generated_at: now_utc_string(),
        subject: args.subject.clone(),
        base_url: BASE_URL.to_string(),
        downloaded: 0,
        skipped: 0,
        failed: 0,
        files: Vec::new(),
    };

    info!(
        out = %args.out.display(),
        from_year = args.from_year,
        to_year = args.to_year,
        "starting downloads"
    );

    for year in (args.from_year..=args.to_year).rev() {
        download_session(&client, &args, year, 's', Season::June, &papers, &mut summary)?;

        // November results for the newest year are usually not published yet.
        if year < args.to_year {
            download_session(
                &client,
                &args,
                year,
                'w',
                Season::November,
                &papers,
                &mut summary,
            )?;
        }
    }

    let summary_path = args
        .summary_path
        .clone()
        .unwrap_or_else(|| args.out.join("download_summary.json"));
    write_json_pretty(&summary_path, &summary)?;

    info!(
        downloaded = summary.downloaded,
        skipped = summary.skipped,
        failed = summary.failed,
        summary = %summary_path.display(),
        "download complete"
    );

    Ok(())
}

pub(crate) fn resolve_papers(requested: &[String]) -> Vec<String> {
    if requested.is_empty() {
        DEFAULT_PAPERS.iter().map(|p| (*p).to_string()).collect()
    } else {
        requested.to_vec()
    }
}

pub(crate) fn session_filename(
    subject: &str,
    session_code: char,
    year: u32,
    kind: &str,
    paper: &str,
) -> String {
    format!("{subject}_{session_code}{:02}_{kind}_{paper}.pdf", year % 100)
}

#[allow(clippy::too_many_arguments)]
fn download_session(
    client: &Client,
    args: &DownloadArgs,
    year: u32,
    session_code: char,
    season: Season,
    papers: &[String],
    summary: &mut DownloadSummary,
) -> Result<()> {
    let season_dir = args.out.join(year.to_string()).join(season.dir_name());
    ensure_directory(&season_dir)?;

    info!(year, season = season.dir_name(), "processing session");

    for paper in papers {
        for kind in ["ms", "qp"] {
            let filename = session_filename(&args.subject, session_code, year, kind, paper);
            let url = format!("{BASE_URL}{filename}");
            let dest = season_dir.join(&filename);

            match download_file(client, &url, &dest) {
                Ok(FetchStatus::Downloaded) => {
                    summary.downloaded += 1;
                    match sha256_file(&dest) {
                        Ok(sha256) => summary.files.push(DownloadedFile {
                            filename: filename.clone(),
                            sha256,
                        }),
                        Err(err) => warn!(file = %filename, error = %err, "failed to hash download"),
                    }
                    info!(file = %filename, "downloaded");
                }
                Ok(FetchStatus::AlreadyExists) => {
                    summary.skipped += 1;
                    info!(file = %filename, "already exists, skipping");
                }
                Err(err) => {
                    summary.failed += 1;
                    warn!(file = %filename, error = %err, "download failed");
                }
            }

            thread::sleep(Duration::from_millis(args.delay_ms));
        }
    }

    Ok(())
}

/// Fetch one file. A non-200 response or a failed body read leaves nothing on
/// disk; a failed write removes the partial file.
fn download_file(client: &Client, url: &str, dest: &Path) -> Result<FetchStatus> {
    if dest.exists() {
        return Ok(FetchStatus::AlreadyExists);
    }

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("request failed: {url}"))?;

    if response.status() != StatusCode::OK {
        bail!("unexpected status {}", response.status());
    }

    let body = response
        .bytes()
        .with_context(|| format!("failed to read response body: {url}"))?;

    if let Err(err) = fs::write(dest, &body) {
        let _ = fs::remove_file(dest);
        return Err(err).with_context(|| format!("failed to write {}", dest.display()));
    }

    Ok(FetchStatus::Downloaded)
}

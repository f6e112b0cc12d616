use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{info, warn};

use crate::cli::FetchArgs;
use crate::probe::MIN_PDF_BYTES;
use crate::util::ensure_directory;

mod variants;

use variants::{PAPER_SETS, PaperSet};

pub(crate) const ARCHIVE_BASE_URL: &str =
    "https://pmt.physicsandmathstutor.com/download/Chemistry/GCSE/Past-Papers/CIE/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedLabel {
    pub year: u32,
    pub month: String,
    pub variant: Option<u32>,
}

pub fn run(args: FetchArgs) -> Result<()> {
    let month_re = Regex::new(
        r"^(January|February|March|April|May|June|July|August|September|October|November|December) (\d{4})(?: \(v(\d+)\))?$",
    )
    .context("failed to compile month label regex")?;
    let specimen_re =
        Regex::new(r"^Specimen (\d{4})$").context("failed to compile specimen label regex")?;

    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()
        .context("failed to build http client")?;

    let total: usize = PAPER_SETS
        .iter()
        .map(|set| set.qp.len() + set.ms.len())
        .sum();
    info!(total, out = %args.out.display(), "starting archive fetch");

    let mut downloaded = 0_usize;
    let mut skipped = 0_usize;
    let mut failed = 0_usize;

    for set in PAPER_SETS {
        info!(paper = set.paper, "processing paper");

        for (doc_type, labels) in [("QP", set.qp), ("MS", set.ms)] {
            for label in labels {
                let parsed = match parse_label(label, &month_re, &specimen_re) {
                    Some(parsed) => parsed,
                    None => {
                        warn!(label, "skipping label with unrecognized format");
                        skipped += 1;
                        continue;
                    }
                };

                let dest_dir = args
                    .out
                    .join(parsed.year.to_string())
                    .join(&parsed.month)
                    .join(doc_type);
                ensure_directory(&dest_dir)?;

                let filename = target_filename(&parsed, &set.short_code(), doc_type);
                let dest = dest_dir.join(&filename);

                if dest.exists() {
                    info!(file = %filename, "already exists, skipping");
                    skipped += 1;
                    continue;
                }

                let url = build_url(set.paper, doc_type, label);
                match download_archive_file(&client, &url, &dest) {
                    Ok(size) => {
                        downloaded += 1;
                        info!(file = %filename, size, "downloaded");
                    }
                    Err(err) => {
                        failed += 1;
                        warn!(file = %filename, error = %err, "download failed");
                    }
                }

                thread::sleep(Duration::from_millis(args.delay_ms));
            }
        }
    }

    info!(downloaded, skipped, failed, "archive fetch complete");
    Ok(())
}

pub(crate) fn parse_label(
    label: &str,
    month_re: &Regex,
    specimen_re: &Regex,
) -> Option<ParsedLabel> {
    if let Some(captures) = specimen_re.captures(label) {
        let year = captures.get(1)?.as_str().parse().ok()?;
        return Some(ParsedLabel {
            year,
            month: "Specimen".to_string(),
            variant: None,
        });
    }

    let captures = month_re.captures(label)?;
    let month = captures.get(1)?.as_str().to_string();
    let year = captures.get(2)?.as_str().parse().ok()?;
    let variant = match captures.get(3) {
        Some(m) => Some(m.as_str().parse().ok()?),
        None => None,
    };

    Some(ParsedLabel {
        year,
        month,
        variant,
    })
}

pub(crate) fn build_url(paper: &str, doc_type: &str, label: &str) -> String {
    let filename = format!("{label} {doc_type}.pdf");
    format!(
        "{ARCHIVE_BASE_URL}{paper}/International/{doc_type}/{}",
        percent_encode(&filename)
    )
}

/// Percent-encode everything outside the unreserved set.
pub(crate) fn percent_encode(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    encoded
}

pub(crate) fn target_filename(parsed: &ParsedLabel, paper_code: &str, doc_type: &str) -> String {
    match parsed.variant {
        Some(variant) => format!(
            "{}_{}_v{}_{}_{}.pdf",
            parsed.month, parsed.year, variant, paper_code, doc_type
        ),
        None => format!(
            "{}_{}_{}_{}.pdf",
            parsed.month, parsed.year, paper_code, doc_type
        ),
    }
}

/// Fetch one archive file with payload validation: the response must carry a
/// PDF content type, clear the minimum-size floor, and start with the
/// `%PDF-` magic. Violations delete whatever reached disk.
fn download_archive_file(client: &Client, url: &str, dest: &Path) -> Result<u64> {
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("request failed: {url}"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("unexpected status {status}");
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !content_type.contains("application/pdf") {
        bail!("not a pdf (content-type: {content_type})");
    }

    let body = response
        .bytes()
        .with_context(|| format!("failed to read response body: {url}"))?;

    finalize_download(dest, &body)
}

/// Write the payload, then validate it in place. Undersized or non-PDF
/// payloads are deleted even though they were fully written.
pub(crate) fn finalize_download(dest: &Path, body: &[u8]) -> Result<u64> {
    if let Err(err) = fs::write(dest, body) {
        let _ = fs::remove_file(dest);
        return Err(err).with_context(|| format!("failed to write {}", dest.display()));
    }

    let size = body.len() as u64;
    if size < MIN_PDF_BYTES {
        let _ = fs::remove_file(dest);
        bail!("file too small ({size} bytes)");
    }

    if !body.starts_with(b"%PDF-") {
        let _ = fs::remove_file(dest);
        bail!("invalid pdf header");
    }

    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::{
        ParsedLabel, build_url, finalize_download, parse_label, percent_encode, target_filename,
    };
    use super::variants::PAPER_SETS;
    use regex::Regex;

    fn regexes() -> (Regex, Regex) {
        (
            Regex::new(
                r"^(January|February|March|April|May|June|July|August|September|October|November|December) (\d{4})(?: \(v(\d+)\))?$",
            )
            .unwrap(),
            Regex::new(r"^Specimen (\d{4})$").unwrap(),
        )
    }

    #[test]
    fn parses_dated_labels_with_and_without_variants() {
        let (month_re, specimen_re) = regexes();

        assert_eq!(
            parse_label("June 2010 (v1)", &month_re, &specimen_re),
            Some(ParsedLabel {
                year: 2010,
                month: "June".to_string(),
                variant: Some(1),
            })
        );
        assert_eq!(
            parse_label("June 2018", &month_re, &specimen_re),
            Some(ParsedLabel {
                year: 2018,
                month: "June".to_string(),
                variant: None,
            })
        );
        assert_eq!(
            parse_label("Specimen 2023", &month_re, &specimen_re),
            Some(ParsedLabel {
                year: 2023,
                month: "Specimen".to_string(),
                variant: None,
            })
        );
        assert_eq!(parse_label("garbled entry", &month_re, &specimen_re), None);
    }

    #[test]
    fn every_embedded_label_parses() {
        let (month_re, specimen_re) = regexes();
        for set in PAPER_SETS {
            for label in set.qp.iter().chain(set.ms.iter()) {
                assert!(
                    parse_label(label, &month_re, &specimen_re).is_some(),
                    "label failed to parse: {label}"
                );
            }
        }
    }

    #[test]
    fn url_is_percent_encoded() {
        assert_eq!(
            percent_encode("June 2010 (v1) QP.pdf"),
            "June%202010%20%28v1%29%20QP.pdf"
        );
        let url = build_url("Paper-2", "QP", "June 2010 (v1)");
        assert!(url.ends_with("Paper-2/International/QP/June%202010%20%28v1%29%20QP.pdf"));
    }

    #[test]
    fn target_filenames_follow_layout_convention() {
        let dated = ParsedLabel {
            year: 2010,
            month: "June".to_string(),
            variant: Some(1),
        };
        assert_eq!(target_filename(&dated, "P2", "QP"), "June_2010_v1_P2_QP.pdf");

        let specimen = ParsedLabel {
            year: 2016,
            month: "Specimen".to_string(),
            variant: None,
        };
        assert_eq!(
            target_filename(&specimen, "P6", "MS"),
            "Specimen_2016_P6_MS.pdf"
        );
    }

    #[test]
    fn non_pdf_payload_is_deleted_after_being_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("bad.pdf");
        let body = vec![b'x'; 4096];

        let err = finalize_download(&dest, &body).unwrap_err();
        assert!(err.to_string().contains("invalid pdf header"));
        assert!(!dest.exists());
    }

    #[test]
    fn undersized_payload_is_deleted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("small.pdf");

        let err = finalize_download(&dest, b"%PDF-1.4 tiny").unwrap_err();
        assert!(err.to_string().contains("too small"));
        assert!(!dest.exists());
    }

    #[test]
    fn valid_payload_is_kept() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("good.pdf");
        let mut body = b"%PDF-1.4\n".to_vec();
        body.resize(2048, b' ');

        let size = finalize_download(&dest, &body).expect("valid payload");
        assert_eq!(size, 2048);
        assert!(dest.exists());
    }
}

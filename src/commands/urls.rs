use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::UrlsArgs;
use crate::commands::download::{BASE_URL, resolve_papers, session_filename};
use crate::util::ensure_directory;

pub fn run(args: UrlsArgs) -> Result<()> {
    let papers = resolve_papers(&args.papers);
    let urls = generate_urls(&args.subject, &papers, args.from_year, args.to_year);

    write_csv(&args.output, &urls)?;

    let mark_schemes = urls.iter().filter(|u| u.contains("_ms_")).count();
    let question_papers = urls.iter().filter(|u| u.contains("_qp_")).count();

    info!(
        total = urls.len(),
        mark_schemes,
        question_papers,
        output = %args.output.display(),
        "url list written"
    );

    Ok(())
}

/// Same cross product and ordering as the downloader: years descending, June
/// then November, mark scheme then question paper per code. November is
/// omitted for the newest year.
pub(crate) fn generate_urls(
    subject: &str,
    papers: &[String],
    from_year: u32,
    to_year: u32,
) -> Vec<String> {
    let mut urls = Vec::new();

    for year in (from_year..=to_year).rev() {
        for paper in papers {
            for kind in ["ms", "qp"] {
                urls.push(format!(
                    "{BASE_URL}{}",
                    session_filename(subject, 's', year, kind, paper)
                ));
            }
        }

        if year < to_year {
            for paper in papers {
                for kind in ["ms", "qp"] {
                    urls.push(format!(
                        "{BASE_URL}{}",
                        session_filename(subject, 'w', year, kind, paper)
                    ));
                }
            }
        }
    }

    urls
}

fn write_csv(path: &Path, urls: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let mut text = String::from("URL\n");
    for url in urls {
        text.push_str(url);
        text.push('\n');
    }

    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{generate_urls, write_csv};
    use std::fs;

    fn papers() -> Vec<String> {
        ["21", "22", "41", "42", "61", "62"]
            .iter()
            .map(|p| (*p).to_string())
            .collect()
    }

    #[test]
    fn cross_product_counts_and_ordering() {
        let urls = generate_urls("0971", &papers(), 2018, 2025);

        // 8 June sessions and 7 November sessions, 6 papers, ms + qp each.
        assert_eq!(urls.len(), 8 * 12 + 7 * 12);
        assert!(urls[0].ends_with("0971_s25_ms_21.pdf"));
        assert!(urls[1].ends_with("0971_s25_qp_21.pdf"));
        assert!(urls.iter().all(|u| !u.contains("_w25_")));
        assert!(urls.iter().any(|u| u.contains("_w24_")));
    }

    #[test]
    fn csv_has_header_and_one_url_per_row() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("urls.csv");
        let urls = generate_urls("0971", &papers(), 2024, 2025);

        write_csv(&path, &urls).expect("write csv");

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "URL");
        assert_eq!(lines.len(), urls.len() + 1);
        assert_eq!(lines[1], urls[0]);
    }
}

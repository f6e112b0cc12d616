use std::path::Path;

use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::{error, info, warn};

use crate::cli::NumberArgs;
use crate::util::ensure_directory;

const MERGED_DIR_NAME: &str = "Merged_PDF";
const NUMBERED_DIR_NAME: &str = "Numbered_PDF";

const PAPER_DIRS: &[&str] = &["Paper_2", "Paper_4", "Paper_6"];
const DOC_TYPES: &[&str] = &["MS", "QP"];

const FONT_SIZE: f32 = 10.0;
const BASELINE_Y: f32 = 20.0;
/// Helvetica digit advance in em units; all ten digits share it.
const DIGIT_WIDTH_EM: f32 = 0.556;
const FONT_RESOURCE_NAME: &str = "PgNum";
const DEFAULT_PAGE_WIDTH: f32 = 612.0;

pub fn run(args: NumberArgs) -> Result<()> {
    let merged_dir = args.base_dir.join(MERGED_DIR_NAME);
    let numbered_dir = args.base_dir.join(NUMBERED_DIR_NAME);

    for paper in PAPER_DIRS {
        for doc_type in DOC_TYPES {
            let input = merged_dir
                .join(paper)
                .join(format!("{paper}_{doc_type}_Merged.pdf"));
            if !input.is_file() {
                warn!(input = %input.display(), "merged volume not found, skipping");
                continue;
            }

            let output = numbered_dir
                .join(paper)
                .join(format!("{paper}_{doc_type}_Numbered.pdf"));

            match number_pdf(&input, &output, args.start_from_page, args.start_number) {
                Ok(stamped) => info!(
                    output = %output.display(),
                    stamped,
                    "stamped page numbers"
                ),
                Err(err) => error!(
                    input = %input.display(),
                    error = %err,
                    "page numbering failed"
                ),
            }
        }
    }

    Ok(())
}

/// Stamp a centered number near the bottom of every page from
/// `start_from_page` (1-indexed) onward, counting up from `start_number`.
/// Returns how many pages were stamped.
pub(crate) fn number_pdf(
    input: &Path,
    output: &Path,
    start_from_page: u32,
    start_number: u32,
) -> Result<u32> {
    let mut doc =
        Document::load(input).with_context(|| format!("failed to load {}", input.display()))?;

    let font_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));

    let mut stamped = 0;
    for (page_no, page_id) in doc.get_pages() {
        if page_no < start_from_page {
            continue;
        }
        let label = (start_number + (page_no - start_from_page)).to_string();
        stamp_page(&mut doc, page_id, font_id, &label)
            .with_context(|| format!("failed to stamp page {page_no}"))?;
        stamped += 1;
    }

    if let Some(parent) = output.parent() {
        ensure_directory(parent)?;
    }
    doc.save(output)
        .with_context(|| format!("failed to save {}", output.display()))?;

    Ok(stamped)
}

fn stamp_page(doc: &mut Document, page_id: ObjectId, font_id: ObjectId, label: &str) -> Result<()> {
    let width = page_width(doc, page_id);
    let text_width = label.len() as f32 * DIGIT_WIDTH_EM * FONT_SIZE;
    let center_x = (width - text_width) / 2.0;

    attach_number_font(doc, page_id, font_id)?;

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![FONT_RESOURCE_NAME.into(), FONT_SIZE.into()]),
            Operation::new("Td", vec![center_x.into(), BASELINE_Y.into()]),
            Operation::new("Tj", vec![Object::string_literal(label)]),
            Operation::new("ET", vec![]),
            Operation::new("Q", vec![]),
        ],
    };
    let bytes = content
        .encode()
        .context("failed to encode page-number content")?;
    let stream_id = doc.add_object(Stream::new(Dictionary::new(), bytes));

    append_page_content(doc, page_id, stream_id)
}

/// Register the numbering font on the page's own resource dictionary,
/// cloning inherited resources so sibling pages are unaffected.
fn attach_number_font(doc: &mut Document, page_id: ObjectId, font_id: ObjectId) -> Result<()> {
    let mut resources = effective_resources(doc, page_id);

    let mut fonts = match resources.get(b"Font") {
        Ok(Object::Dictionary(existing)) => existing.clone(),
        Ok(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Dictionary(existing)) => existing.clone(),
            _ => Dictionary::new(),
        },
        _ => Dictionary::new(),
    };
    fonts.set(FONT_RESOURCE_NAME, Object::Reference(font_id));
    resources.set("Font", Object::Dictionary(fonts));

    let page = doc
        .get_object_mut(page_id)
        .context("page object missing")?;
    let dict = page.as_dict_mut().context("page is not a dictionary")?;
    dict.set("Resources", Object::Dictionary(resources));
    Ok(())
}

/// Resolve the page's resource dictionary, following the Parent chain for
/// inherited resources. Depth-limited against malformed trees.
fn effective_resources(doc: &Document, page_id: ObjectId) -> Dictionary {
    let mut current = doc.get_object(page_id).ok();
    for _ in 0..10 {
        let Some(Object::Dictionary(dict)) = current else {
            break;
        };

        if let Ok(resources) = dict.get(b"Resources") {
            match resources {
                Object::Dictionary(found) => return found.clone(),
                Object::Reference(id) => {
                    if let Ok(Object::Dictionary(found)) = doc.get_object(*id) {
                        return found.clone();
                    }
                }
                _ => {}
            }
        }

        current = match dict.get(b"Parent") {
            Ok(Object::Reference(id)) => doc.get_object(*id).ok(),
            _ => None,
        };
    }
    Dictionary::new()
}

/// Page width from the MediaBox, inherited via the Parent chain when absent.
/// Falls back to US Letter.
fn page_width(doc: &Document, page_id: ObjectId) -> f32 {
    let mut current = doc.get_object(page_id).ok();
    for _ in 0..10 {
        let Some(Object::Dictionary(dict)) = current else {
            break;
        };

        if let Ok(media_box) = dict.get(b"MediaBox") {
            let values = match media_box {
                Object::Array(values) => Some(values),
                Object::Reference(id) => match doc.get_object(*id) {
                    Ok(Object::Array(values)) => Some(values),
                    _ => None,
                },
                _ => None,
            };
            if let Some(values) = values
                && values.len() == 4
                && let (Some(x0), Some(x1)) = (as_f32(&values[0]), as_f32(&values[2]))
            {
                return x1 - x0;
            }
        }

        current = match dict.get(b"Parent") {
            Ok(Object::Reference(id)) => doc.get_object(*id).ok(),
            _ => None,
        };
    }
    DEFAULT_PAGE_WIDTH
}

fn as_f32(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(value) => Some(*value as f32),
        Object::Real(value) => Some(*value),
        _ => None,
    }
}

fn append_page_content(doc: &mut Document, page_id: ObjectId, stream_id: ObjectId) -> Result<()> {
    let page = doc
        .get_object_mut(page_id)
        .context("page object missing")?;
    let dict = page.as_dict_mut().context("page is not a dictionary")?;

    match dict.get(b"Contents").ok().cloned() {
        Some(Object::Reference(existing)) => {
            dict.set(
                "Contents",
                Object::Array(vec![
                    Object::Reference(existing),
                    Object::Reference(stream_id),
                ]),
            );
        }
        Some(Object::Array(mut streams)) => {
            streams.push(Object::Reference(stream_id));
            dict.set("Contents", Object::Array(streams));
        }
        _ => {
            dict.set("Contents", Object::Reference(stream_id));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{number_pdf, run};
    use crate::cli::NumberArgs;
    use crate::test_support::write_sample_pdf;
    use lopdf::Document;
    use std::fs;

    fn page_content(doc: &Document, page_no: u32) -> Vec<u8> {
        let pages = doc.get_pages();
        let page_id = pages[&page_no];
        doc.get_page_content(page_id).expect("page content")
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    #[test]
    fn numbers_start_at_the_configured_page() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.pdf");
        write_sample_pdf(&input, 4);

        let stamped = number_pdf(&input, &output, 3, 1).expect("number");
        assert_eq!(stamped, 2);

        let doc = Document::load(&output).expect("load output");
        assert!(!contains(&page_content(&doc, 1), b"(1) Tj"));
        assert!(!contains(&page_content(&doc, 2), b"(1) Tj"));
        assert!(contains(&page_content(&doc, 3), b"(1) Tj"));
        assert!(contains(&page_content(&doc, 4), b"(2) Tj"));
    }

    #[test]
    fn start_number_offsets_the_stamped_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.pdf");
        write_sample_pdf(&input, 2);

        let stamped = number_pdf(&input, &output, 1, 10).expect("number");
        assert_eq!(stamped, 2);

        let doc = Document::load(&output).expect("load output");
        assert!(contains(&page_content(&doc, 1), b"(10) Tj"));
        assert!(contains(&page_content(&doc, 2), b"(11) Tj"));
    }

    #[test]
    fn stamping_preserves_page_count_and_original_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.pdf");
        write_sample_pdf(&input, 3);

        number_pdf(&input, &output, 3, 1).expect("number");

        let doc = Document::load(&output).expect("load output");
        assert_eq!(doc.get_pages().len(), 3);
        assert!(contains(&page_content(&doc, 1), b"page 1"));
        assert!(contains(&page_content(&doc, 3), b"page 3"));
    }

    #[test]
    fn run_processes_the_merged_tree_and_skips_missing_inputs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().to_path_buf();

        fs::create_dir_all(base.join("Merged_PDF/Paper_2")).unwrap();
        write_sample_pdf(&base.join("Merged_PDF/Paper_2/Paper_2_QP_Merged.pdf"), 4);

        run(NumberArgs {
            base_dir: base.clone(),
            start_from_page: 3,
            start_number: 1,
        })
        .expect("run");

        let output = base.join("Numbered_PDF/Paper_2/Paper_2_QP_Numbered.pdf");
        assert!(output.exists());
        let doc = Document::load(&output).expect("load output");
        assert_eq!(doc.get_pages().len(), 4);

        assert!(!base.join("Numbered_PDF/Paper_2/Paper_2_MS_Numbered.pdf").exists());
    }
}

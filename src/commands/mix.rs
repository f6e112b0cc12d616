use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{error, info, warn};

use crate::cli::MixArgs;
use crate::ghostscript::{self, GS_CANDIDATES, VERSION_PROBE_TIMEOUT};
use crate::probe::probe;
use crate::util::ensure_directory;

const INDEX_DIR_NAME: &str = "Index";
const RELEASE_DIR_NAME: &str = "Release_PDF";
const OUTPUT_DIR_NAME: &str = "Merged_PDF";

/// The index tree uses spaced folder names while the release tree uses
/// underscores; both spellings are kept here.
const PAPERS: &[(&str, &str)] = &[
    ("Paper 2", "Paper_2"),
    ("Paper 4", "Paper_4"),
    ("Paper 6", "Paper_6"),
];
const DOC_TYPES: &[&str] = &["MS", "QP"];

pub fn run(args: MixArgs) -> Result<()> {
    let index_dir = args.base_dir.join(INDEX_DIR_NAME);
    let release_dir = args.base_dir.join(RELEASE_DIR_NAME);
    let output_dir = args.base_dir.join(OUTPUT_DIR_NAME);

    let gs_path = args
        .gs_path
        .clone()
        .or_else(|| ghostscript::discover(GS_CANDIDATES, VERSION_PROBE_TIMEOUT));
    if gs_path.is_none() {
        info!("ghostscript not found, combining in process");
    }

    for (index_folder, paper_name) in PAPERS {
        for doc_type in DOC_TYPES {
            let index_path = index_dir
                .join(index_folder)
                .join(doc_type)
                .join(format!("{paper_name}_{doc_type}_Index.pdf"));
            let release_path = release_dir
                .join(paper_name)
                .join(doc_type)
                .join(format!("{paper_name}_{doc_type}.pdf"));
            let output_path = output_dir
                .join(paper_name)
                .join(format!("{paper_name}_{doc_type}_Merged.pdf"));

            if !index_path.is_file() {
                warn!(index = %index_path.display(), "index pdf not found, skipping");
                continue;
            }
            if !release_path.is_file() {
                warn!(release = %release_path.display(), "release pdf not found, skipping");
                continue;
            }

            match mix_pair(gs_path.as_deref(), &index_path, &release_path, &output_path) {
                Ok(()) => info!(output = %output_path.display(), "prepended index"),
                Err(err) => error!(
                    paper = paper_name,
                    doc_type,
                    error = %err,
                    "mix failed"
                ),
            }
        }
    }

    Ok(())
}

/// Prepend the index pages to the release volume. Prefers the external tool
/// when available; a failed invocation falls back to the in-process combiner
/// rather than aborting the pair.
fn mix_pair(
    gs_path: Option<&Path>,
    index_path: &Path,
    release_path: &Path,
    output_path: &Path,
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        ensure_directory(parent)?;
    }

    let inputs = [index_path, release_path];
    if let Some(gs) = gs_path {
        let gs_inputs = [index_path.to_path_buf(), release_path.to_path_buf()];
        match ghostscript::merge(gs, &gs_inputs, output_path) {
            Ok(()) => {}
            Err(err) => {
                warn!(error = %err, "ghostscript merge failed, combining in process");
                combine_documents(&inputs, output_path)?;
            }
        }
    } else {
        combine_documents(&inputs, output_path)?;
    }

    let verified = probe(output_path);
    if !verified.valid {
        bail!("mixed output failed verification: {}", verified.reason);
    }
    Ok(())
}

/// Combine the inputs into one document, pages in input order. Objects are
/// renumbered into one id space; each input's page, catalog, and outline
/// nodes are replaced by a single fresh page tree.
pub(crate) fn combine_documents(inputs: &[&Path], output: &Path) -> Result<()> {
    let mut max_id: u32 = 1;
    let mut pages: Vec<(ObjectId, Object)> = Vec::new();
    let mut carried_objects: BTreeMap<ObjectId, Object> = BTreeMap::new();
    let mut document = Document::with_version("1.5");

    for input in inputs {
        let mut doc = Document::load(input)
            .with_context(|| format!("failed to load {}", input.display()))?;
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        // get_pages iterates in page order, which fixes the output order.
        for (_, page_id) in doc.get_pages() {
            let page = doc
                .get_object(page_id)
                .with_context(|| format!("missing page object in {}", input.display()))?;
            pages.push((page_id, page.clone()));
        }

        for (object_id, object) in doc.objects {
            match object.type_name().unwrap_or(b"") {
                b"Catalog" | b"Pages" | b"Page" | b"Outlines" | b"Outline" => {}
                _ => {
                    carried_objects.insert(object_id, object);
                }
            }
        }
    }

    if pages.is_empty() {
        bail!("no pages found in inputs");
    }

    document.objects.extend(carried_objects);

    // Carried ids came from the per-input renumbering; continue the allocator
    // from the same counter so the new page tree cannot collide with them.
    document.max_id = max_id;

    let pages_id = document.new_object_id();
    for (page_id, page) in &pages {
        if let Object::Dictionary(dict) = page {
            let mut dict = dict.clone();
            dict.set("Parent", Object::Reference(pages_id));
            document
                .objects
                .insert(*page_id, Object::Dictionary(dict));
        }
    }

    let kids: Vec<Object> = pages
        .iter()
        .map(|(page_id, _)| Object::Reference(*page_id))
        .collect();
    document.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter([
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(pages.len() as i64)),
        ])),
    );

    let catalog_id = document.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    document.trailer.set("Root", Object::Reference(catalog_id));

    document.max_id = document.objects.len() as u32;
    document.renumber_objects();
    document.compress();
    document
        .save(output)
        .with_context(|| format!("failed to save {}", output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{combine_documents, run};
    use crate::cli::MixArgs;
    use crate::test_support::write_sample_pdf;
    use lopdf::{Dictionary, Document, Object};
    use std::fs;

    fn page_content(doc: &Document, page_no: u32) -> Vec<u8> {
        let pages = doc.get_pages();
        doc.get_page_content(pages[&page_no]).expect("page content")
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    #[test]
    fn combined_document_keeps_input_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let index = dir.path().join("index.pdf");
        let release = dir.path().join("release.pdf");
        let output = dir.path().join("out.pdf");
        write_sample_pdf(&index, 2);
        write_sample_pdf(&release, 3);

        combine_documents(&[&index, &release], &output).expect("combine");

        let doc = Document::load(&output).expect("load output");
        assert_eq!(doc.get_pages().len(), 5);
        assert!(contains(&page_content(&doc, 2), b"page 2"));
        assert!(contains(&page_content(&doc, 3), b"page 1"));
        assert!(contains(&page_content(&doc, 5), b"page 3"));
    }

    #[test]
    fn combined_pages_keep_their_font_resources() {
        let dir = tempfile::tempdir().expect("tempdir");
        let index = dir.path().join("index.pdf");
        let release = dir.path().join("release.pdf");
        let output = dir.path().join("out.pdf");
        write_sample_pdf(&index, 2);
        write_sample_pdf(&release, 3);

        combine_documents(&[&index, &release], &output).expect("combine");

        let doc = Document::load(&output).expect("load output");
        for (page_no, page_id) in doc.get_pages() {
            let page = doc
                .get_object(page_id)
                .and_then(|object| object.as_dict())
                .expect("page dictionary");
            let resources: Dictionary = match page.get(b"Resources").expect("resources entry") {
                Object::Dictionary(dict) => dict.clone(),
                Object::Reference(id) => doc
                    .get_object(*id)
                    .and_then(|object| object.as_dict())
                    .expect("resources dictionary")
                    .clone(),
                other => panic!("unexpected resources object: {other:?}"),
            };
            assert!(
                resources.get(b"Font").is_ok(),
                "page {page_no} lost its font resources"
            );
        }
    }

    #[test]
    fn combining_nothing_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("out.pdf");
        let err = combine_documents(&[], &output).unwrap_err();
        assert!(err.to_string().contains("no pages"));
    }

    #[test]
    fn run_mixes_each_available_pair() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().to_path_buf();

        fs::create_dir_all(base.join("Index/Paper 2/QP")).unwrap();
        fs::create_dir_all(base.join("Release_PDF/Paper_2/QP")).unwrap();
        write_sample_pdf(&base.join("Index/Paper 2/QP/Paper_2_QP_Index.pdf"), 2);
        write_sample_pdf(&base.join("Release_PDF/Paper_2/QP/Paper_2_QP.pdf"), 3);

        run(MixArgs {
            base_dir: base.clone(),
            gs_path: None,
        })
        .expect("run");

        let output = base.join("Merged_PDF/Paper_2/Paper_2_QP_Merged.pdf");
        assert!(output.exists());
        let doc = Document::load(&output).expect("load output");
        assert_eq!(doc.get_pages().len(), 5);

        assert!(!base.join("Merged_PDF/Paper_2/Paper_2_MS_Merged.pdf").exists());
    }
}

//! Order-preserving PDF concatenation.
//!
//! Objects from every source document are renumbered into one id space,
//! pages are re-parented under a single Pages node, and the final page
//! sequence is exactly the concatenation of the inputs in submission order.

use anyhow::{bail, Context, Result};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};

/// Page attributes that may live on an ancestor Pages node instead of the
/// page itself (PDF 32000-1, table 30).
const INHERITABLE_PAGE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Merge the given documents into one, preserving input order.
pub fn merge_documents(documents: Vec<Document>) -> Result<Vec<u8>> {
    if documents.is_empty() {
        bail!("Nothing to merge");
    }

    let mut merged = Document::with_version("1.5");
    let mut max_id = 1u32;

    // Pages in concatenation order; id map keeps dedup across re-parenting
    let mut page_entries: Vec<(ObjectId, Object)> = Vec::new();
    let mut carried_objects: Vec<(ObjectId, Object)> = Vec::new();

    for mut doc in documents {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        for page_id in &page_ids {
            let mut dict = doc
                .get_object(*page_id)
                .and_then(Object::as_dict)
                .context("Page object missing after renumbering")?
                .clone();
            // The source Pages nodes are dropped below, so attributes a page
            // inherits from them must be pulled down onto the page first
            inherit_page_attributes(&doc, &mut dict);
            page_entries.push((*page_id, Object::Dictionary(dict)));
        }

        for (id, object) in doc.objects {
            // Catalog and Pages nodes are rebuilt below; pages are carried
            // via page_entries so their order survives
            match object_type(&object) {
                Some(b"Catalog") | Some(b"Pages") | Some(b"Page") => {}
                _ => carried_objects.push((id, object)),
            }
        }
    }

    if page_entries.is_empty() {
        bail!("Merged documents contain no pages");
    }

    for (id, object) in carried_objects {
        merged.objects.insert(id, object);
    }

    let pages_id = (max_id, 0);
    max_id += 1;
    let catalog_id = (max_id, 0);

    for (page_id, object) in &page_entries {
        let mut dict = object
            .as_dict()
            .context("Page object is not a dictionary")?
            .clone();
        dict.set("Parent", pages_id);
        merged.objects.insert(*page_id, Object::Dictionary(dict));
    }

    let kids: Vec<Object> = page_entries.iter().map(|(id, _)| (*id).into()).collect();
    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => page_entries.len() as i64,
            "Kids" => kids,
        }),
    );
    merged.objects.insert(
        catalog_id,
        Object::Dictionary(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }),
    );

    merged.trailer.set("Root", catalog_id);
    merged.max_id = catalog_id.0;
    merged.renumber_objects();
    merged.compress();

    let mut buffer = Vec::new();
    merged
        .save_to(&mut buffer)
        .context("Failed to serialize merged PDF")?;
    Ok(buffer)
}

/// Copy inheritable attributes from the page's ancestor Pages nodes onto
/// the page dictionary itself, nearest ancestor winning. Values may be
/// indirect references; the referenced objects are carried into the merged
/// document unchanged, so the references stay valid.
fn inherit_page_attributes(doc: &Document, page: &mut Dictionary) {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    while let Some(parent_id) = parent {
        let parent_dict = match doc.get_object(parent_id).and_then(Object::as_dict) {
            Ok(dict) => dict,
            Err(_) => break,
        };
        for key in INHERITABLE_PAGE_KEYS {
            if !page.has(key) {
                if let Ok(value) = parent_dict.get(key) {
                    page.set(key, value.clone());
                }
            }
        }
        parent = parent_dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
}

fn object_type(object: &Object) -> Option<&[u8]> {
    object
        .as_dict()
        .ok()
        .and_then(|dict| dict.get(b"Type").ok())
        .and_then(|t| t.as_name().ok())
}

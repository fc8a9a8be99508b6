//! Object-graph merge of several parsed PDFs into one document.
//!
//! Every source is renumbered into its own id range, its pages are collected
//! in reading order and re-parented under a single page-tree root, and the
//! first catalog found becomes the catalog of the result.

use crate::core::{metadata, outline};
use crate::domain::model::{DocumentPlacement, LoadedDocument, MergedDocument};
use crate::utils::error::{MergeError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::BTreeSet;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_PAGE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

const MAX_PAGE_TREE_DEPTH: usize = 64;

/// `/Type` of a dictionary or stream object.
pub fn object_type(object: &Object) -> Option<&[u8]> {
    let dict = match object {
        Object::Dictionary(dict) => dict,
        Object::Stream(stream) => &stream.dict,
        _ => return None,
    };
    dict.get(b"Type").and_then(Object::as_name).ok()
}

/// Copy of a page dictionary with inherited attributes made explicit.
///
/// Intermediate `Pages` nodes are dropped by the merge, so anything the page
/// would have inherited from them has to live on the page itself.
fn page_with_inherited(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = doc.get_dictionary(page_id)?.clone();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(parent_id) = parent {
        depth += 1;
        if depth > MAX_PAGE_TREE_DEPTH {
            tracing::warn!("Page tree deeper than {} levels, stopping", MAX_PAGE_TREE_DEPTH);
            break;
        }
        let Ok(node) = doc.get_dictionary(parent_id) else {
            break;
        };
        for key in INHERITABLE_PAGE_KEYS {
            if !page.has(key) {
                if let Ok(value) = node.get(key) {
                    page.set(key, value.clone());
                }
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Ok(page)
}

/// Ids of the source outline tree: the `Outlines` root and every item under it.
///
/// Outline items usually carry no `/Type`, so they cannot be recognised one by one.
fn outline_tree(doc: &Document) -> BTreeSet<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Outlines"))
        .and_then(Object::as_reference)
        .map(|root| outline::outline_items(doc, root))
        .unwrap_or_default()
}

/// Merges `docs` in order. Requires at least two documents.
pub fn merge_documents(docs: Vec<LoadedDocument>) -> Result<MergedDocument> {
    if docs.len() < 2 {
        return Err(MergeError::NotEnoughFiles { count: docs.len() });
    }

    let version = metadata::newest_version(docs.iter().map(|d| d.document.version.as_str()));
    let mut merged = Document::with_version(version);

    let mut max_id = 1;
    let mut catalog: Option<(ObjectId, Object)> = None;
    let mut pages_root: Option<ObjectId> = None;
    let mut pages: Vec<(ObjectId, Dictionary)> = Vec::new();
    let mut placements = Vec::with_capacity(docs.len());

    for loaded in docs {
        let LoadedDocument {
            index,
            spec,
            resolved_path,
            mut document,
            ..
        } = loaded;

        document.renumber_objects_with(max_id);
        max_id = document.max_id + 1;

        // get_pages is keyed by page number, so values come out in reading order.
        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
        tracing::debug!(
            "Source #{} ({}) contributes {} page(s)",
            index,
            resolved_path.display(),
            page_ids.len()
        );

        placements.push(DocumentPlacement {
            spec,
            resolved_path,
            first_page: page_ids.first().copied(),
            start_page: pages.len() + 1,
            page_count: page_ids.len(),
        });

        for page_id in &page_ids {
            pages.push((*page_id, page_with_inherited(&document, *page_id)?));
        }

        let page_set: BTreeSet<ObjectId> = page_ids.into_iter().collect();
        let outline_set = outline_tree(&document);
        let info_id = document
            .trailer
            .get(b"Info")
            .and_then(Object::as_reference)
            .ok();

        for (object_id, object) in std::mem::take(&mut document.objects) {
            if page_set.contains(&object_id)
                || outline_set.contains(&object_id)
                || Some(object_id) == info_id
            {
                continue;
            }
            match object_type(&object) {
                Some(b"Catalog") => {
                    if catalog.is_none() {
                        catalog = Some((object_id, object));
                    }
                }
                Some(b"Pages") => {
                    if pages_root.is_none() {
                        pages_root = Some(object_id);
                    }
                }
                // Unreachable pages and stray outline objects are dropped.
                Some(b"Page") | Some(b"Outlines") | Some(b"Outline") => {}
                _ => {
                    merged.objects.insert(object_id, object);
                }
            }
        }
    }

    let pages_id = pages_root.ok_or(MergeError::MissingPagesRoot)?;
    let (catalog_id, catalog_object) = catalog.ok_or(MergeError::MissingCatalog)?;

    let kids: Vec<Object> = pages.iter().map(|(id, _)| Object::Reference(*id)).collect();
    let page_count = pages.len();

    for (page_id, mut page) in pages {
        page.set("Parent", Object::Reference(pages_id));
        merged.objects.insert(page_id, Object::Dictionary(page));
    }

    let mut root = Dictionary::new();
    root.set("Type", "Pages");
    root.set("Count", page_count as i64);
    root.set("Kids", kids);
    merged.objects.insert(pages_id, Object::Dictionary(root));

    let mut catalog_dict = catalog_object
        .as_dict()
        .map_err(|_| MergeError::MissingCatalog)?
        .clone();
    catalog_dict.set("Pages", Object::Reference(pages_id));
    catalog_dict.remove(b"Outlines");
    let shows_outlines = catalog_dict
        .get(b"PageMode")
        .and_then(Object::as_name)
        .map(|mode| mode == b"UseOutlines")
        .unwrap_or(false);
    if shows_outlines {
        catalog_dict.remove(b"PageMode");
    }
    merged
        .objects
        .insert(catalog_id, Object::Dictionary(catalog_dict));

    merged.trailer.set("Root", Object::Reference(catalog_id));
    merged.max_id = merged
        .objects
        .keys()
        .map(|(number, _)| *number)
        .max()
        .unwrap_or(0);

    tracing::debug!(
        "Merged {} page(s) from {} document(s), max object id {}",
        page_count,
        placements.len(),
        merged.max_id
    );

    Ok(MergedDocument {
        document: merged,
        catalog_id,
        pages_id,
        page_count,
        placements,
        outline_id: None,
    })
}

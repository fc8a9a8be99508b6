//! Bookmark outline for merged documents.

use crate::core::metadata;
use crate::domain::model::{
    BookmarkStyle, DocumentPlacement, MergedDocument, OutlineLayout, TitleStyle,
};
use lopdf::{Bookmark, Document, Object, ObjectId};
use std::collections::BTreeSet;

pub const TABLE_OF_CONTENTS: &str = "Table of Contents";

/// One planned bookmark below the "Table of Contents" entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub title: String,
    pub style: BookmarkStyle,
    pub page: ObjectId,
    /// Index of the parent entry; `None` hangs it off the table of contents.
    pub parent: Option<usize>,
}

pub fn entry_title(placement: &DocumentPlacement, titles: TitleStyle) -> String {
    placement
        .spec
        .title
        .clone()
        .unwrap_or_else(|| titles.title_for(&placement.spec.path, placement.start_page))
}

/// Ids of an outline tree: `root` and every item reachable through `First`/`Next`.
pub fn outline_items(doc: &Document, root: ObjectId) -> BTreeSet<ObjectId> {
    let mut seen = BTreeSet::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        if let Ok(item) = doc.get_dictionary(id) {
            for key in [b"First".as_slice(), b"Next".as_slice()] {
                if let Ok(next) = item.get(key).and_then(Object::as_reference) {
                    stack.push(next);
                }
            }
        }
    }
    seen
}

/// Rewrites non-ASCII item titles as UTF-16BE text strings.
///
/// lopdf stores bookmark titles as raw UTF-8 bytes, which readers decode as
/// PDFDocEncoding.
fn encode_titles(doc: &mut Document, root: ObjectId) {
    for id in outline_items(doc, root) {
        let Ok(Object::Dictionary(item)) = doc.get_object_mut(id) else {
            continue;
        };
        let title = match item.get(b"Title") {
            Ok(Object::String(bytes, _)) if !bytes.is_ascii() => {
                String::from_utf8(bytes.clone()).ok()
            }
            _ => None,
        };
        if let Some(title) = title {
            item.set("Title", metadata::text_string(&title));
        }
    }
}

/// Lays out one entry per document that has at least one page.
pub fn plan_outline(
    placements: &[DocumentPlacement],
    layout: OutlineLayout,
    titles: TitleStyle,
) -> Vec<OutlineEntry> {
    if layout == OutlineLayout::None {
        return Vec::new();
    }

    let mut entries: Vec<OutlineEntry> = Vec::with_capacity(placements.len());
    for placement in placements {
        let Some(page) = placement.first_page else {
            tracing::warn!(
                "{} has no pages, skipping its bookmark",
                placement.resolved_path.display()
            );
            continue;
        };

        let parent = match layout {
            OutlineLayout::Nested => entries.len().checked_sub(1),
            _ => None,
        };

        entries.push(OutlineEntry {
            title: entry_title(placement, titles),
            style: placement.spec.style,
            page,
            parent,
        });
    }
    entries
}

/// Writes the outline into the merged document and points the catalog at it.
///
/// Returns the outline root, or `None` when nothing was written.
pub fn build_outline(
    merged: &mut MergedDocument,
    layout: OutlineLayout,
    titles: TitleStyle,
) -> Option<ObjectId> {
    let entries = plan_outline(&merged.placements, layout, titles);
    if entries.is_empty() {
        return None;
    }

    let doc = &mut merged.document;

    // (0, 0) resolves to the first child's page in adjust_zero_pages.
    let toc = doc.add_bookmark(
        Bookmark::new(TABLE_OF_CONTENTS.to_string(), [0.0, 0.0, 0.0], 0, (0, 0)),
        None,
    );

    let mut ids: Vec<u32> = Vec::with_capacity(entries.len());
    for entry in entries {
        let parent = entry.parent.and_then(|i| ids.get(i).copied()).unwrap_or(toc);
        let id = doc.add_bookmark(
            Bookmark::new(entry.title, entry.style.color, entry.style.format(), entry.page),
            Some(parent),
        );
        ids.push(id);
    }

    doc.adjust_zero_pages();

    let outline_id = doc.build_outline()?;
    encode_titles(doc, outline_id);
    if let Ok(Object::Dictionary(ref mut catalog)) = doc.get_object_mut(merged.catalog_id) {
        catalog.set("Outlines", Object::Reference(outline_id));
        catalog.set("PageMode", "UseOutlines");
    }
    merged.outline_id = Some(outline_id);

    tracing::debug!("Outline written with {} document bookmark(s)", ids.len());
    Some(outline_id)
}

//! In-memory PDFs for unit tests.

use crate::domain::model::{LoadedDocument, SourceSpec};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::path::PathBuf;

/// A small document whose page tree keeps `Resources` and `MediaBox` on the
/// `Pages` node, so pages only get them by inheritance.
pub fn sample_document(pages: usize, label: &str) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages);
    for n in 0..pages {
        let text = format!("BT /F1 24 Tf 72 720 Td ({} page {}) Tj ET", label, n + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), text.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let media_box: Vec<Object> = vec![0.into(), 0.into(), 595.into(), 842.into()];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Two-level page tree: the root carries `MediaBox`, `Rotate` and `Resources`,
/// an intermediate node adds `CropBox`, and the second page overrides `Rotate`.
pub fn nested_document() -> Document {
    let mut doc = Document::with_version("1.4");
    let root_id = doc.new_object_id();
    let branch_id = doc.new_object_id();
    let resources_id = doc.add_object(dictionary! {});

    let mut kids: Vec<Object> = Vec::new();
    for rotate in [None, Some(0)] {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), Vec::new()));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => branch_id,
            "Contents" => content_id,
        };
        if let Some(rotate) = rotate {
            page.set("Rotate", rotate);
        }
        kids.push(doc.add_object(page).into());
    }

    let crop_box: Vec<Object> = vec![10.into(), 10.into(), 200.into(), 200.into()];
    doc.objects.insert(
        branch_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Parent" => root_id,
            "Kids" => kids,
            "Count" => 2,
            "CropBox" => crop_box,
        }),
    );
    let media_box: Vec<Object> = vec![0.into(), 0.into(), 300.into(), 300.into()];
    let branch: Vec<Object> = vec![branch_id.into()];
    doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => branch,
            "Count" => 2,
            "MediaBox" => media_box,
            "Rotate" => 90,
            "Resources" => resources_id,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => root_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

pub fn loaded(index: usize, path: &str, document: Document) -> LoadedDocument {
    let page_count = document.get_pages().len();
    LoadedDocument {
        index,
        spec: SourceSpec::new(path),
        resolved_path: PathBuf::from(path),
        document,
        page_count,
    }
}

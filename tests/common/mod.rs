#![allow(dead_code)]

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use merge_pdf::core::Storage;
use merge_pdf::{MergeError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Serialized PDF with `pages` pages; each page shows "<label> page <n>".
pub fn sample_pdf(pages: usize, label: &str) -> Vec<u8> {
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

    let media_box: Vec<Object> = vec![0.into(), 0.into(), 612.into(), 792.into()];
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

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// `sample_pdf` with an `Encrypt` entry in its trailer.
pub fn encrypted_pdf(pages: usize, label: &str) -> Vec<u8> {
    let mut doc = Document::load_mem(&sample_pdf(pages, label)).unwrap();
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
    });
    doc.trailer.set("Encrypt", encrypt_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

pub fn catalog_of(doc: &Document) -> &Dictionary {
    let root = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    doc.get_dictionary(root).unwrap()
}

/// Text shown on each page, in page order.
pub fn page_texts(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .values()
        .map(|id| String::from_utf8_lossy(&doc.get_page_content(*id).unwrap()).into_owned())
        .collect()
}

/// Outline items are the dictionaries carrying both a `Title` and a `Parent`.
pub fn outline_items(doc: &Document) -> Vec<ObjectId> {
    doc.objects
        .iter()
        .filter_map(|(id, object)| match object {
            Object::Dictionary(dict) if dict.has(b"Title") && dict.has(b"Parent") => Some(*id),
            _ => None,
        })
        .collect()
}

/// Top-level outline items in `First`/`Next` order.
pub fn top_level_items(doc: &Document) -> Vec<ObjectId> {
    let root = catalog_of(doc)
        .get(b"Outlines")
        .and_then(Object::as_reference)
        .unwrap();
    children_of(doc, root)
}

pub fn children_of(doc: &Document, parent: ObjectId) -> Vec<ObjectId> {
    let mut items = Vec::new();
    let mut next = doc
        .get_dictionary(parent)
        .unwrap()
        .get(b"First")
        .and_then(Object::as_reference)
        .ok();
    while let Some(id) = next {
        items.push(id);
        next = doc
            .get_dictionary(id)
            .unwrap()
            .get(b"Next")
            .and_then(Object::as_reference)
            .ok();
    }
    items
}

/// Page an outline item's `GoTo` action points at.
pub fn destination_of(doc: &Document, item: ObjectId) -> ObjectId {
    let action_id = doc
        .get_dictionary(item)
        .unwrap()
        .get(b"A")
        .and_then(Object::as_reference)
        .unwrap();
    let dest = doc
        .get_dictionary(action_id)
        .unwrap()
        .get(b"D")
        .and_then(Object::as_array)
        .unwrap();
    dest[0].as_reference().unwrap()
}

/// Outline item title, decoding UTF-16BE text strings.
pub fn title_of(doc: &Document, item: ObjectId) -> String {
    let bytes = match doc.get_dictionary(item).unwrap().get(b"Title").unwrap() {
        Object::String(bytes, _) => bytes.clone(),
        other => panic!("unexpected title: {:?}", other),
    };
    match bytes.strip_prefix(&[0xFE, 0xFF]) {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).unwrap()
        }
        None => {
            assert!(bytes.is_ascii(), "non-ASCII title without BOM: {:?}", bytes);
            String::from_utf8(bytes.clone()).unwrap()
        }
    }
}

#[derive(Clone, Default)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, path: &str, data: Vec<u8>) {
        self.files.lock().await.insert(PathBuf::from(path), data);
    }

    pub async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().await.get(Path::new(path)).cloned()
    }
}

impl Storage for MockStorage {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let files = self.files.lock().await;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| MergeError::SourceNotFound {
                path: path.to_path_buf(),
            })
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let mut files = self.files.lock().await;
        files.insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }
}

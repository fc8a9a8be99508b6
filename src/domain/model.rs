use chrono::{DateTime, Utc};
use lopdf::{Document, ObjectId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Visual style of an outline entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookmarkStyle {
    /// RGB, each component in 0.0..=1.0.
    pub color: [f32; 3],
    pub bold: bool,
    pub italic: bool,
}

impl BookmarkStyle {
    /// Outline item flags: 1 italic, 2 bold, 3 both.
    pub fn format(&self) -> u32 {
        u32::from(self.italic) | (u32::from(self.bold) << 1)
    }
}

impl Default for BookmarkStyle {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0],
            bold: false,
            italic: false,
        }
    }
}

/// One input document.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub title: Option<String>,
    pub style: BookmarkStyle,
}

impl SourceSpec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            title: None,
            style: BookmarkStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum OutlineLayout {
    /// Every document sits directly under "Table of Contents".
    #[default]
    Flat,
    /// Each document nests under the previous one.
    Nested,
    /// No outline is written.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum TitleStyle {
    /// "Page N", N being where the document starts in the merged output.
    #[default]
    StartPage,
    /// The source file stem.
    FileName,
}

impl TitleStyle {
    pub fn title_for(&self, path: &Path, start_page: usize) -> String {
        match self {
            TitleStyle::StartPage => format!("Page {}", start_page),
            TitleStyle::FileName => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("Page {}", start_page)),
        }
    }
}

/// A parsed source, still numbered as it was on disk.
#[derive(Debug)]
pub struct LoadedDocument {
    pub index: usize,
    pub spec: SourceSpec,
    pub resolved_path: PathBuf,
    pub document: Document,
    pub page_count: usize,
}

/// Where one source landed inside the merged document.
#[derive(Debug, Clone)]
pub struct DocumentPlacement {
    pub spec: SourceSpec,
    pub resolved_path: PathBuf,
    pub first_page: Option<ObjectId>,
    /// 1-based page number of `first_page` in the merged output.
    pub start_page: usize,
    pub page_count: usize,
}

#[derive(Debug)]
pub struct MergedDocument {
    pub document: Document,
    pub catalog_id: ObjectId,
    pub pages_id: ObjectId,
    pub page_count: usize,
    pub placements: Vec<DocumentPlacement>,
    pub outline_id: Option<ObjectId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSummary {
    pub path: PathBuf,
    pub pages: usize,
    pub first_page: usize,
}

/// Summary of a finished run, also written as JSON with `--report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeReport {
    pub output: PathBuf,
    pub page_count: usize,
    pub sources: Vec<SourceSummary>,
    pub output_bytes: usize,
    pub compressed: bool,
    pub dry_run: bool,
    pub outline: bool,
    pub created_at: DateTime<Utc>,
}

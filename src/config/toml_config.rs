use crate::core::ConfigProvider;
use crate::domain::model::{BookmarkStyle, OutlineLayout, SourceSpec, TitleStyle};
use crate::utils::error::{MergeError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A merge job described in a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub merge: MergeSection,
    #[serde(default)]
    pub outline: OutlineSection,
    #[serde(default)]
    pub documents: Vec<DocumentEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeSection {
    pub predir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub title: Option<String>,
    pub compress: Option<bool>,
    pub dry_run: Option<bool>,
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutlineSection {
    pub layout: Option<OutlineLayout>,
    pub titles: Option<TitleStyle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub path: PathBuf,
    pub title: Option<String>,
    pub color: Option<[f32; 3]>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

impl DocumentEntry {
    pub fn to_source(&self) -> SourceSpec {
        let defaults = BookmarkStyle::default();
        SourceSpec {
            path: self.path.clone(),
            title: self.title.clone(),
            style: BookmarkStyle {
                color: self.color.unwrap_or(defaults.color),
                bold: self.bold.unwrap_or(defaults.bold),
                italic: self.italic.unwrap_or(defaults.italic),
            },
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${DOCS_DIR})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MergeError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// 套用命令列參數覆蓋設定
    #[cfg(feature = "cli")]
    pub fn apply_overrides(&mut self, cli: &crate::config::CliConfig) {
        if cli.predir.is_some() {
            self.merge.predir = cli.predir.clone();
        }
        if cli.output.is_some() {
            self.merge.output = cli.output.clone();
        }
        if cli.title.is_some() {
            self.merge.title = cli.title.clone();
        }
        if cli.report.is_some() {
            self.merge.report = cli.report.clone();
        }
        if cli.compress {
            self.merge.compress = Some(true);
        }
        if cli.dry_run {
            self.merge.dry_run = Some(true);
        }
        if cli.outline.is_some() {
            self.outline.layout = cli.outline;
        }
        if cli.titles.is_some() {
            self.outline.titles = cli.titles;
        }
        self.documents.extend(cli.files.iter().map(|path| DocumentEntry {
            path: path.clone(),
            title: None,
            color: None,
            bold: None,
            italic: None,
        }));
    }
}

impl ConfigProvider for TomlConfig {
    fn base_dir(&self) -> &Path {
        self.merge.predir.as_deref().unwrap_or(Path::new("."))
    }

    fn sources(&self) -> Vec<SourceSpec> {
        self.documents.iter().map(DocumentEntry::to_source).collect()
    }

    fn output_path(&self) -> PathBuf {
        self.merge
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from("merged.pdf"))
    }

    fn outline(&self) -> OutlineLayout {
        self.outline.layout.unwrap_or_default()
    }

    fn title_style(&self) -> TitleStyle {
        self.outline.titles.unwrap_or_default()
    }

    fn document_title(&self) -> Option<&str> {
        self.merge.title.as_deref()
    }

    fn compress(&self) -> bool {
        self.merge.compress.unwrap_or(false)
    }

    fn dry_run(&self) -> bool {
        self.merge.dry_run.unwrap_or(false)
    }

    fn report_path(&self) -> Option<PathBuf> {
        self.merge.report.clone()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(predir) = &self.merge.predir {
            validation::validate_path("merge.predir", predir)?;
        }
        if let Some(title) = &self.merge.title {
            validation::validate_non_empty_string("merge.title", title)?;
        }
        if let Some(report) = &self.merge.report {
            validation::validate_path("merge.report", report)?;
        }
        validation::validate_merge_inputs(&self.sources(), &self.output_path())
    }
}

use crate::domain::model::{
    LoadedDocument, MergeReport, MergedDocument, OutlineLayout, SourceSpec, TitleStyle,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Directory relative inputs and the output are resolved against.
    fn base_dir(&self) -> &Path;
    fn sources(&self) -> Vec<SourceSpec>;
    fn output_path(&self) -> PathBuf;
    fn outline(&self) -> OutlineLayout;
    fn title_style(&self) -> TitleStyle;
    fn document_title(&self) -> Option<&str>;
    fn compress(&self) -> bool;
    fn dry_run(&self) -> bool;
    fn report_path(&self) -> Option<PathBuf>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<LoadedDocument>>;
    async fn transform(&self, docs: Vec<LoadedDocument>) -> Result<MergedDocument>;
    async fn load(&self, merged: MergedDocument) -> Result<MergeReport>;
}

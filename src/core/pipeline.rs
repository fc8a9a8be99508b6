use crate::core::{merge, metadata, outline};
use crate::core::{ConfigProvider, LoadedDocument, MergeReport, MergedDocument, Pipeline, Storage};
use crate::domain::model::SourceSummary;
use crate::utils::error::{MergeError, Result};
use chrono::Utc;
use lopdf::Document;

pub struct MergePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> MergePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MergePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<LoadedDocument>> {
        let sources = self.config.sources();
        let mut docs = Vec::with_capacity(sources.len());

        for (index, spec) in sources.into_iter().enumerate() {
            let resolved_path = self.config.base_dir().join(&spec.path);
            tracing::debug!("Reading source #{}: {}", index, resolved_path.display());

            let bytes = self.storage.read_file(&spec.path).await?;
            let document = Document::load_mem(&bytes).map_err(|e| MergeError::InvalidSource {
                path: resolved_path.clone(),
                reason: e.to_string(),
            })?;

            if document.trailer.has(b"Encrypt") {
                return Err(MergeError::EncryptedSource {
                    path: resolved_path,
                });
            }

            let page_count = document.get_pages().len();
            tracing::info!(
                "📄 {} (PDF {}, {} page(s))",
                resolved_path.display(),
                document.version,
                page_count
            );

            docs.push(LoadedDocument {
                index,
                spec,
                resolved_path,
                document,
                page_count,
            });
        }

        Ok(docs)
    }

    async fn transform(&self, docs: Vec<LoadedDocument>) -> Result<MergedDocument> {
        let mut merged = merge::merge_documents(docs)?;

        if outline::build_outline(&mut merged, self.config.outline(), self.config.title_style())
            .is_none()
        {
            tracing::debug!("No outline written");
        }

        metadata::stamp_info(
            &mut merged.document,
            self.config.document_title(),
            Utc::now(),
        );

        Ok(merged)
    }

    async fn load(&self, merged: MergedDocument) -> Result<MergeReport> {
        let MergedDocument {
            mut document,
            page_count,
            placements,
            outline_id,
            ..
        } = merged;

        let compressed = self.config.compress();
        if compressed {
            tracing::debug!("Compressing content streams");
            document.compress();
        }

        let mut buffer = Vec::new();
        document.save_to(&mut buffer)?;

        let output = self.config.output_path();
        let dry_run = self.config.dry_run();
        if dry_run {
            tracing::info!(
                "Dry run: {} bytes would be written to {}",
                buffer.len(),
                output.display()
            );
        } else {
            self.storage.write_file(&output, &buffer).await?;
        }

        let report = MergeReport {
            output: self.config.base_dir().join(&output),
            page_count,
            sources: placements
                .iter()
                .map(|p| SourceSummary {
                    path: p.resolved_path.clone(),
                    pages: p.page_count,
                    first_page: p.start_page,
                })
                .collect(),
            output_bytes: buffer.len(),
            compressed,
            dry_run,
            outline: outline_id.is_some(),
            created_at: Utc::now(),
        };

        if let Some(report_path) = self.config.report_path() {
            let json = serde_json::to_vec_pretty(&report)?;
            self.storage.write_file(&report_path, &json).await?;
            tracing::debug!("Report written to {}", report_path.display());
        }

        Ok(report)
    }
}

pub mod engine;
pub mod merge;
pub mod metadata;
pub mod outline;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod fixtures;

pub use crate::domain::model::{LoadedDocument, MergeReport, MergedDocument};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

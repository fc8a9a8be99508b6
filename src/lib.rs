pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{engine::MergeEngine, pipeline::MergePipeline};
pub use domain::model::{MergeReport, OutlineLayout, SourceSpec, TitleStyle};
pub use utils::error::{MergeError, Result};

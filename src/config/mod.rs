pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use crate::core::ConfigProvider;
    use crate::domain::model::{OutlineLayout, SourceSpec, TitleStyle};
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use std::path::{Path, PathBuf};

    pub const DEFAULT_OUTPUT: &str = "merged.pdf";

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "merge_pdf", version)]
    #[command(about = "Merge PDF files into one document with a bookmark per source")]
    pub struct CliConfig {
        /// Directory the input files (and the output) are resolved against
        #[arg(short, long)]
        pub predir: Option<PathBuf>,

        /// Input PDF files, in merge order (repeat the flag or separate with commas)
        #[arg(short, long, value_delimiter = ',')]
        pub files: Vec<PathBuf>,

        /// Output file name [default: merged.pdf]
        #[arg(short, long)]
        pub output: Option<PathBuf>,

        /// Merge job file (TOML); flags given on the command line override it
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        /// Bookmark layout
        #[arg(long, value_enum)]
        pub outline: Option<OutlineLayout>,

        /// How document bookmarks are titled
        #[arg(long, value_enum)]
        pub titles: Option<TitleStyle>,

        /// Title stored in the merged document's metadata
        #[arg(long)]
        pub title: Option<String>,

        /// Compress content streams before writing
        #[arg(long)]
        pub compress: bool,

        /// Merge in memory but do not write the output file
        #[arg(long)]
        pub dry_run: bool,

        /// Write a JSON summary of the run to this file
        #[arg(long)]
        pub report: Option<PathBuf>,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        pub json: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log CPU and memory usage per phase")]
        pub monitor: bool,
    }

    impl ConfigProvider for CliConfig {
        fn base_dir(&self) -> &Path {
            self.predir.as_deref().unwrap_or(Path::new("."))
        }

        fn sources(&self) -> Vec<SourceSpec> {
            self.files.iter().cloned().map(SourceSpec::new).collect()
        }

        fn output_path(&self) -> PathBuf {
            self.output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
        }

        fn outline(&self) -> OutlineLayout {
            self.outline.unwrap_or_default()
        }

        fn title_style(&self) -> TitleStyle {
            self.titles.unwrap_or_default()
        }

        fn document_title(&self) -> Option<&str> {
            self.title.as_deref()
        }

        fn compress(&self) -> bool {
            self.compress
        }

        fn dry_run(&self) -> bool {
            self.dry_run
        }

        fn report_path(&self) -> Option<PathBuf> {
            self.report.clone()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(predir) = &self.predir {
                validation::validate_path("predir", predir)?;
            }
            if let Some(title) = &self.title {
                validation::validate_non_empty_string("title", title)?;
            }
            if let Some(report) = &self.report {
                validation::validate_path("report", report)?;
            }
            validation::validate_merge_inputs(&self.sources(), &self.output_path())
        }
    }

}

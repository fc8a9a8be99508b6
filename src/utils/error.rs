use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("PDF processing failed: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("files must be more than 1 (got {count})")]
    NotEnoughFiles { count: usize },

    #[error("{} is not found", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("{} is not a readable PDF: {reason}", path.display())]
    InvalidSource { path: PathBuf, reason: String },

    #[error("{} is encrypted", path.display())]
    EncryptedSource { path: PathBuf },

    #[error("Pages root not found")]
    MissingPagesRoot,

    #[error("Catalog root not found")]
    MissingCatalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Pdf,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MergeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MergeError::ConfigValidationError { .. }
            | MergeError::InvalidConfigValueError { .. }
            | MergeError::TomlError(_)
            | MergeError::NotEnoughFiles { .. } => ErrorCategory::Configuration,
            MergeError::SourceNotFound { .. }
            | MergeError::InvalidSource { .. }
            | MergeError::EncryptedSource { .. } => ErrorCategory::Input,
            MergeError::PdfError(_) | MergeError::MissingPagesRoot | MergeError::MissingCatalog => {
                ErrorCategory::Pdf
            }
            MergeError::IoError(_) | MergeError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Pdf => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MergeError::NotEnoughFiles { .. } => {
                "Pass at least two inputs, e.g. `merge_pdf -f a.pdf -f b.pdf`".to_string()
            }
            MergeError::SourceNotFound { .. } => {
                "Check the file name and the --predir directory it is resolved against".to_string()
            }
            MergeError::InvalidSource { .. } | MergeError::PdfError(_) => {
                "Open the file in a PDF viewer to confirm it is not damaged".to_string()
            }
            MergeError::EncryptedSource { .. } => {
                "Remove the password protection before merging".to_string()
            }
            MergeError::MissingPagesRoot | MergeError::MissingCatalog => {
                "At least one input must have a valid document catalog and page tree".to_string()
            }
            MergeError::TomlError(_) | MergeError::ConfigValidationError { .. } => {
                "Fix the job file syntax and try again".to_string()
            }
            MergeError::InvalidConfigValueError { field, .. } => {
                format!("Review the value given for '{}'", field)
            }
            MergeError::IoError(_) => {
                "Check permissions and free space for the output directory".to_string()
            }
            MergeError::SerializationError(_) => "Retry with --verbose for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid arguments: {}", self),
            ErrorCategory::Input => format!("Cannot use input: {}", self),
            ErrorCategory::Pdf => format!("Cannot merge documents: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;

use crate::domain::model::SourceSpec;
use crate::utils::error::{MergeError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let raw = path.to_string_lossy();
    if raw.trim().is_empty() {
        return Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if raw.contains('\0') {
        return Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_pdf_extension(field_name: &str, path: &Path) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => Ok(()),
        Some(ext) => Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: format!("Unsupported file extension: {}. Allowed extensions: pdf", ext),
        }),
        None => Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_color(field_name: &str, color: [f32; 3]) -> Result<()> {
    for component in color {
        validate_range(field_name, component, 0.0, 1.0)?;
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Checks the input list and output target shared by every config source.
pub fn validate_merge_inputs(sources: &[SourceSpec], output: &Path) -> Result<()> {
    if sources.len() < 2 {
        return Err(MergeError::NotEnoughFiles {
            count: sources.len(),
        });
    }

    for (i, source) in sources.iter().enumerate() {
        let field = format!("files[{}]", i);
        validate_path(&field, &source.path)?;
        validate_pdf_extension(&field, &source.path)?;
        validate_color(&format!("{}.color", field), source.style.color)?;
        if let Some(title) = &source.title {
            validate_non_empty_string(&format!("{}.title", field), title)?;
        }
    }

    validate_path("output", output)?;
    validate_pdf_extension("output", output)
}

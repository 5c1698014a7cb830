use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Could not parse file: {message}")]
    ParseError { message: String },

    #[error("Missing required column(s): {}", .missing.join(", "))]
    SchemaError { missing: Vec<String> },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::ParseError { .. }
            | ReportError::SchemaError { .. }
            | ReportError::CsvError(_) => ErrorCategory::Input,
            ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ReportError::IoError(_)
            | ReportError::SerializationError(_)
            | ReportError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => match self {
                // 寫檔失敗通常重試即可
                ReportError::IoError(_) => ErrorSeverity::Medium,
                _ => ErrorSeverity::Critical,
            },
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReportError::ParseError { .. } | ReportError::CsvError(_) => {
                "Export the report again as a tab-delimited .txt (or comma-separated .csv) file"
                    .to_string()
            }
            ReportError::SchemaError { .. } => {
                "Make sure the file has 'ship-state' and 'ship-city' columns (Flat File All Orders Report)"
                    .to_string()
            }
            ReportError::IoError(_) => "Check that the paths exist and are writable".to_string(),
            ReportError::SerializationError(_) | ReportError::ZipError(_) => {
                "Retry with bundling disabled or a different output path".to_string()
            }
            ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. } => {
                "Review the command-line flags or the TOML configuration file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::SchemaError { missing } => format!(
                "Missing {} column(s).",
                missing
                    .iter()
                    .map(|c| format!("'{}'", c))
                    .collect::<Vec<_>>()
                    .join(" and ")
            ),
            ReportError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_names_missing_columns() {
        let err = ReportError::SchemaError {
            missing: vec!["ship-state".to_string(), "ship-city".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required column(s): ship-state, ship-city"
        );
        assert_eq!(
            err.user_friendly_message(),
            "Missing 'ship-state' and 'ship-city' column(s)."
        );
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_io_error_is_retryable() {
        let err = ReportError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }
}

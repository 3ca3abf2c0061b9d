use crate::domain::model::PipelineStage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Failed to fetch data from {url}: HTTP {status}")]
    FetchError { url: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cache file {path} is corrupt: {reason}")]
    CacheCorruptError { path: String, reason: String },

    #[error("Failed to write cache file {path}: {source}")]
    CacheWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", invalid_shape_message(.message, .index))]
    InvalidShapeError {
        message: String,
        index: Option<usize>,
    },

    #[error("Failed to create output directory {path}: {source}")]
    OutputDirError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan output directory {path}: {source}")]
    ResolvePathError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write spreadsheet {path}: {reason}")]
    WriteError { path: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required setting: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

fn invalid_shape_message(message: &str, index: &Option<usize>) -> String {
    match index {
        Some(i) => format!("{} (record #{})", message, i),
        None => message.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Cache,
    Data,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,   // 網路錯誤，可重跑
            ErrorSeverity::High => 1,     // 設定或資料錯誤
            ErrorSeverity::Critical => 3, // 檔案系統錯誤
        }
    }
}

impl EtlError {
    pub fn invalid_shape(message: impl Into<String>, index: Option<usize>) -> Self {
        EtlError::InvalidShapeError {
            message: message.into(),
            index,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::FetchError { .. } => ErrorCategory::Network,
            EtlError::CacheCorruptError { .. } | EtlError::CacheWriteError { .. } => {
                ErrorCategory::Cache
            }
            EtlError::InvalidShapeError { .. } => ErrorCategory::Data,
            EtlError::OutputDirError { .. }
            | EtlError::ResolvePathError { .. }
            | EtlError::WriteError { .. } => ErrorCategory::Storage,
            EtlError::IoError(_)
            | EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Cache | ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// The pipeline stage this error aborts, if it comes from a run rather than from startup.
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            EtlError::ApiError(_)
            | EtlError::FetchError { .. }
            | EtlError::CacheCorruptError { .. }
            | EtlError::CacheWriteError { .. } => Some(PipelineStage::LoadOrFetch),
            EtlError::InvalidShapeError { .. } => Some(PipelineStage::Sanitize),
            EtlError::OutputDirError { .. } => Some(PipelineStage::EnsureOutputDir),
            EtlError::ResolvePathError { .. } => Some(PipelineStage::ResolveOutputPath),
            EtlError::WriteError { .. } => Some(PipelineStage::Write),
            EtlError::IoError(_)
            | EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(_) => "Check network connectivity and that the source URL is reachable",
            EtlError::FetchError { .. } => "Verify the source URL and that the provider is healthy, then re-run",
            EtlError::CacheCorruptError { .. } => "Delete the cache file to force a fresh fetch",
            EtlError::CacheWriteError { .. } => "Check write permissions for the cache file location",
            EtlError::InvalidShapeError { .. } => {
                "The provider returned unexpected data; every record needs a non-empty string 'name'"
            }
            EtlError::OutputDirError { .. } => "Make sure the parent of the output directory exists and is writable",
            EtlError::ResolvePathError { .. } => "Check read permissions for the output directory",
            EtlError::WriteError { .. } => "Check disk space and write permissions for the output directory",
            EtlError::IoError(_) => "Check that the configuration file exists and is readable",
            EtlError::MissingConfigError { .. } => "Set API_URL in the environment or pass --api-url",
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and try again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.stage() {
            Some(stage) => format!("Export failed during {}: {}", stage, self),
            None => format!("Configuration problem: {}", self),
        }
    }
}

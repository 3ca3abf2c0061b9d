use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical export row. Field order is the spreadsheet column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedEmployee {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub zipcode: String,
    pub phone: String,
    pub website: String,
}

impl SanitizedEmployee {
    pub const HEADERS: [&'static str; 8] = [
        "firstname",
        "lastname",
        "email",
        "street",
        "city",
        "zipcode",
        "phone",
        "website",
    ];

    /// 依照 HEADERS 順序回傳欄位值
    pub fn cells(&self) -> [&str; 8] {
        [
            &self.firstname,
            &self.lastname,
            &self.email,
            &self.street,
            &self.city,
            &self.zipcode,
            &self.phone,
            &self.website,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Cache,
    Network,
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataOrigin::Cache => write!(f, "cache"),
            DataOrigin::Network => write!(f, "network"),
        }
    }
}

/// Raw provider payload, untouched, plus where it came from.
#[derive(Debug, Clone)]
pub struct RawBatch {
    pub payload: serde_json::Value,
    pub origin: DataOrigin,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub employees: Vec<SanitizedEmployee>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    LoadOrFetch,
    Sanitize,
    Sort,
    EnsureOutputDir,
    ResolveOutputPath,
    Write,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::LoadOrFetch => "load-or-fetch",
            PipelineStage::Sanitize => "sanitize",
            PipelineStage::Sort => "sort",
            PipelineStage::EnsureOutputDir => "ensure-output-dir",
            PipelineStage::ResolveOutputPath => "resolve-output-path",
            PipelineStage::Write => "write",
        };
        f.write_str(name)
    }
}

/// Ordering applied to the sanitized list before export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum SortPolicy {
    /// lastname, then firstname, case-insensitive
    #[default]
    LastName,
    /// firstname only, case-insensitive
    FirstName,
}

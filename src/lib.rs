pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::http::HttpFetcher;
pub use crate::core::{etl::EtlEngine, pipeline::EmployeePipeline};
pub use crate::domain::model::{SanitizedEmployee, SortPolicy};
pub use crate::utils::error::{EtlError, Result};

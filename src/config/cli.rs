use crate::core::{ConfigProvider, SortPolicy};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "employee-export")]
#[command(about = "Fetch user records, normalize them and export a sorted employee spreadsheet")]
pub struct CliConfig {
    /// Output directory; takes precedence over --output-dir
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir_override: Option<PathBuf>,

    /// Source URL returning a JSON array of users
    #[arg(long, env = "API_URL")]
    pub api_url: Option<String>,

    #[arg(long, env = "OUTPUT_DIR", default_value = super::DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    #[arg(long, env = "USERS_CACHE_PATH", default_value = super::DEFAULT_CACHE_PATH)]
    pub cache_path: PathBuf,

    #[arg(long, help = "Always fetch live data and never write the cache file")]
    pub no_cache: bool,

    #[arg(long, value_enum, default_value_t = SortPolicy::LastName)]
    pub sort_by: SortPolicy,

    #[arg(long, default_value_t = super::DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    /// Load settings from a TOML file instead of flags
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(long, help = "Log CPU and memory usage after each stage")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        self.api_url.as_deref().unwrap_or_default()
    }

    fn output_dir(&self) -> &Path {
        self.output_dir_override
            .as_deref()
            .unwrap_or(&self.output_dir)
    }

    fn cache_path(&self) -> Option<&Path> {
        (!self.no_cache).then_some(self.cache_path.as_path())
    }

    fn sort_policy(&self) -> SortPolicy {
        self.sort_by
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let api_url = validation::validate_required_field("API_URL", &self.api_url)?;
        validation::validate_url("API_URL", api_url)?;
        validation::validate_path("output_dir", self.output_dir())?;
        if let Some(cache_path) = self.cache_path() {
            validation::validate_path("cache_path", cache_path)?;
        }
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

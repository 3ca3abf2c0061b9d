#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_OUTPUT_DIR: &str = "./data";
pub const DEFAULT_CACHE_PATH: &str = "users.json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

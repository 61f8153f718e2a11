use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

const APP_NAME: &str = "s3e";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FilterConfig {
    #[serde(default)]
    pub exclude_extensions: Vec<String>,
    #[serde(default = "default_true")]
    pub enable_filtering: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            exclude_extensions: Vec::new(),
            enable_filtering: default_true(),
        }
    }
}

/// Where and how the region probe is sent.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProbeConfig {
    #[serde(default = "default_storage_domain")]
    pub storage_domain: String,
    #[serde(default = "default_region_header")]
    pub region_header: String,
}

fn default_storage_domain() -> String {
    "s3.amazonaws.com".to_string()
}

fn default_region_header() -> String {
    "x-amz-bucket-region".to_string()
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            storage_domain: default_storage_domain(),
            region_header: default_region_header(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct OutputConfig {
    #[serde(default = "default_min_width")]
    pub min_width: usize,
    #[serde(default = "default_padding")]
    pub padding: usize,
}

fn default_min_width() -> usize {
    15
}

fn default_padding() -> usize {
    3
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            min_width: default_min_width(),
            padding: default_padding(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub log_path: String,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub filter_config: FilterConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Extensions excluded when the command line does not name any.
    pub fn default_exclusions(&self) -> &[String] {
        if self.filter_config.enable_filtering {
            self.filter_config.exclude_extensions.as_slice()
        } else {
            &[]
        }
    }
}

/// Load config from file. Returns default if file doesn't exist or is invalid,
/// together with the error so it can be reported once logging is up.
pub fn load_config() -> (AppConfig, Option<confy::ConfyError>) {
    or_default(confy::load(APP_NAME, None))
}

/// Same as [`load_config`] for an explicit file.
pub fn load_config_from(path: &Path) -> (AppConfig, Option<confy::ConfyError>) {
    or_default(confy::load_path(path))
}

fn or_default(result: Result<AppConfig, confy::ConfyError>) -> (AppConfig, Option<confy::ConfyError>) {
    match result {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    }
}

/// Logs the fallback to defaults, if there was one.
pub fn report_load_error(error: Option<&confy::ConfyError>) {
    if let Some(e) = error {
        warn!("Could not load config, using defaults: {}", e);
    }
}

/// Get the config file path for debugging purposes.
pub fn get_config_path() -> Option<std::path::PathBuf> {
    confy::get_configuration_file_path(APP_NAME, None).ok()
}

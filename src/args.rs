use clap::Parser;
use tracing::Level;

use crate::config::AppConfig;
use crate::filter::ExclusionSet;
use crate::handlers::EnumerationRequest;
use crate::utils::{normalize_prefix, validate_bucket};

#[derive(Parser, Debug, Clone)]
#[command(name = "s3e", version, about = "Enumerate a publicly readable S3 bucket without credentials", long_about = None)]
pub struct Args {
    /// S3 bucket name
    #[arg(short, long, value_parser = parse_bucket)]
    pub bucket: String,

    /// Prefix to start from, e.g. logs/2024
    #[arg(short, long, default_value = "")]
    pub prefix: String,

    /// File extensions to exclude (comma separated), e.g. 'png,jpg,jpeg'
    #[arg(short, long, value_name = "EXTS")]
    pub exclude: Option<String>,

    /// Log more (use -v -v or -vvv for even more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_bucket(bucket: &str) -> Result<String, String> {
    match validate_bucket(bucket) {
        Some(err) => Err(err),
        None => Ok(bucket.to_string()),
    }
}

impl Args {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Applies prefix normalization and falls back to the configured exclusions.
    pub fn to_request(&self, config: &AppConfig) -> EnumerationRequest {
        let exclusions = match &self.exclude {
            Some(list) => ExclusionSet::parse(list),
            None => ExclusionSet::new(config.default_exclusions()),
        };
        EnumerationRequest {
            bucket: self.bucket.clone(),
            prefix: normalize_prefix(&self.prefix),
            exclusions,
        }
    }
}

//! Unauthenticated discovery of the region that hosts a bucket.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use tracing::{debug, info};

use crate::config::ProbeConfig;
use crate::error::ResolveError;

/// Anything that can tell which region serves a bucket.
#[async_trait]
pub trait RegionLookup {
    async fn resolve_region(&self, bucket: &str) -> Result<String, ResolveError>;
}

/// Sends one GET to the virtual-hosted bucket URL and reads the region header.
///
/// SECURITY: the probe client accepts invalid TLS certificates. The provider's
/// wildcard certificate does not cover every bucket name (dotted names in
/// particular), and only the response headers are used. This client is never
/// used for listing; the SDK client keeps full verification.
pub struct RegionResolver {
    http: reqwest::Client,
    storage_domain: String,
    region_header: String,
}

impl RegionResolver {
    pub fn new(probe: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self {
            http,
            storage_domain: probe.storage_domain.clone(),
            region_header: probe.region_header.clone(),
        })
    }

    pub fn probe_url(&self, bucket: &str) -> String {
        probe_url(bucket, &self.storage_domain)
    }
}

#[async_trait]
impl RegionLookup for RegionResolver {
    async fn resolve_region(&self, bucket: &str) -> Result<String, ResolveError> {
        let url = self.probe_url(bucket);
        debug!("Probing {} for region (certificate verification disabled)", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ResolveError::ProbeFailed {
                bucket: bucket.to_string(),
                source,
            })?;

        let region = interpret_probe(bucket, response.status(), response.headers(), &self.region_header)?;
        info!("Bucket {} is served from {}", bucket, region);
        Ok(region)
    }
}

pub fn probe_url(bucket: &str, storage_domain: &str) -> String {
    format!("https://{}.{}", bucket, storage_domain)
}

/// Maps a probe response to a region or a resolution failure.
pub fn interpret_probe(
    bucket: &str,
    status: StatusCode,
    headers: &HeaderMap,
    region_header: &str,
) -> Result<String, ResolveError> {
    if status == StatusCode::NOT_FOUND {
        return Err(ResolveError::BucketNotFound {
            bucket: bucket.to_string(),
        });
    }

    headers
        .get(region_header)
        .and_then(|value| value.to_str().ok())
        .filter(|region| !region.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ResolveError::RegionHeaderMissing {
            bucket: bucket.to_string(),
        })
}

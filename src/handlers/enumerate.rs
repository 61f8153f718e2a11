use anyhow::Context;
use std::future::Future;
use std::io::Write;
use tracing::info;

use crate::config::OutputConfig;
use crate::filter::ExclusionSet;
use crate::region::RegionLookup;
use crate::s3::{ObjectLister, TreeEnumerator};

/// Validated input for one run.
#[derive(Debug, Clone)]
pub struct EnumerationRequest {
    pub bucket: String,
    pub prefix: String,
    pub exclusions: ExclusionSet,
}

/// Resolves the bucket's region, builds a lister for it and walks the tree.
///
/// A resolution failure ends the run before `connect` is called, so nothing is
/// listed. Listing failures never surface here.
pub async fn run_enumeration<R, C, Fut, L, W>(
    resolver: &R,
    connect: C,
    request: &EnumerationRequest,
    layout: OutputConfig,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: RegionLookup,
    C: FnOnce(String) -> Fut,
    Fut: Future<Output = L>,
    L: ObjectLister,
    W: Write,
{
    let region = resolver.resolve_region(&request.bucket).await?;

    writeln!(out, "Bucket: {}", request.bucket)?;
    writeln!(out, "Region {}", region)?;

    let lister = connect(region).await;
    info!(
        "Enumerating s3://{}/{} ({} excluded extensions)",
        request.bucket,
        request.prefix,
        request.exclusions.len()
    );

    TreeEnumerator::new(&lister, &request.exclusions, layout)
        .enumerate(&request.bucket, &request.prefix, out)
        .await
        .context("Failed to write listing")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::output::DENIED_TIMESTAMP;
    use crate::s3::listing::fakes::FakeLister;
    use async_trait::async_trait;
    use std::cell::Cell;

    enum FakeResolver {
        Region(&'static str),
        NotFound,
    }

    #[async_trait]
    impl RegionLookup for FakeResolver {
        async fn resolve_region(&self, bucket: &str) -> Result<String, ResolveError> {
            match self {
                Self::Region(region) => Ok(region.to_string()),
                Self::NotFound => Err(ResolveError::BucketNotFound {
                    bucket: bucket.to_string(),
                }),
            }
        }
    }

    fn request(bucket: &str, exclusions: &str) -> EnumerationRequest {
        EnumerationRequest {
            bucket: bucket.to_string(),
            prefix: String::new(),
            exclusions: ExclusionSet::parse(exclusions),
        }
    }

    fn example_bucket() -> FakeLister {
        FakeLister::new()
            .page("", &["logs/"], &[("readme.txt", 120)])
            .page("logs/", &[], &[])
    }

    /// Rows with runs of padding collapsed to a single tab.
    fn tabbed(out: &[u8]) -> Vec<String> {
        String::from_utf8(out.to_vec())
            .unwrap()
            .lines()
            .map(|line| {
                line.split("   ")
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect()
    }

    #[tokio::test]
    async fn test_lists_readme_and_recurses_into_logs() {
        let lister = example_bucket();
        let listing = &lister;
        let mut out = Vec::new();

        run_enumeration(
            &FakeResolver::Region("us-east-1"),
            move |region| {
                assert_eq!(region, "us-east-1");
                async move { listing }
            },
            &request("example", ""),
            OutputConfig::default(),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(lister.listed_prefixes(), vec!["", "logs/"]);
        assert_eq!(
            tabbed(&out),
            vec![
                "Bucket: example".to_string(),
                "Region us-east-1".to_string(),
                "2024-01-02 03:04:05 +0000 UTC\t120\treadme.txt".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_exclusions_suppress_readme() {
        let lister = example_bucket();
        let listing = &lister;
        let mut out = Vec::new();

        run_enumeration(
            &FakeResolver::Region("us-east-1"),
            move |_| async move { listing },
            &request("example", "txt"),
            OutputConfig::default(),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(tabbed(&out).len(), 2);
        assert_eq!(lister.listed_prefixes(), vec!["", "logs/"]);
    }

    #[tokio::test]
    async fn test_denied_logs_keeps_readme() {
        let lister = example_bucket().deny("logs/");
        let listing = &lister;
        let mut out = Vec::new();

        run_enumeration(
            &FakeResolver::Region("eu-west-1"),
            move |_| async move { listing },
            &request("example", ""),
            OutputConfig::default(),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(
            tabbed(&out)[2..],
            [
                format!("{}\t0\tlogs/ (Access Denied)", DENIED_TIMESTAMP),
                "2024-01-02 03:04:05 +0000 UTC\t120\treadme.txt".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_bucket_lists_nothing() {
        let lister = example_bucket();
        let listing = &lister;
        let connected = Cell::new(false);
        let connected_flag = &connected;
        let mut out = Vec::new();

        let err = run_enumeration(
            &FakeResolver::NotFound,
            move |_| {
                connected_flag.set(true);
                async move { listing }
            },
            &request("missing-bucket", ""),
            OutputConfig::default(),
            &mut out,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ResolveError>(),
            Some(ResolveError::BucketNotFound { bucket }) if bucket == "missing-bucket"
        ));
        assert!(!connected.get());
        assert!(lister.calls().is_empty());
        assert!(out.is_empty());
    }
}

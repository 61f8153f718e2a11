use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::types::{CommonPrefix, Object};
use tracing::debug;

use crate::error::ListError;
use crate::output::format_timestamp;
use crate::s3::listing::{DELIMITER, ListingPage, ObjectEntry, ObjectLister};

/// Creates an S3 client that sends unsigned requests to the given region.
pub async fn create_anonymous_client(region: String) -> Client {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .no_credentials()
        .region(Region::new(region))
        .load()
        .await;
    Client::new(&config)
}

/// Lists bucket levels through `ListObjects` without credentials.
pub struct AnonymousLister {
    client: Client,
}

impl AnonymousLister {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn for_region(region: String) -> Self {
        Self::new(create_anonymous_client(region).await)
    }
}

#[async_trait]
impl ObjectLister for AnonymousLister {
    async fn list_level(&self, bucket: &str, prefix: &str) -> Result<ListingPage, ListError> {
        debug!("ListObjects s3://{}/{}", bucket, prefix);

        let resp = self
            .client
            .list_objects()
            .bucket(bucket)
            .prefix(prefix)
            .delimiter(DELIMITER)
            .send()
            .await
            .map_err(|e| {
                let code = e.as_service_error().and_then(|se| se.code()).map(str::to_string);
                ListError::new(prefix, code, DisplayErrorContext(&e).to_string())
            })?;

        Ok(ListingPage {
            common_prefixes: resp.common_prefixes().iter().filter_map(common_prefix).collect(),
            objects: resp.contents().iter().filter_map(object_entry).collect(),
            is_truncated: resp.is_truncated().unwrap_or(false),
        })
    }
}

fn common_prefix(cp: &CommonPrefix) -> Option<String> {
    cp.prefix().map(str::to_string)
}

fn object_entry(obj: &Object) -> Option<ObjectEntry> {
    let key = obj.key()?;
    Some(ObjectEntry {
        key: key.to_string(),
        size: obj.size().unwrap_or(0),
        last_modified: obj
            .last_modified()
            .map(|ts| format_timestamp(ts.secs(), ts.subsec_nanos()))
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::primitives::DateTime;

    #[test]
    fn test_object_entry_from_sdk_object() {
        let obj = Object::builder()
            .key("logs/app.log")
            .size(2048)
            .last_modified(DateTime::from_secs(1_704_164_645))
            .build();

        let entry = object_entry(&obj).unwrap();
        assert_eq!(entry.key, "logs/app.log");
        assert_eq!(entry.size, 2048);
        assert_eq!(entry.last_modified, "2024-01-02 03:04:05 +0000 UTC");
    }

    #[test]
    fn test_object_entry_missing_fields() {
        let obj = Object::builder().key("empty").build();
        let entry = object_entry(&obj).unwrap();
        assert_eq!(entry.size, 0);
        assert_eq!(entry.last_modified, "");

        assert!(object_entry(&Object::builder().build()).is_none());
    }

    #[test]
    fn test_common_prefix_from_sdk() {
        let cp = CommonPrefix::builder().prefix("logs/").build();
        assert_eq!(common_prefix(&cp), Some("logs/".to_string()));
    }
}

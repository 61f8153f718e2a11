use async_trait::async_trait;

use crate::error::ListError;

/// Delimiter that folds keys into one tree level per listing call.
pub const DELIMITER: &str = "/";

/// An object sitting directly under a listed prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    pub key: String,
    pub size: i64,
    /// Already rendered, see [`crate::output::format_timestamp`].
    pub last_modified: String,
}

/// One delimiter-scoped listing of a prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub common_prefixes: Vec<String>,
    pub objects: Vec<ObjectEntry>,
    pub is_truncated: bool,
}

/// Lists a single level of the bucket tree.
#[async_trait]
pub trait ObjectLister {
    async fn list_level(&self, bucket: &str, prefix: &str) -> Result<ListingPage, ListError>;
}

#[async_trait]
impl<T: ObjectLister + Sync + ?Sized> ObjectLister for &T {
    async fn list_level(&self, bucket: &str, prefix: &str) -> Result<ListingPage, ListError> {
        (**self).list_level(bucket, prefix).await
    }
}

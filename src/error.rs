use thiserror::Error;

/// Failures while working out which region hosts a bucket. All of them end the run.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("bucket not found: {bucket}")]
    BucketNotFound { bucket: String },

    #[error("missing region header for bucket {bucket}")]
    RegionHeaderMissing { bucket: String },

    #[error("error making http request for bucket {bucket}: {source}")]
    ProbeFailed {
        bucket: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A listing call that failed for one prefix. Only that branch of the walk is affected.
#[derive(Debug, Error)]
#[error("listing {prefix:?} failed: {message}")]
pub struct ListError {
    pub prefix: String,
    pub code: Option<String>,
    pub message: String,
}

impl ListError {
    pub fn new(prefix: impl Into<String>, code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            code,
            message: message.into(),
        }
    }

    pub fn is_access_denied(&self) -> bool {
        self.code.as_deref() == Some("AccessDenied")
    }
}

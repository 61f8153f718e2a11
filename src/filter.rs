use std::collections::HashSet;

use crate::utils::key_extension;

/// Extensions whose objects are left out of the listing.
///
/// Matching is exact: `JPG` and `jpg` are different entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    extensions: HashSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    /// Parses a comma-separated list such as `png,jpg,jpeg`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }

    pub fn excludes(&self, key: &str) -> bool {
        self.contains(key_extension(key))
    }
}

//! Depth-first walk of a bucket's virtual directory tree.

use std::future::Future;
use std::io::{self, Write};
use std::pin::Pin;

use tracing::{debug, warn};

use crate::config::OutputConfig;
use crate::filter::ExclusionSet;
use crate::output::{OutputRow, TableWriter};
use crate::s3::listing::{DELIMITER, ObjectLister};

/// Walks a bucket one delimiter level at a time and prints what it finds.
///
/// Each level lists its prefix, recurses into every common prefix in the order
/// the listing returned them, then writes its own surviving objects as one
/// aligned block. A failed listing prints a single denial row for that prefix
/// and prunes the branch; the rest of the walk continues.
pub struct TreeEnumerator<'a, L> {
    lister: &'a L,
    exclusions: &'a ExclusionSet,
    layout: OutputConfig,
}

impl<'a, L: ObjectLister> TreeEnumerator<'a, L> {
    pub fn new(lister: &'a L, exclusions: &'a ExclusionSet, layout: OutputConfig) -> Self {
        Self {
            lister,
            exclusions,
            layout,
        }
    }

    /// Only sink errors are returned; listing failures stay inside their branch.
    pub fn enumerate<'s, W: Write>(
        &'s self,
        bucket: &'s str,
        prefix: &'s str,
        out: &'s mut W,
    ) -> Pin<Box<dyn Future<Output = io::Result<()>> + 's>> {
        Box::pin(async move {
            let mut table = TableWriter::new(self.layout);

            match self.lister.list_level(bucket, prefix).await {
                Ok(page) => {
                    debug!(
                        "{:?}: {} prefixes, {} objects",
                        prefix,
                        page.common_prefixes.len(),
                        page.objects.len()
                    );
                    if page.is_truncated {
                        warn!("Listing of {:?} was truncated, showing the first page only", prefix);
                    }

                    for child in &page.common_prefixes {
                        if !descends(prefix, child) {
                            warn!("Skipping prefix {:?} returned under {:?}", child, prefix);
                            continue;
                        }
                        self.enumerate(bucket, child, &mut *out).await?;
                    }

                    for object in &page.objects {
                        if self.exclusions.excludes(&object.key) {
                            debug!("Excluded {}", object.key);
                            continue;
                        }
                        table.push(&OutputRow::object(object));
                    }
                }
                Err(e) => {
                    let reason = if e.is_access_denied() { "access denied" } else { "listing failed" };
                    warn!(
                        prefix = prefix,
                        code = e.code.as_deref().unwrap_or("-"),
                        "Pruning branch, {}: {}",
                        reason,
                        e
                    );
                    table.push(&OutputRow::denied(prefix));
                }
            }

            table.flush(out)
        })
    }
}

/// A child prefix must be strictly deeper and name a directory.
fn descends(parent: &str, child: &str) -> bool {
    child.len() > parent.len() && child.starts_with(parent) && child.ends_with(DELIMITER)
}

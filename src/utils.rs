/// Returns the extension of an object key without its dot.
/// Only the last path segment is considered, so dots in "directory" names never count.
pub fn key_extension(key: &str) -> &str {
    let name = key.rsplit('/').next().unwrap_or(key);
    match name.rfind('.') {
        Some(dot) => &name[dot + 1..],
        None => "",
    }
}

/// Validates the bucket name.
/// Returns an error message if invalid, or None if valid.
pub fn validate_bucket(bucket: &str) -> Option<String> {
    if bucket.trim().is_empty() {
        return Some("bucket name (-b) required".to_string());
    }
    None
}

/// Makes a non-empty prefix end in the delimiter so it names a virtual directory.
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{}/", prefix)
    }
}

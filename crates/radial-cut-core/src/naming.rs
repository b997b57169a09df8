//! Download file naming.

/// File name (without extension) offered when saving an export.
///
/// Takes the part of the source file name before its first `.`; falls back
/// to the millisecond timestamp when there is no usable name. The browser
/// appends the extension for the blob's MIME type.
pub fn download_stem(source_name: Option<&str>, now_millis: u64) -> String {
    source_name
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| now_millis.to_string())
}

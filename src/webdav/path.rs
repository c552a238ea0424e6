//! URL construction for WebDAV paths

use std::borrow::Cow;

use super::error::{DavError, DavResult};

/// Joins `base_url` and a WebDAV-relative `path` into a request URL.
///
/// Every path segment is percent-encoded. Segments are decoded first, so a
/// path that is already encoded (or a URL previously returned by this
/// function) is not encoded twice. The flip side is that a literal `%XX`
/// sequence in a resource name cannot be addressed: `a%20b` always means
/// `a b`. Exactly one slash separates the base from the path and a trailing
/// slash on `path` is kept.
///
/// `.` and `..` segments, encoded or not, are rejected with
/// [`DavError::InvalidUrl`] so the result always stays under `base_url`.
pub fn join_url(base_url: &str, path: &str) -> DavResult<String> {
    let base = base_url.trim().trim_end_matches('/');

    // Re-joining a URL we already produced must be a no-op.
    let relative = path.strip_prefix(base).filter(|rest| rest.is_empty() || rest.starts_with('/'));
    let path = relative.unwrap_or(path);

    let encoded = segments(path)
        .map(|segment| encode_segment(segment, path))
        .collect::<DavResult<Vec<String>>>()?;

    if encoded.is_empty() {
        return Ok(format!("{}/", base));
    }

    let mut url = format!("{}/{}", base, encoded.join("/"));
    if path.ends_with('/') {
        url.push('/');
    }
    Ok(url)
}

/// Cumulative prefixes of `path`, shortest first.
///
/// `"a/b/c"` yields `["a", "a/b", "a/b/c"]`. Leading, trailing and repeated
/// slashes are ignored.
pub fn ancestor_prefixes(path: &str) -> Vec<String> {
    let mut prefixes = Vec::new();
    let mut current = String::new();

    for segment in segments(path) {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(segment);
        prefixes.push(current.clone());
    }

    prefixes
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn encode_segment(segment: &str, path: &str) -> DavResult<String> {
    let decoded = urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment));
    if decoded == "." || decoded == ".." {
        return Err(DavError::InvalidUrl(format!(
            "dot segment '{}' not allowed in path {}",
            segment, path
        )));
    }
    Ok(urlencoding::encode(&decoded).into_owned())
}

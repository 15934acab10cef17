//! Reference classification and resolution.
//!
//! A reference is the string stored under the extend key. It names either a
//! remote document (URL) or a local file. Relative paths are resolved against
//! the document that contains them.

use crate::error::ResolveError;
use regex::Regex;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use url::Url;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:http|ftp)s?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)",
        r"|localhost",
        r"|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("URL pattern is valid")
});

/// Location of a document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    Url(String),
    Path(PathBuf),
}

/// Whether `raw` is a URL accepted as a remote reference
pub fn is_url(raw: &str) -> bool {
    URL_PATTERN.is_match(raw)
}

/// Classify a raw reference string. Anything that is not a URL is a path.
pub fn classify(raw: &str) -> Reference {
    if is_url(raw) {
        Reference::Url(raw.to_string())
    } else {
        Reference::Path(PathBuf::from(raw))
    }
}

/// Resolve `raw` against the reference of the document that contains it.
///
/// URLs stand on their own. Under a URL parent every other reference is
/// joined onto the parent URL. Otherwise absolute paths stand on their own and
/// relative paths are joined onto the parent's directory and normalized.
pub fn resolve(raw: &str, parent: Option<&Reference>) -> Result<Reference, ResolveError> {
    let path = match classify(raw) {
        url @ Reference::Url(_) => return Ok(url),
        Reference::Path(path) => path,
    };

    match parent {
        Some(Reference::Url(parent_url)) => Ok(Reference::Url(join_url(parent_url, raw)?)),
        _ if path.is_absolute() => Ok(Reference::Path(normalize_lexically(&path))),
        Some(Reference::Path(parent_path)) => {
            let base = parent_path.parent().unwrap_or_else(|| Path::new(""));
            Ok(Reference::Path(normalize_lexically(&base.join(path))))
        }
        None => Err(ResolveError::Reference(format!(
            "{}: must supply absolute path or parent",
            raw
        ))),
    }
}

impl Reference {
    /// Stable identity used to detect reference cycles
    pub fn canonical_key(&self) -> String {
        match self {
            Reference::Url(url) => url.clone(),
            Reference::Path(path) => canonicalize_path(path)
                .unwrap_or_else(|_| normalize_lexically(path))
                .to_string_lossy()
                .into_owned(),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Url(url) => write!(f, "{}", url),
            Reference::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<PathBuf> for Reference {
    fn from(path: PathBuf) -> Self {
        Reference::Path(path)
    }
}

/// Canonicalize an existing path: resolve symlinks and normalize Unicode to NFC
pub fn canonicalize_path(path: &Path) -> std::io::Result<PathBuf> {
    let canonical = dunce::canonicalize(path)?;
    let normalized: String = canonical.to_string_lossy().nfc().collect();
    Ok(PathBuf::from(normalized))
}

/// Drop `.` components and fold `..` without touching the filesystem
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                ) && normalized.pop();
                if !popped && !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Join a relative reference onto the directory of `base`
fn join_url(base: &str, relative: &str) -> Result<String, ResolveError> {
    let invalid = |e: url::ParseError| ResolveError::Reference(format!("{}: {}", relative, e));
    let joined = Url::parse(base).map_err(invalid)?.join(relative).map_err(invalid)?;
    Ok(joined.into())
}

//! Namespace: the hierarchical identifier a preference store binds to.
//!
//! A namespace is an ordered, non-empty list of segments, usually derived from
//! an application's package identity (`org.example.sampleapp`) or a Rust module
//! path (`sampleapp::ui::prefs`). Its canonical form is the absolute path
//! `/org/example/sampleapp`, which backends use as the storage key.
//!
//! Segments can never contain the path separator, so two distinct namespaces
//! always map to distinct absolute paths.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::NamespaceError;

/// Maximum length of a single namespace segment, in characters.
pub const MAX_NAME_LENGTH: usize = 80;

/// An ordered, non-empty sequence of identifier segments.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace {
    segments: Vec<String>,
}

impl Namespace {
    /// Build a namespace from explicit segments.
    pub fn new<I, S>(segments: I) -> Result<Self, NamespaceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(NamespaceError::Empty);
        }
        for segment in &segments {
            validate_segment(segment)?;
        }
        Ok(Self { segments })
    }

    /// Derive a namespace from a dotted package identifier.
    ///
    /// `"org.example.sampleapp"` becomes `/org/example/sampleapp`.
    pub fn from_package(package: &str) -> Result<Self, NamespaceError> {
        if package.is_empty() {
            return Err(NamespaceError::Empty);
        }
        Self::new(package.split('.'))
    }

    /// Derive a namespace from a Rust module path.
    ///
    /// Pass `module_path!()` to bind preferences to the calling module.
    pub fn from_module_path(path: &str) -> Result<Self, NamespaceError> {
        if path.is_empty() {
            return Err(NamespaceError::Empty);
        }
        Self::new(path.split("::"))
    }

    /// Parse the absolute path form produced by [`Namespace::absolute_path`].
    pub fn from_absolute_path(path: &str) -> Result<Self, NamespaceError> {
        let rest = path.strip_prefix('/').ok_or_else(|| NamespaceError::InvalidSegment {
            segment: path.to_string(),
            reason: "absolute path must start with '/'",
        })?;
        if rest.is_empty() {
            return Err(NamespaceError::Empty);
        }
        Self::new(rest.split('/'))
    }

    /// A namespace one level below this one.
    pub fn child(&self, segment: &str) -> Result<Self, NamespaceError> {
        validate_segment(segment)?;
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(Self { segments })
    }

    /// The segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment.
    pub fn name(&self) -> &str {
        // Never empty: every constructor rejects zero segments.
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// The canonical `/a/b/c` form.
    pub fn absolute_path(&self) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            path.push_str(segment);
        }
        path
    }
}

fn validate_segment(segment: &str) -> Result<(), NamespaceError> {
    let reason = if segment.is_empty() {
        Some("segment must not be empty")
    } else if segment.chars().count() > MAX_NAME_LENGTH {
        Some("segment exceeds 80 characters")
    } else if segment.contains('/') {
        Some("segment must not contain '/'")
    } else if segment.contains('.') {
        Some("segment must not contain '.'")
    } else if segment.contains('\0') {
        Some("segment must not contain NUL")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(NamespaceError::InvalidSegment {
            segment: segment.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace({})", self.absolute_path())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.absolute_path())
    }
}

impl Serialize for Namespace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.absolute_path())
    }
}

impl<'de> Deserialize<'de> for Namespace {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let path = String::deserialize(deserializer)?;
        Self::from_absolute_path(&path).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_package() {
        let ns = Namespace::from_package("org.example.sampleapp").unwrap();
        assert_eq!(ns.segments(), &["org", "example", "sampleapp"]);
        assert_eq!(ns.absolute_path(), "/org/example/sampleapp");
        assert_eq!(ns.name(), "sampleapp");
    }

    #[test]
    fn test_from_module_path() {
        let ns = Namespace::from_module_path("sampleapp::ui::prefs").unwrap();
        assert_eq!(ns.absolute_path(), "/sampleapp/ui/prefs");

        let here = Namespace::from_module_path(module_path!()).unwrap();
        assert_eq!(here.segments()[0], "prefstore_core");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(Namespace::from_package(""), Err(NamespaceError::Empty));
        assert_eq!(Namespace::new(Vec::<String>::new()), Err(NamespaceError::Empty));
        assert_eq!(Namespace::from_absolute_path("/"), Err(NamespaceError::Empty));
        assert!(matches!(
            Namespace::from_package("org..example"),
            Err(NamespaceError::InvalidSegment { .. })
        ));
    }

    #[test]
    fn test_rejects_separator_in_segment() {
        assert!(Namespace::new(["org/example"]).is_err());
        assert!(Namespace::new(["org.example"]).is_err());
        assert!(Namespace::new(["a\0b"]).is_err());
        assert!(Namespace::new(["x".repeat(MAX_NAME_LENGTH + 1)]).is_err());
        assert!(Namespace::new(["x".repeat(MAX_NAME_LENGTH)]).is_ok());
    }

    #[test]
    fn test_absolute_path_requires_leading_slash() {
        assert!(Namespace::from_absolute_path("org/example").is_err());
        let ns = Namespace::from_absolute_path("/org/example").unwrap();
        assert_eq!(ns, Namespace::from_package("org.example").unwrap());
    }

    #[test]
    fn test_child() {
        let ns = Namespace::from_package("org.example").unwrap();
        let child = ns.child("sampleapp").unwrap();
        assert_eq!(child.absolute_path(), "/org/example/sampleapp");
        assert!(ns.child("").is_err());
        assert!(ns.child("a/b").is_err());
    }

    #[test]
    fn test_display_and_debug() {
        let ns = Namespace::from_package("org.example").unwrap();
        assert_eq!(ns.to_string(), "/org/example");
        assert_eq!(format!("{:?}", ns), "Namespace(/org/example)");
    }

    #[test]
    fn test_serde_as_path() {
        let ns = Namespace::from_package("org.example.sampleapp").unwrap();
        let json = serde_json::to_string(&ns).unwrap();
        assert_eq!(json, "\"/org/example/sampleapp\"");
        let back: Namespace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ns);
        assert!(serde_json::from_str::<Namespace>("\"no-slash\"").is_err());
    }

    fn segments() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z][a-z0-9_-]{0,7}", 1..5)
    }

    proptest! {
        #[test]
        fn distinct_namespaces_have_distinct_paths(a in segments(), b in segments()) {
            let na = Namespace::new(a.clone()).unwrap();
            let nb = Namespace::new(b.clone()).unwrap();
            prop_assert_eq!(a == b, na.absolute_path() == nb.absolute_path());
        }

        #[test]
        fn absolute_path_parses_back(a in segments()) {
            let ns = Namespace::new(a).unwrap();
            prop_assert_eq!(Namespace::from_absolute_path(&ns.absolute_path()).unwrap(), ns);
        }
    }
}

//! Paths into a document and the soft-failure log of one conversion.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// MappingPath

/// One step of a [`MappingPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A structure slot, by export name.
    Field(String),
    /// A list or set element.
    Index(usize),
    /// A map entry.
    Key(String),
    /// The inside of an optional value.
    Optional,
}

/// The location of a value inside the document being mapped or exported.
///
/// Displayed with `.` between fields and without a separator before indexes,
/// map keys and optional markers.
///
/// # Example
///
/// ```
/// use vc_mapper::diagnostics::{MappingPath, PathSegment};
///
/// let path = MappingPath::root()
///     .child(PathSegment::Field("servers".into()))
///     .child(PathSegment::Index(0))
///     .child(PathSegment::Field("ports".into()))
///     .child(PathSegment::Key("http".into()))
///     .child(PathSegment::Optional);
///
/// assert_eq!(path.to_string(), "servers[0].ports[k=http]$opt");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MappingPath {
    segments: Vec<PathSegment>,
}

impl MappingPath {
    /// The empty path of the top-level value.
    #[inline]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    #[inline]
    pub fn field(&self, name: &str) -> Self {
        self.child(PathSegment::Field(name.into()))
    }

    #[inline]
    pub fn index(&self, index: usize) -> Self {
        self.child(PathSegment::Index(index))
    }

    #[inline]
    pub fn key(&self, key: &str) -> Self {
        self.child(PathSegment::Key(key.into()))
    }

    #[inline]
    pub fn optional(&self) -> Self {
        self.child(PathSegment::Optional)
    }
}

impl fmt::Display for MappingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) => write!(f, "[k={key}]")?,
                PathSegment::Optional => f.write_str("$opt")?,
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// ConversionDiagnostics

/// A soft failure recorded during a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: MappingPath,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Append-only log of soft failures of one top-level conversion.
///
/// Each top-level call owns its own instance; it is never shared between
/// concurrent conversions.
#[derive(Debug, Clone, Default)]
pub struct ConversionDiagnostics {
    entries: Vec<Diagnostic>,
}

impl ConversionDiagnostics {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, path: &MappingPath, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            path: path.clone(),
            message: message.into(),
        };
        log::debug!("conversion diagnostic: {diagnostic}");
        self.entries.push(diagnostic);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// The messages recorded at the path displayed as `path`.
    pub fn messages_for(&self, path: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.path.to_string() == path)
            .map(|entry| entry.message.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a ConversionDiagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = core::slice::Iter<'a, Diagnostic>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#![forbid(unsafe_code)]

//! Resource identity and relevance.
//!
//! Every editor surface the host reports is keyed by a [`ResourceId`]: an
//! opaque, comparable scheme + path pair. Two resources are the same surface
//! iff their identifiers are equal.
//!
//! Which schemes count as *user content* (and should therefore be allowed to
//! pull the panel closed when they appear) is host-dependent, so the set is
//! data rather than code: a [`RelevanceFilter`] built from scheme strings,
//! defaulting to local files, notebook cells, and unsaved buffers. Internal
//! tooling surfaces such as the diagnostics/output channel are excluded by
//! the default set.

use std::fmt;

use ahash::AHashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scheme for local files on disk.
pub const SCHEME_FILE: &str = "file";
/// Scheme for individual notebook cells.
pub const SCHEME_NOTEBOOK_CELL: &str = "notebook-cell";
/// Scheme for unsaved/untitled buffers.
pub const SCHEME_UNTITLED: &str = "untitled";
/// Scheme for the host's internal diagnostics/log channel.
pub const SCHEME_OUTPUT: &str = "output";

/// An opaque, comparable key for a resource shown in an editor.
///
/// Derived from the resource's location and kind, equivalent to a URI's
/// scheme + path. Equality is field equality; no normalization beyond what
/// the constructors apply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResourceId {
    scheme: String,
    path: String,
}

impl ResourceId {
    /// Create a resource id from an arbitrary scheme and path.
    pub fn new(scheme: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            path: path.into(),
        }
    }

    /// A local file on disk.
    pub fn file(path: impl Into<String>) -> Self {
        Self::new(SCHEME_FILE, path)
    }

    /// A notebook cell.
    pub fn notebook_cell(path: impl Into<String>) -> Self {
        Self::new(SCHEME_NOTEBOOK_CELL, path)
    }

    /// An unsaved/untitled buffer.
    pub fn untitled(name: impl Into<String>) -> Self {
        Self::new(SCHEME_UNTITLED, name)
    }

    /// The host's internal diagnostics/output channel.
    pub fn output(channel: impl Into<String>) -> Self {
        Self::new(SCHEME_OUTPUT, channel)
    }

    /// The scheme component.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The path component.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.path)
    }
}

/// Predicate over resource schemes: which resources are user content.
///
/// Relevance depends only on the scheme, never the path. An empty filter
/// considers nothing relevant.
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    schemes: AHashSet<String>,
}

impl RelevanceFilter {
    /// Build a filter from an iterator of scheme strings.
    pub fn from_schemes<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schemes: schemes.into_iter().map(Into::into).collect(),
        }
    }

    /// True iff the resource's scheme is in the relevant set.
    #[must_use]
    pub fn is_relevant(&self, resource: &ResourceId) -> bool {
        self.schemes.contains(resource.scheme())
    }

    /// Number of schemes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    /// True iff no scheme is relevant.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

impl Default for RelevanceFilter {
    /// The user-content schemes: files, notebook cells, untitled buffers.
    fn default() -> Self {
        Self::from_schemes([SCHEME_FILE, SCHEME_NOTEBOOK_CELL, SCHEME_UNTITLED])
    }
}

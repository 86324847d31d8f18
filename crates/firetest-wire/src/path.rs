//! Resource paths relative to a database's document root.
//!
//! Paths alternate collection and document segments: an odd segment count
//! addresses a collection, an even count a document.

use std::fmt;

use crate::error::{WireError, WireResult};

/// Path to a collection, e.g. `users` or `users/Test-User/tweets`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath(String);

/// Path to a document, e.g. `users/Test-User`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath(String);

impl CollectionPath {
    /// ## Summary
    /// Parses a collection path.
    ///
    /// ## Errors
    /// Returns an error if the path is empty, contains an empty segment, or
    /// has an even number of segments (which would address a document).
    pub fn parse(path: &str) -> WireResult<Self> {
        let segments = count_segments(path)?;
        if segments % 2 == 0 {
            return Err(WireError::InvalidPath(format!(
                "'{path}' has {segments} segments and addresses a document, not a collection"
            )));
        }
        Ok(Self(path.to_string()))
    }

    /// ## Summary
    /// Returns the path of the document with the given id in this collection.
    ///
    /// ## Errors
    /// Returns an error if `id` is empty or contains '/'.
    pub fn doc(&self, id: &str) -> WireResult<DocumentPath> {
        validate_id(id)?;
        Ok(DocumentPath(format!("{}/{id}", self.0)))
    }

    /// Returns the collection id (the last segment).
    #[must_use]
    pub fn id(&self) -> &str {
        last_segment(&self.0)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl DocumentPath {
    /// ## Summary
    /// Parses a document path.
    ///
    /// ## Errors
    /// Returns an error if the path is empty, contains an empty segment, or
    /// has an odd number of segments (which would address a collection).
    pub fn parse(path: &str) -> WireResult<Self> {
        let segments = count_segments(path)?;
        if segments % 2 != 0 {
            return Err(WireError::InvalidPath(format!(
                "'{path}' has {segments} segments and addresses a collection, not a document"
            )));
        }
        Ok(Self(path.to_string()))
    }

    /// ## Summary
    /// Returns the path of a subcollection under this document.
    ///
    /// ## Errors
    /// Returns an error if `id` is empty or contains '/'.
    pub fn collection(&self, id: &str) -> WireResult<CollectionPath> {
        validate_id(id)?;
        Ok(CollectionPath(format!("{}/{id}", self.0)))
    }

    /// Returns the parent collection.
    #[must_use]
    pub fn parent(&self) -> CollectionPath {
        // A document path always has at least two segments.
        let parent = self.0.rsplit_once('/').map_or("", |(parent, _)| parent);
        CollectionPath(parent.to_string())
    }

    /// Returns the document id (the last segment).
    #[must_use]
    pub fn id(&self) -> &str {
        last_segment(&self.0)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn count_segments(path: &str) -> WireResult<usize> {
    if path.is_empty() {
        return Err(WireError::InvalidPath("path is empty".to_string()));
    }

    let mut count = 0;
    for segment in path.split('/') {
        if segment.is_empty() {
            return Err(WireError::InvalidPath(format!(
                "path '{path}' contains an empty segment"
            )));
        }
        count += 1;
    }

    Ok(count)
}

fn validate_id(id: &str) -> WireResult<()> {
    if id.is_empty() {
        return Err(WireError::InvalidPath("id is empty".to_string()));
    }
    if id.contains('/') {
        return Err(WireError::InvalidPath(format!("id '{id}' contains '/'")));
    }
    Ok(())
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

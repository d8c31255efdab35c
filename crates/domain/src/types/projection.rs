//! Output projection specification
//!
//! Dot paths are split into segments once, here, so the projector never
//! re-parses strings and malformed paths fail in a single place.

use std::fmt;

use crate::errors::{Result, SuiteError};

/// A validated dot-separated field path such as `nested.name`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse `raw` into segments. Empty paths and empty segments are rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(SuiteError::invalid_path(raw, "path is empty"));
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(SuiteError::invalid_path(raw, "path contains an empty segment"));
        }
        Ok(Self { raw: raw.to_string(), segments })
    }

    /// Dot-separated parts, in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The path as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// How a response should be reshaped before presentation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionSpec {
    /// Unwrap the `result` field when present
    pub results_only: bool,
    select: Vec<FieldPath>,
}

impl ProjectionSpec {
    /// Build a spec; repeated paths keep their first position.
    pub fn new(results_only: bool, paths: impl IntoIterator<Item = FieldPath>) -> Self {
        let mut select: Vec<FieldPath> = Vec::new();
        for path in paths {
            if !select.contains(&path) {
                select.push(path);
            }
        }
        Self { results_only, select }
    }

    /// Parse a comma-separated select list like `"id, nested.name"`.
    ///
    /// Entries are trimmed and blank entries dropped; every remaining entry
    /// must be a valid [`FieldPath`].
    pub fn from_select_list(results_only: bool, list: &str) -> Result<Self> {
        let paths = list
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(FieldPath::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(results_only, paths))
    }

    /// Paths to keep, deduplicated, in request order
    pub fn select(&self) -> &[FieldPath] {
        &self.select
    }

    /// True when projecting leaves every value untouched
    pub fn is_identity(&self) -> bool {
        !self.results_only && self.select.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_segments() {
        let path = FieldPath::parse("nested.name").unwrap();
        assert_eq!(path.segments(), ["nested".to_string(), "name".to_string()]);
        assert_eq!(path.to_string(), "nested.name");
    }

    #[test]
    fn test_field_path_rejects_empty_segments() {
        for raw in ["", "a..b", ".a", "a."] {
            assert!(
                matches!(FieldPath::parse(raw), Err(SuiteError::InvalidFieldPath { .. })),
                "{raw:?} accepted"
            );
        }
    }

    #[test]
    fn test_select_list_trims_and_dedups() {
        let spec = ProjectionSpec::from_select_list(false, " id , nested.name,, id ").unwrap();
        let paths: Vec<&str> = spec.select().iter().map(FieldPath::as_str).collect();
        assert_eq!(paths, vec!["id", "nested.name"]);
        assert!(!spec.is_identity());
    }

    #[test]
    fn test_select_list_rejects_bad_path() {
        assert!(ProjectionSpec::from_select_list(true, "id, a..b").is_err());
    }

    #[test]
    fn test_empty_list_is_identity() {
        assert!(ProjectionSpec::from_select_list(false, " , ").unwrap().is_identity());
        assert!(!ProjectionSpec::new(true, Vec::new()).is_identity());
    }
}

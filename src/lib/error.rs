use super::path::Path;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Why a value was rejected.
#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The JSON kind differs from the expected one, e.g. an array where an object belongs.
    TypeMismatch,
    MissingRequiredKey,
    /// `type` is absent, not a string, or names no known GeoJSON object.
    UnrecognizedTypeTag,
    /// An array is too short for its position in the document.
    ShapeMismatch,
    /// A polygon ring has fewer than four positions or does not end where it starts.
    ClosedLoopViolation,
    /// None of the alternatives of an untagged union matched.
    UnionExhausted,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::TypeMismatch => "type mismatch",
            ErrorKind::MissingRequiredKey => "missing required key",
            ErrorKind::UnrecognizedTypeTag => "unrecognized type tag",
            ErrorKind::ShapeMismatch => "shape mismatch",
            ErrorKind::ClosedLoopViolation => "closed loop violation",
            ErrorKind::UnionExhausted => "no alternative matched",
        };
        f.write_str(name)
    }
}

/// The JSON kind of an offending value. `Missing` stands in for absent members.
#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum JsonKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Missing,
}

impl From<&Value> for JsonKind {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Boolean,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonKind::Null => "null",
            JsonKind::Boolean => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
            JsonKind::Missing => "nothing",
        };
        f.write_str(name)
    }
}

/// A single path-qualified failure.
#[derive(Error, Serialize, PartialEq, Debug, Clone)]
#[error("{}: {kind}: expected {expected}, found {found}", .path.label())]
pub struct ValidationError {
    pub path: Path,
    pub kind: ErrorKind,
    pub expected: String,
    pub found: JsonKind,
}

/// Every failure collected during one validation call, in document order.
///
/// Paths carry the tree structure: [`ErrorTree::under`] selects the failures
/// below a given member.
#[derive(Error, PartialEq, Debug, Clone)]
#[error("GeoJSON validation failed with {} error(s)", .errors.len())]
pub struct ErrorTree {
    errors: Vec<ValidationError>,
}

impl ErrorTree {
    pub(crate) fn new(errors: Vec<ValidationError>) -> Self {
        ErrorTree { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Failures reported exactly at `path`, written the way [`Path`] renders.
    pub fn at(&self, path: &str) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|error| error.path.to_string() == path)
            .collect()
    }

    /// Failures reported at `prefix` or anywhere below it.
    pub fn under(&self, prefix: &Path) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|error| error.path.starts_with(prefix))
            .collect()
    }

    pub fn of_kind(&self, kind: ErrorKind) -> Vec<&ValidationError> {
        self.errors.iter().filter(|error| error.kind == kind).collect()
    }

    pub fn contains(&self, kind: ErrorKind, path: &str) -> bool {
        self.at(path).iter().any(|error| error.kind == kind)
    }

    pub fn truncate(&mut self, len: usize) {
        self.errors.truncate(len);
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a ErrorTree {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for ErrorTree {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

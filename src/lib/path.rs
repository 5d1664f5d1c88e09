use serde::{Serialize, Serializer};
use smartstring::alias::String;
use std::fmt;

/// One step from a parent value into a child: an object member or an array slot.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a value relative to the validated root.
///
/// Renders as `features[3].geometry.coordinates[0]`; the root renders as an
/// empty string.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn root() -> Self {
        Path::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// The path of member `key` below this one.
    pub fn key(mut self, key: &str) -> Self {
        self.push_key(key);
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.push_index(index);
        self
    }

    pub(crate) fn push_key(&mut self, key: &str) {
        self.segments.push(Segment::Key(key.into()));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }

    /// Like `Display`, but names the root explicitly.
    pub fn label(&self) -> std::string::String {
        if self.is_root() {
            "(root)".to_string()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{}", key)?,
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

//! Traversal location tracking.
//!
//! A [`PathCursor`] records where a walk currently is inside a document as a
//! stack of [`Segment`]s. Walkers use [`PathCursor::scoped`] so that every push
//! is paired with a pop even when the visitor returns early.
//!
//! [`PathPattern`] is the compiled form of a slash separated pattern such as
//! `properties/.*/tm:ref`. Each pattern segment is a regular expression that
//! must match the whole corresponding path segment.

use std::fmt;

use regex::Regex;

use crate::domain::error::DomainError;

/// One step of a traversal path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A key inside an object.
    Key(String),
    /// A position inside a list.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// A compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    segments: Vec<Regex>,
}

impl PathPattern {
    /// Compile `pattern`. Every segment is anchored at both ends.
    pub fn new(pattern: &str) -> Result<Self, DomainError> {
        let segments = pattern
            .split('/')
            .map(|part| {
                Regex::new(&format!("^(?:{part})$")).map_err(|e| DomainError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// Number of segments the pattern expects.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    fn matches(&self, path: &[Segment]) -> bool {
        path.len() == self.segments.len()
            && self
                .segments
                .iter()
                .zip(path)
                .all(|(re, seg)| re.is_match(&seg.to_string()))
    }
}

/// Stack of segments describing the current traversal location.
#[derive(Debug, Default)]
pub struct PathCursor {
    segments: Vec<Segment>,
}

impl PathCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.segments.push(Segment::Key(key.into()));
        self
    }

    pub fn push_index(&mut self, index: usize) -> &mut Self {
        self.segments.push(Segment::Index(index));
        self
    }

    /// Remove the innermost segment.
    pub fn pop(&mut self) -> Result<Segment, DomainError> {
        self.segments.pop().ok_or(DomainError::CursorUnderflow)
    }

    /// Push `segment`, run `visit`, then pop it again.
    pub fn scoped<R>(&mut self, segment: Segment, visit: impl FnOnce(&mut Self) -> R) -> R {
        self.segments.push(segment);
        let result = visit(self);
        self.segments.pop();
        result
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Check the cursor against a precompiled pattern.
    pub fn matches(&self, pattern: &PathPattern) -> bool {
        pattern.matches(&self.segments)
    }

    /// Dotted namespace of the property currently visited.
    ///
    /// Under `properties/<name>` this is `<name>` without its last dotted
    /// component, so `properties/motor1.speed` yields `motor1`. Anywhere else
    /// the prefix is empty.
    pub fn prefix(&self) -> String {
        match self.segments.as_slice() {
            [Segment::Key(first), Segment::Key(name), ..] if first == "properties" => name
                .rsplit_once('.')
                .map(|(namespace, _)| namespace.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

impl fmt::Display for PathCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(keys: &[&str]) -> PathCursor {
        let mut c = PathCursor::new();
        for k in keys {
            c.push_key(*k);
        }
        c
    }

    #[test]
    fn push_and_pop_track_depth() {
        let mut c = PathCursor::new();
        c.push_key("links").push_index(2);
        assert_eq!(c.depth(), 2);
        assert_eq!(c.to_string(), "links/[2]");
        assert_eq!(c.pop().unwrap(), Segment::Index(2));
        assert_eq!(c.depth(), 1);
    }

    #[test]
    fn pop_on_empty_cursor_fails() {
        let mut c = PathCursor::new();
        assert_eq!(c.pop(), Err(DomainError::CursorUnderflow));
    }

    #[test]
    fn scoped_restores_depth() {
        let mut c = cursor(&["properties"]);
        let seen = c.scoped(Segment::Key("speed".into()), |inner| inner.depth());
        assert_eq!(seen, 2);
        assert_eq!(c.depth(), 1);
    }

    #[test]
    fn ref_pattern_requires_exact_shape() {
        let pattern = PathPattern::new("properties/.*/tm:ref").unwrap();
        assert!(cursor(&["properties", "speed", "tm:ref"]).matches(&pattern));
        assert!(cursor(&["properties", "", "tm:ref"]).matches(&pattern));
        assert!(!cursor(&["properties", "speed"]).matches(&pattern));
        assert!(!cursor(&["properties", "speed", "tm:ref", "x"]).matches(&pattern));
        assert!(!cursor(&["actions", "speed", "tm:ref"]).matches(&pattern));
        assert!(!cursor(&["properties", "speed", "tm:refs"]).matches(&pattern));
    }

    #[test]
    fn pattern_segments_match_full_strings() {
        let links = PathPattern::new("links").unwrap();
        assert!(!cursor(&["mylinks"]).matches(&links));
        assert!(cursor(&["links"]).matches(&links));
    }

    #[test]
    fn index_segments_render_with_brackets() {
        let mut c = cursor(&["links"]);
        c.push_index(0);
        assert!(c.matches(&PathPattern::new(r"links/\[0\]").unwrap()));
        assert!(c.matches(&PathPattern::new(r"links/\[\d+\]").unwrap()));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(matches!(
            PathPattern::new("("),
            Err(DomainError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn prefix_uses_property_namespace() {
        assert_eq!(cursor(&["properties", "motor1.speed"]).prefix(), "motor1");
        assert_eq!(
            cursor(&["properties", "a.b.speed", "type"]).prefix(),
            "a.b"
        );
        assert_eq!(cursor(&["properties", "speed"]).prefix(), "");
        assert_eq!(cursor(&["actions", "motor1.start"]).prefix(), "");
        assert_eq!(cursor(&["properties"]).prefix(), "");
    }
}

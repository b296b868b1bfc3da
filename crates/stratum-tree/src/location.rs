use std::fmt;

/// One step of a [`Location`]: a mapping key or a sequence index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    pub fn key(name: impl Into<String>) -> Self {
        Self::Key(name.into())
    }

    /// The key name, if this segment is a mapping key.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(name) => Some(name),
            Self::Index(_) => None,
        }
    }
}

/// An ordered path addressing one position inside a document tree.
///
/// Locations are produced by [`find_key`](crate::find_key) and consumed by
/// [`get`](crate::get) and [`set`](crate::set). A location is only
/// meaningful against the tree shape it was found in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(Vec<Segment>);

impl Location {
    /// The empty location, addressing the tree root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Extend this location with one more segment.
    pub fn push(&mut self, segment: Segment) {
        self.0.push(segment);
    }

    /// This location plus one more segment.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// The final segment's key name, if the location ends at a mapping key.
    ///
    /// Read-time field selectors match against this: a stub stored under a
    /// sequence index has no final key and never matches a field selector.
    pub fn last_key(&self) -> Option<&str> {
        self.0.last().and_then(Segment::as_key)
    }
}

impl From<Vec<Segment>> for Location {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(name) if i == 0 => write!(f, "{name}")?,
                Segment::Key(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

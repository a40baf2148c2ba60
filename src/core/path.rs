//! Element paths for located error reporting
//!
//! Every codec error carries the path of the offending node from the document
//! root, e.g. `Premis/Object[0]/objectCategory`. Repeated entities carry
//! their document-order index so the failing record can be found in large
//! archival files.

use std::fmt;

/// One step in an element path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    /// Element or model name of this step
    pub name: String,
    /// Index among same-named siblings, for repeated elements
    pub index: Option<usize>,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{}]", self.name, i),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Path of an element from the document root
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementPath {
    segments: Vec<PathSegment>,
}

impl ElementPath {
    /// Create a path rooted at the given name
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment {
                name: name.into(),
                index: None,
            }],
        }
    }

    /// Return a new path extended with a child step
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.segments.push(PathSegment {
            name: name.into(),
            index: None,
        });
        path
    }

    /// Return a new path extended with an indexed child step
    pub fn indexed(&self, name: impl Into<String>, index: usize) -> Self {
        let mut path = self.clone();
        path.segments.push(PathSegment {
            name: name.into(),
            index: Some(index),
        });
        path
    }

    /// Access the path segments
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of steps in the path
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check whether the path is empty
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let path = ElementPath::root("Premis")
            .indexed("Object", 0)
            .child("objectCategory");
        assert_eq!(path.to_string(), "Premis/Object[0]/objectCategory");
    }

    #[test]
    fn test_path_extension_does_not_mutate() {
        let base = ElementPath::root("Premis");
        let extended = base.indexed("Event", 2);
        assert_eq!(base.to_string(), "Premis");
        assert_eq!(extended.to_string(), "Premis/Event[2]");
        assert_eq!(extended.len(), 2);
    }
}

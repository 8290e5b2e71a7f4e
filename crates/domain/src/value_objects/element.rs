//! Map element kinds and identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape of a map element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A single point
    Node,
    /// An ordered list of nodes (outline of a building, for example)
    Way,
    /// A group of other elements
    Relation,
}

impl ElementKind {
    /// All kinds in query order
    pub const ALL: [Self; 3] = [Self::Node, Self::Way, Self::Relation];

    /// Keyword used by the spatial query language
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "relation",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a map element: ids are only unique within a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId {
    /// Element kind
    pub kind: ElementKind,
    /// Numeric id within the kind
    pub id: i64,
}

impl ElementId {
    /// Create a new element identity
    #[must_use]
    pub const fn new(kind: ElementKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

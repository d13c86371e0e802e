//! RDF triple: one (subject, predicate, object) statement

use crate::Term;
use serde::{Deserialize, Serialize};

/// A single RDF statement
///
/// Immutable once created. Equality, hashing, and ordering are structural
/// over the three components in SPO order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    /// Subject term
    pub s: Term,
    /// Predicate term
    pub p: Term,
    /// Object term
    pub o: Term,
}

impl Triple {
    /// Create a triple from its components
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        Self { s, p, o }
    }

    /// Check whether this triple's predicate is the given IRI
    pub fn has_predicate(&self, iri: &str) -> bool {
        self.p.as_iri() == Some(iri)
    }

    /// Check whether this triple's subject is the given term
    pub fn has_subject(&self, term: &Term) -> bool {
        self.s == *term
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} .", self.s, self.p, self.o)
    }
}

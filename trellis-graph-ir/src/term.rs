//! RDF term types: IRI reference and literal
//!
//! Terms are the building blocks of triples. A term is either an IRI
//! reference (always expanded, never prefixed) or a literal carrying its
//! lexical form. Blank nodes do not occur in schema graphs consumed by the
//! interpretation pipeline, so there is no variant for them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

/// An RDF term (subject, predicate, or object position)
///
/// # Invariants
///
/// - `Term::Iri` always contains an **expanded** IRI, never a prefixed form.
/// - The predicate position of a schema triple is an IRI by convention; a
///   literal predicate is out-of-vocabulary and rejected by the hygiene pass.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Full expanded IRI (e.g., "http://example.org/model#Person")
    Iri(Arc<str>),

    /// Literal lexical value
    Literal(Arc<str>),
}

impl Term {
    /// Create an IRI term from an expanded IRI string
    pub fn iri(iri: impl AsRef<str>) -> Self {
        Term::Iri(Arc::from(iri.as_ref()))
    }

    /// Create a literal term from its lexical form
    pub fn literal(value: impl AsRef<str>) -> Self {
        Term::Literal(Arc::from(value.as_ref()))
    }

    /// Check if this is an IRI term
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// Try to get as IRI string
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Try to get as literal lexical form
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Term::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Local name of an IRI term (fragment after `#`, else the last `/`
    /// path segment). Returns `None` for literals.
    pub fn local_name(&self) -> Option<&str> {
        self.as_iri().map(trellis_vocab::local_name)
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        // Type ordering: Iri < Literal
        let type_ord = |t: &Term| -> u8 {
            match t {
                Term::Iri(_) => 0,
                Term::Literal(_) => 1,
            }
        };

        match type_ord(self).cmp(&type_ord(other)) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match (self, other) {
            (Term::Iri(a), Term::Iri(b)) => a.cmp(b),
            (Term::Literal(a), Term::Literal(b)) => a.cmp(b),
            _ => Ordering::Equal, // Should not happen
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::Literal(value) => write!(f, "\"{}\"", value),
        }
    }
}

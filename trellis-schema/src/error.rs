//! Schema compilation error types

use thiserror::Error;

/// Result type for schema compilation operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Validation and compilation errors raised by the interpretation pipeline
///
/// Every variant is a hard failure that aborts the run. Loose-mode
/// self-healing removals are silent corrections and never surface here.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The input graph contains structurally-equal duplicate triples
    #[error("graph contains duplicate triples: {total} statements, {distinct} distinct")]
    DuplicateTriples { total: usize, distinct: usize },

    /// Triples use predicates outside the supported RDFS vocabulary
    #[error("graph contains {count} triple(s) with unsupported predicates (first: {first})")]
    UnsupportedPredicates { count: usize, first: String },

    /// An rdf:type triple declares something other than a class or property
    #[error("subject {subject} is typed as {object}, which is neither rdfs:Class nor rdf:Property")]
    UnsupportedTypeObject { subject: String, object: String },

    /// A subject appears in more than one rdf:type triple
    #[error("subject {subject} has more than one rdf:type declaration")]
    DuplicateTypeSubject { subject: String },

    /// A property declaration has no rdfs:domain triple
    #[error("property {property} has no rdfs:domain")]
    NoDomains { property: String },

    /// A property declaration has more than one rdfs:domain triple
    #[error("property {property} has {count} rdfs:domain triples, expected exactly one")]
    MoreDomains { property: String, count: usize },

    /// A property declaration has no rdfs:range triple
    #[error("property {property} has no rdfs:range")]
    NoRanges { property: String },

    /// A property declaration has more than one rdfs:range triple
    #[error("property {property} has {count} rdfs:range triples, expected exactly one")]
    MoreRanges { property: String, count: usize },

    /// A subject has more than one rdfs:subClassOf triple
    #[error("subject {subject} has more than one rdfs:subClassOf declaration")]
    DuplicateSubClassOfSubject { subject: String },

    /// The subject of an rdfs:subClassOf triple is not a declared class
    #[error("subClassOf subject {subject} is not declared as rdfs:Class")]
    SubjectNotDefined { subject: String },

    /// The object of an rdfs:subClassOf triple is not a declared class
    #[error("subClassOf object {object} is not declared as rdfs:Class")]
    ObjectNotDefined { object: String },

    /// An rdfs:subClassOf triple relates a class to itself
    #[error("subClassOf subject and object are the same: {subject}")]
    SameSubjectObject { subject: String },

    /// An rdfs:domain triple does not resolve to a property and class
    #[error("cannot resolve rdfs:domain triple for {property}: {object} is not a declared class")]
    UnresolvedDomain { property: String, object: String },

    /// An rdfs:range triple does not resolve to a class or registered datatype
    #[error(
        "cannot resolve rdfs:range triple for {property}: {object} is neither a declared class nor a registered datatype"
    )]
    UnresolvedRange { property: String, object: String },

    /// A user simple type carries a facet outside maxLength/totalDigits/fractionDigits
    #[error("unsupported XSD facet {facet} on simple type {type_name}")]
    UnsupportedXsdFacet { facet: String, type_name: String },

    /// A top-level XSD schema item that is not a simple type
    #[error("unsupported top-level XSD item: {item}")]
    UnsupportedXsdTopLevelItem { item: String },

    /// A simple type restriction base that is not a built-in datatype
    #[error("simple type {type_name} restricts unknown base type {base}")]
    UnknownXsdBaseType { type_name: String, base: String },

    /// Malformed XSD document
    #[error("XSD parse error: {0}")]
    Xml(#[from] quick_xml::Error),
}

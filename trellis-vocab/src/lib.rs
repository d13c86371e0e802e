//! RDF Vocabulary Constants for Trellis
//!
//! This crate provides a centralized location for the RDF vocabulary IRIs
//! used throughout the Trellis schema compiler. Constructing the table once,
//! here, keeps every interpretation pass reading from the same immutable
//! source instead of re-deriving its own constants.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)

/// RDF vocabulary constants
pub mod rdf {
    /// RDF namespace IRI
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:Property IRI
    pub const PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// RDFS namespace IRI
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

    /// rdfs:Class IRI
    pub const CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";

    /// rdfs:subClassOf IRI
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";

    /// rdfs:domain IRI
    pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";

    /// rdfs:range IRI
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
}

/// XSD vocabulary constants
pub mod xsd {
    /// XSD namespace IRI
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:long IRI
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";

    /// xsd:short IRI
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";

    /// xsd:byte IRI
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// xsd:hexBinary IRI
    pub const HEX_BINARY: &str = "http://www.w3.org/2001/XMLSchema#hexBinary";
}

/// XSD datatype local names (registry keys)
///
/// The datatype registry is keyed by local name; these constants provide the
/// local-name portion of the `xsd` IRIs above.
pub mod xsd_names {
    /// xsd:string local name
    pub const STRING: &str = "string";

    /// xsd:integer local name
    pub const INTEGER: &str = "integer";

    /// xsd:long local name
    pub const LONG: &str = "long";

    /// xsd:short local name
    pub const SHORT: &str = "short";

    /// xsd:byte local name
    pub const BYTE: &str = "byte";

    /// xsd:decimal local name
    pub const DECIMAL: &str = "decimal";

    /// xsd:double local name
    pub const DOUBLE: &str = "double";

    /// xsd:boolean local name
    pub const BOOLEAN: &str = "boolean";

    /// xsd:dateTime local name
    pub const DATE_TIME: &str = "dateTime";

    /// xsd:hexBinary local name
    pub const HEX_BINARY: &str = "hexBinary";
}

/// Get the local name portion of an IRI.
///
/// The local name is the fragment after `#` when one is present, otherwise
/// the path segment after the last `/`. An IRI with neither separator is its
/// own local name.
///
/// # Example
/// ```
/// use trellis_vocab::local_name;
///
/// assert_eq!(local_name("http://www.w3.org/2001/XMLSchema#string"), "string");
/// assert_eq!(local_name("http://example.org/model/Person"), "Person");
/// ```
#[inline]
pub fn local_name(iri: &str) -> &str {
    match iri.rsplit_once('#') {
        Some((_, fragment)) => fragment,
        None => iri.rsplit('/').next().unwrap_or(iri),
    }
}

/// Get the namespace portion of an IRI (everything up to and including the
/// separator that `local_name` splits on). Returns the whole IRI when no
/// separator is present.
#[inline]
pub fn namespace(iri: &str) -> &str {
    if let Some(pos) = iri.rfind('#') {
        &iri[..=pos]
    } else if let Some(pos) = iri.rfind('/') {
        &iri[..=pos]
    } else {
        iri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name_fragment() {
        assert_eq!(local_name(rdf::TYPE), "type");
        assert_eq!(local_name(rdfs::SUB_CLASS_OF), "subClassOf");
        assert_eq!(local_name(xsd::HEX_BINARY), "hexBinary");
    }

    #[test]
    fn test_local_name_path_segment() {
        assert_eq!(local_name("http://example.org/model/Person"), "Person");
        assert_eq!(local_name("http://example.org/p"), "p");
    }

    #[test]
    fn test_local_name_no_separator() {
        assert_eq!(local_name("Person"), "Person");
    }

    #[test]
    fn test_local_name_prefers_fragment() {
        // A fragment wins even when the IRI also contains slashes
        assert_eq!(local_name("http://example.org/model#Person"), "Person");
    }

    #[test]
    fn test_namespace() {
        assert_eq!(namespace(xsd::STRING), xsd::NS);
        assert_eq!(namespace("http://example.org/model/Person"), "http://example.org/model/");
        assert_eq!(namespace("Person"), "Person");
    }

    #[test]
    fn test_xsd_names_match_iris() {
        assert_eq!(local_name(xsd::STRING), xsd_names::STRING);
        assert_eq!(local_name(xsd::DATE_TIME), xsd_names::DATE_TIME);
        assert_eq!(local_name(xsd::DECIMAL), xsd_names::DECIMAL);
    }
}

//! RDFS schema compiler
//!
//! This crate turns a graph of raw subject-predicate-object triples into a
//! compiled, strongly-typed data model: resource types, scalar properties,
//! navigation properties, and associations, bound to a registry of
//! XSD-derived datatypes.
//!
//! The work happens in a fixed four-pass pipeline (hygiene, declarations,
//! inheritance, domain/range resolution); see the [`interpret`] module.
//! Validation policy is controlled by [`ExecutionMode`]: strict mode fails
//! fast on the first violation, loose mode self-heals by dropping the
//! offending triples where a rule permits it.
//!
//! # Example
//!
//! ```
//! use trellis_graph_ir::{Graph, Term};
//! use trellis_schema::{
//!     interpret_graph, ExecutionMode, ResourceType, XsdDataTypeCollection,
//! };
//!
//! let mut graph = Graph::new();
//! graph.add_triple(
//!     Term::iri("http://example.org/model#Person"),
//!     Term::iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
//!     Term::iri("http://www.w3.org/2000/01/rdf-schema#Class"),
//! );
//!
//! let module = interpret_graph(
//!     graph,
//!     ExecutionMode::Strict,
//!     XsdDataTypeCollection::new(),
//!     ResourceType::new("Resource", "http://example.org/model#Resource"),
//! )
//! .unwrap();
//!
//! assert!(module.contains_type("Person"));
//! ```

pub mod context;
pub mod datatype;
pub mod error;
pub mod interpret;
pub mod model;

pub use context::{Context, ExecutionMode};
pub use datatype::{DataTypeKind, XsdDataType, XsdDataTypeCollection};
pub use error::{Result, SchemaError};
pub use interpret::{interpret_graph, Interpreter};
pub use model::{
    Association, DataModelModule, NavigationProperty, ResourceType, ScalarProperty,
    INVERSE_SUFFIX,
};

//! Raw RDF graph intermediate representation for the Trellis compiler
//!
//! This crate provides the canonical input types for the schema
//! interpretation pipeline: [`Term`], [`Triple`], and [`Graph`]. Upstream
//! deserializers (RDF/XML, N-Triples) produce a `Graph`; the compiler in
//! `trellis-schema` consumes it.
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - All IRIs are stored in expanded form;
//!    prefix handling belongs to the deserializer.
//!
//! 2. **Bag semantics by default** - `Graph` uses `Vec<Triple>` so
//!    duplicate statements remain observable. The hygiene pass collapses
//!    them with `deduplicated()`.
//!
//! 3. **Insertion order is meaningful** - deduplication and subject
//!    listing preserve first-seen order, so a given input graph always
//!    compiles the same way.
//!
//! # Example
//!
//! ```
//! use trellis_graph_ir::{Graph, Term, Triple};
//!
//! let mut graph = Graph::new();
//!
//! graph.add_triple(
//!     Term::iri("http://example.org/model#Person"),
//!     Term::iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
//!     Term::iri("http://www.w3.org/2000/01/rdf-schema#Class"),
//! );
//!
//! assert!(graph.contains(&Triple::new(
//!     Term::iri("http://example.org/model#Person"),
//!     Term::iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
//!     Term::iri("http://www.w3.org/2000/01/rdf-schema#Class"),
//! )));
//! ```

mod graph;
mod term;
mod triple;

pub use graph::Graph;
pub use term::Term;
pub use triple::Triple;

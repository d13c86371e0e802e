//! The RDFS interpretation pipeline
//!
//! Four passes run in a fixed order over the context's graph:
//!
//! 1. [`Interpreter::Predicate`] - graph hygiene (dedup, out-of-vocabulary
//!    predicates); may replace the context's graph.
//! 2. [`Interpreter::Type`] - class and property declarations; creates the
//!    module's resource types.
//! 3. [`Interpreter::SubClassOf`] - inheritance edges; wires base types.
//! 4. [`Interpreter::DomainRange`] - property resolution; appends scalar
//!    and navigation properties and synthesizes associations.
//!
//! The ordering is load-bearing: each later pass assumes the graph is
//! hygienic and the referenced classes already exist as compiled resource
//! types. Failure in any pass aborts the run; the partially-built module is
//! dropped by the driver and never observed by the caller.

mod domain_range;
mod predicate;
mod subclass;
mod types;

use trellis_graph_ir::{Graph, Term, Triple};
use trellis_vocab::{rdf, rdfs};

use crate::context::{Context, ExecutionMode};
use crate::datatype::XsdDataTypeCollection;
use crate::error::Result;
use crate::model::{DataModelModule, ResourceType};

/// One interpretation pass
///
/// A closed set: the pipeline is the four variants below in
/// [`Interpreter::PIPELINE`] order, nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpreter {
    /// Graph hygiene: dedup and predicate vocabulary
    Predicate,
    /// Class/property declarations
    Type,
    /// Inheritance edges
    SubClassOf,
    /// Domain/range resolution and association synthesis
    DomainRange,
}

impl Interpreter {
    /// The fixed pass order the driver iterates
    pub const PIPELINE: [Interpreter; 4] = [
        Interpreter::Predicate,
        Interpreter::Type,
        Interpreter::SubClassOf,
        Interpreter::DomainRange,
    ];

    /// Validate and interpret this pass against the context
    pub fn run(&self, ctx: &mut Context, module: &mut DataModelModule) -> Result<()> {
        match self {
            Interpreter::Predicate => predicate::run(ctx),
            Interpreter::Type => types::run(ctx, module),
            Interpreter::SubClassOf => subclass::run(ctx, module),
            Interpreter::DomainRange => domain_range::run(ctx, module),
        }
    }
}

impl std::fmt::Display for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Interpreter::Predicate => "predicate",
            Interpreter::Type => "type",
            Interpreter::SubClassOf => "subClassOf",
            Interpreter::DomainRange => "domainRange",
        };
        write!(f, "{}", name)
    }
}

/// Run the full pipeline over a graph and produce the compiled module
///
/// This is the single entry point collaborators call. The context is
/// created here and discarded when the run completes; on error the
/// partially-built module is dropped.
pub fn interpret_graph(
    graph: Graph,
    mode: ExecutionMode,
    datatypes: XsdDataTypeCollection,
    base_resource_type: ResourceType,
) -> Result<DataModelModule> {
    tracing::info!(triples = graph.len(), %mode, "starting graph interpretation");

    let mut ctx = Context::new(graph, mode, datatypes, base_resource_type);
    let mut module = DataModelModule::new();

    for pass in Interpreter::PIPELINE {
        tracing::debug!(pass = %pass, triples = ctx.graph.len(), "running pass");
        pass.run(&mut ctx, &mut module)?;
    }

    tracing::info!(
        resource_types = module.len(),
        associations = module.associations().len(),
        "graph interpretation complete"
    );
    Ok(module)
}

// =============================================================================
// Shared graph queries
//
// Every query materializes an owned snapshot so passes can remove triples
// from the live graph while iterating the result.
// =============================================================================

/// Snapshot of all triples with the given predicate IRI
pub(crate) fn triples_with_predicate(graph: &Graph, predicate: &str) -> Vec<Triple> {
    graph
        .iter()
        .filter(|t| t.has_predicate(predicate))
        .cloned()
        .collect()
}

/// Snapshot of all triples with the given subject and predicate IRI
pub(crate) fn triples_with_subject_and_predicate(
    graph: &Graph,
    subject: &Term,
    predicate: &str,
) -> Vec<Triple> {
    graph
        .iter()
        .filter(|t| t.has_subject(subject) && t.has_predicate(predicate))
        .cloned()
        .collect()
}

/// Snapshot of all rdf:type triples declaring an rdfs:Class
pub(crate) fn class_declarations(graph: &Graph) -> Vec<Triple> {
    graph
        .iter()
        .filter(|t| t.has_predicate(rdf::TYPE) && t.o.as_iri() == Some(rdfs::CLASS))
        .cloned()
        .collect()
}

/// Snapshot of all rdf:type triples declaring an rdf:Property
pub(crate) fn property_declarations(graph: &Graph) -> Vec<Triple> {
    graph
        .iter()
        .filter(|t| t.has_predicate(rdf::TYPE) && t.o.as_iri() == Some(rdf::PROPERTY))
        .cloned()
        .collect()
}

/// Whether the subject is independently declared as an rdfs:Class
pub(crate) fn has_class_declaration(graph: &Graph, subject: &Term) -> bool {
    graph
        .iter()
        .any(|t| t.has_subject(subject) && t.has_predicate(rdf::TYPE) && t.o.as_iri() == Some(rdfs::CLASS))
}

/// Whether the subject is independently declared as an rdf:Property
pub(crate) fn has_property_declaration(graph: &Graph, subject: &Term) -> bool {
    graph
        .iter()
        .any(|t| t.has_subject(subject) && t.has_predicate(rdf::TYPE) && t.o.as_iri() == Some(rdf::PROPERTY))
}

/// Display form of a term for error messages
pub(crate) fn term_label(term: &Term) -> String {
    match term.as_iri() {
        Some(iri) => iri.to_string(),
        None => term.to_string(),
    }
}

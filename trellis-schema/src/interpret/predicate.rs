//! Graph hygiene pass
//!
//! Collapses duplicate triples and filters out-of-vocabulary predicates.
//! Must run first: every later pass assumes no duplicate and no
//! out-of-vocabulary triples remain. The context's graph reference may
//! change identity here.

use trellis_graph_ir::Triple;
use trellis_vocab::{rdf, rdfs};

use crate::context::Context;
use crate::error::{Result, SchemaError};
use crate::interpret::term_label;

/// Predicates the interpretation pipeline understands
const SUPPORTED_PREDICATES: [&str; 4] =
    [rdf::TYPE, rdfs::SUB_CLASS_OF, rdfs::DOMAIN, rdfs::RANGE];

/// Whether a triple's predicate is outside the supported vocabulary
///
/// A non-IRI predicate is out-of-vocabulary by definition.
fn is_restricted(triple: &Triple) -> bool {
    match triple.p.as_iri() {
        Some(iri) => !SUPPORTED_PREDICATES.contains(&iri),
        None => true,
    }
}

pub(crate) fn run(ctx: &mut Context) -> Result<()> {
    // Duplicate collapsing. In strict mode any collapse is an error; the
    // replacement is unconditional since the counts already matched.
    let deduplicated = ctx.graph.deduplicated();
    if ctx.mode.is_strict() && deduplicated.len() != ctx.graph.len() {
        return Err(SchemaError::DuplicateTriples {
            total: ctx.graph.len(),
            distinct: deduplicated.len(),
        });
    }
    ctx.graph = deduplicated;

    // Out-of-vocabulary predicates. Snapshot first, then mutate.
    let restricted: Vec<Triple> = ctx.graph.iter().filter(|t| is_restricted(t)).cloned().collect();
    if restricted.is_empty() {
        return Ok(());
    }

    if ctx.mode.is_strict() {
        return Err(SchemaError::UnsupportedPredicates {
            count: restricted.len(),
            first: term_label(&restricted[0].p),
        });
    }

    tracing::debug!(removed = restricted.len(), "dropping unsupported predicate triples");
    for triple in &restricted {
        ctx.graph.remove(triple);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ExecutionMode;
    use crate::datatype::XsdDataTypeCollection;
    use crate::model::ResourceType;
    use trellis_graph_ir::{Graph, Term};

    fn ctx(graph: Graph, mode: ExecutionMode) -> Context {
        Context::new(
            graph,
            mode,
            XsdDataTypeCollection::new(),
            ResourceType::new("Resource", "http://example.org/model#Resource"),
        )
    }

    fn class_triple() -> Triple {
        Triple::new(
            Term::iri("http://example.org/model#Person"),
            Term::iri(rdf::TYPE),
            Term::iri(rdfs::CLASS),
        )
    }

    #[test]
    fn test_duplicate_triples_strict_fails() {
        let mut graph = Graph::new();
        graph.add(class_triple());
        graph.add(class_triple());

        let mut c = ctx(graph, ExecutionMode::Strict);
        let err = run(&mut c).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::DuplicateTriples { total: 2, distinct: 1 }
        ));
    }

    #[test]
    fn test_duplicate_triples_loose_collapses() {
        let mut graph = Graph::new();
        graph.add(class_triple());
        graph.add(class_triple());

        let mut c = ctx(graph, ExecutionMode::Loose);
        run(&mut c).unwrap();
        assert_eq!(c.graph.len(), 1);
    }

    #[test]
    fn test_restricted_predicate_strict_fails() {
        let mut graph = Graph::new();
        graph.add(class_triple());
        graph.add_triple(
            Term::iri("http://example.org/model#Person"),
            Term::iri("http://www.w3.org/2000/01/rdf-schema#label"),
            Term::literal("Person"),
        );

        let mut c = ctx(graph, ExecutionMode::Strict);
        let err = run(&mut c).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnsupportedPredicates { count: 1, .. }
        ));
    }

    #[test]
    fn test_restricted_predicate_loose_removes() {
        let mut graph = Graph::new();
        graph.add(class_triple());
        graph.add_triple(
            Term::iri("http://example.org/model#Person"),
            Term::iri("http://www.w3.org/2000/01/rdf-schema#label"),
            Term::literal("Person"),
        );

        let mut c = ctx(graph, ExecutionMode::Loose);
        run(&mut c).unwrap();
        assert_eq!(c.graph.len(), 1);
        assert!(c.graph.contains(&class_triple()));
    }

    #[test]
    fn test_literal_predicate_is_restricted() {
        let mut graph = Graph::new();
        graph.add_triple(
            Term::iri("http://example.org/model#Person"),
            Term::literal("type"),
            Term::iri(rdfs::CLASS),
        );

        let mut c = ctx(graph, ExecutionMode::Loose);
        run(&mut c).unwrap();
        assert!(c.graph.is_empty());
    }

    #[test]
    fn test_clean_graph_passes_strict() {
        let mut graph = Graph::new();
        graph.add(class_triple());

        let mut c = ctx(graph, ExecutionMode::Strict);
        run(&mut c).unwrap();
        assert_eq!(c.graph.len(), 1);
    }
}

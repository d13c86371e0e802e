//! Inheritance pass
//!
//! Wires rdfs:subClassOf edges into base-type references on the compiled
//! resource types. Every rule here is a hard error in both execution
//! modes: a malformed hierarchy cannot be healed by dropping triples
//! without silently changing the shape of the model.

use std::collections::HashSet;

use trellis_graph_ir::Term;
use trellis_vocab::rdfs;

use crate::context::Context;
use crate::error::{Result, SchemaError};
use crate::interpret::{has_class_declaration, term_label, triples_with_predicate};
use crate::model::DataModelModule;

pub(crate) fn run(ctx: &mut Context, module: &mut DataModelModule) -> Result<()> {
    let edges = triples_with_predicate(&ctx.graph, rdfs::SUB_CLASS_OF);

    // At most one subClassOf edge per subject
    let mut seen: HashSet<&Term> = HashSet::new();
    for edge in &edges {
        if !seen.insert(&edge.s) {
            return Err(SchemaError::DuplicateSubClassOfSubject {
                subject: term_label(&edge.s),
            });
        }
    }

    // Both ends must be independently declared classes
    for edge in &edges {
        if !has_class_declaration(&ctx.graph, &edge.s) {
            return Err(SchemaError::SubjectNotDefined {
                subject: term_label(&edge.s),
            });
        }
        if !has_class_declaration(&ctx.graph, &edge.o) {
            return Err(SchemaError::ObjectNotDefined {
                object: term_label(&edge.o),
            });
        }
    }

    // No self-inheritance
    for edge in &edges {
        if edge.s == edge.o {
            return Err(SchemaError::SameSubjectObject {
                subject: term_label(&edge.s),
            });
        }
    }

    // Wire child -> parent by local name
    for edge in &edges {
        let child_name = edge.s.local_name().unwrap_or_default().to_string();
        let parent_name = edge.o.local_name().unwrap_or_default().to_string();
        if let Some(child) = module.resource_type_mut(&child_name) {
            child.base_type = Some(parent_name);
        }
    }
    tracing::debug!(edges = edges.len(), "applied inheritance edges");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ExecutionMode;
    use crate::datatype::XsdDataTypeCollection;
    use crate::interpret::Interpreter;
    use crate::model::ResourceType;
    use trellis_graph_ir::Graph;
    use trellis_vocab::rdf;

    const EX: &str = "http://example.org/model#";

    fn ctx(graph: Graph, mode: ExecutionMode) -> Context {
        Context::new(
            graph,
            mode,
            XsdDataTypeCollection::new(),
            ResourceType::new("Resource", "http://example.org/model#Resource"),
        )
    }

    fn class(graph: &mut Graph, name: &str) {
        graph.add_triple(
            Term::iri(format!("{EX}{name}")),
            Term::iri(rdf::TYPE),
            Term::iri(trellis_vocab::rdfs::CLASS),
        );
    }

    fn sub_class_of(graph: &mut Graph, child: &str, parent: &str) {
        graph.add_triple(
            Term::iri(format!("{EX}{child}")),
            Term::iri(rdfs::SUB_CLASS_OF),
            Term::iri(format!("{EX}{parent}")),
        );
    }

    /// Run the type pass first so the module has resource types, then this pass
    fn run_with_types(mut c: Context) -> (Result<()>, Context, DataModelModule) {
        let mut module = DataModelModule::new();
        Interpreter::Type.run(&mut c, &mut module).unwrap();
        let result = run(&mut c, &mut module);
        (result, c, module)
    }

    #[test]
    fn test_sets_base_type() {
        let mut graph = Graph::new();
        class(&mut graph, "Agent");
        class(&mut graph, "Person");
        sub_class_of(&mut graph, "Person", "Agent");

        let (result, _, module) = run_with_types(ctx(graph, ExecutionMode::Strict));
        result.unwrap();

        assert_eq!(
            module.resource_type("Person").unwrap().base_type.as_deref(),
            Some("Agent")
        );
        // The parent keeps the context's base
        assert_eq!(
            module.resource_type("Agent").unwrap().base_type.as_deref(),
            Some("Resource")
        );
    }

    #[test]
    fn test_duplicate_subject_is_hard_error_in_loose_mode() {
        let mut graph = Graph::new();
        class(&mut graph, "Agent");
        class(&mut graph, "Team");
        class(&mut graph, "Person");
        sub_class_of(&mut graph, "Person", "Agent");
        sub_class_of(&mut graph, "Person", "Team");

        let (result, _, _) = run_with_types(ctx(graph, ExecutionMode::Loose));
        assert!(matches!(
            result.unwrap_err(),
            SchemaError::DuplicateSubClassOfSubject { .. }
        ));
    }

    #[test]
    fn test_subject_not_defined() {
        let mut graph = Graph::new();
        class(&mut graph, "Agent");
        sub_class_of(&mut graph, "Person", "Agent");

        let (result, _, _) = run_with_types(ctx(graph, ExecutionMode::Strict));
        assert!(matches!(
            result.unwrap_err(),
            SchemaError::SubjectNotDefined { .. }
        ));
    }

    #[test]
    fn test_object_not_defined() {
        let mut graph = Graph::new();
        class(&mut graph, "Person");
        sub_class_of(&mut graph, "Person", "Agent");

        let (result, _, _) = run_with_types(ctx(graph, ExecutionMode::Strict));
        assert!(matches!(
            result.unwrap_err(),
            SchemaError::ObjectNotDefined { .. }
        ));
    }

    #[test]
    fn test_self_inheritance_fails_in_both_modes() {
        for mode in [ExecutionMode::Strict, ExecutionMode::Loose] {
            let mut graph = Graph::new();
            class(&mut graph, "Person");
            sub_class_of(&mut graph, "Person", "Person");

            let (result, _, _) = run_with_types(ctx(graph, mode));
            assert!(matches!(
                result.unwrap_err(),
                SchemaError::SameSubjectObject { .. }
            ));
        }
    }
}

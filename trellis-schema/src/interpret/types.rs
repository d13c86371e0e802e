//! Class/property declaration pass
//!
//! Validates rdf:type triples and creates a resource type for every
//! declared class. Property declarations are checked for domain/range
//! completeness here so the resolution pass can assume exactly one of
//! each; in loose mode an incomplete property is dropped wholesale.

use std::collections::HashSet;

use trellis_graph_ir::{Term, Triple};
use trellis_vocab::{rdf, rdfs};

use crate::context::Context;
use crate::error::{Result, SchemaError};
use crate::interpret::{
    class_declarations, property_declarations, term_label, triples_with_predicate,
    triples_with_subject_and_predicate,
};
use crate::model::{DataModelModule, ResourceType};

/// Whether an rdf:type triple declares something the pipeline understands
fn is_supported_declaration(triple: &Triple) -> bool {
    matches!(triple.o.as_iri(), Some(rdfs::CLASS) | Some(rdf::PROPERTY))
}

/// Module key and uri for a declaration subject
fn subject_name(subject: &Term) -> String {
    match subject.local_name() {
        Some(name) => name.to_string(),
        None => term_label(subject),
    }
}

pub(crate) fn run(ctx: &mut Context, module: &mut DataModelModule) -> Result<()> {
    validate(ctx)?;
    interpret(ctx, module);
    Ok(())
}

fn validate(ctx: &mut Context) -> Result<()> {
    // Type objects outside {rdfs:Class, rdf:Property}
    let restricted: Vec<Triple> = triples_with_predicate(&ctx.graph, rdf::TYPE)
        .into_iter()
        .filter(|t| !is_supported_declaration(t))
        .collect();

    if !restricted.is_empty() {
        if ctx.mode.is_strict() {
            return Err(SchemaError::UnsupportedTypeObject {
                subject: term_label(&restricted[0].s),
                object: term_label(&restricted[0].o),
            });
        }
        tracing::debug!(removed = restricted.len(), "dropping unsupported type declarations");
        for triple in &restricted {
            ctx.graph.remove(triple);
        }
    }

    // One rdf:type triple per subject, checked after the removal above.
    // This rule has no loose relaxation.
    let declarations = triples_with_predicate(&ctx.graph, rdf::TYPE);
    let mut seen: HashSet<&Term> = HashSet::new();
    for triple in &declarations {
        if !seen.insert(&triple.s) {
            return Err(SchemaError::DuplicateTypeSubject {
                subject: term_label(&triple.s),
            });
        }
    }

    // Domain/range completeness per property declaration
    for declaration in property_declarations(&ctx.graph) {
        let domains = triples_with_subject_and_predicate(&ctx.graph, &declaration.s, rdfs::DOMAIN);
        let ranges = triples_with_subject_and_predicate(&ctx.graph, &declaration.s, rdfs::RANGE);

        if ctx.mode.is_strict() {
            let property = term_label(&declaration.s);
            if domains.is_empty() {
                return Err(SchemaError::NoDomains { property });
            }
            if domains.len() > 1 {
                return Err(SchemaError::MoreDomains {
                    property,
                    count: domains.len(),
                });
            }
            if ranges.is_empty() {
                return Err(SchemaError::NoRanges { property });
            }
            if ranges.len() > 1 {
                return Err(SchemaError::MoreRanges {
                    property,
                    count: ranges.len(),
                });
            }
        } else if domains.len() != 1 || ranges.len() != 1 {
            // Incomplete property: drop the declaration and every domain
            // and range triple it owns.
            tracing::debug!(
                property = %term_label(&declaration.s),
                domains = domains.len(),
                ranges = ranges.len(),
                "dropping incomplete property declaration"
            );
            ctx.graph.remove(&declaration);
            for triple in domains.iter().chain(ranges.iter()) {
                ctx.graph.remove(triple);
            }
        }
    }

    Ok(())
}

fn interpret(ctx: &Context, module: &mut DataModelModule) {
    let base_name = ctx.base_resource_type.name.clone();
    for declaration in class_declarations(&ctx.graph) {
        let name = subject_name(&declaration.s);
        let uri = term_label(&declaration.s);
        let mut resource_type = ResourceType::new(name, uri);
        resource_type.base_type = Some(base_name.clone());
        module.add_resource_type(resource_type);
    }
    tracing::debug!(resource_types = module.len(), "created resource types");
}

//! Domain/range resolution pass
//!
//! Resolves every property declaration against the compiled resource
//! types and the datatype registry, then routes it: a range naming a
//! registered datatype becomes a scalar property on the domain class; a
//! range naming a declared class becomes a navigation pair plus a
//! synthesized association.
//!
//! There is no loose relaxation here: the declaration pass already dropped
//! incomplete properties, so an unresolved domain or range at this point
//! is a hard error in both modes.

use trellis_vocab::rdfs;

use crate::context::Context;
use crate::error::{Result, SchemaError};
use crate::interpret::{
    has_property_declaration, property_declarations, term_label, triples_with_predicate,
    triples_with_subject_and_predicate,
};
use crate::model::{Association, DataModelModule, NavigationProperty, ScalarProperty};

pub(crate) fn run(ctx: &mut Context, module: &mut DataModelModule) -> Result<()> {
    validate(ctx, module)?;
    interpret(ctx, module);
    Ok(())
}

fn validate(ctx: &Context, module: &DataModelModule) -> Result<()> {
    for triple in triples_with_predicate(&ctx.graph, rdfs::DOMAIN) {
        let declared_class = triple
            .o
            .local_name()
            .is_some_and(|name| module.contains_type(name));
        if !has_property_declaration(&ctx.graph, &triple.s) || !declared_class {
            return Err(SchemaError::UnresolvedDomain {
                property: term_label(&triple.s),
                object: term_label(&triple.o),
            });
        }
    }

    for triple in triples_with_predicate(&ctx.graph, rdfs::RANGE) {
        let resolvable = triple.o.local_name().is_some_and(|name| {
            ctx.datatypes.contains(name) || module.contains_type(name)
        });
        if !has_property_declaration(&ctx.graph, &triple.s) || !resolvable {
            return Err(SchemaError::UnresolvedRange {
                property: term_label(&triple.s),
                object: term_label(&triple.o),
            });
        }
    }

    Ok(())
}

fn interpret(ctx: &Context, module: &mut DataModelModule) {
    for declaration in property_declarations(&ctx.graph) {
        let domains = triples_with_subject_and_predicate(&ctx.graph, &declaration.s, rdfs::DOMAIN);
        let ranges = triples_with_subject_and_predicate(&ctx.graph, &declaration.s, rdfs::RANGE);
        let (Some(domain), Some(range)) = (domains.first(), ranges.first()) else {
            // Unreachable after the declaration pass; nothing to compile
            continue;
        };

        let property_name = declaration.s.local_name().unwrap_or_default().to_string();
        let property_uri = term_label(&declaration.s);
        let domain_name = domain.o.local_name().unwrap_or_default().to_string();
        let range_name = range.o.local_name().unwrap_or_default().to_string();

        if let Some(data_type) = ctx.datatypes.get(&range_name) {
            // Scalar: the property's value is a primitive
            let scalar = ScalarProperty::from_data_type(&property_name, data_type);
            tracing::debug!(property = %property_name, class = %domain_name, kind = %scalar.data_type, "compiled scalar property");
            if let Some(subject_type) = module.resource_type_mut(&domain_name) {
                subject_type.scalar_properties.push(scalar);
            }
        } else {
            // Navigation: one property on each side of the relationship
            let forward = NavigationProperty::new(&property_name, &property_uri);
            let inverse = forward.inverse();
            let association = Association {
                name: format!("{}_{}_{}", domain_name, property_name, range_name),
                subject_type: domain_name.clone(),
                subject_navigation_property: forward.name.clone(),
                object_type: range_name.clone(),
                object_navigation_property: inverse.name.clone(),
            };
            tracing::debug!(association = %association.name, "compiled navigation pair");

            if let Some(subject_type) = module.resource_type_mut(&domain_name) {
                subject_type.navigation_properties.push(forward);
            }
            if let Some(object_type) = module.resource_type_mut(&range_name) {
                object_type.navigation_properties.push(inverse);
            }
            module.add_association(association);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ExecutionMode;
    use crate::datatype::{DataTypeKind, XsdDataTypeCollection};
    use crate::interpret::Interpreter;
    use crate::model::ResourceType;
    use trellis_graph_ir::{Graph, Term};
    use trellis_vocab::{rdf, xsd};

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

    fn property(graph: &mut Graph, name: &str, domain: &str, range: &str) {
        graph.add_triple(
            Term::iri(format!("{EX}{name}")),
            Term::iri(rdf::TYPE),
            Term::iri(rdf::PROPERTY),
        );
        graph.add_triple(
            Term::iri(format!("{EX}{name}")),
            Term::iri(rdfs::DOMAIN),
            Term::iri(format!("{EX}{domain}")),
        );
        graph.add_triple(
            Term::iri(format!("{EX}{name}")),
            Term::iri(rdfs::RANGE),
            Term::iri(range.to_string()),
        );
    }

    /// Run the type pass then this pass
    fn run_with_types(mut c: Context) -> (Result<()>, Context, DataModelModule) {
        let mut module = DataModelModule::new();
        Interpreter::Type.run(&mut c, &mut module).unwrap();
        let result = run(&mut c, &mut module);
        (result, c, module)
    }

    #[test]
    fn test_scalar_routing() {
        let mut graph = Graph::new();
        class(&mut graph, "Person");
        property(&mut graph, "name", "Person", xsd::STRING);

        let (result, _, module) = run_with_types(ctx(graph, ExecutionMode::Strict));
        result.unwrap();

        let person = module.resource_type("Person").unwrap();
        let scalar = person.scalar_property("name").unwrap();
        assert_eq!(scalar.data_type, DataTypeKind::String);
        assert!(person.navigation_properties.is_empty());
        assert!(module.associations().is_empty());
    }

    #[test]
    fn test_navigation_routing() {
        let mut graph = Graph::new();
        class(&mut graph, "Paper");
        class(&mut graph, "Person");
        property(&mut graph, "author", "Paper", &format!("{EX}Person"));

        let (result, _, module) = run_with_types(ctx(graph, ExecutionMode::Strict));
        result.unwrap();

        let paper = module.resource_type("Paper").unwrap();
        let person = module.resource_type("Person").unwrap();

        let forward = paper.navigation_property("author").unwrap();
        assert_eq!(forward.uri, format!("{EX}author"));

        let inverse = person.navigation_property("author_Inverse").unwrap();
        assert_eq!(inverse.uri, format!("{EX}author_Inverse"));

        // Scalar side unaffected
        assert!(paper.scalar_properties.is_empty());
        assert!(person.scalar_properties.is_empty());

        assert_eq!(module.associations().len(), 1);
        let association = &module.associations()[0];
        assert_eq!(association.name, "Paper_author_Person");
        assert_eq!(association.subject_type, "Paper");
        assert_eq!(association.subject_navigation_property, "author");
        assert_eq!(association.object_type, "Person");
        assert_eq!(association.object_navigation_property, "author_Inverse");
    }

    #[test]
    fn test_self_referential_navigation() {
        let mut graph = Graph::new();
        class(&mut graph, "Person");
        property(&mut graph, "knows", "Person", &format!("{EX}Person"));

        let (result, _, module) = run_with_types(ctx(graph, ExecutionMode::Strict));
        result.unwrap();

        let person = module.resource_type("Person").unwrap();
        assert!(person.navigation_property("knows").is_some());
        assert!(person.navigation_property("knows_Inverse").is_some());
        assert_eq!(module.associations()[0].name, "Person_knows_Person");
    }

    #[test]
    fn test_unresolved_domain_class() {
        let mut graph = Graph::new();
        class(&mut graph, "Person");
        property(&mut graph, "name", "Unknown", xsd::STRING);

        let (result, _, _) = run_with_types(ctx(graph, ExecutionMode::Strict));
        assert!(matches!(
            result.unwrap_err(),
            SchemaError::UnresolvedDomain { .. }
        ));
    }

    #[test]
    fn test_unresolved_range() {
        let mut graph = Graph::new();
        class(&mut graph, "Person");
        property(&mut graph, "name", "Person", &format!("{EX}Unknown"));

        let (result, _, _) = run_with_types(ctx(graph, ExecutionMode::Strict));
        assert!(matches!(
            result.unwrap_err(),
            SchemaError::UnresolvedRange { .. }
        ));
    }

    #[test]
    fn test_domain_without_property_declaration_fails_in_loose_mode() {
        let mut graph = Graph::new();
        class(&mut graph, "Person");
        // A dangling domain triple: no rdf:type rdf:Property for the subject
        graph.add_triple(
            Term::iri(format!("{EX}name")),
            Term::iri(rdfs::DOMAIN),
            Term::iri(format!("{EX}Person")),
        );

        let (result, _, _) = run_with_types(ctx(graph, ExecutionMode::Loose));
        assert!(matches!(
            result.unwrap_err(),
            SchemaError::UnresolvedDomain { .. }
        ));
    }

    #[test]
    fn test_user_datatype_scalar_routing() {
        let mut graph = Graph::new();
        class(&mut graph, "Product");
        property(&mut graph, "price", "Product", "http://example.org/types#money");

        let mut datatypes = XsdDataTypeCollection::new();
        datatypes
            .load_simple_types(
                r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                              targetNamespace="http://example.org/types">
  <xs:simpleType name="money">
    <xs:restriction base="xs:decimal">
      <xs:totalDigits value="12"/>
      <xs:fractionDigits value="2"/>
    </xs:restriction>
  </xs:simpleType>
</xs:schema>"#,
            )
            .unwrap();

        let mut c = Context::new(
            graph,
            ExecutionMode::Strict,
            datatypes,
            ResourceType::new("Resource", "http://example.org/model#Resource"),
        );
        let mut module = DataModelModule::new();
        Interpreter::Type.run(&mut c, &mut module).unwrap();
        run(&mut c, &mut module).unwrap();

        let product = module.resource_type("Product").unwrap();
        let price = product.scalar_property("price").unwrap();
        assert_eq!(price.data_type, DataTypeKind::Decimal);
        assert_eq!(price.precision, 12);
        assert_eq!(price.scale, 2);
    }
}

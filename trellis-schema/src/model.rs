//! Compiled data model
//!
//! The interpretation pipeline populates a [`DataModelModule`]: resource
//! types keyed by local name, each carrying scalar and navigation
//! properties, plus the list of associations synthesized for navigation
//! pairs. Resource types reference each other by name, the way the storage
//! layer keys them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::datatype::{DataTypeKind, XsdDataType};

/// Suffix applied to the inverse side of a navigation pair
pub const INVERSE_SUFFIX: &str = "_Inverse";

/// A property whose value is a primitive datatype
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarProperty {
    /// Property name (local name of the property IRI)
    pub name: String,
    /// Scalar kind copied from the registry entry
    pub data_type: DataTypeKind,
    /// Maximum length copied from the registry entry
    pub max_length: i64,
    /// Decimal precision copied from the registry entry
    pub precision: i32,
    /// Decimal scale copied from the registry entry
    pub scale: i32,
}

impl ScalarProperty {
    /// Create a scalar property carrying the facets of a registered datatype
    pub fn from_data_type(name: impl Into<String>, data_type: &XsdDataType) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.kind,
            max_length: data_type.max_length,
            precision: data_type.precision,
            scale: data_type.scale,
        }
    }
}

/// A property whose value is a reference to another resource type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationProperty {
    /// Property name (local name, or `{local}_Inverse` on the object side)
    pub name: String,
    /// Absolute IRI of the property (suffixed on the inverse side)
    pub uri: String,
}

impl NavigationProperty {
    /// Create a navigation property
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
        }
    }

    /// Create the inverse-side counterpart of this navigation property
    pub fn inverse(&self) -> Self {
        Self {
            name: format!("{}{}", self.name, INVERSE_SUFFIX),
            uri: format!("{}{}", self.uri, INVERSE_SUFFIX),
        }
    }
}

/// The named relationship object linking a pair of inverse navigation
/// properties
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    /// Synthesized name: `{SubjectType}_{PropertyLocalName}_{ObjectType}`
    pub name: String,
    /// Resource type on the domain side
    pub subject_type: String,
    /// Navigation property on the domain side
    pub subject_navigation_property: String,
    /// Resource type on the range side
    pub object_type: String,
    /// Navigation property on the range side
    pub object_navigation_property: String,
}

/// A compiled class in the target data model
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    /// Local name of the class IRI; the module key
    pub name: String,
    /// Absolute IRI of the class
    pub uri: String,
    /// Name of the parent resource type, when one is set
    pub base_type: Option<String>,
    /// Scalar properties, in compilation order
    pub scalar_properties: Vec<ScalarProperty>,
    /// Navigation properties, in compilation order
    pub navigation_properties: Vec<NavigationProperty>,
}

impl ResourceType {
    /// Create a resource type with no properties and no base
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            base_type: None,
            scalar_properties: Vec::new(),
            navigation_properties: Vec::new(),
        }
    }

    /// Look up a scalar property by name
    pub fn scalar_property(&self, name: &str) -> Option<&ScalarProperty> {
        self.scalar_properties.iter().find(|p| p.name == name)
    }

    /// Look up a navigation property by name
    pub fn navigation_property(&self, name: &str) -> Option<&NavigationProperty> {
        self.navigation_properties.iter().find(|p| p.name == name)
    }
}

/// The output sink of the interpretation pipeline
///
/// Resource types are keyed by local name; associations are kept as a
/// separate list in synthesis order. Iteration over resource types is
/// deterministic (name order).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataModelModule {
    resource_types: BTreeMap<String, ResourceType>,
    associations: Vec<Association>,
}

impl DataModelModule {
    /// Create an empty module
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource type, keyed by its name
    pub fn add_resource_type(&mut self, resource_type: ResourceType) {
        self.resource_types
            .insert(resource_type.name.clone(), resource_type);
    }

    /// Look up a resource type by name
    pub fn resource_type(&self, name: &str) -> Option<&ResourceType> {
        self.resource_types.get(name)
    }

    /// Look up a resource type by name, mutably
    pub fn resource_type_mut(&mut self, name: &str) -> Option<&mut ResourceType> {
        self.resource_types.get_mut(name)
    }

    /// Check whether a resource type with the given name exists
    pub fn contains_type(&self, name: &str) -> bool {
        self.resource_types.contains_key(name)
    }

    /// Iterate over resource types in name order
    pub fn resource_types(&self) -> impl Iterator<Item = &ResourceType> {
        self.resource_types.values()
    }

    /// Number of resource types
    pub fn len(&self) -> usize {
        self.resource_types.len()
    }

    /// Whether the module holds no resource types
    pub fn is_empty(&self) -> bool {
        self.resource_types.is_empty()
    }

    /// Record a synthesized association
    pub fn add_association(&mut self, association: Association) {
        self.associations.push(association);
    }

    /// The associations synthesized for navigation pairs, in order
    pub fn associations(&self) -> &[Association] {
        &self.associations
    }
}

//! XSD-derived datatype registry
//!
//! The registry maps datatype local names to an internal scalar kind plus
//! length/precision/scale facets. It always contains the built-in XSD
//! primitives; user simple types can be layered on top from an XSD
//! restriction document via [`XsdDataTypeCollection::load_simple_types`].

use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use trellis_vocab::{xsd, xsd_names};

use crate::error::{Result, SchemaError};

/// Internal scalar kind a datatype compiles to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataTypeKind {
    Binary,
    Boolean,
    Byte,
    DateTime,
    Decimal,
    Double,
    Int16,
    Int32,
    Int64,
    String,
}

impl DataTypeKind {
    /// Whether this kind carries a meaningful maxLength facet
    pub fn is_sized(&self) -> bool {
        matches!(self, DataTypeKind::Binary | DataTypeKind::String)
    }
}

impl std::fmt::Display for DataTypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataTypeKind::Binary => "Binary",
            DataTypeKind::Boolean => "Boolean",
            DataTypeKind::Byte => "Byte",
            DataTypeKind::DateTime => "DateTime",
            DataTypeKind::Decimal => "Decimal",
            DataTypeKind::Double => "Double",
            DataTypeKind::Int16 => "Int16",
            DataTypeKind::Int32 => "Int32",
            DataTypeKind::Int64 => "Int64",
            DataTypeKind::String => "String",
        };
        write!(f, "{}", name)
    }
}

/// Default precision stored when a requested decimal precision is invalid
const DEFAULT_PRECISION: i32 = 18;

/// Largest representable decimal precision
const MAX_PRECISION: i32 = 38;

/// Largest scale the storage layer accepts
const MAX_SCALE: i32 = 26;

/// Clamp a decimal precision into `[1, 38]`, resetting to 18 when outside
pub(crate) fn clamp_precision(precision: i32) -> i32 {
    if (1..=MAX_PRECISION).contains(&precision) {
        precision
    } else {
        DEFAULT_PRECISION
    }
}

/// Clamp a decimal scale into `[0, precision]` and at most 26, resetting to
/// the precision when outside
pub(crate) fn clamp_scale(scale: i32, precision: i32) -> i32 {
    if (0..=precision).contains(&scale) && scale <= MAX_SCALE {
        scale
    } else {
        precision
    }
}

/// A registered datatype: name, kind, and storage facets
///
/// Facet invariants hold from construction onward: `max_length` is 0 unless
/// the kind is sized (`Binary`/`String`), and `precision`/`scale` are 0
/// unless the kind is `Decimal`, in which case they are clamped by
/// [`clamp_precision`]/[`clamp_scale`] on every write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XsdDataType {
    /// Registry key (datatype local name, e.g. "string")
    pub name: String,
    /// Absolute IRI of the datatype
    pub name_uri: String,
    /// Scalar kind the datatype compiles to
    pub kind: DataTypeKind,
    /// Maximum length in characters/bytes; 0 means unbounded
    pub max_length: i64,
    /// Decimal precision (total digits)
    pub precision: i32,
    /// Decimal scale (fraction digits)
    pub scale: i32,
}

impl XsdDataType {
    /// Create a datatype with default facets for its kind
    ///
    /// `max_length` starts at 0 (unbounded); a `Decimal` kind starts with
    /// precision 18 and scale 0.
    pub fn new(name: impl Into<String>, name_uri: impl Into<String>, kind: DataTypeKind) -> Self {
        let precision = if kind == DataTypeKind::Decimal {
            DEFAULT_PRECISION
        } else {
            0
        };
        Self {
            name: name.into(),
            name_uri: name_uri.into(),
            kind,
            max_length: 0,
            precision,
            scale: 0,
        }
    }

    /// Set the maximum length; forced to 0 for kinds without a length facet
    pub fn with_max_length(mut self, max_length: i64) -> Self {
        self.max_length = if self.kind.is_sized() { max_length } else { 0 };
        self
    }

    /// Set the precision, clamped into `[1, 38]`; ignored for non-decimal kinds
    ///
    /// The scale is re-clamped against the new precision.
    pub fn with_precision(mut self, precision: i32) -> Self {
        if self.kind == DataTypeKind::Decimal {
            self.precision = clamp_precision(precision);
            self.scale = clamp_scale(self.scale, self.precision);
        }
        self
    }

    /// Set the scale, clamped into `[0, precision]` and at most 26; ignored
    /// for non-decimal kinds
    pub fn with_scale(mut self, scale: i32) -> Self {
        if self.kind == DataTypeKind::Decimal {
            self.scale = clamp_scale(scale, self.precision);
        }
        self
    }
}

/// Registry of datatypes keyed by local name
///
/// Always contains the built-in XSD primitives. User simple types loaded
/// from an XSD document are added alongside them.
#[derive(Clone, Debug)]
pub struct XsdDataTypeCollection {
    types: BTreeMap<String, XsdDataType>,
}

impl XsdDataTypeCollection {
    /// Create a registry containing the built-in XSD primitives
    pub fn new() -> Self {
        let builtins = [
            (xsd_names::INTEGER, xsd::INTEGER, DataTypeKind::Int32),
            (xsd_names::HEX_BINARY, xsd::HEX_BINARY, DataTypeKind::Binary),
            (xsd_names::BOOLEAN, xsd::BOOLEAN, DataTypeKind::Boolean),
            (xsd_names::BYTE, xsd::BYTE, DataTypeKind::Byte),
            (xsd_names::DATE_TIME, xsd::DATE_TIME, DataTypeKind::DateTime),
            (xsd_names::DECIMAL, xsd::DECIMAL, DataTypeKind::Decimal),
            (xsd_names::DOUBLE, xsd::DOUBLE, DataTypeKind::Double),
            (xsd_names::SHORT, xsd::SHORT, DataTypeKind::Int16),
            (xsd_names::LONG, xsd::LONG, DataTypeKind::Int64),
            (xsd_names::STRING, xsd::STRING, DataTypeKind::String),
        ];

        let mut types = BTreeMap::new();
        for (name, uri, kind) in builtins {
            types.insert(name.to_string(), XsdDataType::new(name, uri, kind));
        }
        Self { types }
    }

    /// Look up a datatype by local name
    pub fn get(&self, name: &str) -> Option<&XsdDataType> {
        self.types.get(name)
    }

    /// Check whether a datatype with the given local name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Number of registered datatypes
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty (never true in practice)
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over registered datatypes in name order
    pub fn iter(&self) -> impl Iterator<Item = &XsdDataType> {
        self.types.values()
    }

    /// Load user simple types from an XSD restriction document
    ///
    /// The document may only contain top-level `xs:simpleType` elements,
    /// each restricting a built-in base type with the facets `xs:maxLength`,
    /// `xs:totalDigits`, and `xs:fractionDigits`. Anything else is a hard
    /// validation error regardless of execution mode.
    ///
    /// Returns the number of types added.
    pub fn load_simple_types(&mut self, xml: &str) -> Result<usize> {
        let parsed = parse_simple_types(xml)?;
        let count = parsed.len();
        for datatype in parsed {
            self.types.insert(datatype.name.clone(), datatype);
        }
        Ok(count)
    }
}

impl Default for XsdDataTypeCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// A simple type being assembled while walking the XSD document
struct PendingSimpleType {
    name: String,
    base: Option<DataTypeKind>,
    max_length: i64,
    precision: Option<i32>,
    scale: Option<i32>,
}

/// Parse the top-level `xs:simpleType` elements of an XSD document
fn parse_simple_types(xml: &str) -> Result<Vec<XsdDataType>> {
    let mut reader = Reader::from_str(xml);
    let builtins = XsdDataTypeCollection::new();

    let mut target_ns: Option<String> = None;
    let mut stack: Vec<String> = Vec::new();
    let mut pending: Option<PendingSimpleType> = None;
    let mut parsed = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let local = element_local_name(e);
                handle_element(
                    e,
                    &local,
                    &stack,
                    &builtins,
                    &mut target_ns,
                    &mut pending,
                )?;
                stack.push(local);
            }
            Ok(Event::Empty(ref e)) => {
                let local = element_local_name(e);
                handle_element(
                    e,
                    &local,
                    &stack,
                    &builtins,
                    &mut target_ns,
                    &mut pending,
                )?;
            }
            Ok(Event::End(_)) => {
                let closed = stack.pop();
                if closed.as_deref() == Some("simpleType") {
                    if let Some(st) = pending.take() {
                        parsed.push(finalize_simple_type(st, target_ns.as_deref())?);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SchemaError::Xml(e)),
            _ => {}
        }
    }

    Ok(parsed)
}

/// Dispatch one opening (or self-closing) element against the parse state
fn handle_element(
    e: &BytesStart,
    local: &str,
    stack: &[String],
    builtins: &XsdDataTypeCollection,
    target_ns: &mut Option<String>,
    pending: &mut Option<PendingSimpleType>,
) -> Result<()> {
    match stack.len() {
        // Document root
        0 => {
            if local == "schema" {
                *target_ns = find_attr(e, "targetNamespace");
            } else {
                return Err(SchemaError::UnsupportedXsdTopLevelItem {
                    item: local.to_string(),
                });
            }
        }
        // Direct child of xs:schema
        1 => {
            if local == "simpleType" {
                let name = find_attr(e, "name").unwrap_or_default();
                *pending = Some(PendingSimpleType {
                    name,
                    base: None,
                    max_length: 0,
                    precision: None,
                    scale: None,
                });
            } else {
                return Err(SchemaError::UnsupportedXsdTopLevelItem {
                    item: local.to_string(),
                });
            }
        }
        // Inside xs:simpleType: only the restriction matters, annotations pass through
        2 => {
            if local == "restriction" {
                if let Some(st) = pending.as_mut() {
                    let base_name = find_attr(e, "base").unwrap_or_default();
                    let base_local = base_name.rsplit(':').next().unwrap_or(&base_name);
                    match builtins.get(base_local) {
                        Some(base) => st.base = Some(base.kind),
                        None => {
                            return Err(SchemaError::UnknownXsdBaseType {
                                type_name: st.name.clone(),
                                base: base_name,
                            })
                        }
                    }
                }
            }
        }
        // Inside xs:restriction: facets
        3 if stack.last().map(String::as_str) == Some("restriction") => {
            if let Some(st) = pending.as_mut() {
                let value = find_attr(e, "value").unwrap_or_default();
                match local {
                    "maxLength" => st.max_length = parse_facet_value(local, &st.name, &value)?,
                    "totalDigits" => {
                        st.precision = Some(parse_facet_value(local, &st.name, &value)? as i32)
                    }
                    "fractionDigits" => {
                        st.scale = Some(parse_facet_value(local, &st.name, &value)? as i32)
                    }
                    other => {
                        return Err(SchemaError::UnsupportedXsdFacet {
                            facet: other.to_string(),
                            type_name: st.name.clone(),
                        })
                    }
                }
            }
        }
        _ => {}
    }
    Ok(())
}

/// Build the registered datatype from a fully-walked simple type
fn finalize_simple_type(
    st: PendingSimpleType,
    target_ns: Option<&str>,
) -> Result<XsdDataType> {
    let base = st.base.ok_or_else(|| SchemaError::UnknownXsdBaseType {
        type_name: st.name.clone(),
        base: String::new(),
    })?;

    let name_uri = match target_ns {
        Some(ns) => format!("{}#{}", ns.trim_end_matches('#'), st.name),
        None => st.name.clone(),
    };

    let mut datatype =
        XsdDataType::new(st.name, name_uri, base).with_max_length(st.max_length);
    if let Some(precision) = st.precision {
        datatype = datatype.with_precision(precision);
    }
    if let Some(scale) = st.scale {
        datatype = datatype.with_scale(scale);
    }
    Ok(datatype)
}

/// Parse a facet value attribute as a non-negative integer
fn parse_facet_value(facet: &str, type_name: &str, value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|_| SchemaError::UnsupportedXsdFacet {
            facet: format!("{}=\"{}\"", facet, value),
            type_name: type_name.to_string(),
        })
}

/// Local name of an element (qualified name with any prefix stripped)
fn element_local_name(e: &BytesStart) -> String {
    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
    match name.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => name,
    }
}

/// Find an attribute value by local name, ignoring any namespace prefix
fn find_attr(e: &BytesStart, attr_local: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.0).to_string();
        let local = key.rsplit(':').next().unwrap_or(&key);
        if local == attr_local {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}

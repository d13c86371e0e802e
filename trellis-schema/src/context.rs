//! Shared execution state for one interpretation run

use serde::{Deserialize, Serialize};
use trellis_graph_ir::Graph;

use crate::datatype::XsdDataTypeCollection;
use crate::model::ResourceType;

/// Validation policy for an interpretation run
///
/// Strict turns every validation failure into a hard error; Loose treats
/// the same conditions as "drop the offending triples and continue". A few
/// rules are hard errors in both modes (documented per pass).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Strict,
    Loose,
}

impl ExecutionMode {
    /// Whether this is the fail-fast mode
    pub fn is_strict(&self) -> bool {
        matches!(self, ExecutionMode::Strict)
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::Strict => write!(f, "strict"),
            ExecutionMode::Loose => write!(f, "loose"),
        }
    }
}

impl std::str::FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(ExecutionMode::Strict),
            "loose" => Ok(ExecutionMode::Loose),
            other => Err(format!("unknown execution mode: {}", other)),
        }
    }
}

/// Mutable state threaded through every interpretation pass
///
/// One context per run. Created by the driving collaborator immediately
/// before the pipeline and discarded after. The graph is replaceable: the
/// hygiene pass swaps it for its deduplicated form.
#[derive(Clone, Debug)]
pub struct Context {
    /// The graph being processed; identity may change across passes
    pub graph: Graph,
    /// Validation policy
    pub mode: ExecutionMode,
    /// Datatype registry deciding scalar-vs-navigation routing
    pub datatypes: XsdDataTypeCollection,
    /// Root of the generated type hierarchy; lives outside the module
    pub base_resource_type: ResourceType,
}

impl Context {
    /// Create the context for one run
    pub fn new(
        graph: Graph,
        mode: ExecutionMode,
        datatypes: XsdDataTypeCollection,
        base_resource_type: ResourceType,
    ) -> Self {
        Self {
            graph,
            mode,
            datatypes,
            base_resource_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_default_is_strict() {
        assert_eq!(ExecutionMode::default(), ExecutionMode::Strict);
        assert!(ExecutionMode::Strict.is_strict());
        assert!(!ExecutionMode::Loose.is_strict());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("strict".parse::<ExecutionMode>().unwrap(), ExecutionMode::Strict);
        assert_eq!("Loose".parse::<ExecutionMode>().unwrap(), ExecutionMode::Loose);
        assert!("lenient".parse::<ExecutionMode>().is_err());
    }

    #[test]
    fn test_mode_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ExecutionMode::Loose).unwrap(), "\"loose\"");
        let parsed: ExecutionMode = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(parsed, ExecutionMode::Strict);
    }
}

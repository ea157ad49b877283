//! Node identity within the HA pair.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which member of the HA pair this host is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    /// Node "A"
    #[serde(rename = "A", alias = "a")]
    Primary,
    /// Node "B"
    #[serde(rename = "B", alias = "b")]
    Secondary,
}

impl NodeRole {
    /// Single-letter node identifier used by the HA tooling
    pub fn letter(&self) -> char {
        match self {
            NodeRole::Primary => 'A',
            NodeRole::Secondary => 'B',
        }
    }

    /// The other member of the pair
    pub fn peer(&self) -> NodeRole {
        match self {
            NodeRole::Primary => NodeRole::Secondary,
            NodeRole::Secondary => NodeRole::Primary,
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl std::str::FromStr for NodeRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" | "PRIMARY" => Ok(NodeRole::Primary),
            "B" | "SECONDARY" => Ok(NodeRole::Secondary),
            _ => Err(format!(
                "Unknown node '{}'. Valid options: A (primary), B (secondary)",
                s
            )),
        }
    }
}

/// Resolves the role of the node the check is running on
pub trait NodeRoleResolver: Send + Sync {
    fn current_node_role(&self) -> NodeRole;
}

/// Node role fixed at construction (from configuration or the command line)
#[derive(Debug, Clone, Copy)]
pub struct StaticNodeRole(pub NodeRole);

impl NodeRoleResolver for StaticNodeRole {
    fn current_node_role(&self) -> NodeRole {
        self.0
    }
}

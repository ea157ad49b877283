//! Critical interface records.

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use crate::node::NodeRole;

/// An interface whose CARP state matters for failover.
///
/// Both nodes share the same record, so the static addresses are stored per
/// node (`ipv4_address` for node A, `ipv4_address_b` for node B) and resolved
/// to local/peer with the running node's role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalInterface {
    /// Interface name as known to the kernel (e.g. `igb0`)
    pub name: String,
    /// Only interfaces marked critical are checked
    #[serde(default = "default_critical")]
    pub critical: bool,
    /// VHID the CARP group on this interface must carry
    pub vhid: u32,
    /// Interface is addressed by DHCP (no static pair to probe)
    #[serde(default)]
    pub dhcp: bool,
    /// Static address on node A
    #[serde(default)]
    pub ipv4_address: Option<Ipv4Addr>,
    /// Static address on node B
    #[serde(default)]
    pub ipv4_address_b: Option<Ipv4Addr>,
}

fn default_critical() -> bool {
    true
}

impl CriticalInterface {
    /// Create a critical, statically addressed interface
    pub fn new(name: &str, vhid: u32) -> Self {
        Self {
            name: name.to_string(),
            critical: true,
            vhid,
            dhcp: false,
            ipv4_address: None,
            ipv4_address_b: None,
        }
    }

    /// Set the node A / node B static addresses
    pub fn with_addresses(mut self, node_a: Ipv4Addr, node_b: Ipv4Addr) -> Self {
        self.ipv4_address = Some(node_a);
        self.ipv4_address_b = Some(node_b);
        self
    }

    /// Mark the interface as DHCP addressed
    pub fn with_dhcp(mut self, dhcp: bool) -> Self {
        self.dhcp = dhcp;
        self
    }

    /// Set the critical flag
    pub fn with_critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }

    /// Static address configured for `node`
    pub fn address_of(&self, node: NodeRole) -> Option<Ipv4Addr> {
        match node {
            NodeRole::Primary => self.ipv4_address,
            NodeRole::Secondary => self.ipv4_address_b,
        }
    }

    /// The address this node owns on the interface
    pub fn local_address(&self, local: NodeRole) -> Option<Ipv4Addr> {
        self.address_of(local)
    }

    /// The address the other node owns on the interface
    pub fn peer_address(&self, local: NodeRole) -> Option<Ipv4Addr> {
        self.address_of(local.peer())
    }
}

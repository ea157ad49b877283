//! Host-provided collaborators: the interface registry and the license gate.

use crate::interface::CriticalInterface;

/// Source of the interfaces to verify
pub trait InterfaceRegistry: Send + Sync {
    /// Interfaces marked critical for failover, in host order
    fn critical_interfaces(&self) -> Vec<CriticalInterface>;
}

/// Reports whether the host is licensed for failover
pub trait LicenseGate: Send + Sync {
    fn is_failover_licensed(&self) -> bool;
}

/// Registry backed by a fixed list of interface records
#[derive(Debug, Clone, Default)]
pub struct ConfigRegistry {
    interfaces: Vec<CriticalInterface>,
}

impl ConfigRegistry {
    pub fn new(interfaces: Vec<CriticalInterface>) -> Self {
        Self { interfaces }
    }
}

impl InterfaceRegistry for ConfigRegistry {
    fn critical_interfaces(&self) -> Vec<CriticalInterface> {
        self.interfaces
            .iter()
            .filter(|iface| iface.critical)
            .cloned()
            .collect()
    }
}

/// License state fixed at construction
#[derive(Debug, Clone, Copy)]
pub struct StaticLicense(pub bool);

impl LicenseGate for StaticLicense {
    fn is_failover_licensed(&self) -> bool {
        self.0
    }
}

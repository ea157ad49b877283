//! The failover-critical interface check.
//!
//! One call to [`FailoverCheck::run_check`] walks every critical interface
//! in registry order and, for each one:
//! 1. Queries its status; a failed query reports the interface as not found
//!    and nothing else is checked for it
//! 2. Cross-checks the CARP role and VHID (or reports CARP as not configured)
//! 3. Pings the peer node across the interface unless it uses DHCP
//!
//! Findings never abort the check. The only early return is an unlicensed
//! host, which yields no alerts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::alert::{AlertEvent, Anomaly};
use crate::carp::CarpStatus;
use crate::config::{CommandsConfig, Config, TimeoutsConfig};
use crate::detect::detect;
use crate::exec::CommandRunner;
use crate::interface::CriticalInterface;
use crate::node::{NodeRole, NodeRoleResolver, StaticNodeRole};
use crate::probe::{ProbeError, Reachability, ReachabilityProber, StateProber};
use crate::registry::{ConfigRegistry, InterfaceRegistry, LicenseGate, StaticLicense};

/// Result of one check pass, as printed by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub node: NodeRole,
    pub checked_at: DateTime<Utc>,
    pub alerts: Vec<AlertEvent>,
}

/// Verifies the interfaces failover depends on
pub struct FailoverCheck {
    license: Arc<dyn LicenseGate>,
    registry: Arc<dyn InterfaceRegistry>,
    node: Arc<dyn NodeRoleResolver>,
    state: StateProber,
    reachability: ReachabilityProber,
}

impl FailoverCheck {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        license: Arc<dyn LicenseGate>,
        registry: Arc<dyn InterfaceRegistry>,
        node: Arc<dyn NodeRoleResolver>,
        commands: &CommandsConfig,
        timeouts: &TimeoutsConfig,
    ) -> Self {
        Self {
            license,
            registry,
            node,
            state: StateProber::new(runner.clone(), commands, timeouts),
            reachability: ReachabilityProber::new(runner, commands, timeouts),
        }
    }

    /// Build a check whose collaborators all come from `config`
    pub fn from_config(config: &Config, runner: Arc<dyn CommandRunner>) -> Self {
        Self::new(
            runner,
            Arc::new(StaticLicense(config.failover.licensed)),
            Arc::new(ConfigRegistry::new(config.interfaces.clone())),
            Arc::new(StaticNodeRole(config.failover.node)),
            &config.commands,
            &config.timeouts,
        )
    }

    /// Role of the node the check runs on
    pub fn node_role(&self) -> NodeRole {
        self.node.current_node_role()
    }

    /// Run one check pass and return every alert it raised, in order.
    pub async fn run_check(&self) -> Vec<AlertEvent> {
        self.check_as(self.node_role()).await
    }

    /// Run a check pass and wrap the alerts with when and where it ran.
    ///
    /// The node role is resolved once, so the report names the node whose
    /// probe direction was used.
    pub async fn run_report(&self) -> CheckReport {
        let node = self.node_role();
        let alerts = self.check_as(node).await;
        CheckReport {
            node,
            checked_at: Utc::now(),
            alerts,
        }
    }

    async fn check_as(&self, role: NodeRole) -> Vec<AlertEvent> {
        if !self.license.is_failover_licensed() {
            info!("Failover is not licensed, skipping critical interface check");
            return Vec::new();
        }

        let interfaces = self.registry.critical_interfaces();
        let mut alerts = Vec::new();

        for iface in &interfaces {
            for anomaly in self.check_interface(iface, role).await {
                warn!(interface = %iface.name, "{}", anomaly);
                alerts.push(AlertEvent::from(anomaly));
            }
        }

        info!(
            node = %role,
            interfaces = interfaces.len(),
            alerts = alerts.len(),
            "Critical interface check complete"
        );
        alerts
    }

    /// Query the CARP state of every critical interface without judging it
    pub async fn interface_states(
        &self,
    ) -> Vec<(CriticalInterface, Result<CarpStatus, ProbeError>)> {
        let mut states = Vec::new();
        for iface in self.registry.critical_interfaces() {
            let status = self.state.probe(&iface.name).await;
            states.push((iface, status));
        }
        states
    }

    async fn check_interface(&self, iface: &CriticalInterface, role: NodeRole) -> Vec<Anomaly> {
        debug!(interface = %iface.name, vhid = iface.vhid, "Checking interface");
        let mut anomalies = Vec::new();

        match self.state.probe(&iface.name).await {
            Err(e) => {
                log_probe_error(&iface.name, &e, "Interface status query failed");
                anomalies.push(Anomaly::InterfaceNotFound {
                    interface: iface.name.clone(),
                });
                return anomalies;
            }
            Ok(CarpStatus::NotConfigured) => {
                anomalies.push(Anomaly::CarpNotConfigured {
                    interface: iface.name.clone(),
                });
            }
            Ok(CarpStatus::Configured { role: carp, vhid }) => {
                anomalies.extend(detect(iface, &carp, vhid));
            }
        }

        match self.reachability.probe(iface, role).await {
            Ok(Reachability::Reachable) => {}
            Ok(Reachability::Skipped) => {
                debug!(interface = %iface.name, "DHCP interface, reachability not probed");
            }
            Err(e) => {
                log_probe_error(&iface.name, &e, "Reachability probe failed");
                anomalies.push(Anomaly::ReachabilityFailed {
                    interface: iface.name.clone(),
                });
            }
        }

        anomalies
    }
}

/// Command execution faults are worth a warning of their own; a plain
/// non-zero exit is already covered by the anomaly.
fn log_probe_error(interface: &str, error: &ProbeError, what: &str) {
    match error {
        ProbeError::Exec(_) => warn!(interface, error = %error, "{}", what),
        _ => debug!(interface, error = %error, "{}", what),
    }
}

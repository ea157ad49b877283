//! Anomalies found by the check and the alert events they become.

use serde::Serialize;
use std::fmt;

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Critical,
}

/// Alert category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertCategory {
    /// High availability
    Ha,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertCategory::Ha => write!(f, "HA"),
        }
    }
}

/// Something wrong with a critical interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// The interface status query failed
    InterfaceNotFound { interface: String },
    /// No CARP line on the interface
    CarpNotConfigured { interface: String },
    /// CARP role is neither MASTER nor BACKUP
    CarpInvalidState { interface: String },
    /// CARP runs with a different VHID than configured
    VhidMismatch {
        interface: String,
        observed: u32,
        expected: u32,
    },
    /// The peer node did not answer on this interface
    ReachabilityFailed { interface: String },
}

impl Anomaly {
    /// Interface the anomaly refers to
    pub fn interface(&self) -> &str {
        match self {
            Anomaly::InterfaceNotFound { interface }
            | Anomaly::CarpNotConfigured { interface }
            | Anomaly::CarpInvalidState { interface }
            | Anomaly::VhidMismatch { interface, .. }
            | Anomaly::ReachabilityFailed { interface } => interface,
        }
    }

    /// Short, stable headline for this kind of anomaly
    pub fn title(&self) -> &'static str {
        match self {
            Anomaly::InterfaceNotFound { .. } => {
                "Interface Is Critical for Failover but Was not Found In the System"
            }
            Anomaly::CarpNotConfigured { .. } => {
                "Interface Is Critical for Failover but CARP Is not Configured"
            }
            Anomaly::CarpInvalidState { .. } => {
                "Interface Is Critical for Failover but CARP Is not In a Valid State"
            }
            Anomaly::VhidMismatch { .. } => "Interface Is Configured With Mismatching VHID",
            Anomaly::ReachabilityFailed { .. } => {
                "Failed to Verify Interface by Contacting the Passive Node"
            }
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::InterfaceNotFound { interface } => write!(
                f,
                "Interface '{}' is critical for failover but was not found in the system.",
                interface
            ),
            Anomaly::CarpNotConfigured { interface } => write!(
                f,
                "Interface '{}' is critical for failover but CARP is not configured.",
                interface
            ),
            Anomaly::CarpInvalidState { interface } => write!(
                f,
                "Interface '{}' is critical for failover but CARP is not in a valid state.",
                interface
            ),
            Anomaly::VhidMismatch {
                interface,
                observed,
                expected,
            } => write!(
                f,
                "Interface '{}' is configured with VHID {} as opposed to {}.",
                interface, observed, expected
            ),
            Anomaly::ReachabilityFailed { interface } => write!(
                f,
                "Failed to verify interface '{}' by contacting the passive node.",
                interface
            ),
        }
    }
}

/// An anomaly materialized as a critical HA alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertEvent {
    pub level: AlertLevel,
    pub category: AlertCategory,
    pub title: &'static str,
    pub message: String,
    #[serde(flatten)]
    pub anomaly: Anomaly,
}

impl From<Anomaly> for AlertEvent {
    fn from(anomaly: Anomaly) -> Self {
        Self {
            level: AlertLevel::Critical,
            category: AlertCategory::Ha,
            title: anomaly.title(),
            message: anomaly.to_string(),
            anomaly,
        }
    }
}

impl fmt::Display for AlertEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.level, self.category, self.message)
    }
}

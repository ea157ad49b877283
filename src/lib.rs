//! carpcheck library
//!
//! Verify that the interfaces an HA pair needs for failover exist, run CARP
//! with the expected VHID, and can reach the peer node.

pub mod alert;
pub mod carp;
pub mod check;
pub mod config;
pub mod detect;
pub mod exec;
pub mod interface;
pub mod node;
pub mod probe;
pub mod registry;
pub mod validation;

pub use alert::{AlertEvent, Anomaly};
pub use check::{CheckReport, FailoverCheck};
pub use config::Config;
pub use exec::{CommandOutput, CommandRunner, ExecError, SystemRunner};
pub use interface::CriticalInterface;
pub use node::NodeRole;

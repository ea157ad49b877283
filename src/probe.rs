//! Live probes against the interface and the peer node.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::carp::{CarpStatus, parse_carp_status};
use crate::config::{CommandsConfig, TimeoutsConfig};
use crate::exec::{CommandRunner, ExecError};
use crate::interface::CriticalInterface;
use crate::node::NodeRole;

/// Extra wall-clock allowance on top of ping's own timeout
const PING_GRACE: Duration = Duration::from_secs(2);

/// Why a probe could not confirm the interface
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("{program} exited with status {code}: {stderr}")]
    ExitStatus {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("no static address configured for node {0}")]
    MissingAddress(NodeRole),

    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Queries `ifconfig` for an interface and parses its CARP state
pub struct StateProber {
    runner: Arc<dyn CommandRunner>,
    ifconfig: String,
    limit: Duration,
}

impl StateProber {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        commands: &CommandsConfig,
        timeouts: &TimeoutsConfig,
    ) -> Self {
        Self {
            runner,
            ifconfig: commands.ifconfig.clone(),
            limit: Duration::from_secs(timeouts.status_query_secs),
        }
    }

    /// Fetch the CARP status of `interface`.
    ///
    /// Any failure to get a zero exit status means the interface cannot be
    /// found on this host.
    pub async fn probe(&self, interface: &str) -> Result<CarpStatus, ProbeError> {
        let output = self
            .runner
            .run(&self.ifconfig, &[interface.to_string()], self.limit)
            .await?;

        if !output.is_success() {
            return Err(ProbeError::ExitStatus {
                program: self.ifconfig.clone(),
                code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        let status = parse_carp_status(&output.stdout);
        debug!(interface, %status, "Parsed CARP status");
        Ok(status)
    }
}

/// Outcome of a reachability probe that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    /// The peer answered
    Reachable,
    /// DHCP interface; there is no static pair to probe
    Skipped,
}

/// Pings the peer node's address on an interface from this node's address
pub struct ReachabilityProber {
    runner: Arc<dyn CommandRunner>,
    ping: String,
    ping_secs: u64,
}

impl ReachabilityProber {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        commands: &CommandsConfig,
        timeouts: &TimeoutsConfig,
    ) -> Self {
        Self {
            runner,
            ping: commands.ping.clone(),
            ping_secs: timeouts.ping_secs,
        }
    }

    /// Arguments for a single echo request from `source` to `target`
    pub fn ping_args(&self, source: Ipv4Addr, target: Ipv4Addr) -> Vec<String> {
        vec![
            "-c".to_string(),
            "1".to_string(),
            "-S".to_string(),
            source.to_string(),
            "-t".to_string(),
            self.ping_secs.to_string(),
            target.to_string(),
        ]
    }

    /// Send one echo request across the pair. No retries.
    pub async fn probe(
        &self,
        iface: &CriticalInterface,
        local: NodeRole,
    ) -> Result<Reachability, ProbeError> {
        if iface.dhcp {
            return Ok(Reachability::Skipped);
        }

        let source = iface
            .local_address(local)
            .ok_or(ProbeError::MissingAddress(local))?;
        let target = iface
            .peer_address(local)
            .ok_or(ProbeError::MissingAddress(local.peer()))?;

        let limit = Duration::from_secs(self.ping_secs) + PING_GRACE;
        let output = self
            .runner
            .run(&self.ping, &self.ping_args(source, target), limit)
            .await?;

        if !output.is_success() {
            return Err(ProbeError::ExitStatus {
                program: self.ping.clone(),
                code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        debug!(interface = %iface.name, %source, %target, "Peer reachable");
        Ok(Reachability::Reachable)
    }
}

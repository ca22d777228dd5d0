use crate::{mcconfig, DeviceRoster, Error, Hosts, Result, Session};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The local device is the session source and dials the remote host.
    Client,
    /// The local device is the session destination and listens.
    Server,
}

impl Role {
    /// Suffix used in result file names.
    pub fn suffix(&self) -> &'static str {
        match self {
            Role::Client => "cli",
            Role::Server => "ser",
        }
    }
}

/// One session as seen from a single host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LocalSession {
    /// Position of the session in the mcconfig.
    pub index: usize,
    pub session: Session,
    pub role: Role,
    pub device: String,
    pub gid_index: String,
    pub port: u16,
    /// Address to dial, only present for clients.
    pub remote: Option<String>,
}

/// Validated hosts, device roster and sessions of one run.
#[derive(Debug, Clone)]
pub struct SessionPlanner {
    hosts: Hosts,
    roster: DeviceRoster,
    sessions: Vec<Session>,
}

impl SessionPlanner {
    /// Checks `sessions` against the cluster shape described by `hosts` and `roster`.
    pub fn new(hosts: Hosts, roster: DeviceRoster, sessions: Vec<Session>) -> Result<Self> {
        let bound = roster.global_count(hosts.len());
        for (idx, s) in sessions.iter().enumerate() {
            for value in [s.src, s.dst] {
                if value >= bound {
                    return Err(Error::SessionRangeError {
                        session: idx,
                        msg: format!("invalid device {value}, expected index < {bound}"),
                    });
                }
            }
            if roster.node_of(s.src) == roster.node_of(s.dst) {
                return Err(Error::TopologyError(format!(
                    "invalid device pair ({},{}) in session {idx}: src and dst device must locate on different nodes",
                    s.src, s.dst
                )));
            }
        }
        Ok(Self {
            hosts,
            roster,
            sessions,
        })
    }

    /// Reads the hostfile and the mcconfig and validates every row.
    pub fn parse_inputs(
        config_path: impl AsRef<Path>,
        hostfile_path: impl AsRef<Path>,
        roster: DeviceRoster,
    ) -> Result<Self> {
        let hosts = Hosts::load(hostfile_path)?;
        let sessions = mcconfig::load_sessions(config_path, hosts.len(), &roster)?;
        tracing::info!(
            "loaded {} sessions over {} hosts with {} devices each",
            sessions.len(),
            hosts.len(),
            roster.len()
        );
        Ok(Self {
            hosts,
            roster,
            sessions,
        })
    }

    pub fn hosts(&self) -> &Hosts {
        &self.hosts
    }

    pub fn roster(&self) -> &DeviceRoster {
        &self.roster
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Port of the i-th session, the same on both ends.
    pub fn port(base_port: u16, index: usize) -> Result<u16> {
        u16::try_from(index)
            .ok()
            .and_then(|i| base_port.checked_add(i))
            .ok_or_else(|| Error::SessionRangeError {
                session: index,
                msg: format!("port {base_port} + {index} exceeds {}", u16::MAX),
            })
    }

    /// Sessions that involve `node`, in mcconfig order.
    pub fn plan_for_node(&self, node: usize, base_port: u16) -> Result<Vec<LocalSession>> {
        if node >= self.hosts.len() {
            return Err(Error::TopologyError(format!(
                "node {node} out of range, hostfile has {} hosts",
                self.hosts.len()
            )));
        }

        let mut plan = vec![];
        for (index, session) in self.sessions.iter().enumerate() {
            let src_node = self.roster.node_of(session.src);
            let dst_node = self.roster.node_of(session.dst);
            let (role, global, remote) = if src_node == node {
                (Role::Client, session.src, self.hosts.get(dst_node))
            } else if dst_node == node {
                (Role::Server, session.dst, None)
            } else {
                continue;
            };

            let (device, gid_index) = self.roster.local_device(global);
            let local = LocalSession {
                index,
                session: *session,
                role,
                device: device.to_string(),
                gid_index: gid_index.to_string(),
                port: Self::port(base_port, index)?,
                remote: remote.map(str::to_string),
            };
            tracing::debug!("node {}: {:?}", node, local);
            plan.push(local);
        }
        Ok(plan)
    }

    /// Sessions that involve the host with address `addr`.
    pub fn plan_for_host(&self, addr: &str, base_port: u16) -> Result<Vec<LocalSession>> {
        let node = self.hosts.node_of(addr)?;
        self.plan_for_node(node, base_port)
    }
}

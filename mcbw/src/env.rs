use crate::{Error, Result};
use std::path::PathBuf;

/// Overrides the automatically detected local address.
pub const HOST_IP: &str = "HOST_IP";
/// Overrides the `ib_send_bw` executable.
pub const IB_SEND_BW_EXEC: &str = "IB_SEND_BW_EXEC";
/// Number of local sessions, exported to the benchmark process.
pub const N_THREADS: &str = "N_THREADS";

pub const IB_SEND_BW: &str = "ib_send_bw";

/// Process environment as seen by the runners.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;

    /// Resolves an executable name or path like a shell would.
    fn which(&self, name: &str) -> Option<PathBuf>;

    /// Primary local IPv4 address.
    fn local_addr(&self) -> Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn which(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }

    fn local_addr(&self) -> Result<String> {
        local_ip_address::local_ip()
            .map(|ip| ip.to_string())
            .map_err(|e| {
                Error::ResolutionError(format!(
                    "detect local address failed: {e}. Consider setting {HOST_IP} environment variable"
                ))
            })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `HOST_IP` if set, otherwise the detected local address.
pub fn resolve_host_addr(env: &impl Environment) -> Result<String> {
    match non_empty(env.var(HOST_IP)) {
        Some(addr) => {
            tracing::debug!("host address {} from {}", addr, HOST_IP);
            Ok(addr.trim().to_string())
        }
        None => {
            let addr = env.local_addr()?;
            tracing::debug!("host address {} detected", addr);
            Ok(addr)
        }
    }
}

/// Locates `ib_send_bw`: `IB_SEND_BW_EXEC`, then the search path, then the
/// working directory.
pub fn resolve_exec(env: &impl Environment) -> Result<PathBuf> {
    if let Some(exec) = non_empty(env.var(IB_SEND_BW_EXEC)) {
        return env.which(&exec).ok_or_else(|| {
            Error::ResolutionError(format!("{IB_SEND_BW_EXEC} ({exec}) not valid"))
        });
    }
    env.which(IB_SEND_BW)
        .or_else(|| env.which(&format!("./{IB_SEND_BW}")))
        .ok_or_else(|| {
            Error::ResolutionError(format!(
                "{IB_SEND_BW} not found. Consider setting {IB_SEND_BW_EXEC} environment variable"
            ))
        })
}

use crate::{Error, Result};
use std::path::Path;

/// Ordered node addresses. The position of an address is its node id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hosts {
    addrs: Vec<String>,
}

impl Hosts {
    pub fn new(addrs: Vec<String>) -> Result<Self> {
        if addrs.is_empty() {
            return Err(Error::TopologyError("hostfile lists no hosts".into()));
        }
        for (idx, addr) in addrs.iter().enumerate() {
            if addrs[..idx].contains(addr) {
                tracing::warn!("host {} listed more than once, node {} is unused", addr, idx);
            }
        }
        Ok(Self { addrs })
    }

    pub fn parse(text: &str) -> Result<Self> {
        let addrs = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self::new(addrs)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&text)
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    pub fn get(&self, node: usize) -> Option<&str> {
        self.addrs.get(node).map(String::as_str)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.addrs.iter()
    }

    /// Node id of `addr`, the first match if it is listed twice.
    pub fn node_of(&self, addr: &str) -> Result<usize> {
        self.addrs.iter().position(|a| a == addr).ok_or_else(|| {
            Error::TopologyError(format!(
                "host {addr} not in provided hostfile. If the automatically detected address is incorrect, please set HOST_IP environment variable"
            ))
        })
    }
}

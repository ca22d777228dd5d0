use crate::{Error, Result};

/// Per-node RDMA devices, each paired with the GID index it binds to.
///
/// Every node of the cluster carries the same roster, so a global device
/// index `g` lives on node `g / len` as device `g % len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRoster {
    devices: Vec<String>,
    gid_indices: Vec<String>,
}

impl DeviceRoster {
    pub fn new(devices: Vec<String>, gid_indices: Vec<String>) -> Result<Self> {
        if devices.is_empty() {
            return Err(Error::RosterError("device list is empty".into()));
        }
        if devices.len() != gid_indices.len() {
            return Err(Error::RosterError(format!(
                "{} devices but {} gid indices: {:?} vs {:?}",
                devices.len(),
                gid_indices.len(),
                devices,
                gid_indices
            )));
        }
        if let Some(pos) = devices.iter().position(|d| d.is_empty()) {
            return Err(Error::RosterError(format!("device {pos} has an empty name")));
        }
        Ok(Self {
            devices,
            gid_indices,
        })
    }

    /// Builds a roster from the comma-separated command-line forms.
    pub fn parse(devices: &str, gid_indices: &str) -> Result<Self> {
        let split = |s: &str| s.split(',').map(|x| x.trim().to_string()).collect();
        Self::new(split(devices), split(gid_indices))
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn devices(&self) -> &[String] {
        &self.devices
    }

    /// Node owning a global device index.
    pub fn node_of(&self, global: usize) -> usize {
        global / self.devices.len()
    }

    /// Device name and GID index for a global device index.
    pub fn local_device(&self, global: usize) -> (&str, &str) {
        let local = global % self.devices.len();
        (&self.devices[local], &self.gid_indices[local])
    }

    /// Number of global indices spanned by `nnodes` nodes.
    pub fn global_count(&self, nnodes: usize) -> usize {
        nnodes * self.devices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster() {
        let roster = DeviceRoster::parse("d0,d1", "3,5").unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.global_count(3), 6);
        assert_eq!(roster.node_of(0), 0);
        assert_eq!(roster.node_of(1), 0);
        assert_eq!(roster.node_of(2), 1);
        assert_eq!(roster.node_of(5), 2);
        assert_eq!(roster.local_device(2), ("d0", "3"));
        assert_eq!(roster.local_device(5), ("d1", "5"));
    }

    #[test]
    fn test_roster_mismatch() {
        assert!(matches!(
            DeviceRoster::parse("d0,d1", "0"),
            Err(Error::RosterError(_))
        ));
        assert!(matches!(
            DeviceRoster::parse("d0,,d2", "0,0,0"),
            Err(Error::RosterError(_))
        ));
        assert!(matches!(
            DeviceRoster::new(vec![], vec![]),
            Err(Error::RosterError(_))
        ));
    }
}

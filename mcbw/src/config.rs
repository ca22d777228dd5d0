use serde::{Deserialize, Serialize};

/// Message size passed to `ib_send_bw -s`.
pub const PACKET_SIZE: usize = 8192;
/// Connection type passed to `ib_send_bw -c`.
pub const CONNECTION_TYPE: &str = "SRD";

pub const DEFAULT_BASE_PORT: u16 = 15000;
pub const DEFAULT_RX_DEPTH: u32 = 512;
pub const DEFAULT_TX_DEPTH: u32 = 128;
pub const DEFAULT_QP: u32 = 1;
pub const DEFAULT_ITERS: u64 = 20000;

/// Benchmark parameters shared by every session of a run.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct BenchConfig {
    /// Number of queue pairs per benchmark process.
    pub qp: u32,
    pub rx_depth: u32,
    pub tx_depth: u32,
    pub iters: u64,
    /// Run every session in both directions.
    pub bidirectional: bool,
    /// The i-th session listens on `base_port + i`.
    pub base_port: u16,
    /// Prefix of the JSON result files written by `ib_send_bw`.
    pub log_prefix: String,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            qp: DEFAULT_QP,
            rx_depth: DEFAULT_RX_DEPTH,
            tx_depth: DEFAULT_TX_DEPTH,
            iters: DEFAULT_ITERS,
            bidirectional: false,
            base_port: DEFAULT_BASE_PORT,
            log_prefix: "./bw_send".to_string(),
        }
    }
}

impl BenchConfig {
    pub fn has_default_depths(&self) -> bool {
        self.tx_depth == DEFAULT_TX_DEPTH && self.rx_depth == DEFAULT_RX_DEPTH
    }
}

/// Text of `config_path` before its first `.`.
pub fn config_stem(config_path: &str) -> &str {
    config_path.split('.').next().unwrap_or(config_path)
}

/// `./bw_send_<stem>`, used when no log prefix is given.
pub fn default_log_prefix(config_path: &str) -> String {
    format!("./bw_send_{}", config_stem(config_path))
}

/// `./bw_send_<stem>.args`, used when no args file path is given.
pub fn default_args_path(config_path: &str) -> String {
    format!("{}.args", default_log_prefix(config_path))
}

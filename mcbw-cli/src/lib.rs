use clap::Args;
use mcbw::{BenchConfig, DeviceRoster, Result};

/// Flags shared by the `ib_send_bw` planners.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// mcconfig file.
    #[arg(short, long)]
    pub config: String,

    /// IB devices to use, comma separated.
    #[arg(short, long, default_value = "rdmap16s27,rdmap32s27,rdmap144s27,rdmap160s27")]
    pub devices: String,

    /// GID indices to use, paired with the devices.
    #[arg(short = 'x', long, default_value = "0,0,0,0")]
    pub gid_indices: String,

    /// Base port for IB connections. The ith session's port will be base_port + i.
    #[arg(short = 'p', long, default_value_t = mcbw::DEFAULT_BASE_PORT)]
    pub base_port: u16,

    /// Benchmark bidirectional bandwidth. Each session will be run in both directions.
    #[arg(short, long, default_value_t = false)]
    pub bidirectional: bool,

    /// Size of receive queue.
    #[arg(short, long, default_value_t = mcbw::DEFAULT_RX_DEPTH)]
    pub rx_depth: u32,

    /// Size of send queue.
    #[arg(short, long, default_value_t = mcbw::DEFAULT_TX_DEPTH)]
    pub tx_depth: u32,

    /// Number of queue pairs running in the process.
    #[arg(short, long, default_value_t = mcbw::DEFAULT_QP)]
    pub qp: u32,

    /// Number of iterations to run.
    #[arg(short, long, default_value_t = mcbw::DEFAULT_ITERS)]
    pub iters: u64,

    /// Prefix of output json logs, defaults to bw_send_ + the name of mcconfig.
    #[arg(short, long)]
    pub log_prefix: Option<String>,

    /// Log every planned session.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn bench_config(&self) -> BenchConfig {
        BenchConfig {
            qp: self.qp,
            rx_depth: self.rx_depth,
            tx_depth: self.tx_depth,
            iters: self.iters,
            bidirectional: self.bidirectional,
            base_port: self.base_port,
            log_prefix: self
                .log_prefix
                .clone()
                .unwrap_or_else(|| mcbw::default_log_prefix(&self.config)),
        }
    }

    pub fn roster(&self) -> Result<DeviceRoster> {
        DeviceRoster::parse(&self.devices, &self.gid_indices)
    }

    pub fn init_tracing(&self) {
        let level = if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .init();
    }
}

//! mcbw
//!
//! Plans multi-chassis `ib_send_bw` runs: reads a hostfile and an mcconfig
//! session list, assigns client and server roles per host, and renders the
//! argument vectors and result file names for the external benchmark.
pub mod args;
pub mod env;
pub mod runner;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod hostfile;
pub use hostfile::Hosts;

mod mcconfig;
pub use mcconfig::{load_sessions, parse_sessions, Session};

mod planner;
pub use planner::{LocalSession, Role, SessionPlanner};

mod roster;
pub use roster::DeviceRoster;

pub use env::{Environment, SystemEnvironment};
pub use runner::LocalRun;

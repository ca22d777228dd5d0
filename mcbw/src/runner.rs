use crate::{
    args, env, BenchConfig, DeviceRoster, Environment, Error, Hosts, LocalSession, Result, Role,
    SessionPlanner,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Sessions of one host, as dumped by `gen-send-bw-args --plan`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HostPlan {
    pub node: usize,
    pub addr: String,
    pub sessions: Vec<PlannedSession>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PlannedSession {
    #[serde(flatten)]
    pub local: LocalSession,
    pub out_json: String,
}

/// Plans every host of the hostfile, in hostfile order.
pub fn plan_all(planner: &SessionPlanner, config: &BenchConfig) -> Result<Vec<HostPlan>> {
    let mut plans = vec![];
    for (node, addr) in planner.hosts().iter().enumerate() {
        let sessions = planner
            .plan_for_node(node, config.base_port)?
            .into_iter()
            .map(|local| PlannedSession {
                out_json: args::out_json_name(config, local.index, &local.session, local.role),
                local,
            })
            .collect::<Vec<_>>();
        tracing::info!("host {} ({}): {} local sessions", node, addr, sessions.len());
        plans.push(HostPlan {
            node,
            addr: addr.clone(),
            sessions,
        });
    }
    Ok(plans)
}

/// [`plan_all`] as pretty-printed JSON.
pub fn plan_json(planner: &SessionPlanner, config: &BenchConfig) -> Result<String> {
    let plans = plan_all(planner, config)?;
    Ok(serde_json::to_string_pretty(&plans)?)
}

/// Tokens for every local session of every host, each process followed by an
/// empty token so a launcher can tell them apart.
pub fn generate_args(planner: &SessionPlanner, config: &BenchConfig) -> Result<Vec<String>> {
    let mut tokens = vec![];
    for plan in plan_all(planner, config)? {
        for planned in &plan.sessions {
            tokens.extend(args::build_argument_vector(&planned.local, config));
            tokens.push(String::new());
        }
    }
    Ok(tokens)
}

/// One token per line, with a trailing newline.
pub fn render_args_file(tokens: &[String]) -> String {
    let mut text = tokens.join("\n");
    text.push('\n');
    text
}

/// Writes the args file for the whole cluster. Nothing is written unless every
/// host plans successfully.
pub fn write_args_file(
    path: impl AsRef<Path>,
    planner: &SessionPlanner,
    config: &BenchConfig,
) -> Result<usize> {
    let path = path.as_ref();
    let tokens = generate_args(planner, config)?;
    std::fs::write(path, render_args_file(&tokens)).map_err(|e| Error::io(path, e))?;
    tracing::info!("wrote {} tokens to {}", tokens.len(), path.display());
    Ok(tokens.len())
}

/// A single `ib_send_bw` invocation covering all sessions of one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRun {
    pub exec: PathBuf,
    pub args: Vec<String>,
    /// Exported as `N_THREADS`.
    pub n_threads: usize,
}

impl LocalRun {
    pub fn prepare(
        sessions: &[LocalSession],
        config: &BenchConfig,
        env: &impl Environment,
    ) -> Result<Self> {
        let args = sessions
            .iter()
            .flat_map(|local| args::build_argument_vector(local, config))
            .collect();
        let exec = env::resolve_exec(env)?;
        Ok(Self {
            exec,
            args,
            n_threads: sessions.len(),
        })
    }

    /// Resolves this host's address and plans its sessions.
    pub fn for_current_host(
        planner: &SessionPlanner,
        config: &BenchConfig,
        env: &impl Environment,
    ) -> Result<Self> {
        let addr = env::resolve_host_addr(env)?;
        let sessions = planner.plan_for_host(&addr, config.base_port)?;
        tracing::info!("host {}: {} local sessions", addr, sessions.len());
        Self::prepare(&sessions, config, env)
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.exec);
        cmd.args(&self.args)
            .env(env::N_THREADS, self.n_threads.to_string());
        cmd
    }

    /// No session involves this host.
    pub fn is_idle(&self) -> bool {
        self.n_threads == 0
    }

    /// Spawns the benchmark and waits for it. An idle host spawns nothing,
    /// since `ib_send_bw` without arguments waits for a client forever.
    pub fn run(&self) -> Result<()> {
        if self.is_idle() {
            tracing::info!("no local sessions, skip {}", self.exec.display());
            return Ok(());
        }
        tracing::info!(
            "running {} with {}={}",
            self.exec.display(),
            env::N_THREADS,
            self.n_threads
        );
        let status = self
            .command()
            .status()
            .map_err(|e| Error::ExecError(format!("spawn {} failed: {e}", self.exec.display())))?;
        if !status.success() {
            return Err(Error::ExecError(format!(
                "{} exited with {status}",
                self.exec.display()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for LocalRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={} {}", env::N_THREADS, self.n_threads, self.exec.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Stands in for this host in a two-node point-to-point layout. It never
/// appears in generated tokens since a node only dials the other one.
pub const LOCAL_HOST: &str = "localhost";

/// Two-node planner for a point-to-point run. The client side is node 0 and
/// the server side is node 1. Returns the planner and the local node.
pub fn point_to_point(
    config_path: impl AsRef<Path>,
    remote: &str,
    role: Role,
    roster: DeviceRoster,
) -> Result<(SessionPlanner, usize)> {
    let (addrs, node) = match role {
        Role::Client => (vec![LOCAL_HOST.to_string(), remote.to_string()], 0),
        Role::Server => (vec![remote.to_string(), LOCAL_HOST.to_string()], 1),
    };
    let hosts = Hosts::new(addrs)?;
    let sessions = crate::load_sessions(config_path, hosts.len(), &roster)?;
    let planner = SessionPlanner::new(hosts, roster, sessions)?;
    Ok((planner, node))
}

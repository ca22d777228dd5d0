use clap::{Parser, ValueEnum};
use mcbw::{runner, LocalRun, Result, Role, SystemEnvironment};
use mcbw_cli::CommonArgs;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Side {
    /// This host is node 0.
    Client,
    /// This host is node 1.
    Server,
}

/// Run ib_send_bw tests between this host and one remote host.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Address of the other host.
    #[arg(short = 'R', long)]
    remote: String,

    /// Which node of the two-node mcconfig this host is.
    #[arg(long, value_enum)]
    role: Side,

    /// Print the command instead of running it.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.common.init_tracing();

    let config = args.common.bench_config();
    let role = match args.role {
        Side::Client => Role::Client,
        Side::Server => Role::Server,
    };
    let (planner, node) = runner::point_to_point(
        &args.common.config,
        &args.remote,
        role,
        args.common.roster()?,
    )?;
    let sessions = planner.plan_for_node(node, config.base_port)?;
    tracing::info!("{:?} side: {} local sessions", args.role, sessions.len());
    let run = LocalRun::prepare(&sessions, &config, &SystemEnvironment)?;

    if args.dry_run {
        if !run.is_idle() {
            println!("{run}");
        }
        Ok(())
    } else {
        run.run()
    }
}

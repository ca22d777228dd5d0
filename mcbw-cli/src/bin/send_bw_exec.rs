use clap::Parser;
use mcbw::{LocalRun, Result, SessionPlanner, SystemEnvironment};
use mcbw_cli::CommonArgs;

/// Execute the local share of ib_send_bw tests according to mcconfig.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Hostfile containing server ip addresses.
    #[arg(short = 'H', long)]
    hostfile: String,

    /// Address of this host in the hostfile, overrides HOST_IP and auto detection.
    #[arg(long)]
    host: Option<String>,

    /// Print the command instead of running it.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.common.init_tracing();

    let config = args.common.bench_config();
    let planner =
        SessionPlanner::parse_inputs(&args.common.config, &args.hostfile, args.common.roster()?)?;

    let env = SystemEnvironment;
    let run = match &args.host {
        Some(host) => {
            let sessions = planner.plan_for_host(host, config.base_port)?;
            LocalRun::prepare(&sessions, &config, &env)?
        }
        None => LocalRun::for_current_host(&planner, &config, &env)?,
    };

    if args.dry_run {
        if !run.is_idle() {
            println!("{run}");
        }
        Ok(())
    } else {
        run.run()
    }
}

use clap::Parser;
use mcbw::{runner, Result, SessionPlanner};
use mcbw_cli::CommonArgs;

/// Generate args for ib_send_bw tests according to mcconfig.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Hostfile containing server ip addresses.
    #[arg(short = 'H', long)]
    hostfile: String,

    /// File to store the generated args, defaults to bw_send_<the name of mcconfig>.args.
    #[arg(short, long)]
    output: Option<String>,

    /// Also print the per-host plan as JSON.
    #[arg(long, default_value_t = false)]
    plan: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.common.init_tracing();

    let config = args.common.bench_config();
    let planner =
        SessionPlanner::parse_inputs(&args.common.config, &args.hostfile, args.common.roster()?)?;

    if args.plan {
        println!("{}", runner::plan_json(&planner, &config)?);
    }

    let output = args
        .output
        .unwrap_or_else(|| mcbw::default_args_path(&args.common.config));
    runner::write_args_file(&output, &planner, &config)?;
    Ok(())
}

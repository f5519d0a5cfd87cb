use pagesim::config::Config;
use pagesim::error::{Error, Result};
use pagesim::sim;
use pagesim::trace;
use pagesim::trace::synthetic;
use pagesim::trace::synthetic::Workload;

fn main() -> Result<()> {
    let args = clap::command!()
        .name("pagesim")
        .about("Page replacement cache simulator")
        .arg(
            clap::Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file path")
                .default_value(""),
        )
        .arg(
            clap::Arg::new("trace")
                .short('t')
                .long("trace")
                .help("Trace file to replay, overrides the configured path"),
        )
        .arg(
            clap::Arg::new("synthetic")
                .long("synthetic")
                .value_parser(clap::value_parser!(usize))
                .help("Replay a generated workload of this many accesses instead of a trace file"),
        )
        .arg(
            clap::Arg::new("seed")
                .long("seed")
                .value_parser(clap::value_parser!(u64))
                .default_value("42")
                .help("Seed for the generated workload"),
        )
        .get_matches();

    let mut cfg = Config::new(args.get_one::<String>("config").unwrap().as_ref())?;
    if let Some(path) = args.get_one::<String>("trace") {
        cfg.trace = path.clone();
    }
    env_logger::Builder::new().parse_filters(&cfg.log_level).try_init()?;

    let trace = match args.get_one::<usize>("synthetic") {
        Some(&accesses) => {
            let seed = *args.get_one::<u64>("seed").unwrap();
            synthetic::generate(&Workload { accesses, seed, ..Workload::default() })
        }
        None => {
            if cfg.trace.is_empty() {
                return Err(Error::Value(
                    "no trace file configured, pass --trace or --synthetic".to_string(),
                ));
            }
            trace::load_trace_file(&cfg.trace)?
        }
    };

    for &policy in &cfg.policies {
        let sweep = sim::run_sweep(policy, &cfg.frame_sizes, &trace)?;
        print!("{}", sweep);
        println!("Elapsed time: {:.6} sec", sweep.elapsed.as_secs_f64());
        println!();
    }
    Ok(())
}

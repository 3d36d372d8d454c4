use std::process::ExitCode;

use dfa_workbench::prelude::*;

use owo_colors::OwoColorize;
use tracing::{debug, error, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{value_parser, Arg, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("dfa")
    .about("Generates the sliding window automaton and runs words through it")
    .subcommand_required(true)
    .arg(
        Arg::new("verbosity")
        .short('v')
        .long("verbosity")
        .num_args(0..=1)
        .require_equals(true)
        .value_parser(["info", "debug", "trace"])
        .default_missing_value("info")
    )
    .arg(
        Arg::new("alphabet")
        .long("alphabet")
        .help("the symbols of the alphabet, in exploration order")
        .default_value("ab")
    )
    .arg(
        Arg::new("window")
        .long("window")
        .help("number of symbols the automaton remembers")
        .value_parser(value_parser!(usize))
        .default_value("3")
    )
    .arg(
        Arg::new("state-limit")
        .long("state-limit")
        .help("abort generation once this many states exist")
        .value_parser(value_parser!(usize))
        .default_value("65536")
    )
    .subcommand(
        Command::new("describe")
        .about("prints the transition table of the generated automaton")
    )
    .subcommand(
        Command::new("simulate")
        .about("runs each given word through the automaton and prints the outcome")
        .arg(Arg::new("words").num_args(1..).required(true))
    )
    .subcommand(
        Command::new("reachable")
        .about("prints the shortest word leading to each state")
    )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn generate(matches: &ArgMatches) -> Result<AutomatonStore, AutomatonError> {
    let alphabet = Alphabet::from(
        matches
            .get_one::<String>("alphabet")
            .map(String::as_str)
            .unwrap_or("ab"),
    );
    let window = matches.get_one::<usize>("window").copied().unwrap_or(3);
    let mut builder = AutomatonBuilder::new(alphabet);
    if let Some(limit) = matches.get_one::<usize>("state-limit") {
        builder = builder.with_state_limit(*limit);
    }

    debug!("generating window automaton of length {window} over {:?}", builder.alphabet());
    let start = std::time::Instant::now();
    let store = presets::homogeneous_window_with(&builder, window)?;
    debug!(
        "generated {} states in {}µs",
        store.len(),
        start.elapsed().as_micros()
    );
    Ok(store)
}

fn execute(matches: &ArgMatches) -> Result<(), AutomatonError> {
    let store = generate(matches)?;

    match matches.subcommand() {
        Some(("describe", _)) => {
            println!("{}", store.describe());
        }
        Some(("simulate", sub_matches)) => {
            for word in sub_matches.get_many::<String>("words").into_iter().flatten() {
                let run = store.run(word.chars())?;
                let reached = store
                    .node(run.reached())
                    .map(|q| q.label().to_string())
                    .unwrap_or_default();
                let outcome = match run.outcome() {
                    SimulationResult::Accepted => run.outcome().green().to_string(),
                    SimulationResult::Rejected => run.outcome().red().to_string(),
                    SimulationResult::Error(_) => run.outcome().yellow().to_string(),
                };
                println!("{word:?}: {outcome} (in {} \"{reached}\")", run.reached());
            }
        }
        Some(("reachable", _)) => {
            for (word, q) in minimal_representatives(&store) {
                println!("{q}: {:?}", word.show());
            }
        }
        _ => unreachable!("a subcommand is required"),
    }
    Ok(())
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    match execute(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

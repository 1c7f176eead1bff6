use std::io::Read;

use automata_workbench::{parse::write, prelude::*};
use owo_colors::OwoColorize;
use thiserror::Error;
use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgAction, ArgMatches, Command};

#[derive(Debug, Error)]
enum CliError {
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

fn cli() -> clap::Command {
    let input = Arg::new("input")
        .help("file containing the automaton, stdin is read if absent")
        .value_name("FILE");

    Command::new("fawb")
        .about("Finite automata workbench")
        .subcommand_required(true)
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info")
                .global(true),
        )
        .subcommand(
            Command::new("show")
                .about("prints the transition table of an automaton")
                .arg(input.clone()),
        )
        .subcommand(
            Command::new("classify")
                .about("determines whether an automaton is a DFA or an NFA and explains why")
                .arg(input.clone()),
        )
        .subcommand(
            Command::new("accept")
                .about("runs words on an automaton, every character is one symbol")
                .arg(
                    Arg::new("word")
                        .short('w')
                        .long("word")
                        .action(ArgAction::Append)
                        .required(true),
                )
                .arg(input.clone()),
        )
        .subcommand(
            Command::new("complete")
                .about("adds a dead state so that every transition of a DFA is defined")
                .arg(input.clone()),
        )
        .subcommand(
            Command::new("determinize")
                .about("converts an NFA into an equivalent DFA")
                .arg(input.clone()),
        )
        .subcommand(
            Command::new("minimize")
                .about("minimizes a DFA and explains the refinement steps")
                .arg(
                    Arg::new("steps")
                        .short('s')
                        .long("steps")
                        .action(ArgAction::SetTrue)
                        .help("also print every refinement step"),
                )
                .arg(input),
        )
}

fn verbosity(matches: &ArgMatches) -> filter::LevelFilter {
    match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        _ => filter::LevelFilter::INFO,
    }
}

fn setup_logging(matches: &ArgMatches) {
    let level = verbosity(matches);

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn read_automaton(matches: &ArgMatches) -> Result<Automaton, CliError> {
    let text = match matches.get_one::<String>("input") {
        Some(path) => {
            debug!("reading automaton from {path}");
            std::fs::read_to_string(path)?
        }
        None => {
            debug!("reading automaton from stdin");
            let mut text = String::new();
            std::io::stdin().lock().read_to_string(&mut text)?;
            text
        }
    };
    let automaton = parse(&text)?;
    info!(
        "read {} with {} states and {} transitions",
        automaton.kind(),
        automaton.size(),
        automaton.transitions().len()
    );
    Ok(automaton)
}

fn print_analysis(automaton: &Automaton) {
    let analysis = analyze(automaton);
    println!("{}", automaton.kind().bold());
    for t in &analysis.epsilon_transitions {
        println!("  epsilon transition {t}");
    }
    for choice in &analysis.nondeterministic_transitions {
        println!(
            "  {} has {} targets on {}: {}",
            choice.from,
            choice.destinations.len(),
            choice.symbol,
            choice
                .destinations
                .iter()
                .map(|q| q.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    if automaton.is_dfa() {
        let missing = missing_transitions(automaton);
        if missing.is_empty() {
            println!("  complete");
        } else {
            for (q, a) in missing {
                println!("  no transition from {q} on {a}");
            }
        }
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    match matches.subcommand() {
        Some(("show", sub)) => {
            let automaton = read_automaton(sub)?;
            println!("{}", automaton.transition_table());
        }
        Some(("classify", sub)) => print_analysis(&read_automaton(sub)?),
        Some(("accept", sub)) => {
            let automaton = read_automaton(sub)?;
            for word in sub.get_many::<String>("word").into_iter().flatten() {
                let outcome = accept_str(&automaton, word);
                let verdict = if outcome.accepted {
                    "accepted".green().to_string()
                } else {
                    "rejected".red().to_string()
                };
                println!("{word:?} {verdict}: {}", outcome.path.join(" | "));
            }
        }
        Some(("complete", sub)) => print!("{}", write(&complete(&read_automaton(sub)?))),
        Some(("determinize", sub)) => {
            let construction = subset_construction(&read_automaton(sub)?);
            for (name, set) in &construction.labels {
                debug!("{name} = {{{}}}", canonical_key(set));
            }
            print!("{}", write(&construction.dfa));
        }
        Some(("minimize", sub)) => {
            let result = minimize(&read_automaton(sub)?);
            if result.is_degenerate() {
                error!("minimization requires a DFA, determinize the automaton first");
                return Ok(());
            }
            if sub.get_flag("steps") {
                println!("{}", result.steps_table());
            }
            println!("{}", result.classes_table());
            println!("{}", result.combined_table());
            print!("{}", write(result.minimized()));
        }
        _ => unreachable!(),
    }
    Ok(())
}

pub fn main() {
    let matches = cli().get_matches();

    setup_logging(&matches);

    if let Err(e) = run(&matches) {
        error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_defaults_to_info() {
        let matches = cli().try_get_matches_from(["fawb", "show"]).unwrap();
        assert_eq!(verbosity(&matches), filter::LevelFilter::INFO);

        let matches = cli().try_get_matches_from(["fawb", "-v", "show"]).unwrap();
        assert_eq!(verbosity(&matches), filter::LevelFilter::INFO);

        let matches = cli()
            .try_get_matches_from(["fawb", "--verbosity=trace", "show"])
            .unwrap();
        assert_eq!(verbosity(&matches), filter::LevelFilter::TRACE);
    }

    #[test]
    fn accept_requires_a_word() {
        assert!(cli().try_get_matches_from(["fawb", "accept"]).is_err());
        let matches = cli()
            .try_get_matches_from(["fawb", "accept", "-w", "ab", "-w", "b", "aut.txt"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_many::<String>("word").unwrap().count(), 2);
        assert_eq!(sub.get_one::<String>("input").unwrap(), "aut.txt");
    }
}

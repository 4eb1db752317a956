use std::path::Path;
use std::process;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};

use qmc::input;
use qmc::output::{self, ReportFormat};
use qmc::qm::Minimizer;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let matches = match build_command().try_get_matches() {
        Ok(matches) => matches,
        Err(e)
            if e.kind() == ErrorKind::DisplayHelp || e.kind() == ErrorKind::DisplayVersion =>
        {
            let _ = e.print();
            return;
        }
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn build_command() -> Command {
    Command::new("qmc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Quine-McCluskey prime implicant generator for single-output Boolean functions")
        .arg(
            Arg::new("input")
                .help("Truth-table input file (.txt, .md, .tsv, .csv)")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("Output file for the report; stdout when omitted")
                .index(2),
        )
        .arg(
            Arg::new("minterms")
                .short('m')
                .long("minterms")
                .help("ON-set minterm indices, comma-separated"),
        )
        .arg(
            Arg::new("dontcares")
                .short('d')
                .long("dontcares")
                .help("DC-set minterm indices, comma-separated")
                .requires("minterms"),
        )
        .arg(
            Arg::new("variables")
                .short('n')
                .long("variables")
                .help("Input variable count; inferred from the largest index when omitted")
                .value_parser(clap::value_parser!(usize))
                .requires("minterms"),
        )
        .arg(
            Arg::new("labels")
                .short('l')
                .long("labels")
                .help("Variable labels, comma-separated"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("Report format")
                .value_parser(["table", "json"])
                .default_value("table"),
        )
        .arg(
            Arg::new("yes")
                .short('y')
                .long("yes")
                .help("Overwrite the output file if it exists without prompting")
                .action(ArgAction::SetTrue),
        )
        .group(
            ArgGroup::new("source")
                .args(["input", "minterms"])
                .required(true),
        )
}

fn run(matches: &ArgMatches) -> Result<()> {
    let format = match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => ReportFormat::Json,
        _ => ReportFormat::Table,
    };

    // Settle the output location before any computation.
    let output_path = match matches.get_one::<String>("output") {
        Some(raw) => {
            match output::resolve_output_path(Path::new(raw), matches.get_flag("yes"))? {
                Some(path) => Some(path),
                // User answered `q` at the prompt.
                None => return Ok(()),
            }
        }
        None => None,
    };

    let table = match matches.get_one::<String>("input") {
        Some(path) => input::canonicalize_file(Path::new(path))?,
        None => {
            let minterms = matches
                .get_one::<String>("minterms")
                .expect("source group is required by clap");
            input::canonicalize_lists(
                minterms,
                matches.get_one::<String>("dontcares").map(String::as_str),
                matches.get_one::<usize>("variables").copied(),
            )?
        }
    };

    let mut minimizer = match matches.get_one::<String>("labels") {
        Some(labels) => {
            let names: Vec<String> = labels
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            Minimizer::with_variable_names(table.variables, names)?
        }
        None => Minimizer::new(table.variables),
    };
    minimizer.set_minterms(&table.on_set());
    minimizer.set_dont_cares(&table.dc_set());

    let result = minimizer.solve()?;
    let rendered = output::render_report(&result, format)?;

    match output_path {
        Some(path) => output::write_report(&path, &rendered)?,
        None => print!("{}", rendered),
    }

    Ok(())
}

use std::fs;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use anyhow::{Context, Error};
use clap::{values_t, App, AppSettings, Arg, ArgMatches};
use env_logger::{Builder, Env, Target};
use log::{error, info, Level};

use dpll::config::{SolverConfig, SolverConfigUpdate};
use dpll::lit::Lit;
use dpll::solver::Solver;

/// Exit codes of the SAT competition output format.
const EXIT_SAT: i32 = 10;
const EXIT_UNSAT: i32 = 20;
const EXIT_UNKNOWN: i32 = 0;
const EXIT_ERROR: i32 = 1;

/// Maximal number of literals on a single `v` line.
const LITS_PER_LINE: usize = 16;

fn main() {
    let exit_code = run().unwrap_or_else(|err| {
        error!("{:#}", err);
        EXIT_ERROR
    });
    std::process::exit(exit_code);
}

/// Log to stdout, every line formatted as a DIMACS comment.
fn setup_logging() {
    Builder::from_env(Env::new().filter_or("DPLL_LOG", "info"))
        .target(Target::Stdout)
        .format(|out, record| match record.level() {
            Level::Info => writeln!(out, "c {}", record.args()),
            level => writeln!(out, "c {}: {}", level, record.args()),
        })
        .init();
}

fn args<'a, 'b>() -> App<'a, 'b> {
    App::new("dpll")
        .version(env!("DPLL_VERSION"))
        .about("Decides satisfiability of DIMACS CNF formulas using DPLL search")
        .setting(AppSettings::DisableHelpSubcommand)
        .arg_from_usage("[INPUT] 'DIMACS CNF file to solve, read from stdin when missing'")
        .arg_from_usage("[config-file] --config=[FILE] 'TOML file with solver options'")
        .arg(
            Arg::from_usage("[config-option] -C --config-option")
                .value_name("OPTION>=<VALUE")
                .help("Set a single solver option, 'dpll -C help' lists them all")
                .multiple(true)
                .number_of_values(1),
        )
}

/// Options from the config file come first, `-C` options override them in order.
fn config_update(matches: &ArgMatches, options: &[String]) -> Result<SolverConfigUpdate, Error> {
    let mut update = SolverConfigUpdate::new();

    if let Some(path) = matches.value_of("config-file") {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file '{}'", path))?;
        update.merge(
            toml::from_str(&contents).with_context(|| format!("invalid config file '{}'", path))?,
        );
    }

    for option in options {
        update.merge(
            toml::from_str(option).with_context(|| format!("invalid config option '{}'", option))?,
        );
    }

    Ok(update)
}

fn read_input(solver: &mut Solver, path: Option<&str>) -> Result<(), Error> {
    match path {
        Some(path) => {
            info!("Reading '{}'", path);
            let file = fs::File::open(path).with_context(|| format!("cannot open '{}'", path))?;
            solver.add_dimacs_cnf(file)
        }
        None => {
            info!("Reading stdin");
            solver.add_dimacs_cnf(io::stdin().lock())
        }
    }
}

fn print_model(model: &[Lit]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for line in model.chunks(LITS_PER_LINE) {
        write!(out, "v")?;
        for lit in line {
            write!(out, " {}", lit)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "v 0")?;
    out.flush()
}

fn run() -> Result<i32, Error> {
    let matches = args().get_matches();
    let options = values_t!(matches, "config-option", String).unwrap_or_default();

    if options.iter().any(|option| option == "help") {
        print!("{}", SolverConfig::help());
        return Ok(0);
    }

    setup_logging();
    info!(
        "dpll {} ({} build, {})",
        env!("DPLL_VERSION"),
        env!("DPLL_PROFILE"),
        env!("DPLL_RUSTC_VERSION")
    );

    let mut solver = Solver::new();
    solver.config(&config_update(&matches, &options)?);
    read_input(&mut solver, matches.value_of("INPUT"))?;

    let start = Instant::now();
    let result = solver.solve();
    info!("Solved in {} ms", start.elapsed().as_millis());

    Ok(match result {
        Ok(true) => {
            println!("s SATISFIABLE");
            print_model(&solver.model().unwrap_or_default())?;
            EXIT_SAT
        }
        Ok(false) => {
            println!("s UNSATISFIABLE");
            EXIT_UNSAT
        }
        Err(err) => {
            error!("{}", err);
            println!("s UNKNOWN");
            EXIT_UNKNOWN
        }
    })
}

mod render;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use turing_engine::{
    analyze, loader::ProgramLoader, MachineDefinition, ProgramManager, Trace, TuringMachine,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  turing-cli --program programs/tally-marker.tm
  turing-cli --builtin \"Unary successor\" --json")]
struct Cli {
    /// The machine notation file (.tm) to execute
    #[clap(short, long, conflicts_with = "builtin")]
    program: Option<PathBuf>,

    /// The name of a built-in program to execute
    #[clap(short, long)]
    builtin: Option<String>,

    /// List the built-in programs and exit
    #[clap(short, long)]
    list: bool,

    /// Print the analysis of the machine instead of running it
    #[clap(short, long)]
    check: bool,

    /// Print the trace as JSON
    #[clap(short, long)]
    json: bool,

    /// Never highlight the cursor cell
    #[clap(long)]
    plain: bool,

    /// Increase log verbosity (-v, -vv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.list {
        for (index, name) in ProgramManager::list_program_names().iter().enumerate() {
            println!("{index}: {name}");
        }
        return Ok(());
    }

    let definition = load_definition(&cli)?;

    if cli.check {
        print_analysis(&definition);
        return Ok(());
    }

    let mut machine = TuringMachine::new(definition).context("Failed to build machine")?;
    let initial = machine.initial_configuration().clone();
    let steps = machine.run_until_halt().context("Machine failed")?;
    let trace = Trace::new(initial, steps);

    debug!(steps = trace.len(), "Rendering trace");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
    } else {
        let highlight = !cli.plain && atty::is(atty::Stream::Stdout);
        for configuration in trace.configurations() {
            println!("{} |-", render::configuration(configuration, highlight));
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_definition(cli: &Cli) -> Result<MachineDefinition> {
    match (&cli.program, &cli.builtin) {
        (Some(path), _) => ProgramLoader::load_program(path)
            .with_context(|| format!("Failed to load {}", path.display())),
        (None, Some(name)) => ProgramManager::get_program_by_name(name)
            .with_context(|| format!("Unknown built-in program {name}")),
        (None, None) => bail!("Either --program or --builtin is required"),
    }
}

fn print_analysis(definition: &MachineDefinition) {
    let analysis = analyze(definition);

    if analysis.is_clean() {
        println!("{}: no issues found", definition.name);
        return;
    }

    for (state, symbol) in &analysis.missing_rules {
        println!("missing rule: state {state}, symbol '{symbol}'");
    }
    for state in &analysis.unreachable_states {
        println!("unreachable state: {state}");
    }
    for symbol in &analysis.foreign_tape_symbols {
        println!("tape symbol outside the alphabet: '{symbol}'");
    }
}

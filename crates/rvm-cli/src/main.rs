//! RVM - CLI
//!
//! Command-line front end: run program files, check them, or run a bundled
//! sample against the console host table.

mod config;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use rvm_core::host::StdoutSink;
use rvm_core::{samples, Program, ProgramLoader, VirtualMachine, VmConfig};
use tracing_subscriber::EnvFilter;

use crate::config::RvmToml;

// Slots in the console host table: prompt and print
const HOST_COUNT: usize = samples::HOST_PRINT + 1;

#[derive(Parser)]
#[command(name = "rvm", version, about = "Register virtual machine")]
struct Cli {
    /// Log call/return and halt events
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log every dispatched instruction
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a JSON program file
    Run {
        /// Path to the program file
        #[arg()]
        file: PathBuf,

        /// TOML file with a [vm] section
        #[arg(long)]
        config: Option<PathBuf>,

        /// Stop after this many instructions
        #[arg(long)]
        max_steps: Option<u64>,

        /// Print the register file as JSON after the run
        #[arg(long)]
        dump_registers: bool,

        /// Refuse to start if the structural check reports anything
        #[arg(long)]
        strict: bool,
    },
    /// Report structural problems in a program file
    Check {
        /// Path to the program file
        #[arg()]
        file: PathBuf,

        /// TOML file with a [vm] section
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run a bundled sample program
    Demo {
        /// arithmetic, sign, fib-loop or fib-call
        #[arg()]
        name: String,
    },
}

fn init_logging(verbose: bool, trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else if verbose {
        EnvFilter::new("rvm_core=debug,rvm_host=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<VmConfig, String> {
    match path {
        Some(path) => Ok(RvmToml::load(path)?.vm),
        None => Ok(VmConfig::default()),
    }
}

fn execute(config: VmConfig, program: Program, dump_registers: bool) -> Result<(), String> {
    let mut vm = VirtualMachine::new(config, program, rvm_host::stdio_table(), StdoutSink);
    let result = vm.run();

    if dump_registers {
        let dump = serde_json::to_string_pretty(&vm.registers().snapshot())
            .map_err(|e| e.to_string())?;
        eprintln!("{}", dump);
    }

    let report = result.map_err(|e| e.to_string())?;
    tracing::debug!(halt = ?report.halt, steps = report.steps, "run finished");
    Ok(())
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Run {
            file,
            config,
            max_steps,
            dump_registers,
            strict,
        } => {
            let mut vm_config = load_config(config.as_deref())?;
            if let Some(steps) = max_steps {
                vm_config = vm_config.with_max_steps(steps);
            }

            let text = std::fs::read_to_string(&file)
                .map_err(|e| format!("cannot read {}: {}", file.display(), e))?;
            let program = if strict {
                ProgramLoader::parse_checked(&text, vm_config.register_count, HOST_COUNT)
            } else {
                ProgramLoader::parse(&text)
            }
            .map_err(|e| e.to_string())?;

            execute(vm_config, program, dump_registers)
        }
        Commands::Check { file, config } => {
            let vm_config = load_config(config.as_deref())?;
            let program = ProgramLoader::load(&file).map_err(|e| e.to_string())?;
            let diagnostics = program.check(vm_config.register_count, HOST_COUNT);
            if diagnostics.is_empty() {
                println!("{}: {} instructions, ok", file.display(), program.len());
                return Ok(());
            }
            for diagnostic in &diagnostics {
                println!("{}: {}", file.display(), diagnostic);
            }
            Err(format!("{} problem(s) found", diagnostics.len()))
        }
        Commands::Demo { name } => {
            let program = samples::by_name(&name).ok_or_else(|| {
                format!("unknown demo '{}' (expected one of: {})", name, samples::NAMES.join(", "))
            })?;
            execute(VmConfig::default(), program, false)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.trace);

    if let Err(message) = run(cli) {
        eprintln!("error: {}", message);
        process::exit(1);
    }
}

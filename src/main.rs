//! Enumerator CLI - Command-line interface
//!
//! Commands:
//!   run        - Count the arrangements described by a request file
//!   conditions - List the supported conditions
//!   schema     - Print JSON schema for a file format

mod cli;

use cli::{cmd_conditions, cmd_run, cmd_schema};
use enumerator::VERSION;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "conditions" => cmd_conditions(&args[2..]),
        "schema" => cmd_schema(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("enumerator {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Log to stderr, filtered by RUST_LOG (warnings only by default)
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!(
        r#"
Enumerator - count permutations and combinations under conditions

USAGE:
    enumerator <COMMAND> [OPTIONS]

COMMANDS:
    run <request.yaml|json>          Count the arrangements of one request
                                     (or a list of requests)
    conditions [--json]              List the supported conditions
    schema [config|request|result]   Print JSON schema for a file format
    version                          Print version

OPTIONS:
    --config, -c <file>              Engine configuration (YAML or JSON)
    --json                           JSON output format (run, conditions)

ENVIRONMENT:
    RUST_LOG                         Log filter, e.g. enumerator=debug

EXAMPLES:
    enumerator run anagrams.yaml
    enumerator run sums.json --config engine.yaml --json
    RUST_LOG=enumerator=debug enumerator run big.yaml
"#
    );
}

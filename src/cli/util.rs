//! CLI utility helpers

use std::path::PathBuf;

/// Value following `flag`, if present
pub fn parse_flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Parse --config argument
pub fn parse_config_arg(args: &[String]) -> Option<PathBuf> {
    parse_flag_value(args, "--config")
        .or_else(|| parse_flag_value(args, "-c"))
        .map(PathBuf::from)
}

/// First positional argument, skipping flags and their values
pub fn first_positional(args: &[String]) -> Option<&String> {
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
            continue;
        }
        if arg == "--config" || arg == "-c" {
            skip = true;
            continue;
        }
        if !arg.starts_with('-') {
            return Some(arg);
        }
    }
    None
}

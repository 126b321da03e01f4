//! The conditions command

use enumerator::{catalogue, Result};

pub fn cmd_conditions(args: &[String]) -> Result<()> {
    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string_pretty(catalogue())?);
        return Ok(());
    }

    let width = catalogue()
        .iter()
        .map(|info| info.condition.len())
        .max()
        .unwrap_or(0);
    for info in catalogue() {
        println!(
            "{:width$}  [{}] {}",
            info.condition,
            info.arg_type,
            info.description,
            width = width
        );
    }
    Ok(())
}

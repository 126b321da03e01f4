//! The schema command

use enumerator::{EngineConfig, EnumResult, Request, Result};

pub fn cmd_schema(args: &[String]) -> Result<()> {
    let schema_name = args.first().map(|s| s.as_str()).unwrap_or("list");

    match schema_name {
        "list" => {
            println!("Available schemas: config, request, result");
            Ok(())
        }
        "config" => print_schema::<EngineConfig>(),
        "request" => print_schema::<Request>(),
        "result" => print_schema::<EnumResult>(),
        _ => Err(format!("Unknown schema: {}", schema_name).into()),
    }
}

fn print_schema<T: schemars::JsonSchema>() -> Result<()> {
    let schema = schemars::schema_for!(T);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

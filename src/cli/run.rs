//! The run command

use super::util::{first_positional, parse_config_arg};
use enumerator::{EngineConfig, Enumerator, Request, Result};
use std::path::Path;

pub fn cmd_run(args: &[String]) -> Result<()> {
    let path = first_positional(args)
        .ok_or("Usage: enumerator run <request.yaml|json> [--config <file>] [--json]")?;
    let json_output = args.contains(&"--json".to_string());

    let config = match parse_config_arg(args) {
        Some(config_path) => EngineConfig::load(&config_path)?,
        None => EngineConfig::default(),
    };
    let mut session = Enumerator::new(config);

    // A file may hold one request or a list of them; ids run across the list
    let requests = load_requests(Path::new(path))?;
    let mut results = Vec::with_capacity(requests.len());
    for request in &requests {
        results.push(session.run(request)?);
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            println!("{}", result);
        }
    }
    Ok(())
}

fn load_requests(path: &Path) -> Result<Vec<Request>> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let value: serde_json::Value = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_norway::from_str(&content)?
    };
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}

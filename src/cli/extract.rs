//! Extract command implementation

use crate::cli::{output, ExtractArgs};
use crate::extract::{extract_entities, EntityList};
use std::io::Read;

/// Resolve the input text: positional argument, then `--file`, then stdin.
pub fn read_input(args: &ExtractArgs) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(ref text) = args.text {
        return Ok(text.clone());
    }
    if let Some(ref path) = args.file {
        return std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e).into());
    }
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

/// Handle `plancraft extract`, returning the rendered output.
pub fn handle_extract(args: &ExtractArgs) -> Result<String, Box<dyn std::error::Error>> {
    let text = read_input(args)?;
    let entities: EntityList = extract_entities(args.kind, &text);

    if args.json {
        Ok(output::format_entities_json(&entities)?)
    } else {
        Ok(output::format_entities_table(&entities))
    }
}

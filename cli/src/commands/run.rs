use anyhow::{Context, Result};
use lasr_contracts::ProgramKind;
use lasr_types::ComputeInputs;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read ComputeInputs from stdin")?;
        return Ok(raw);
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))
}

pub fn run(input_json: &Path, kind: ProgramKind, pretty: bool) -> Result<()> {
    let raw = read_input(input_json)?;
    let inputs = ComputeInputs::from_json(&raw)
        .with_context(|| format!("Invalid ComputeInputs in {}", input_json.display()))?;

    tracing::info!(program = %kind, "Executing call");
    let outputs = kind
        .start(&inputs)
        .with_context(|| format!("{} program rejected the call", kind))?;

    let rendered = if pretty {
        outputs.to_json_pretty()?
    } else {
        outputs.to_json()?
    };
    println!("{}", rendered);
    Ok(())
}

use anyhow::Result;
use colored::Colorize;
use lasr_contracts::ProgramKind;

pub fn list(kind: ProgramKind) -> Result<()> {
    println!("{} {}", "Methods of".bold(), kind.to_string().cyan());
    for method in kind.methods() {
        println!("  {} {}", "•".dimmed(), method);
    }
    Ok(())
}

//! List languages command implementation.

use anyhow::Result;
use tdd_gate::{FilePattern, GateConfig, LanguageSpec};

/// Runs the list-languages command, showing built-ins merged with any
/// `[[languages]]` from the resolved config.
pub fn run(config: &GateConfig) -> Result<()> {
    let registry = config.registry()?;

    println!("{:<12} {:<16} {:<26} Test dir", "Language", "Sources", "Tests");
    println!("{}", "-".repeat(80));
    for language in registry.iter() {
        println!("{}", row(language));
    }
    Ok(())
}

fn row(language: &LanguageSpec) -> String {
    format!(
        "{:<12} {:<16} {:<26} {}",
        language.id(),
        join(language.source_patterns()),
        join(language.test_patterns()),
        language.test_dir().unwrap_or("(co-located)")
    )
}

fn join(patterns: &[FilePattern]) -> String {
    patterns
        .iter()
        .map(FilePattern::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

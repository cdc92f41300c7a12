//! List rules command implementation.

use tdd_gate::rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<30} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<8} {:<30} {}",
            rule.code(),
            rule.as_str(),
            rule.description()
        );
    }

    println!("\nSeverity:");
    println!("  TDD001  warning, or error with --strict / [gate] strict = true");
    println!("  TDD002  error");
    println!("  TDD003  info (advisory, never blocks)");

    println!("\nExamples:");
    println!("  tdd-gate check write src/calc.py --strict");
    println!("  tdd-gate refactor src/calc.py --tests-run");
}

//! List-rules command implementation.

use pystyle_core::RuleCode;

/// Runs the list-rules command.
pub fn run() {
    println!("Rule set (fixed):\n");
    println!("{:<6} Message", "Code");
    println!("{}", "-".repeat(72));

    for code in RuleCode::ALL {
        println!("{:<6} {}", code.code(), code.template());
    }

    println!("\nAll rules always run; there are no severity levels or suppressions.");
}

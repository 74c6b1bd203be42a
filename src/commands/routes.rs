//! Route inspection command.
//!
//! Prints the intent dispatch table in evaluation order so the routing
//! behavior can be checked without starting a chat.

use crate::router::DISPATCH_TABLE;
use colored::Colorize;

/// Print the intent dispatch table in evaluation order
pub fn print_routes() {
    println!("{}", "Intent routes (first match wins):".bold());
    for (index, route) in DISPATCH_TABLE.iter().enumerate() {
        println!(
            "  {}. {:<20} keywords: {}",
            index + 1,
            route.name,
            route.keywords.join(", ")
        );
    }
    println!(
        "  {}. {:<20} hello/help/revenue/users/improve/analysis",
        DISPATCH_TABLE.len() + 1,
        "greetings"
    );
    println!(
        "  {}. {:<20} personalized time-of-day response",
        DISPATCH_TABLE.len() + 2,
        "fallback"
    );
    println!();
    println!("Notes:");
    println!("  - dashboard-analysis only matches when dashboard context is configured");
    println!("  - file-analysis also matches any message with staged attachments");
}

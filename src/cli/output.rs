//! Shared CLI output helpers.
//!
//! Records go to stdout so they can be piped; everything else goes to
//! stderr. Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Cyan: hints
//! - Dimmed: labels

use std::fmt::Display;

use console::style;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ sealed 3 values`
pub fn success(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✓").green(), msg);
    } else {
        eprintln!("✓ {}", msg);
    }
}

/// Print an error message (red).
///
/// Example: `✗ missing '=' at line: 1`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a hint message (cyan).
///
/// Example: `→ close the block with a trailing backtick`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a key-value pair to stdout (label dimmed, value bold).
///
/// Example: `  label:        team-a/db`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {:<13} {}", style(label).dim(), style(value).bold());
    } else {
        println!("  {:<13} {}", label, value);
    }
}

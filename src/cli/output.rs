//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::io::Write;

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print a confirmation line, uncoloured so piped output stays plain
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    let _ = write_success(&mut std::io::stdout().lock(), msg);
}

fn write_success(
    out: &mut impl Write,
    msg: &(impl std::fmt::Display + ?Sized),
) -> std::io::Result<()> {
    writeln!(out, "{}", msg)
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print a two-decimal average, or a notice when it is undefined
pub fn average(label: &str, value: Option<f64>) {
    match value {
        Some(avg) => println!("{}: {:.2}", label, avg),
        None => println!("No grades available yet"),
    }
}

/// Print plain output (no color, for reports and data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

use anyhow::{Result, Context};
use log::debug;
use std::io::{self, BufRead, Write};

use registration_form::form::PasswordStrengthFlags;

/// Read a line of input from the terminal
pub fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).context("Failed to read from stdin")?;

    // Trim the trailing newline only; inner and leading spaces are part of the value
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Read a password from the terminal without echoing it.
/// Falls back to plain stdin when there is no controlling terminal.
pub fn read_password(prompt: &str) -> Result<String> {
    match rpassword::prompt_password(prompt) {
        Ok(password) => Ok(password),
        Err(e) => {
            debug!("No terminal for hidden input, reading stdin: {}", e);
            read_password_from(&mut io::stdin().lock())
        }
    }
}

/// Read a password from any line source, e.g. piped input
pub fn read_password_from<R: BufRead>(reader: &mut R) -> Result<String> {
    rpassword::read_password_from_bufread(reader).context("Failed to read password")
}

pub fn print_header(title: &str) {
    println!("\n=== {} ===", title);
}

pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

pub fn print_error(message: &str) {
    println!("❌ {}", message);
}

pub fn print_info(message: &str) {
    println!("ℹ️  {}", message);
}

/// Print the password strength checklist
pub fn print_strength(flags: &PasswordStrengthFlags, min_length: usize) {
    for (requirement, met) in flags.checklist(min_length) {
        let mark = if met { "✓" } else { "✗" };
        println!("  {} {}", mark, requirement);
    }
}

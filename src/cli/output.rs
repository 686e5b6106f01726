//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
//! Status lines go to stderr so stdout carries only command results.

use std::io::{self, Write};

use colored::Colorize;
use serde_json::Value;

use crate::config::OutputFormat;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print a hint for the next step (dimmed) to stderr
pub fn hint(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}", msg.to_string().dimmed());
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Write a command result.
///
/// A bare string is written without quotes in both formats, so
/// `--select ^KeyId` composes with shell pipelines. `null` writes nothing.
pub fn emit(out: &mut dyn Write, value: &Value, format: OutputFormat) -> io::Result<()> {
    match (value, format) {
        (Value::Null, _) => Ok(()),
        (Value::String(s), _) => writeln!(out, "{s}"),
        (_, OutputFormat::Json) => {
            let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
            writeln!(out, "{text}")
        }
        (Value::Array(items), OutputFormat::Text) => {
            for item in items {
                writeln!(out, "{}", text_line(item))?;
            }
            Ok(())
        }
        (other, OutputFormat::Text) => writeln!(out, "{}", text_line(other)),
    }
}

fn text_line(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn render(value: Value, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        emit(&mut buf, &value, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[rstest]
    #[case(json!("1234abcd"), OutputFormat::Json, "1234abcd\n")]
    #[case(json!(null), OutputFormat::Json, "")]
    #[case(json!(true), OutputFormat::Json, "true\n")]
    #[case(json!(["a", "b"]), OutputFormat::Text, "a\nb\n")]
    #[case(json!([{"k": 1}]), OutputFormat::Text, "{\"k\":1}\n")]
    fn emit_renders_per_format(#[case] value: Value, #[case] format: OutputFormat, #[case] expected: &str) {
        assert_eq!(render(value, format), expected);
    }

    #[test]
    fn given_object_in_json_format_when_emitting_then_pretty_prints() {
        let text = render(json!({"KeyId": "k"}), OutputFormat::Json);
        assert_eq!(text, "{\n  \"KeyId\": \"k\"\n}\n");
    }
}

use colored::Colorize;
use serde_json::Value;
use shelf_api::StatusCode;

use crate::cli::OutputFormat;

/// Prints one operation outcome: status code, then the JSON body.
pub fn print_response(status: StatusCode, body: &Value, format: OutputFormat) {
    let code = status.as_u16().to_string();
    let code = if status.is_success() {
        code.green()
    } else {
        code.red()
    };
    match format {
        OutputFormat::Json => println!("{code} {body}"),
        OutputFormat::Pretty => {
            println!("{code}");
            println!(
                "{}",
                serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
            );
        }
    }
}

pub fn print_value(value: &Value, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{value}"),
        OutputFormat::Pretty => println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        ),
    }
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

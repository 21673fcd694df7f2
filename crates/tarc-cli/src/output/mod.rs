//! Output formatting module.

mod formatter;
mod human;
mod json;

pub use formatter::OutputFormatter;

use formatter::JsonOutput;
use human::HumanFormatter;
use json::JsonFormatter;

/// Creates an output formatter based on CLI flags
pub fn create_formatter(json: bool, verbose: bool, quiet: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter::new(verbose, quiet))
    }
}

/// Writes a failed operation as a JSON error document on stdout.
pub fn print_json_error(operation: &str, error: &anyhow::Error) {
    let _ = JsonFormatter::output(&JsonOutput::<()>::error(operation, format!("{error:#}")));
}

//! JSON report output.

use std::io;

use super::model::Report;

/// Print the report as pretty JSON to stdout.
pub fn print_json(report: &Report) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

use serde::Serialize;

use crate::cli::OutputFormat;

/// Print `value` as pretty JSON, or `text` for humans
pub fn output<T: Serialize>(output_format: &OutputFormat, text: &str, value: &T) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Text => {
            println!("{}", text);
        }
    }
    Ok(())
}

/// Render an empty base path visibly in text output
pub fn display_base(base_path: &str) -> &str {
    if base_path.is_empty() {
        "(none)"
    } else {
        base_path
    }
}

//! Rendering command output in the requested format.
//!
//! Every handler funnels through [`output`] so `--format` behaves the same
//! everywhere: `json` pretty-prints, `raw` emits one line for piping, and
//! `table` renders an aligned text table from serde_json's value model.

pub mod table;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use table::TableOptions;

/// Serialize `value` in the requested format and print it to stdout.
///
/// # Errors
///
/// Returns an error when the value cannot be serialized.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Serialize `value` in the requested format.
///
/// # Errors
///
/// Returns an error when the value cannot be serialized.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let value = serde_json::to_value(value)?;
            Ok(render_value(&value))
        }
    }
}

fn render_value(value: &Value) -> String {
    let options = TableOptions::from_ui();
    match value {
        Value::Array(items) => render_list(items, &options),
        Value::Object(map) => {
            let rows: Vec<Vec<String>> = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect();
            table::render_entity_table(&["field", "value"], &rows, &options)
        }
        other => table::render_entity_table(&["value"], &[vec![cell(other)]], &options),
    }
}

/// A list of objects becomes one table with the union of their keys as
/// columns; a list of scalars becomes a single-column table.
fn render_list(items: &[Value], options: &TableOptions) -> String {
    let mut headers: Vec<&str> = Vec::new();
    for item in items {
        if let Value::Object(map) = item {
            for key in map.keys() {
                if !headers.contains(&key.as_str()) {
                    headers.push(key);
                }
            }
        }
    }

    if headers.is_empty() {
        let rows: Vec<Vec<String>> = items.iter().map(|item| vec![cell(item)]).collect();
        return table::render_entity_table(&["value"], &rows, options);
    }

    headers.sort_unstable();
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| match item {
                    Value::Object(map) => map.get(*header).map_or_else(String::new, cell),
                    other => cell(other),
                })
                .collect()
        })
        .collect();
    table::render_entity_table(&headers, &rows, options)
}

/// Flatten one JSON value into a single table cell.
fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
        other => other.to_string(),
    }
}

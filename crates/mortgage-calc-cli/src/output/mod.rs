pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Field/value pairs for a result object. Nested objects become dotted keys;
/// arrays of objects (schedule rows) are left out for the caller to render.
pub(crate) fn flatten_fields(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut fields = Vec::new();
    collect(map, "", &mut fields);
    fields
}

/// Array-of-objects fields in a result, e.g. schedule `rows` and `yearly`.
pub(crate) fn row_arrays(map: &Map<String, Value>) -> Vec<(&str, &Vec<Value>)> {
    map.iter()
        .filter_map(|(key, val)| match val {
            Value::Array(items) if items.first().map_or(false, Value::is_object) => {
                Some((key.as_str(), items))
            }
            _ => None,
        })
        .collect()
}

fn collect(map: &Map<String, Value>, prefix: &str, out: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(inner) => collect(inner, &name, out),
            Value::Array(items) if items.first().map_or(false, Value::is_object) => {}
            _ => out.push((name, val.clone())),
        }
    }
}

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
///
/// `raw` is compact single-line JSON.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let prefs = ui::prefs();
            let layout = table::Layout {
                width: prefs.width,
                color: prefs.color,
            };
            Ok(render_table(&serde_json::to_value(value)?, layout))
        }
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Like [`output`], but `raw` prints `text` verbatim (generated code,
/// explanations) so it can be piped straight into a file.
pub fn output_with_text<T: Serialize>(
    value: &T,
    text: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if format == OutputFormat::Raw {
        println!("{text}");
        return Ok(());
    }
    output(value, format)
}

fn render_table(value: &Value, layout: table::Layout) -> String {
    match value {
        Value::Array(items) => render_rows(items, layout),
        Value::Object(map) => render_object(map, layout),
        scalar => cell(scalar),
    }
}

/// Scalar fields as a field/value table, then one table per list of records.
fn render_object(map: &Map<String, Value>, layout: table::Layout) -> String {
    let (lists, fields): (Vec<_>, Vec<_>) = map.iter().partition(|(_, v)| is_record_list(v));

    let mut sections = Vec::new();
    if !fields.is_empty() {
        let rows = fields
            .iter()
            .map(|(key, value)| vec![(*key).clone(), cell(value)])
            .collect::<Vec<_>>();
        sections.push(table::render(
            &["field".to_string(), "value".to_string()],
            &rows,
            layout,
        ));
    }
    for (key, value) in lists {
        if let Value::Array(items) = value {
            sections.push(format!("{key}:\n{}", render_rows(items, layout)));
        }
    }
    sections.join("\n\n")
}

fn render_rows(items: &[Value], layout: table::Layout) -> String {
    if items.is_empty() {
        return "(no rows)".to_string();
    }

    if !items.iter().all(Value::is_object) {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render(&["value".to_string()], &rows, layout);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|h| map.get(h).map_or_else(|| "-".to_string(), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::render(&headers, &rows, layout)
}

fn is_record_list(value: &Value) -> bool {
    matches!(value, Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object))
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(|v| !v.is_array() && !v.is_object()) => {
            items.iter().map(cell).collect::<Vec<_>>().join(", ")
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        tags: Vec<&'static str>,
    }

    #[test]
    fn json_render_is_pretty_and_valid() {
        let out = render(&Example { id: "snp-1", tags: vec!["dp"] }, OutputFormat::Json)
            .expect("json render should work");
        let parsed: Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "snp-1");
        assert!(out.contains('\n'));
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&Example { id: "snp-1", tags: vec!["dp"] }, OutputFormat::Raw)
            .expect("raw render should work");
        assert_eq!(out, r#"{"id":"snp-1","tags":["dp"]}"#);
    }

    #[test]
    fn object_renders_field_table_with_joined_lists() {
        let out = render_table(
            &json!({"id": "snp-1", "tags": ["graphs", "bfs"], "description": null}),
            table::Layout::default(),
        );
        let lines = out.lines().collect::<Vec<_>>();
        assert!(lines[0].starts_with("field"));
        assert!(out.contains("graphs, bfs"));
        assert!(lines.iter().any(|l| l.starts_with("description") && l.ends_with('-')));
    }

    #[test]
    fn page_renders_items_as_their_own_table() {
        let out = render_table(
            &json!({
                "page": 1,
                "total": 2,
                "items": [
                    {"id": "snp-1", "title": "Two Sum"},
                    {"id": "snp-2", "title": "BFS"}
                ]
            }),
            table::Layout::default(),
        );
        let (fields, items) = out.split_once("\n\nitems:\n").expect("items section");
        assert!(fields.contains("total"));
        assert!(!fields.contains("Two Sum"));
        assert!(items.lines().next().is_some_and(|h| h.contains("id") && h.contains("title")));
        assert_eq!(items.lines().count(), 4);
    }

    #[test]
    fn empty_list_says_so() {
        assert_eq!(render_table(&json!([]), table::Layout::default()), "(no rows)");
    }
}

//! CSV serialisation of flat JSON records.
//!
//! Used to download report snapshots. Snapshots are stored as `JSONB`,
//! which does not keep object key order, so the column order is captured
//! with [`columns_of`] before storing and passed back to [`to_csv_with_columns`].

use serde_json::Value;

/// Keys of the first record, in serialisation order.
pub fn columns_of(rows: &[Value]) -> Vec<String> {
    match rows.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

/// Serialise JSON objects to CSV using the first row's keys as columns.
/// Empty input yields `""`.
pub fn to_csv(rows: &[Value]) -> String {
    to_csv_with_columns(&columns_of(rows), rows)
}

/// Serialise JSON objects to CSV: a header line of `columns`, then one line
/// per row, joined with `\n`. No columns yields `""`.
///
/// Keys missing from a row produce empty cells; non-object rows produce a
/// line of empty cells.
pub fn to_csv_with_columns(columns: &[String], rows: &[Value]) -> String {
    if columns.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        columns
            .iter()
            .map(|h| csv_escape(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|h| {
                row.get(h.as_str())
                    .map(|v| csv_escape(&cell_text(v)))
                    .unwrap_or_default()
            })
            .collect();
        lines.push(cells.join(","));
    }

    lines.join("\n")
}

/// Download name for an exported report.
pub fn attachment_filename(name: &str) -> String {
    format!("{name}.csv")
}

/// Quote values containing a comma, quote or newline; double embedded quotes.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comma_values_are_quoted() {
        let csv = to_csv(&[json!({"a": "1,2", "b": "x"})]);
        assert_eq!(csv, "a,b\n\"1,2\",x");
    }

    #[test]
    fn explicit_columns_fix_the_order() {
        let columns = vec!["id".to_string(), "subject".to_string(), "grade".to_string()];
        // Key order as a JSONB round trip returns it.
        let rows = [json!({"grade": "A", "id": 1, "subject": "Math"})];
        assert_eq!(to_csv_with_columns(&columns, &rows), "id,subject,grade\n1,Math,A");
    }

    #[test]
    fn columns_follow_first_row() {
        let rows = [json!({"b": 1, "a": 2}), json!({"c": 3})];
        assert_eq!(columns_of(&rows), vec!["b", "a"]);
        assert!(columns_of(&[]).is_empty());
    }

    #[test]
    fn empty_input_is_empty_string() {
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn scalars_and_nulls() {
        let csv = to_csv(&[
            json!({"name": "Ada", "score": 91.5, "passed": true, "notes": null}),
            json!({"name": "Bo", "score": 40, "passed": false, "notes": "retake"}),
        ]);
        assert_eq!(
            csv,
            "name,score,passed,notes\nAda,91.5,true,\nBo,40,false,retake"
        );
    }

    #[test]
    fn quotes_are_doubled() {
        let csv = to_csv(&[json!({"q": "say \"hi\""})]);
        assert_eq!(csv, "q\n\"say \"\"hi\"\"\"");
    }

    #[test]
    fn nested_values_are_json_encoded() {
        let csv = to_csv(&[json!({"tags": ["a"]})]);
        assert_eq!(csv, "tags\n\"[\"\"a\"\"]\"");
    }

    #[test]
    fn missing_keys_are_blank() {
        let csv = to_csv(&[json!({"a": 1, "b": 2}), json!({"a": 3})]);
        assert_eq!(csv, "a,b\n1,2\n3,");
    }

    #[test]
    fn filename_gets_extension() {
        assert_eq!(attachment_filename("attendance-report"), "attendance-report.csv");
    }
}

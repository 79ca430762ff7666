//! Tool definitions and handlers, one module per entity family.

pub(crate) mod customers;
pub(crate) mod inquiries;
pub(crate) mod inventory;
pub(crate) mod invoices;
pub(crate) mod purchase_orders;
pub(crate) mod sales_orders;
pub(crate) mod shipments;

use serde_json::Value;
use std::collections::HashMap;

/// Read a string argument.
pub(crate) fn str_arg(args: &HashMap<String, Value>, key: &str) -> Option<String> {
    args.get(key).and_then(|v| v.as_str()).map(String::from)
}

/// Read an integer argument, accepting numbers or numeric strings.
pub(crate) fn int_arg(args: &HashMap<String, Value>, key: &str) -> Option<i64> {
    args.get(key).and_then(|v| {
        v.as_i64()
            .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
    })
}

/// Coerce a collection response into rows. Non-array payloads become empty.
pub(crate) fn rows_from(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        _ => Vec::new(),
    }
}

/// Standard result text for collection queries.
pub(crate) fn found_text(noun: &str, rows: &[Value]) -> String {
    let json = serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string());
    format!("Found {} {}(s).\n\n{}", rows.len(), noun, json)
}

/// Keep rows with a detail line matching the given inventory id, stripping
/// the `Details` array from the survivors so only headers are returned.
///
/// Detail `InventoryID` fields may be plain strings or `{"value": ...}`
/// wrappers; comparison is case-insensitive.
pub(crate) fn filter_by_inventory_line(rows: Vec<Value>, inventory_id: &str) -> Vec<Value> {
    let wanted = inventory_id.to_uppercase();

    rows.into_iter()
        .filter_map(|mut row| {
            let matched = row
                .get("Details")
                .and_then(|details| details.as_array())
                .map(|lines| lines.iter().any(|line| line_matches(line, &wanted)))
                .unwrap_or(false);

            if !matched {
                return None;
            }

            if let Some(header) = row.as_object_mut() {
                header.remove("Details");
            }
            Some(row)
        })
        .collect()
}

fn line_matches(line: &Value, wanted_upper: &str) -> bool {
    let id = match line.get("InventoryID") {
        Some(Value::Object(wrapped)) => wrapped.get("value").and_then(|v| v.as_str()),
        Some(Value::String(raw)) => Some(raw.as_str()),
        _ => None,
    };

    match id {
        Some(id) => id.to_uppercase() == wanted_upper,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_int_arg_accepts_numbers_and_numeric_strings() {
        let mut args = HashMap::new();
        args.insert("top".to_string(), json!(25));
        args.insert("skip".to_string(), json!("100"));
        args.insert("junk".to_string(), json!("abc"));

        assert_eq!(int_arg(&args, "top"), Some(25));
        assert_eq!(int_arg(&args, "skip"), Some(100));
        assert_eq!(int_arg(&args, "junk"), None);
        assert_eq!(int_arg(&args, "missing"), None);
    }

    #[test]
    fn test_rows_from_non_array() {
        assert!(rows_from(json!({"message": "unexpected"})).is_empty());
        assert_eq!(rows_from(json!([1, 2])).len(), 2);
    }

    #[test]
    fn test_found_text_shape() {
        let rows = vec![json!({"OrderNbr": "000001"})];
        let text = found_text("sales order", &rows);
        assert!(text.starts_with("Found 1 sales order(s).\n\n"));
        assert!(text.contains("000001"));
    }

    #[test]
    fn test_filter_matches_wrapped_values_case_insensitively() {
        let rows = vec![
            json!({"OrderNbr": "000001", "Details": [{"InventoryID": {"value": "WIDGET"}}]}),
            json!({"OrderNbr": "000002", "Details": [{"InventoryID": {"value": "GADGET"}}]}),
        ];

        let kept = filter_by_inventory_line(rows, "widget");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0]["OrderNbr"], "000001");
    }

    #[test]
    fn test_filter_matches_raw_string_values() {
        let rows = vec![json!({"OrderNbr": "000003", "Details": [{"InventoryID": "BOLT-10"}]})];
        assert_eq!(filter_by_inventory_line(rows, "bolt-10").len(), 1);
    }

    #[test]
    fn test_filter_drops_rows_without_matching_lines() {
        let rows = vec![
            json!({"OrderNbr": "000004"}),
            json!({"OrderNbr": "000005", "Details": "not an array"}),
            json!({"OrderNbr": "000006", "Details": [{"InventoryID": {"value": null}}]}),
        ];
        assert!(filter_by_inventory_line(rows, "WIDGET").is_empty());
    }

    #[test]
    fn test_filter_strips_details_from_survivors() {
        let rows = vec![json!({
            "OrderNbr": "000007",
            "Details": [{"InventoryID": {"value": "WIDGET"}}]
        })];

        let kept = filter_by_inventory_line(rows, "WIDGET");
        assert!(kept[0].get("Details").is_none());
        assert_eq!(kept[0]["OrderNbr"], "000007");
    }
}

//! Generic inquiry tools.

use crate::api::{AcumaticaClient, QueryParams};
use crate::mcp::protocol::{CallToolResult, SchemaBuilder, Tool};
use serde_json::Value;
use std::collections::HashMap;

use super::{found_text, int_arg, rows_from, str_arg};

pub(crate) fn tools() -> Vec<Tool> {
    vec![Tool {
        name: "query_generic_inquiry".to_string(),
        description: "Run a saved Acumatica generic inquiry by name and return its rows. Use \
                      this for data exposed through inquiry screens rather than entity \
                      endpoints."
            .to_string(),
        input_schema: SchemaBuilder::new()
            .required_string("name", "Generic inquiry name, e.g. 'SO-SalesOrder'")
            .string("filter", "OData $filter expression applied to the inquiry results")
            .string("orderby", "OData $orderby. Example: \"OrderDate desc\"")
            .integer("top", "Max records to return (default 50, max 500)")
            .integer("skip", "Records to skip for pagination")
            .build(),
    }]
}

pub(crate) async fn query_generic_inquiry(
    client: &AcumaticaClient,
    args: &HashMap<String, Value>,
) -> CallToolResult {
    let name = match str_arg(args, "name") {
        Some(value) => value,
        None => return CallToolResult::error("Missing required parameter: name".to_string()),
    };

    let params = QueryParams {
        filter: str_arg(args, "filter"),
        orderby: str_arg(args, "orderby"),
        top: int_arg(args, "top"),
        skip: int_arg(args, "skip"),
        ..Default::default()
    };

    match client.get_generic_inquiry(&name, &params).await {
        Ok(data) => CallToolResult::text(found_text("row", &rows_from(data))),
        Err(e) => CallToolResult::error(format!("Error running generic inquiry: {}", e)),
    }
}

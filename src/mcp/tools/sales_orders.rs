//! Sales order tools.

use crate::api::{AcumaticaClient, QueryParams};
use crate::mcp::protocol::{CallToolResult, SchemaBuilder, Tool};
use serde_json::Value;
use std::collections::HashMap;

use super::{filter_by_inventory_line, found_text, int_arg, rows_from, str_arg};

pub(crate) fn tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "query_sales_orders".to_string(),
            description: "Query Acumatica sales orders. Use this for lists, analytics, and \
                          summaries. Supports OData $filter and $orderby."
                .to_string(),
            input_schema: SchemaBuilder::new()
                .string(
                    "filter",
                    "OData $filter expression. Examples: \"Status eq 'Open'\", \
                     \"OrderDate gt '2025-01-01'\", \"CustomerID eq 'TUXTON'\"",
                )
                .string("orderby", "OData $orderby. Example: \"OrderDate desc\"")
                .string(
                    "inventoryID",
                    "Filter to orders that contain this inventory item in any line, \
                     e.g. \"WIDGET-001\"",
                )
                .integer("top", "Max records to return (default 50, max 500)")
                .integer("skip", "Records to skip for pagination")
                .build(),
        },
        Tool {
            name: "get_sales_order".to_string(),
            description: "Get a single Acumatica sales order with full line item detail. Use \
                          this when you need line-level data for a specific known order."
                .to_string(),
            input_schema: SchemaBuilder::new()
                .required_string("orderType", "Order type code, e.g. 'SO', 'QT', 'IN'")
                .required_string("orderNbr", "Order number, e.g. '000001'")
                .build(),
        },
    ]
}

pub(crate) async fn query_sales_orders(
    client: &AcumaticaClient,
    args: &HashMap<String, Value>,
) -> CallToolResult {
    let inventory_id = str_arg(args, "inventoryID");

    let params = QueryParams {
        filter: str_arg(args, "filter"),
        orderby: str_arg(args, "orderby"),
        expand: inventory_id.as_ref().map(|_| "Details".to_string()),
        top: int_arg(args, "top"),
        skip: int_arg(args, "skip"),
        ..Default::default()
    };

    match client.get_entity("SalesOrder", &params).await {
        Ok(data) => {
            let mut orders = rows_from(data);
            if let Some(ref inventory_id) = inventory_id {
                orders = filter_by_inventory_line(orders, inventory_id);
            }
            CallToolResult::text(found_text("sales order", &orders))
        }
        Err(e) => CallToolResult::error(format!("Error querying sales orders: {}", e)),
    }
}

pub(crate) async fn get_sales_order(
    client: &AcumaticaClient,
    args: &HashMap<String, Value>,
) -> CallToolResult {
    let order_type = match str_arg(args, "orderType") {
        Some(value) => value,
        None => return CallToolResult::error("Missing required parameter: orderType".to_string()),
    };
    let order_nbr = match str_arg(args, "orderNbr") {
        Some(value) => value,
        None => return CallToolResult::error("Missing required parameter: orderNbr".to_string()),
    };

    let params = QueryParams {
        expand: Some("Details".to_string()),
        ..Default::default()
    };

    match client
        .get_entity_by_key("SalesOrder", &[&order_type, &order_nbr], &params)
        .await
    {
        Ok(order) => {
            CallToolResult::text(serde_json::to_string_pretty(&order).unwrap_or_default())
        }
        Err(e) => CallToolResult::error(format!("Error fetching sales order: {}", e)),
    }
}

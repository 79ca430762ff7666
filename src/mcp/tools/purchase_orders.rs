//! Purchase order tools.

use crate::api::{AcumaticaClient, QueryParams};
use crate::mcp::protocol::{CallToolResult, SchemaBuilder, Tool};
use serde_json::Value;
use std::collections::HashMap;

use super::{found_text, int_arg, rows_from, str_arg};

const SELECT_FIELDS: &str =
    "OrderNbr,Type,Status,Date,VendorID,OrderTotal,LineTotal,TaxTotal,PromisedOn,Description";

pub(crate) fn tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "query_purchase_orders".to_string(),
            description: "List and filter Acumatica purchase orders. Use this for procurement \
                          analytics, finding open or pending POs, or summarizing spend by \
                          vendor."
                .to_string(),
            input_schema: SchemaBuilder::new()
                .string(
                    "filter",
                    "OData $filter expression. Examples: \"Status eq 'Open'\", \
                     \"VendorID eq 'VD001'\", \"Date gt '2025-01-01'\"",
                )
                .string("orderby", "OData $orderby. Example: \"Date desc\"")
                .integer("top", "Max records to return (default 50, max 500)")
                .integer("skip", "Records to skip for pagination")
                .build(),
        },
        Tool {
            name: "get_purchase_order".to_string(),
            description: "Get a single Acumatica purchase order with full line item detail."
                .to_string(),
            input_schema: SchemaBuilder::new()
                .required_string("orderType", "Order type, e.g. 'Normal', 'Drop Ship'")
                .required_string("orderNbr", "Order number, e.g. 'PO000001'")
                .build(),
        },
    ]
}

pub(crate) async fn query_purchase_orders(
    client: &AcumaticaClient,
    args: &HashMap<String, Value>,
) -> CallToolResult {
    let params = QueryParams {
        select: Some(SELECT_FIELDS.to_string()),
        filter: str_arg(args, "filter"),
        orderby: str_arg(args, "orderby"),
        top: int_arg(args, "top"),
        skip: int_arg(args, "skip"),
        ..Default::default()
    };

    match client.get_entity("PurchaseOrder", &params).await {
        Ok(data) => CallToolResult::text(found_text("purchase order", &rows_from(data))),
        Err(e) => CallToolResult::error(format!("Error querying purchase orders: {}", e)),
    }
}

pub(crate) async fn get_purchase_order(
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
        .get_entity_by_key("PurchaseOrder", &[&order_type, &order_nbr], &params)
        .await
    {
        Ok(order) => {
            CallToolResult::text(serde_json::to_string_pretty(&order).unwrap_or_default())
        }
        Err(e) => CallToolResult::error(format!("Error fetching purchase order: {}", e)),
    }
}

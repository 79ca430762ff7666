//! Stock item tools.

use crate::api::{AcumaticaClient, QueryParams};
use crate::mcp::protocol::{CallToolResult, SchemaBuilder, Tool};
use serde_json::Value;
use std::collections::HashMap;

use super::{found_text, int_arg, rows_from, str_arg};

const SELECT_FIELDS: &str = "InventoryID,Description,ItemStatus,ItemClass,ItemType,DefaultPrice,\
                             LastCost,BaseUOM,SalesUOM,DefaultWarehouseID";

pub(crate) fn tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "list_inventory_items".to_string(),
            description: "List Acumatica stock/inventory items. Supports OData filtering. Use \
                          this to explore inventory, find items by class or status, or get \
                          item lists."
                .to_string(),
            input_schema: SchemaBuilder::new()
                .string(
                    "filter",
                    "OData $filter expression. Examples: \"ItemStatus eq 'Active'\", \
                     \"ItemClass eq 'FINISHED'\"",
                )
                .integer("top", "Max records to return (default 50, max 500)")
                .integer("skip", "Records to skip for pagination")
                .build(),
        },
        Tool {
            name: "get_inventory_item".to_string(),
            description: "Get a specific Acumatica inventory item with warehouse stock \
                          quantities."
                .to_string(),
            input_schema: SchemaBuilder::new()
                .required_string("inventoryID", "Inventory item ID / item code")
                .build(),
        },
    ]
}

pub(crate) async fn list_inventory_items(
    client: &AcumaticaClient,
    args: &HashMap<String, Value>,
) -> CallToolResult {
    let params = QueryParams {
        select: Some(SELECT_FIELDS.to_string()),
        filter: str_arg(args, "filter"),
        top: int_arg(args, "top"),
        skip: int_arg(args, "skip"),
        ..Default::default()
    };

    match client.get_entity("StockItem", &params).await {
        Ok(data) => CallToolResult::text(found_text("inventory item", &rows_from(data))),
        Err(e) => CallToolResult::error(format!("Error querying inventory items: {}", e)),
    }
}

pub(crate) async fn get_inventory_item(
    client: &AcumaticaClient,
    args: &HashMap<String, Value>,
) -> CallToolResult {
    let inventory_id = match str_arg(args, "inventoryID") {
        Some(value) => value,
        None => {
            return CallToolResult::error("Missing required parameter: inventoryID".to_string())
        }
    };

    let params = QueryParams {
        expand: Some("WarehouseDetails".to_string()),
        ..Default::default()
    };

    match client
        .get_entity_by_key("StockItem", &[&inventory_id], &params)
        .await
    {
        Ok(item) => CallToolResult::text(serde_json::to_string_pretty(&item).unwrap_or_default()),
        Err(e) => CallToolResult::error(format!("Error fetching inventory item: {}", e)),
    }
}

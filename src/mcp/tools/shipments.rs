//! Shipment tools.

use crate::api::{AcumaticaClient, QueryParams};
use crate::mcp::protocol::{CallToolResult, SchemaBuilder, Tool};
use serde_json::Value;
use std::collections::HashMap;

use super::{found_text, int_arg, rows_from, str_arg};

const SELECT_FIELDS: &str = "ShipmentNbr,Type,Status,ShipmentDate,CustomerID,WarehouseID,\
                             Operation,ShippedQty,FreightPrice,ShipVia,Description";

pub(crate) fn tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "query_shipments".to_string(),
            description: "List and filter Acumatica shipments. Use this for shipment \
                          analytics, tracking open or completed shipments, or finding \
                          shipments by customer or warehouse."
                .to_string(),
            input_schema: SchemaBuilder::new()
                .string(
                    "filter",
                    "OData $filter expression. Examples: \"Status eq 'Open'\", \
                     \"CustomerID eq 'CUST001'\", \"ShipmentDate gt '2025-01-01'\"",
                )
                .string("orderby", "OData $orderby. Example: \"ShipmentDate desc\"")
                .integer("top", "Max records to return (default 50, max 500)")
                .integer("skip", "Records to skip for pagination")
                .build(),
        },
        Tool {
            name: "get_shipment".to_string(),
            description: "Get a single Acumatica shipment with full line item detail."
                .to_string(),
            input_schema: SchemaBuilder::new()
                .required_string("shipmentNbr", "Shipment number, e.g. '000001'")
                .build(),
        },
    ]
}

pub(crate) async fn query_shipments(
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

    match client.get_entity("Shipment", &params).await {
        Ok(data) => CallToolResult::text(found_text("shipment", &rows_from(data))),
        Err(e) => CallToolResult::error(format!("Error querying shipments: {}", e)),
    }
}

pub(crate) async fn get_shipment(
    client: &AcumaticaClient,
    args: &HashMap<String, Value>,
) -> CallToolResult {
    let shipment_nbr = match str_arg(args, "shipmentNbr") {
        Some(value) => value,
        None => {
            return CallToolResult::error("Missing required parameter: shipmentNbr".to_string())
        }
    };

    let params = QueryParams {
        expand: Some("Details".to_string()),
        ..Default::default()
    };

    match client
        .get_entity_by_key("Shipment", &[&shipment_nbr], &params)
        .await
    {
        Ok(shipment) => {
            CallToolResult::text(serde_json::to_string_pretty(&shipment).unwrap_or_default())
        }
        Err(e) => CallToolResult::error(format!("Error fetching shipment: {}", e)),
    }
}

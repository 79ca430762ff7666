//! Customer tools.

use crate::api::{AcumaticaClient, QueryParams};
use crate::mcp::protocol::{CallToolResult, SchemaBuilder, Tool};
use serde_json::Value;
use std::collections::HashMap;

use super::{found_text, int_arg, rows_from, str_arg};

const SELECT_FIELDS: &str = "CustomerID,CustomerName,Status,CustomerClass,CreditLimit,Terms,\
                             CurrencyID,Email,PriceClassID,WarehouseID,ShipVia,TaxZone";

pub(crate) fn tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "query_customers".to_string(),
            description: "List and filter Acumatica customers. Use this to look up customers \
                          by name, class, status, or credit terms for analytics and reporting."
                .to_string(),
            input_schema: SchemaBuilder::new()
                .string(
                    "filter",
                    "OData $filter expression. Examples: \"Status eq 'Active'\", \
                     \"CustomerClass eq 'DEFAULT'\", \"CustomerName eq 'Acme Corp'\"",
                )
                .string("orderby", "OData $orderby. Example: \"CustomerName asc\"")
                .integer("top", "Max records to return (default 50, max 500)")
                .integer("skip", "Records to skip for pagination")
                .build(),
        },
        Tool {
            name: "get_customer".to_string(),
            description: "Get a specific Acumatica customer with full detail including \
                          billing, shipping, and credit info."
                .to_string(),
            input_schema: SchemaBuilder::new()
                .required_string("customerID", "Customer ID, e.g. '10001'")
                .build(),
        },
    ]
}

pub(crate) async fn query_customers(
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

    match client.get_entity("Customer", &params).await {
        Ok(data) => CallToolResult::text(found_text("customer", &rows_from(data))),
        Err(e) => CallToolResult::error(format!("Error querying customers: {}", e)),
    }
}

pub(crate) async fn get_customer(
    client: &AcumaticaClient,
    args: &HashMap<String, Value>,
) -> CallToolResult {
    let customer_id = match str_arg(args, "customerID") {
        Some(value) => value,
        None => return CallToolResult::error("Missing required parameter: customerID".to_string()),
    };

    match client
        .get_entity_by_key("Customer", &[&customer_id], &QueryParams::default())
        .await
    {
        Ok(customer) => {
            CallToolResult::text(serde_json::to_string_pretty(&customer).unwrap_or_default())
        }
        Err(e) => CallToolResult::error(format!("Error fetching customer: {}", e)),
    }
}

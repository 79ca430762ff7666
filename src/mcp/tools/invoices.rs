//! Sales invoice (AR) tools.

use crate::api::{AcumaticaClient, QueryParams};
use crate::mcp::protocol::{CallToolResult, SchemaBuilder, Tool};
use serde_json::Value;
use std::collections::HashMap;

use super::{filter_by_inventory_line, found_text, int_arg, rows_from, str_arg};

const SELECT_FIELDS: &str =
    "ReferenceNbr,Type,Status,Date,Customer,Amount,Balance,TaxTotal,DueDate,Description";

pub(crate) fn tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "query_invoices".to_string(),
            description: "List and filter Acumatica sales invoices (AR). Use this for revenue \
                          analytics, finding open or overdue invoices, or summarizing invoice \
                          activity by customer."
                .to_string(),
            input_schema: SchemaBuilder::new()
                .string(
                    "filter",
                    "OData $filter expression. Examples: \"Status eq 'Open'\", \
                     \"Type eq 'Invoice'\", \"Customer eq 'CUST001'\", \"Date gt '2025-01-01'\"",
                )
                .string("orderby", "OData $orderby. Example: \"Date desc\"")
                .string(
                    "inventoryID",
                    "Filter to invoices that contain this inventory item in any line, \
                     e.g. \"WIDGET-001\"",
                )
                .integer("top", "Max records to return (default 50, max 500)")
                .integer("skip", "Records to skip for pagination")
                .build(),
        },
        Tool {
            name: "get_invoice".to_string(),
            description: "Get a single Acumatica sales invoice with full line item detail."
                .to_string(),
            input_schema: SchemaBuilder::new()
                .required_string("type", "Invoice type, e.g. 'Invoice', 'Credit Memo', 'Debit Memo'")
                .required_string("referenceNbr", "Reference number, e.g. 'AR000001'")
                .build(),
        },
    ]
}

pub(crate) async fn query_invoices(
    client: &AcumaticaClient,
    args: &HashMap<String, Value>,
) -> CallToolResult {
    let inventory_id = str_arg(args, "inventoryID");

    let params = QueryParams {
        select: Some(SELECT_FIELDS.to_string()),
        filter: str_arg(args, "filter"),
        orderby: str_arg(args, "orderby"),
        expand: inventory_id.as_ref().map(|_| "Details".to_string()),
        top: int_arg(args, "top"),
        skip: int_arg(args, "skip"),
    };

    match client.get_entity("Invoice", &params).await {
        Ok(data) => {
            let mut invoices = rows_from(data);
            if let Some(ref inventory_id) = inventory_id {
                invoices = filter_by_inventory_line(invoices, inventory_id);
            }
            CallToolResult::text(found_text("invoice", &invoices))
        }
        Err(e) => CallToolResult::error(format!("Error querying invoices: {}", e)),
    }
}

pub(crate) async fn get_invoice(
    client: &AcumaticaClient,
    args: &HashMap<String, Value>,
) -> CallToolResult {
    let invoice_type = match str_arg(args, "type") {
        Some(value) => value,
        None => return CallToolResult::error("Missing required parameter: type".to_string()),
    };
    let reference_nbr = match str_arg(args, "referenceNbr") {
        Some(value) => value,
        None => {
            return CallToolResult::error("Missing required parameter: referenceNbr".to_string())
        }
    };

    let params = QueryParams {
        expand: Some("Details".to_string()),
        ..Default::default()
    };

    match client
        .get_entity_by_key("Invoice", &[&invoice_type, &reference_nbr], &params)
        .await
    {
        Ok(invoice) => {
            CallToolResult::text(serde_json::to_string_pretty(&invoice).unwrap_or_default())
        }
        Err(e) => CallToolResult::error(format!("Error fetching invoice: {}", e)),
    }
}

//! MCP server for the Acumatica entity API.
//!
//! Request handling and the tool registry.

use crate::api::AcumaticaClient;
use crate::mcp::protocol::*;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::tools;

/// MCP server exposing the Acumatica query tools.
pub struct AcumaticaMcpServer {
    client: Arc<AcumaticaClient>,
}

impl AcumaticaMcpServer {
    /// Create a new MCP server instance
    pub fn new(client: Arc<AcumaticaClient>) -> Self {
        Self { client }
    }

    /// All tool definitions, grouped by entity family.
    pub fn tools(&self) -> Vec<Tool> {
        let mut tools = Vec::new();
        tools.extend(tools::sales_orders::tools());
        tools.extend(tools::inventory::tools());
        tools.extend(tools::customers::tools());
        tools.extend(tools::invoices::tools());
        tools.extend(tools::purchase_orders::tools());
        tools.extend(tools::shipments::tools());
        tools.extend(tools::inquiries::tools());
        tools
    }

    /// Dispatch a tool call by name.
    pub async fn call_tool(&self, name: &str, args: &HashMap<String, Value>) -> CallToolResult {
        let client = &self.client;
        match name {
            "query_sales_orders" => tools::sales_orders::query_sales_orders(client, args).await,
            "get_sales_order" => tools::sales_orders::get_sales_order(client, args).await,
            "list_inventory_items" => tools::inventory::list_inventory_items(client, args).await,
            "get_inventory_item" => tools::inventory::get_inventory_item(client, args).await,
            "query_customers" => tools::customers::query_customers(client, args).await,
            "get_customer" => tools::customers::get_customer(client, args).await,
            "query_invoices" => tools::invoices::query_invoices(client, args).await,
            "get_invoice" => tools::invoices::get_invoice(client, args).await,
            "query_purchase_orders" => {
                tools::purchase_orders::query_purchase_orders(client, args).await
            }
            "get_purchase_order" => tools::purchase_orders::get_purchase_order(client, args).await,
            "query_shipments" => tools::shipments::query_shipments(client, args).await,
            "get_shipment" => tools::shipments::get_shipment(client, args).await,
            "query_generic_inquiry" => tools::inquiries::query_generic_inquiry(client, args).await,
            _ => CallToolResult::error(format!("Unknown tool: {}", name)),
        }
    }

    /// Handle one JSON-RPC request. Notifications yield no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!("Ignoring notification: {}", request.method);
            return None;
        }

        let id = request.id.clone();

        let response = match request.method.as_str() {
            "initialize" => {
                let result = InitializeResult {
                    protocol_version: "2024-11-05".to_string(),
                    capabilities: ServerCapabilities {
                        tools: Some(ToolsCapability {
                            list_changed: Some(false),
                        }),
                    },
                    server_info: ServerInfo {
                        name: "acumatica-mcp".to_string(),
                        version: env!("CARGO_PKG_VERSION").to_string(),
                    },
                };
                JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
            }

            "tools/list" => {
                let result = ListToolsResult {
                    tools: self.tools(),
                };
                JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
            }

            "tools/call" => {
                let params: CallToolParams = match request.params {
                    Some(params) => match serde_json::from_value(params) {
                        Ok(params) => params,
                        Err(e) => {
                            return Some(JsonRpcResponse::error(
                                id,
                                -32602,
                                &format!("Invalid params: {}", e),
                            ));
                        }
                    },
                    None => {
                        return Some(JsonRpcResponse::error(id, -32602, "Missing params"));
                    }
                };

                let args = params.arguments.unwrap_or_default();
                let result = self.call_tool(&params.name, &args).await;
                JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
            }

            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),

            // Some clients send these with an id; answer them politely
            "initialized" | "notifications/initialized" => {
                JsonRpcResponse::success(id, serde_json::json!({}))
            }

            _ => JsonRpcResponse::error(id, -32601, &format!("Method not found: {}", request.method)),
        };

        Some(response)
    }
}

//! JSON-RPC 2.0 tool server
//!
//! Exposes the netcalc engine as JSON-RPC methods so editors and agents can
//! call it over STDIO.
//!
//! # Methods
//!
//! - `ping`
//! - `calculate_cidr` `{"cidr": "192.168.1.0/24"}`
//! - `generate_subnets` `{"base_cidr": "192.168.1.0/24", "new_prefix": 26}`
//! - `ip_to_long` `{"ip": "10.0.0.1"}`
//! - `long_to_ip` `{"value": 167772161}`
//! - `classify` `{"ip": "172.20.5.1"}`
//!
//! # Examples
//!
//! ```
//! use netcalc_core::EngineConfig;
//! use netcalc_mcp::McpServer;
//!
//! let server = McpServer::new(EngineConfig::default());
//!
//! let request = r#"{
//!     "jsonrpc": "2.0",
//!     "method": "calculate_cidr",
//!     "params": {"cidr": "10.0.0.5/8"},
//!     "id": 1
//! }"#;
//!
//! let response = server.handle_request(request).unwrap();
//! assert!(response.contains("10.255.255.255"));
//! ```

use netcalc_cidr::{calculate_cidr, generate_subnets_with_config};
use netcalc_core::{classify, ip_to_long, long_to_ip, EngineConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod transport;

pub use transport::StdioTransport;

/// MCP server errors
#[derive(Error, Debug)]
pub enum McpError {
    /// JSON-RPC parse error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Params missing, malformed, or rejected by the engine
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Method not found
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type Result<T> = std::result::Result<T, McpError>;

/// JSON-RPC 2.0 request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    #[serde(default)]
    pub id: serde_json::Value,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: serde_json::Value,
}

impl JsonRpcResponse {
    fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    fn failure(id: serde_json::Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

/// JSON-RPC 2.0 error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    fn new(code: i32, msg: &str) -> Self {
        Self {
            code,
            message: msg.to_string(),
            data: None,
        }
    }
}

impl From<McpError> for JsonRpcError {
    fn from(err: McpError) -> Self {
        match err {
            McpError::ParseError(msg) => Self::new(-32700, &msg),
            McpError::InvalidRequest(msg) => Self::new(-32600, &msg),
            McpError::MethodNotFound(msg) => Self::new(-32601, &msg),
            McpError::InvalidParams(msg) => Self::new(-32602, &msg),
            McpError::InternalError(msg) => Self::new(-32603, &msg),
        }
    }
}

/// calculate_cidr request parameters
#[derive(Debug, Deserialize)]
struct CalculateCidrParams {
    cidr: String,
}

/// generate_subnets request parameters
#[derive(Debug, Deserialize)]
struct GenerateSubnetsParams {
    base_cidr: String,
    new_prefix: PrefixParam,
}

/// New prefix given as a JSON number or as text
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PrefixParam {
    Number(i64),
    Text(String),
}

impl PrefixParam {
    fn to_text(&self) -> String {
        match self {
            PrefixParam::Number(n) => n.to_string(),
            PrefixParam::Text(s) => s.trim().to_string(),
        }
    }
}

/// ip_to_long / classify request parameters
#[derive(Debug, Deserialize)]
struct IpParams {
    ip: String,
}

/// long_to_ip request parameters
#[derive(Debug, Deserialize)]
struct LongToIpParams {
    value: u32,
}

fn parse_params<T: serde::de::DeserializeOwned>(params: &serde_json::Value) -> Result<T> {
    serde_json::from_value(params.clone())
        .map_err(|e| McpError::InvalidParams(format!("Invalid params: {}", e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| McpError::InternalError(e.to_string()))
}

/// JSON-RPC tool server
///
/// Stateless apart from its limits; every request is computed from scratch.
pub struct McpServer {
    config: EngineConfig,
}

impl McpServer {
    /// Create a new server
    ///
    /// # Arguments
    ///
    /// * `config` - Engine limits applied to subnet generation
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Handle a JSON-RPC 2.0 request
    ///
    /// Protocol and engine failures are encoded as JSON-RPC error responses;
    /// `Err` is returned only when the response itself cannot be serialized.
    ///
    /// # Arguments
    ///
    /// * `request_str` - JSON-RPC request as string
    pub fn handle_request(&self, request_str: &str) -> Result<String> {
        let response = match serde_json::from_str::<JsonRpcRequest>(request_str) {
            Ok(request) => self.dispatch(request),
            Err(e) => JsonRpcResponse::failure(
                serde_json::Value::Null,
                McpError::ParseError(e.to_string()).into(),
            ),
        };

        serde_json::to_string(&response).map_err(|e| McpError::InternalError(e.to_string()))
    }

    fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        if request.jsonrpc != "2.0" {
            return JsonRpcResponse::failure(
                request.id,
                McpError::InvalidRequest("Invalid JSON-RPC version".to_string()).into(),
            );
        }

        debug!(method = %request.method, "handling request");

        let result = match request.method.as_str() {
            "calculate_cidr" => self.handle_calculate_cidr(&request.params),
            "generate_subnets" => self.handle_generate_subnets(&request.params),
            "ip_to_long" => self.handle_ip_to_long(&request.params),
            "long_to_ip" => self.handle_long_to_ip(&request.params),
            "classify" => self.handle_classify(&request.params),
            "ping" => Ok(serde_json::json!({"status": "ok"})),
            _ => Err(McpError::MethodNotFound(request.method.clone())),
        };

        match result {
            Ok(data) => JsonRpcResponse::success(request.id, data),
            Err(e) => JsonRpcResponse::failure(request.id, e.into()),
        }
    }

    fn handle_calculate_cidr(&self, params: &serde_json::Value) -> Result<serde_json::Value> {
        let params: CalculateCidrParams = parse_params(params)?;
        let calc = calculate_cidr(params.cidr.trim())
            .map_err(|e| McpError::InvalidParams(e.to_string()))?;
        to_json(&calc)
    }

    fn handle_generate_subnets(&self, params: &serde_json::Value) -> Result<serde_json::Value> {
        let params: GenerateSubnetsParams = parse_params(params)?;
        let subnets = generate_subnets_with_config(
            params.base_cidr.trim(),
            &params.new_prefix.to_text(),
            &self.config,
        )
        .map_err(|e| McpError::InvalidParams(e.to_string()))?;

        Ok(serde_json::json!({
            "base_cidr": params.base_cidr.trim(),
            "count": subnets.len(),
            "subnets": to_json(&subnets)?,
        }))
    }

    fn handle_ip_to_long(&self, params: &serde_json::Value) -> Result<serde_json::Value> {
        let params: IpParams = parse_params(params)?;
        let value =
            ip_to_long(params.ip.trim()).map_err(|e| McpError::InvalidParams(e.to_string()))?;
        Ok(serde_json::json!({ "ip": params.ip.trim(), "value": value }))
    }

    fn handle_long_to_ip(&self, params: &serde_json::Value) -> Result<serde_json::Value> {
        let params: LongToIpParams = parse_params(params)?;
        Ok(serde_json::json!({ "value": params.value, "ip": long_to_ip(params.value) }))
    }

    fn handle_classify(&self, params: &serde_json::Value) -> Result<serde_json::Value> {
        let params: IpParams = parse_params(params)?;
        let value =
            ip_to_long(params.ip.trim()).map_err(|e| McpError::InvalidParams(e.to_string()))?;
        Ok(serde_json::json!({ "ip": params.ip.trim(), "ip_type": classify(value) }))
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

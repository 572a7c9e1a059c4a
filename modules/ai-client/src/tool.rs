use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;

use crate::error::{AiError, Result};
use crate::mistral::types::{ToolCall, ToolDefinitionWire};

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl From<ToolDefinition> for ToolDefinitionWire {
    fn from(def: ToolDefinition) -> Self {
        ToolDefinitionWire::function(def.name, def.description, def.parameters)
    }
}

/// A function the model may ask us to run.
///
/// `Args` is decoded from the JSON-encoded argument text of a [`ToolCall`];
/// `Output` is serialized back into the conversation as the tool result.
#[async_trait]
pub trait Tool: Send + Sync {
    const NAME: &'static str;
    type Error: Error + Send + Sync + 'static;
    type Args: DeserializeOwned + Send + Sync;
    type Output: Serialize + Send + Sync;

    async fn definition(&self) -> ToolDefinition;
    async fn call(&self, args: Self::Args) -> std::result::Result<Self::Output, Self::Error>;

    /// Decode the arguments of a tool call addressed to this tool.
    fn parse_args(&self, call: &ToolCall) -> Result<Self::Args> {
        if call.function.name != Self::NAME {
            return Err(AiError::Parse(format!(
                "expected a call to {}, got {}",
                Self::NAME,
                call.function.name
            )));
        }

        serde_json::from_str(&call.function.arguments).map_err(|e| {
            AiError::Parse(format!(
                "invalid arguments for {}: {} ({})",
                Self::NAME,
                e,
                call.function.arguments
            ))
        })
    }
}

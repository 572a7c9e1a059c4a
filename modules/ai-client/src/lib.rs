pub mod error;
pub mod mistral;
pub mod schema;
pub mod tool;
pub mod util;

pub use error::{AiError, Result};
pub use mistral::types::{
    ChatRequest, ChatResponse, Choice, FunctionCall, Role, ToolCall, ToolDefinitionWire,
    WireMessage,
};
pub use mistral::Mistral;
pub use schema::ToolParameters;
pub use tool::{Tool, ToolDefinition};
pub use util::truncate_to_char_boundary;

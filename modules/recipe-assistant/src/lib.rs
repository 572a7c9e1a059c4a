pub mod config;
pub mod conversation;
pub mod intent;
pub mod render;
pub mod router;
pub mod tools;

pub use config::Config;
pub use conversation::{Conversation, Message, MessageRole};
pub use router::{RecipeAssistant, Reply, DECLINE_MESSAGE};
pub use tools::SearchRecipesTool;

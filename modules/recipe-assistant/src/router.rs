use ai_client::{Mistral, Tool, WireMessage};
use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;
use spoonacular_client::{SearchCriteria, SpoonacularClient};
use tracing::{info, warn};

use crate::config::Config;
use crate::intent;
use crate::tools::SearchRecipesTool;

/// Reply to anything that is not about food.
pub const DECLINE_MESSAGE: &str = "I'm here to assist with food, recipes, and cooking-related questions only. \
Please ask me something related to food!";

/// Outcome of routing one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    /// Raw search response when a search ran.
    pub results: Option<Value>,
    pub is_recipe: bool,
    /// Filters the model chose for the search.
    pub search: Option<SearchCriteria>,
}

impl Reply {
    fn declined() -> Self {
        Self {
            text: DECLINE_MESSAGE.to_string(),
            results: None,
            is_recipe: false,
            search: None,
        }
    }

    fn chat(text: String) -> Self {
        Self {
            text,
            results: None,
            is_recipe: true,
            search: None,
        }
    }
}

/// Routes messages between the intent classifier, general chat and recipe search.
pub struct RecipeAssistant {
    llm: Mistral,
    search: SearchRecipesTool,
    narrate_results: bool,
}

impl RecipeAssistant {
    pub fn new(llm: Mistral, recipes: SpoonacularClient) -> Self {
        Self {
            llm,
            search: SearchRecipesTool::new(recipes),
            narrate_results: true,
        }
    }

    /// Build both clients from a validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let mistral_key = config.mistral_api_key.clone().unwrap_or_default();
        let spoonacular_key = config.spoonacular_api_key.clone().unwrap_or_default();

        let mut llm = Mistral::new(mistral_key, &config.model);
        if let Some(ref url) = config.llm_base_url {
            llm = llm.with_base_url(url);
        }

        let mut recipes = SpoonacularClient::new(spoonacular_key);
        if let Some(ref url) = config.spoonacular_base_url {
            recipes = recipes.with_base_url(url);
        }

        Ok(Self::new(llm, recipes).with_narration(config.narrate_results))
    }

    /// When off, the first-turn model text is returned with the raw results
    /// instead of asking the model to summarise them.
    pub fn with_narration(mut self, narrate_results: bool) -> Self {
        self.narrate_results = narrate_results;
        self
    }

    /// General conversation without tools.
    pub async fn chat(&self, message: &str) -> Result<String> {
        self.llm
            .chat_completion(message)
            .await
            .context("Chat error")
    }

    pub async fn is_recipe_query(&self, message: &str) -> Result<bool> {
        intent::classify(&self.llm, message).await
    }

    pub async fn search_recipes(&self, criteria: &SearchCriteria) -> Result<Value> {
        self.search
            .client()
            .search_recipes(criteria)
            .await
            .context("Error fetching recipes")
    }

    pub async fn get_recipe_details(&self, recipe_id: u64) -> Result<Value> {
        self.search
            .client()
            .get_recipe_details(recipe_id)
            .await
            .context("Error fetching recipe details")
    }

    /// Classify the message, then either decline it or answer it with the
    /// help of the recipe search tool.
    pub async fn process_message(&self, message: &str) -> Result<Reply> {
        if message.trim().is_empty() {
            bail!("Message cannot be empty.");
        }

        self.route(message)
            .await
            .context("Error processing message")
    }

    async fn route(&self, message: &str) -> Result<Reply> {
        if !self.is_recipe_query(message).await? {
            info!("Message is not food-related, declining");
            return Ok(Reply::declined());
        }

        let mut request = self
            .llm
            .request()
            .message(WireMessage::user(message))
            .tool(self.search.definition().await)
            .tool_choice_auto();

        let first = self
            .llm
            .chat(&request)
            .await
            .context("Tool-enabled completion failed")?
            .into_message()
            .ok_or_else(|| anyhow!("Model returned no choices"))?;

        let Some(call) = first.first_tool_call().cloned() else {
            warn!("Model made no tool call, answering as plain chat");
            let text = match first.text() {
                Some(text) => text.to_string(),
                None => self.chat(message).await?,
            };
            return Ok(Reply::chat(text));
        };

        let criteria = self
            .search
            .parse_args(&call)
            .context("Malformed tool call arguments")?;
        info!(filters = ?criteria.query_pairs(), "Model requested recipe search");

        let results = self
            .search
            .call(criteria.clone())
            .await
            .context("Error fetching recipes")?;

        let first_text = first.text().map(str::to_string);

        let text = if self.narrate_results {
            request.messages.push(first);
            request.messages.push(WireMessage::tool(
                &call.id,
                SearchRecipesTool::NAME,
                serde_json::to_string(&results)?,
            ));
            // The summary turn must answer in text, not search again.
            request.tools = None;
            request.tool_choice = None;

            let summary = self
                .llm
                .chat(&request)
                .await
                .context("Summarising search results failed")?
                .into_message();

            match (summary.as_ref().and_then(WireMessage::text), first_text) {
                (Some(text), _) => text.to_string(),
                (None, Some(text)) => {
                    warn!("Model returned no summary, using its first-turn text");
                    text
                }
                (None, None) => bail!("Model returned no summary of the search results"),
            }
        } else {
            first_text.unwrap_or_default()
        };

        Ok(Reply {
            text,
            results: Some(results),
            is_recipe: true,
            search: Some(criteria),
        })
    }
}

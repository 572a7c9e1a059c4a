//! Yes/no classification of whether a message is about food.

use ai_client::Mistral;
use anyhow::{Context, Result};
use tracing::debug;

/// Instruction prepended to the user's message.
const CLASSIFIER_PROMPT: &str = "Determine if this message is asking about recipes, cooking, food, or ingredients. \
Respond with just 'true' or 'false': ";

pub fn classifier_prompt(message: &str) -> String {
    format!("{CLASSIFIER_PROMPT}{message}")
}

/// Only an exact `true` (ignoring case and surrounding whitespace) counts as yes.
pub fn parse_classification(reply: &str) -> bool {
    reply.trim().to_lowercase() == "true"
}

/// Ask the model whether `message` is about recipes, cooking, food or ingredients.
pub async fn classify(llm: &Mistral, message: &str) -> Result<bool> {
    let reply = llm
        .chat_completion(classifier_prompt(message))
        .await
        .context("Error determining recipe query")?;

    let is_recipe = parse_classification(&reply);
    debug!(reply = %reply.trim(), is_recipe, "Classified message");

    Ok(is_recipe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_ends_with_message() {
        let prompt = classifier_prompt("How long do I boil an egg?");
        assert!(prompt.starts_with("Determine if this message"));
        assert!(prompt.ends_with("'false': How long do I boil an egg?"));
    }

    #[test]
    fn test_parse_classification() {
        assert!(parse_classification("true"));
        assert!(parse_classification("  TRUE\n"));
        assert!(parse_classification("True"));

        assert!(!parse_classification("false"));
        assert!(!parse_classification("true."));
        assert!(!parse_classification("Yes, true"));
        assert!(!parse_classification(""));
    }
}

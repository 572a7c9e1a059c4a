//! Plain-text rendering of replies and recipe cards for the terminal.

use serde_json::Value;
use spoonacular_client::RecipeSummary;

use crate::conversation::{Message, MessageRole};

pub const RESULTS_HEADER: &str = "📋 Found Recipes:";

/// One card per recipe in a search response. Empty when there are no results.
pub fn recipe_cards(results: &Value) -> Vec<String> {
    RecipeSummary::from_search_response(results)
        .iter()
        .map(recipe_card)
        .collect()
}

pub fn recipe_card(recipe: &RecipeSummary) -> String {
    let mut lines = vec![format!("**{}**", or_unknown(recipe.title.as_deref()))];

    if let Some(ref image) = recipe.image {
        lines.push(format!("Image: {image}"));
    }
    lines.push(format!(
        "Ready in: {} minutes",
        or_unknown(recipe.ready_in_minutes.map(|m| m.to_string()).as_deref())
    ));
    lines.push(format!(
        "Servings: {}",
        or_unknown(recipe.servings.map(|s| s.to_string()).as_deref())
    ));
    if let Some(ref url) = recipe.source_url {
        lines.push(format!("[View Recipe]({url})"));
    }
    if let Some(id) = recipe.id {
        lines.push(format!("Details: /recipe {id}"));
    }

    lines.join("\n")
}

/// Results block for an assistant reply, or `None` if there is nothing to show.
pub fn results_block(results: Option<&Value>) -> Option<String> {
    let cards = recipe_cards(results?);
    if cards.is_empty() {
        return None;
    }

    let mut out = String::from(RESULTS_HEADER);
    for card in cards {
        out.push_str("\n\n");
        out.push_str(&card);
    }
    Some(out)
}

/// A logged message the way it was shown live.
pub fn render_message(message: &Message) -> String {
    let speaker = match message.role {
        MessageRole::User => "You",
        MessageRole::Assistant => "Assistant",
        MessageRole::Tool => "search_recipes",
    };

    let mut out = format!("{speaker}: {}", message.content);
    if let Some(block) = results_block(message.results.as_ref()) {
        out.push_str("\n\n");
        out.push_str(&block);
    }
    out
}

/// Short summary of a recipe detail document.
pub fn recipe_details(detail: &Value) -> String {
    let mut out = format!(
        "**{}**",
        or_unknown(detail.get("title").and_then(Value::as_str))
    );

    if let Some(minutes) = detail.get("readyInMinutes").and_then(Value::as_u64) {
        out.push_str(&format!("\nReady in: {minutes} minutes"));
    }
    if let Some(servings) = detail.get("servings").and_then(Value::as_u64) {
        out.push_str(&format!("\nServings: {servings}"));
    }

    let ingredients: Vec<&str> = detail
        .get("extendedIngredients")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i.get("original").or_else(|| i.get("name")))
                .filter_map(Value::as_str)
                .collect()
        })
        .unwrap_or_default();
    if !ingredients.is_empty() {
        out.push_str("\n\nIngredients:");
        for ingredient in ingredients {
            out.push_str(&format!("\n- {ingredient}"));
        }
    }

    if let Some(instructions) = detail
        .get("instructions")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
    {
        out.push_str(&format!("\n\nInstructions:\n{}", instructions.trim()));
    }

    if let Some(url) = detail.get("sourceUrl").and_then(Value::as_str) {
        out.push_str(&format!("\n\n[View Recipe]({url})"));
    }

    out
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or("?")
}

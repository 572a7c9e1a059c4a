pub mod error;
pub mod types;

pub use error::{Result, SpoonacularError};
pub use types::{
    Cuisine, Diet, Intolerance, MealType, RecipeSummary, SearchCriteria, SortDirection, SortKey,
};

use serde_json::Value;

const BASE_URL: &str = "https://api.spoonacular.com";

/// Results requested per search.
pub const PAGE_SIZE: u32 = 5;

/// Error bodies are echoed into error messages; keep them readable.
const MAX_ERROR_BODY: usize = 2_000;

#[derive(Clone)]
pub struct SpoonacularClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SpoonacularClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Search recipes matching `criteria`, with full recipe information and
    /// ingredients filled in. Returns the raw response body.
    pub async fn search_recipes(&self, criteria: &SearchCriteria) -> Result<Value> {
        let url = format!("{}/recipes/complexSearch", self.base_url);

        let mut params: Vec<(&str, String)> = vec![
            ("addRecipeInformation", "true".to_string()),
            ("fillIngredients", "true".to_string()),
            ("number", PAGE_SIZE.to_string()),
        ];
        params.extend(criteria.query_pairs());

        tracing::debug!(
            filters = ?criteria.query_pairs(),
            "Searching recipes"
        );

        let body = self.get_json(&url, &params).await?;

        let count = body
            .get("results")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        let total = body.get("totalResults").and_then(Value::as_u64);
        tracing::info!(count, total, "Fetched recipes");

        Ok(body)
    }

    /// Full information for one recipe.
    pub async fn get_recipe_details(&self, recipe_id: u64) -> Result<Value> {
        let url = format!("{}/recipes/{}/information", self.base_url, recipe_id);

        tracing::debug!(recipe_id, "Fetching recipe details");

        self.get_json(&url, &[]).await
    }

    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value> {
        let resp = self
            .client
            .get(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SpoonacularError::Api {
                status: status.as_u16(),
                message: truncate_to_char_boundary(&body, MAX_ERROR_BODY).to_string(),
            });
        }

        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_whole_characters() {
        assert_eq!(truncate_to_char_boundary("jalapeño", 7), "jalape");
        assert_eq!(truncate_to_char_boundary("tofu", 10), "tofu");
    }
}

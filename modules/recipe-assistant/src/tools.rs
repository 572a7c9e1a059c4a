use ai_client::{Tool, ToolDefinition, ToolParameters};
use async_trait::async_trait;
use serde_json::Value;
use spoonacular_client::{SearchCriteria, SpoonacularClient, SpoonacularError};

/// Exposes recipe search to the model as the `search_recipes` function.
#[derive(Clone)]
pub struct SearchRecipesTool {
    client: SpoonacularClient,
}

impl SearchRecipesTool {
    pub fn new(client: SpoonacularClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &SpoonacularClient {
        &self.client
    }
}

#[async_trait]
impl Tool for SearchRecipesTool {
    const NAME: &'static str = "search_recipes";
    type Error = SpoonacularError;
    type Args = SearchCriteria;
    type Output = Value;

    async fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search for recipes by ingredients, cuisine, diet, intolerances, meal type, \
                          preparation time and nutrition bounds. Only pass the filters the user asked for."
                .to_string(),
            parameters: SearchCriteria::parameters_schema(),
        }
    }

    async fn call(&self, args: SearchCriteria) -> Result<Value, SpoonacularError> {
        self.client.search_recipes(&args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> SearchRecipesTool {
        SearchRecipesTool::new(SpoonacularClient::new("key".to_string()))
    }

    #[tokio::test]
    async fn test_definition_declares_filters() {
        let def = tool().definition().await;
        assert_eq!(def.name, "search_recipes");

        let properties = def.parameters["properties"].as_object().unwrap();
        for key in [
            "query",
            "includeIngredients",
            "cuisine",
            "diet",
            "intolerances",
            "type",
            "maxReadyTime",
            "minProtein",
            "maxProtein",
            "minCalories",
            "maxCalories",
            "sort",
            "sortDirection",
        ] {
            assert!(properties.contains_key(key), "missing {key}");
        }
    }

    #[tokio::test]
    async fn test_definition_has_no_required_filters() {
        let def = tool().definition().await;
        let required = def
            .parameters
            .get("required")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        assert_eq!(required, 0);
    }

    #[tokio::test]
    async fn test_definition_lists_enumerations() {
        let def = tool().definition().await;
        let cuisines = def.parameters["properties"]["cuisine"]["enum"]
            .as_array()
            .unwrap();
        assert!(cuisines.contains(&Value::String("italian".into())));

        let intolerances = &def.parameters["properties"]["intolerances"]["items"]["enum"];
        assert!(intolerances
            .as_array()
            .unwrap()
            .contains(&Value::String("tree nut".into())));
    }
}

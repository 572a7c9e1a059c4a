use schemars::JsonSchema;
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// --- Search filters ---

/// Filters for `recipes/complexSearch`.
///
/// Every field is optional. Absent, blank, zero and empty-list values are left
/// out of the outbound query so the server applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Free-text recipe search, e.g. "pasta" or "banana bread".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Ingredients the recipes should contain, e.g. ["chicken", "rice"].
    #[serde(
        default,
        alias = "ingredients",
        deserialize_with = "text_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub include_ingredients: Vec<String>,

    /// Cuisine the recipes should belong to.
    #[serde(
        default,
        deserialize_with = "lenient_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub cuisine: Option<Cuisine>,

    /// Diet the recipes must be suitable for.
    #[serde(
        default,
        deserialize_with = "lenient_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub diet: Option<Diet>,

    /// Intolerances; recipes containing these are excluded.
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub intolerances: Vec<Intolerance>,

    /// Meal type, e.g. "main course" or "dessert".
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub meal_type: Option<MealType>,

    /// Maximum preparation plus cooking time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ready_time: Option<u32>,

    /// Minimum protein per serving in grams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_protein: Option<f64>,

    /// Maximum protein per serving in grams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_protein: Option<f64>,

    /// Minimum calories per serving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_calories: Option<f64>,

    /// Maximum calories per serving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_calories: Option<f64>,

    /// How to order the results.
    #[serde(
        default,
        deserialize_with = "lenient_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sort: Option<SortKey>,

    /// Direction for `sort`.
    #[serde(
        default,
        deserialize_with = "lenient_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sort_direction: Option<SortDirection>,
}

impl SearchCriteria {
    /// Query parameters for the present filters, in wire names.
    ///
    /// Lists are comma-joined; blank strings, empty lists and zero bounds are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        push_text(&mut pairs, "query", self.query.as_deref());
        push_list(
            &mut pairs,
            "includeIngredients",
            self.include_ingredients.iter().map(String::as_str),
        );
        push_text(&mut pairs, "cuisine", wire_name(&self.cuisine).as_deref());
        push_text(&mut pairs, "diet", wire_name(&self.diet).as_deref());
        let intolerances: Vec<String> = self.intolerances.iter().filter_map(wire_name).collect();
        push_list(
            &mut pairs,
            "intolerances",
            intolerances.iter().map(String::as_str),
        );
        push_text(&mut pairs, "type", wire_name(&self.meal_type).as_deref());
        push_number(&mut pairs, "maxReadyTime", self.max_ready_time.map(f64::from));
        push_number(&mut pairs, "minProtein", self.min_protein);
        push_number(&mut pairs, "maxProtein", self.max_protein);
        push_number(&mut pairs, "minCalories", self.min_calories);
        push_number(&mut pairs, "maxCalories", self.max_calories);
        push_text(&mut pairs, "sort", wire_name(&self.sort).as_deref());
        push_text(
            &mut pairs,
            "sortDirection",
            wire_name(&self.sort_direction).as_deref(),
        );

        pairs
    }
}

fn push_text(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        pairs.push((key, v.to_string()));
    }
}

fn push_list<'a>(
    pairs: &mut Vec<(&'static str, String)>,
    key: &'static str,
    values: impl Iterator<Item = &'a str>,
) {
    let joined = values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(",");
    if !joined.is_empty() {
        pairs.push((key, joined));
    }
}

fn push_number(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<f64>) {
    if let Some(v) = value.filter(|v| v.is_finite() && *v != 0.0) {
        pairs.push((key, v.to_string()));
    }
}

/// The string a unit enum serializes to.
fn wire_name<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_value(value) {
        Ok(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Enum values are matched case-insensitively; models like "Italian" as much as "italian".
fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => from_lowercase(&s).map(Some),
    }
}

/// A list given either as an array or as one comma-separated string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListArg {
    Many(Vec<String>),
    One(String),
}

fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<ListArg>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(ListArg::Many(items)) => items,
        Some(ListArg::One(joined)) => joined.split(',').map(str::to_string).collect(),
    };

    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    text_list(deserializer)?
        .iter()
        .map(|s| from_lowercase(s))
        .collect()
}

fn from_lowercase<T, E>(value: &str) -> Result<T, E>
where
    T: DeserializeOwned,
    E: serde::de::Error,
{
    T::deserialize(value.trim().to_lowercase().into_deserializer())
}

// --- Filter vocabularies ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Cuisine {
    African,
    American,
    Asian,
    British,
    Cajun,
    Caribbean,
    Chinese,
    #[serde(rename = "eastern european")]
    EasternEuropean,
    European,
    French,
    German,
    Greek,
    Indian,
    Irish,
    Italian,
    Japanese,
    Jewish,
    Korean,
    #[serde(rename = "latin american")]
    LatinAmerican,
    Mediterranean,
    Mexican,
    #[serde(rename = "middle eastern")]
    MiddleEastern,
    Nordic,
    Southern,
    Spanish,
    Thai,
    Vietnamese,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Diet {
    #[serde(rename = "gluten free")]
    GlutenFree,
    Ketogenic,
    Vegetarian,
    #[serde(rename = "lacto-vegetarian")]
    LactoVegetarian,
    #[serde(rename = "ovo-vegetarian")]
    OvoVegetarian,
    Vegan,
    Pescetarian,
    Paleo,
    Primal,
    #[serde(rename = "low fodmap")]
    LowFodmap,
    Whole30,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Intolerance {
    Dairy,
    Egg,
    Gluten,
    Grain,
    Peanut,
    Seafood,
    Sesame,
    Shellfish,
    Soy,
    Sulfite,
    #[serde(rename = "tree nut")]
    TreeNut,
    Wheat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    #[serde(rename = "main course")]
    MainCourse,
    #[serde(rename = "side dish")]
    SideDish,
    Dessert,
    Appetizer,
    Salad,
    Bread,
    Breakfast,
    Soup,
    Beverage,
    Sauce,
    Marinade,
    Fingerfood,
    Snack,
    Drink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Popularity,
    Healthiness,
    Price,
    Time,
    Random,
    MaxUsedIngredients,
    MinMissingIngredients,
    Calories,
    Protein,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

// --- Responses ---

/// Display view of one entry in a search response's `results` list.
///
/// The response itself stays an opaque `serde_json::Value`; this only picks
/// the fields a recipe card shows, each optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub source_url: Option<String>,
}

impl RecipeSummary {
    /// Summaries from a search response body. Missing or empty `results` yields none.
    pub fn from_search_response(body: &Value) -> Vec<RecipeSummary> {
        body.get("results")
            .and_then(Value::as_array)
            .map(|results| {
                results
                    .iter()
                    .filter_map(|r| serde_json::from_value(r.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs_map(criteria: &SearchCriteria) -> std::collections::HashMap<&'static str, String> {
        criteria.query_pairs().into_iter().collect()
    }

    #[test]
    fn test_default_criteria_has_no_pairs() {
        assert!(SearchCriteria::default().query_pairs().is_empty());
    }

    #[test]
    fn test_ingredients_are_comma_joined() {
        let criteria = SearchCriteria {
            include_ingredients: vec!["chicken".into(), " rice ".into()],
            ..Default::default()
        };
        assert_eq!(pairs_map(&criteria)["includeIngredients"], "chicken,rice");
    }

    #[test]
    fn test_empty_lists_are_omitted() {
        let criteria = SearchCriteria {
            include_ingredients: vec![],
            intolerances: vec![],
            query: Some("soup".into()),
            ..Default::default()
        };
        let pairs = criteria.query_pairs();
        assert_eq!(pairs, vec![("query", "soup".to_string())]);
    }

    #[test]
    fn test_blank_entries_are_dropped() {
        let criteria = SearchCriteria {
            query: Some("   ".into()),
            include_ingredients: vec!["".into(), "  ".into()],
            ..Default::default()
        };
        assert!(criteria.query_pairs().is_empty());
    }

    #[test]
    fn test_zero_bounds_are_omitted() {
        let criteria = SearchCriteria {
            max_ready_time: Some(0),
            max_calories: Some(0.0),
            min_protein: Some(25.0),
            ..Default::default()
        };
        let pairs = pairs_map(&criteria);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs["minProtein"], "25");
    }

    #[test]
    fn test_enums_use_wire_names() {
        let criteria = SearchCriteria {
            cuisine: Some(Cuisine::MiddleEastern),
            diet: Some(Diet::GlutenFree),
            intolerances: vec![Intolerance::TreeNut, Intolerance::Dairy],
            meal_type: Some(MealType::MainCourse),
            sort: Some(SortKey::MaxUsedIngredients),
            sort_direction: Some(SortDirection::Desc),
            ..Default::default()
        };
        let pairs = pairs_map(&criteria);
        assert_eq!(pairs["cuisine"], "middle eastern");
        assert_eq!(pairs["diet"], "gluten free");
        assert_eq!(pairs["intolerances"], "tree nut,dairy");
        assert_eq!(pairs["type"], "main course");
        assert_eq!(pairs["sort"], "max-used-ingredients");
        assert_eq!(pairs["sortDirection"], "desc");
    }

    #[test]
    fn test_deserialize_tool_arguments() {
        let criteria: SearchCriteria = serde_json::from_value(json!({
            "includeIngredients": ["chicken", "rice"],
            "cuisine": "Italian",
            "intolerances": ["Gluten"],
            "type": "main course",
            "maxReadyTime": 30
        }))
        .unwrap();

        assert_eq!(criteria.include_ingredients, vec!["chicken", "rice"]);
        assert_eq!(criteria.cuisine, Some(Cuisine::Italian));
        assert_eq!(criteria.intolerances, vec![Intolerance::Gluten]);
        assert_eq!(criteria.meal_type, Some(MealType::MainCourse));
        assert_eq!(criteria.max_ready_time, Some(30));
        assert_eq!(criteria.diet, None);
    }

    #[test]
    fn test_deserialize_ingredients_alias_and_nulls() {
        let criteria: SearchCriteria = serde_json::from_value(json!({
            "ingredients": ["tofu"],
            "diet": null,
            "cuisine": ""
        }))
        .unwrap();

        assert_eq!(criteria.include_ingredients, vec!["tofu"]);
        assert_eq!(criteria.diet, None);
        assert_eq!(criteria.cuisine, None);
    }

    #[test]
    fn test_lists_accept_comma_separated_text() {
        let criteria: SearchCriteria = serde_json::from_value(json!({
            "includeIngredients": "chicken, rice",
            "intolerances": "Gluten, dairy,"
        }))
        .unwrap();

        assert_eq!(criteria.include_ingredients, vec!["chicken", "rice"]);
        assert_eq!(
            criteria.intolerances,
            vec![Intolerance::Gluten, Intolerance::Dairy]
        );
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let result: Result<SearchCriteria, _> =
            serde_json::from_value(json!({"cuisine": "martian"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_summaries_from_response() {
        let body = json!({
            "results": [
                {
                    "id": 715538,
                    "title": "Bruschetta",
                    "image": "https://img.spoonacular.com/recipes/715538-312x231.jpg",
                    "readyInMinutes": 35,
                    "servings": 2,
                    "sourceUrl": "https://example.com/bruschetta"
                },
                {"id": 1, "title": "Untimed"}
            ],
            "totalResults": 2
        });

        let summaries = RecipeSummary::from_search_response(&body);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].ready_in_minutes, Some(35));
        assert_eq!(summaries[1].servings, None);
    }

    #[test]
    fn test_summaries_from_empty_or_missing_results() {
        assert!(RecipeSummary::from_search_response(&json!({"results": []})).is_empty());
        assert!(RecipeSummary::from_search_response(&json!({})).is_empty());
        assert!(RecipeSummary::from_search_response(&Value::Null).is_empty());
    }
}

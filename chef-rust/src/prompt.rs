use crate::SuggestionRequest;
use fridgechef_genai::JSONSchema;
use serde_json::json;

/// JSON key holding the name list in the structured model output.
pub const RECIPE_NAMES_KEY: &str = "recipeNames";

pub const RECIPE_NAMES_SYSTEM_PROMPT: &str = "You are a recipe suggestion AI. Your task is to \
suggest recipe names based on a list of available ingredients, dietary restrictions, and cuisine \
preferences.
The recipe names MUST be concise and suitable for searching on a recipe database like TheMealDB. \
Aim for common dish names or simple descriptions (e.g., \"Chicken Stir Fry\", \"Tomato Soup\", \
\"Pasta Carbonara\"). Avoid overly long or highly specific, unique names that are unlikely to be \
found in a general recipe database.
You MUST respond with a JSON object matching the specified output schema.
The JSON object should have a key \"recipeNames\", which is an array of strings. Each string \
should be a recipe name.
If no recipes can be found based on the input, the \"recipeNames\" array MUST be empty \
(e.g., { \"recipeNames\": [] }).
Do not include numbering like \"1.\" or \"-\" in the recipe names themselves within the JSON \
array. Ensure recipe names are valid strings and not null.
Aim for 2-3 diverse suggestions if possible.";

/// Render the user turn of the name suggestion prompt.
pub fn recipe_names_user_prompt(request: &SuggestionRequest) -> String {
    format!(
        "Available ingredients: {}\nOptional dietary restrictions: {}\nOptional cuisine \
         preferences: {}",
        request.ingredients,
        request.dietary_restrictions.as_deref().unwrap_or("none"),
        request.cuisine_preferences.as_deref().unwrap_or("none"),
    )
}

pub fn recipe_names_schema() -> JSONSchema {
    json!({
        "type": "object",
        "properties": {
            RECIPE_NAMES_KEY: {
                "type": "array",
                "description": "An array of unique recipe names based on the input. Aim for 2-3 diverse suggestions if possible.",
                "items": { "type": "string" }
            }
        },
        "required": [RECIPE_NAMES_KEY],
        "additionalProperties": false
    })
}

pub fn recipe_image_prompt(recipe_name: &str) -> String {
    format!(
        "Generate a vibrant, appetizing, and photo-realistic image of a dish called: \
         \"{recipe_name}\". The image should show the food prepared and plated attractively. \
         Focus on clear lighting and good composition."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_marks_missing_preferences_as_none() {
        let request = SuggestionRequest::new("eggs, spinach").with_cuisine_preferences("French");
        let prompt = recipe_names_user_prompt(&request);

        assert!(prompt.contains("Available ingredients: eggs, spinach"));
        assert!(prompt.contains("Optional dietary restrictions: none"));
        assert!(prompt.contains("Optional cuisine preferences: French"));
    }

    #[test]
    fn system_prompt_asks_for_empty_array_and_no_numbering() {
        assert!(RECIPE_NAMES_SYSTEM_PROMPT.contains("MUST be empty"));
        assert!(RECIPE_NAMES_SYSTEM_PROMPT.contains("Do not include numbering"));
        assert!(RECIPE_NAMES_SYSTEM_PROMPT.contains("2-3 diverse suggestions"));
    }

    #[test]
    fn schema_requires_the_name_array() {
        let schema = recipe_names_schema();
        assert_eq!(schema["required"], json!([RECIPE_NAMES_KEY]));
        assert_eq!(schema["properties"][RECIPE_NAMES_KEY]["type"], "array");
    }

    #[test]
    fn image_prompt_quotes_the_dish() {
        let prompt = recipe_image_prompt("Tomato Soup");
        assert!(prompt.contains("\"Tomato Soup\""));
        assert!(prompt.contains("photo-realistic"));
    }
}

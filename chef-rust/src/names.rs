use crate::{ChefError, ChefResult, RecipeGenerator, RecipeName, SuggestionRequest};
use std::{collections::HashSet, time::Duration};

/// Upper bound on names kept from one model answer, which also bounds the
/// image fan-out.
pub const MAX_RECIPE_NAMES: usize = 5;

/// Ask the generator for recipe names and clean them up.
///
/// An absent or empty name list is a normal outcome and yields an empty
/// vector. The call is bounded by `timeout`.
pub async fn suggest_names(
    generator: &dyn RecipeGenerator,
    request: &SuggestionRequest,
    timeout: Duration,
) -> ChefResult<Vec<RecipeName>> {
    let names = tokio::time::timeout(timeout, generator.suggest_names(request))
        .await
        .map_err(|_| {
            ChefError::Generation(format!(
                "Recipe name generation timed out after {timeout:?}"
            ))
        })??;

    let names = normalize_names(names.unwrap_or_default());
    tracing::debug!(count = names.len(), "recipe names suggested");
    Ok(names)
}

/// Trim names, strip list markers, drop blanks and case-insensitive
/// duplicates. Keeps first-seen order and at most [`MAX_RECIPE_NAMES`].
pub fn normalize_names<I, S>(names: I) -> Vec<RecipeName>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter_map(|name| RecipeName::new(strip_list_marker(name.as_ref())))
        .filter(|name| seen.insert(name.as_str().to_lowercase()))
        .take(MAX_RECIPE_NAMES)
        .collect()
}

fn strip_list_marker(name: &str) -> &str {
    let name = name.trim();

    if let Some(rest) = name
        .strip_prefix(['-', '*', '•'])
        .filter(|rest| ends_marker(rest))
    {
        return rest.trim_start();
    }

    let digits = name.len() - name.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(rest) = name[digits..]
            .strip_prefix(['.', ')'])
            .filter(|rest| ends_marker(rest))
        {
            return rest.trim_start();
        }
    }

    name
}

/// A list marker is followed by whitespace or stands alone.
fn ends_marker(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with(char::is_whitespace)
}

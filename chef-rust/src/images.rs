use crate::{ChefError, RecipeGenerator, RecipeName, RecipeSuggestion};
use futures::future::join_all;
use std::time::Duration;

const PLACEHOLDER_BASE_SIZE: usize = 400;
const PLACEHOLDER_SIZE_STEP: usize = 20;
const PLACEHOLDER_SIZE_VARIANTS: usize = 5;

/// Deterministic stand-in image for a dish whose picture could not be
/// generated. The size varies with the name length so neighbouring cards
/// look different.
#[must_use]
pub fn placeholder_image_url(recipe_name: &str) -> String {
    let size = PLACEHOLDER_BASE_SIZE
        + (recipe_name.chars().count() % PLACEHOLDER_SIZE_VARIANTS) * PLACEHOLDER_SIZE_STEP;
    format!("https://placehold.co/{size}x{}.png", size - 100)
}

/// Generate one image per name concurrently and pair each name with its
/// image, falling back to [`placeholder_image_url`] per item.
///
/// The output has the same length and order as `names`. Every call is
/// awaited; one failure never affects the others.
pub async fn attach_images(
    generator: &dyn RecipeGenerator,
    names: Vec<RecipeName>,
    timeout: Duration,
) -> Vec<RecipeSuggestion> {
    join_all(
        names
            .into_iter()
            .map(|name| image_for(generator, name, timeout)),
    )
    .await
}

async fn image_for(
    generator: &dyn RecipeGenerator,
    name: RecipeName,
    timeout: Duration,
) -> RecipeSuggestion {
    let outcome = tokio::time::timeout(timeout, generator.generate_image(name.as_str()))
        .await
        .unwrap_or_else(|_| {
            Err(ChefError::Generation(format!(
                "Image generation timed out after {timeout:?}"
            )))
        });

    let image_url = match outcome {
        Ok(image_url) if !image_url.trim().is_empty() => image_url,
        Ok(_) => {
            tracing::warn!(recipe = %name, "image generation returned no image, using placeholder");
            placeholder_image_url(name.as_str())
        }
        Err(error) => {
            tracing::warn!(recipe = %name, %error, "image generation failed, using placeholder");
            placeholder_image_url(name.as_str())
        }
    };

    RecipeSuggestion {
        name: name.into_inner(),
        image_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_size_depends_on_name_length() {
        assert_eq!(
            placeholder_image_url("Soup"),
            "https://placehold.co/480x380.png"
        );
        assert_eq!(
            placeholder_image_url("Pasta"),
            "https://placehold.co/400x300.png"
        );
        assert_eq!(
            placeholder_image_url("Chicken Stir Fry"),
            "https://placehold.co/420x320.png"
        );
    }

    #[test]
    fn placeholder_is_stable_for_the_same_name() {
        assert_eq!(
            placeholder_image_url("Tomato Soup"),
            placeholder_image_url("Tomato Soup")
        );
    }
}

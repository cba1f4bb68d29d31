#![allow(dead_code)]

use async_trait::async_trait;
use fridgechef::{
    ChefError, ChefResult, RecipeDetail, RecipeDirectory, RecipeGenerator, SuggestionRequest,
};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

pub enum NamesBehavior {
    Names(Option<Vec<String>>),
    Fail(String),
    Hang,
}

#[derive(Clone)]
pub enum ImageBehavior {
    Url { url: String, delay: Duration },
    Fail { message: String, delay: Duration },
    Empty,
    Hang,
}

/// Scripted [`RecipeGenerator`] that records what it was asked.
pub struct FakeGenerator {
    names: NamesBehavior,
    images: HashMap<String, ImageBehavior>,
    name_calls: AtomicUsize,
    requests: Mutex<Vec<SuggestionRequest>>,
    image_calls: Mutex<Vec<String>>,
    image_completions: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn with_names(names: &[&str]) -> Self {
        Self::new(NamesBehavior::Names(Some(
            names.iter().map(ToString::to_string).collect(),
        )))
    }

    pub fn new(names: NamesBehavior) -> Self {
        Self {
            names,
            images: HashMap::new(),
            name_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            image_calls: Mutex::new(Vec::new()),
            image_completions: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn image(mut self, name: &str, behavior: ImageBehavior) -> Self {
        self.images.insert(name.to_string(), behavior);
        self
    }

    pub fn name_calls(&self) -> usize {
        self.name_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<SuggestionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn image_calls(&self) -> Vec<String> {
        self.image_calls.lock().unwrap().clone()
    }

    pub fn image_completions(&self) -> Vec<String> {
        self.image_completions.lock().unwrap().clone()
    }
}

pub fn image_url_for(name: &str) -> String {
    format!(
        "https://images.test/{}.png",
        name.to_lowercase().replace(' ', "-")
    )
}

#[async_trait]
impl RecipeGenerator for FakeGenerator {
    async fn suggest_names(
        &self,
        request: &SuggestionRequest,
    ) -> ChefResult<Option<Vec<String>>> {
        self.name_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        match &self.names {
            NamesBehavior::Names(names) => Ok(names.clone()),
            NamesBehavior::Fail(message) => Err(ChefError::Generation(message.clone())),
            NamesBehavior::Hang => std::future::pending().await,
        }
    }

    async fn generate_image(&self, recipe_name: &str) -> ChefResult<String> {
        self.image_calls
            .lock()
            .unwrap()
            .push(recipe_name.to_string());

        let behavior = self
            .images
            .get(recipe_name)
            .cloned()
            .unwrap_or_else(|| ImageBehavior::Url {
                url: image_url_for(recipe_name),
                delay: Duration::ZERO,
            });

        let result = match behavior {
            ImageBehavior::Url { url, delay } => {
                tokio::time::sleep(delay).await;
                Ok(url)
            }
            ImageBehavior::Fail { message, delay } => {
                tokio::time::sleep(delay).await;
                Err(ChefError::Generation(message))
            }
            ImageBehavior::Empty => Ok(String::new()),
            ImageBehavior::Hang => std::future::pending().await,
        };

        self.image_completions
            .lock()
            .unwrap()
            .push(recipe_name.to_string());
        result
    }
}

pub enum LookupBehavior {
    Found(RecipeDetail),
    NotFound,
    Upstream(String),
    Hang,
}

/// Scripted [`RecipeDirectory`].
pub struct FakeDirectory {
    behavior: LookupBehavior,
    lookups: Mutex<Vec<String>>,
}

impl FakeDirectory {
    pub fn new(behavior: LookupBehavior) -> Self {
        Self {
            behavior,
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecipeDirectory for FakeDirectory {
    async fn lookup_by_name(&self, name: &str) -> ChefResult<RecipeDetail> {
        self.lookups.lock().unwrap().push(name.to_string());

        match &self.behavior {
            LookupBehavior::Found(detail) => Ok(detail.clone()),
            LookupBehavior::NotFound => Err(ChefError::NotFound {
                name: name.to_string(),
            }),
            LookupBehavior::Upstream(message) => Err(ChefError::upstream(name, message.clone())),
            LookupBehavior::Hang => std::future::pending().await,
        }
    }
}

pub fn stir_fry_detail() -> RecipeDetail {
    RecipeDetail {
        recipe_name: "Chicken Stir Fry".to_string(),
        ingredients: vec![
            "2 breasts Chicken".to_string(),
            "1 head Broccoli".to_string(),
            "Soy Sauce".to_string(),
        ],
        instructions: "Slice. Fry. Serve.".to_string(),
        source_url: Some("https://recipes.test/stir-fry".to_string()),
        image_url: Some("https://recipes.test/stir-fry.jpg".to_string()),
        ..Default::default()
    }
}

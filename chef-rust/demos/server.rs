use axum::{
    extract::{Path, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use dotenvy::dotenv;
use fridgechef::{ChefConfig, DetailResponse, FridgeChef, SuggestionRequest, SuggestionResponse};
use std::{env, error::Error, sync::Arc};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

type BoxedError = Box<dyn Error + Send + Sync>;

#[derive(Clone)]
struct AppState {
    chef: Arc<FridgeChef>,
}

async fn suggestions_handler(
    State(state): State<AppState>,
    Json(request): Json<SuggestionRequest>,
) -> Json<SuggestionResponse> {
    Json(state.chef.suggest_recipes(request).await.into())
}

async fn recipe_details_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<DetailResponse> {
    Json(state.chef.get_recipe_details(&name).await.into())
}

async fn home_handler() -> &'static str {
    "FridgeChef server. POST /suggestions or GET /recipes/{name}"
}

#[tokio::main]
async fn main() -> Result<(), BoxedError> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ChefConfig::from_env()?;
    let state = AppState {
        chef: Arc::new(FridgeChef::from_config(&config)),
    };

    let app_url = env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    let app = Router::new()
        .route("/", get(home_handler))
        .route("/suggestions", post(suggestions_handler))
        .route("/recipes/{name}", get(recipe_details_handler))
        .layer(
            CorsLayer::new()
                .allow_origin([app_url.parse::<HeaderValue>()?])
                .allow_methods(["GET", "POST", "OPTIONS"].map(|m| m.parse().unwrap()))
                .allow_headers(["content-type"].map(|h| h.parse().unwrap())),
        )
        .with_state(state);

    let port = env::var("PORT").unwrap_or_else(|_| "4000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!("FridgeChef listening on http://localhost:{port}");

    axum::serve(listener, app).await?;

    Ok(())
}

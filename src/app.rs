use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{cards, system, users};
use crate::state::AppState;

/// Build the full router for the given state.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(user_routes())
        .merge(card_routes())
        .fallback(system::not_found)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::user_register).get(users::user_list))
        .route("/users/login", post(users::user_login))
        .route(
            "/users/:id",
            get(users::user_show)
                .put(users::user_update)
                .patch(users::user_business)
                .delete(users::user_delete),
        )
}

fn card_routes() -> Router<AppState> {
    Router::new()
        .route("/cards", get(cards::card_list).post(cards::card_create))
        .route("/cards/my-cards", get(cards::card_my_cards))
        .route(
            "/cards/:id",
            get(cards::card_show)
                .put(cards::card_update)
                .patch(cards::card_like)
                .delete(cards::card_delete),
        )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

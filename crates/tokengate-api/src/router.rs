//! Route definitions for the TokenGate HTTP API.
//!
//! All routes are mounted under `/api`. Each rate-limited route carries its
//! own limiter middleware naming its [`Endpoint`] class; `/api/health` is
//! not limited.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};

use tokengate_auth::Endpoint;

use crate::handlers;
use crate::middleware::rate_limit::enforce_rate_limit;
use crate::state::AppState;

/// Build the API router with every route and its rate-limit class.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes(&state))
        .merge(product_routes(&state))
        .merge(admin_routes(&state));

    Router::new()
        .merge(public_routes(&state))
        .nest("/api", api_routes)
        .with_state(state)
}

/// Service info and health. Registered with full paths so both `/api` and
/// `/api/` reach the banner.
fn public_routes(state: &AppState) -> Router<AppState> {
    let mut router = Router::new();
    for path in ["/api", "/api/"] {
        router = router.route(
            path,
            get(handlers::health::service_info).layer(from_fn_with_state(
                (state.clone(), Endpoint::ServiceInfo),
                enforce_rate_limit,
            )),
        );
    }
    router.route("/api/health", get(handlers::health::health))
}

/// Registration, login, current identity
fn auth_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/auth/register",
            post(handlers::auth::register).layer(from_fn_with_state(
                (state.clone(), Endpoint::Register),
                enforce_rate_limit,
            )),
        )
        .route(
            "/auth/login",
            post(handlers::auth::login).layer(from_fn_with_state(
                (state.clone(), Endpoint::Login),
                enforce_rate_limit,
            )),
        )
        .route(
            "/me",
            get(handlers::auth::me).layer(from_fn_with_state(
                (state.clone(), Endpoint::CurrentIdentity),
                enforce_rate_limit,
            )),
        )
}

/// Product CRUD
fn product_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handlers::product::list_products).layer(from_fn_with_state(
                (state.clone(), Endpoint::ReadResource),
                enforce_rate_limit,
            )),
        )
        .route(
            "/products",
            post(handlers::product::create_product).layer(from_fn_with_state(
                (state.clone(), Endpoint::WriteResource),
                enforce_rate_limit,
            )),
        )
        .route(
            "/products/{id}",
            get(handlers::product::get_product).layer(from_fn_with_state(
                (state.clone(), Endpoint::ReadResource),
                enforce_rate_limit,
            )),
        )
        .route(
            "/products/{id}",
            put(handlers::product::update_product).layer(from_fn_with_state(
                (state.clone(), Endpoint::WriteResource),
                enforce_rate_limit,
            )),
        )
        .route(
            "/products/{id}",
            delete(handlers::product::delete_product).layer(from_fn_with_state(
                (state.clone(), Endpoint::DeleteResource),
                enforce_rate_limit,
            )),
        )
}

/// Admin user management
fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/admin/users",
            get(handlers::admin::list_users).layer(from_fn_with_state(
                (state.clone(), Endpoint::AdminList),
                enforce_rate_limit,
            )),
        )
        .route(
            "/admin/users/{id}",
            delete(handlers::admin::delete_user).layer(from_fn_with_state(
                (state.clone(), Endpoint::AdminMutate),
                enforce_rate_limit,
            )),
        )
        .route(
            "/admin/elevate/{id}",
            post(handlers::admin::elevate_user).layer(from_fn_with_state(
                (state.clone(), Endpoint::AdminMutate),
                enforce_rate_limit,
            )),
        )
}

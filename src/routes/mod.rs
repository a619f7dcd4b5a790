use axum::{extract::Request, middleware, routing::get, Router};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{
    device_controller_handlers::{
        create_device_controller, delete_device_controller, get_device_controller,
        list_device_controllers, update_device_controller,
    },
    field_handlers::{
        create_field, delete_field, get_field, list_device_controllers_for_field, list_fields,
        update_field,
    },
    user_handlers::{
        create_user, delete_user, get_user, list_fields_for_user, list_users, update_user,
    },
};
use crate::store::{dynamo::DynamoFarmStore, memory::MemoryFarmStore, FarmStore};

/// Creates a router with the store selected by the FARM_STORE environment
/// variable (DynamoDB unless set to "memory")
pub async fn create_router() -> Router {
    let use_memory = std::env::var("FARM_STORE")
        .map(|v| v.to_lowercase() == "memory")
        .unwrap_or(false);

    if use_memory {
        info!("Creating router with in-memory store");
        create_router_with_store(Arc::new(MemoryFarmStore::new()))
    } else {
        info!("Creating router with DynamoDB store");
        create_router_with_store(Arc::new(DynamoFarmStore::new().await))
    }
}

/// Creates a router with a given store implementation
pub fn create_router_with_store<S>(store: Arc<S>) -> Router
where
    S: FarmStore + 'static,
{
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Logging middleware to trace all requests
    async fn logging_middleware(
        req: Request,
        next: axum::middleware::Next,
    ) -> impl axum::response::IntoResponse {
        info!(
            "Router received request: method={}, uri={}",
            req.method(),
            req.uri()
        );
        next.run(req).await
    }

    let api_routes = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/:id/fields", get(list_fields_for_user))
        .route("/fields", get(list_fields).post(create_field))
        .route(
            "/fields/:id",
            get(get_field).put(update_field).delete(delete_field),
        )
        .route(
            "/fields/:id/devicecontrollers",
            get(list_device_controllers_for_field),
        )
        .route(
            "/devicecontrollers",
            get(list_device_controllers).post(create_device_controller),
        )
        .route(
            "/devicecontrollers/:id",
            get(get_device_controller)
                .put(update_device_controller)
                .delete(delete_device_controller),
        )
        .with_state(store);

    let router = api_routes
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware));

    // Add a fallback handler for 404s
    router.fallback(|req: Request| async move {
        warn!("No route matched for: {} {}", req.method(), req.uri());
        (
            axum::http::StatusCode::NOT_FOUND,
            "The requested resource was not found".to_string(),
        )
    })
}

//! HTTP boundary of the resource API: state wiring, router and handlers.

use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use application::{ApplicationError, OrderService, ProfileService, ResourceService};
use domain::profile::{PROFILE_ID_PREFIX, PROFILE_ID_WIDTH};
use domain::{PrefixedCounter, Product, Task, User};
use infrastructure::{InMemoryCollection, InMemoryCredentialStore};

pub mod config;
mod error;
mod handlers;
pub mod seed;

pub use config::AppConfig;

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    users: Arc<ResourceService<User>>,
    tasks: Arc<ResourceService<Task>>,
    products: Arc<ResourceService<Product>>,
    orders: Arc<OrderService>,
    profiles: Arc<ProfileService>,
}

/// Creates fresh, seeded in-memory collections and the services over them.
pub fn build_state(config: &AppConfig) -> Result<AppState, ApplicationError> {
    let max = config.max_page_size;

    // 1. Create infrastructure components
    let users = Arc::new(InMemoryCollection::with_records(seed::users())?);
    let tasks = Arc::new(InMemoryCollection::with_records(seed::tasks())?);
    let products = Arc::new(InMemoryCollection::with_records(seed::products())?);
    let orders = Arc::new(InMemoryCollection::<domain::Order>::new());
    let profiles = Arc::new(InMemoryCollection::<domain::UserProfile>::new());
    let credentials = Arc::new(InMemoryCredentialStore::with_credential(
        config.order_username.clone(),
        config.order_password.clone(),
    ));

    // 2. Create application services, injecting dependencies
    Ok(AppState {
        users: Arc::new(ResourceService::<User>::new(users, max)),
        tasks: Arc::new(ResourceService::<Task>::new(tasks, max)),
        products: Arc::new(ResourceService::<Product>::new(products, max)),
        orders: Arc::new(OrderService::new(orders, credentials, max)),
        profiles: Arc::new(ProfileService::new(
            profiles,
            Arc::new(PrefixedCounter::new(PROFILE_ID_PREFIX, PROFILE_ID_WIDTH)),
        )),
    })
}

/// Builds the API router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::ping))
        // Users share the path with profile creation
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_profiles),
        )
        .route("/users/:id", get(handlers::get_profile))
        .route(
            "/users/:id/personalInfo",
            put(handlers::update_personal_info),
        )
        .route("/users/:id/address", put(handlers::update_address))
        .route("/users/:id/preferences", put(handlers::update_preferences))
        // Tasks
        .route(
            "/tasks",
            get(handlers::list_tasks)
                .post(handlers::create_tasks)
                .delete(handlers::delete_tasks),
        )
        .route(
            "/tasks/:id",
            get(handlers::get_task).delete(handlers::delete_task),
        )
        // Products and orders
        .route("/products", get(handlers::list_products))
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_orders),
        )
        .with_state(state)
}

// --- API Handlers ---
use application::{Credentials, OneOrMany, PageQuery, SearchQuery};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{
    Address, GroupUpdate, Order, PersonalInfo, Preferences, ProfileDraft, ProfileId, Task,
};
use tracing::{info, warn};

use crate::AppState;
use crate::error::map_application_error_to_response;

pub(crate) async fn ping() -> &'static str {
    "pong"
}

/// GET /users?page=&size=
pub(crate) async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Response {
    info!(page = query.page, size = query.size, "Received request to list users");
    match state.users.list_page(query).await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(e) => map_application_error_to_response(e),
    }
}

// --- Task Handlers ---

/// GET /tasks
pub(crate) async fn list_tasks(State(state): State<AppState>) -> Response {
    match state.tasks.list_all().await {
        Ok(tasks) => (StatusCode::OK, Json(tasks)).into_response(),
        Err(e) => map_application_error_to_response(e),
    }
}

/// POST /tasks with one task or an array of tasks.
pub(crate) async fn create_tasks(
    State(state): State<AppState>,
    Json(payload): Json<OneOrMany<Task>>,
) -> Response {
    let one = payload.is_one();
    let tasks = payload.into_vec();
    info!(count = tasks.len(), "Received request to create tasks");
    match state.tasks.create(tasks).await {
        Ok(created) => (StatusCode::CREATED, Json(OneOrMany::shaped(one, created))).into_response(),
        Err(e) => map_application_error_to_response(e),
    }
}

/// GET /tasks/:id
pub(crate) async fn get_task(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match state.tasks.get(&id).await {
        Ok(task) => (StatusCode::OK, Json(task)).into_response(),
        Err(e) => map_application_error_to_response(e),
    }
}

/// DELETE /tasks/:id, answering with the removed task.
pub(crate) async fn delete_task(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    info!(task_id = id, "Received request to delete task");
    match state.tasks.delete(&id).await {
        Ok(task) => (StatusCode::OK, Json(task)).into_response(),
        Err(e) => map_application_error_to_response(e),
    }
}

/// DELETE /tasks with a JSON array of ids in the body.
pub(crate) async fn delete_tasks(
    State(state): State<AppState>,
    Json(ids): Json<Vec<u64>>,
) -> Response {
    info!(requested = ids.len(), "Received request to delete tasks");
    match state.tasks.delete_many(&ids).await {
        Ok(removed) => (StatusCode::OK, Json(removed)).into_response(),
        Err(e) => map_application_error_to_response(e),
    }
}

// --- Product Handlers ---

/// GET /products?limit=&q=
pub(crate) async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    info!(limit = query.limit, q = ?query.q, "Received product search");
    match state.products.search("name", &query).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => map_application_error_to_response(e),
    }
}

// --- Order Handlers ---

/// GET /orders?page=&size=
pub(crate) async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Response {
    match state.orders.list_page(query).await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(e) => map_application_error_to_response(e),
    }
}

/// POST /orders?username=&password=, answering 200 rather than 201.
pub(crate) async fn create_orders(
    State(state): State<AppState>,
    Query(credentials): Query<Credentials>,
    Json(payload): Json<OneOrMany<Order>>,
) -> Response {
    let one = payload.is_one();
    let orders = payload.into_vec();
    info!(count = orders.len(), "Received request to create orders");
    match state.orders.create(&credentials, orders).await {
        Ok(created) => (StatusCode::OK, Json(OneOrMany::shaped(one, created))).into_response(),
        Err(e) => map_application_error_to_response(e),
    }
}

// --- Profile Handlers ---

/// GET /users/:id
pub(crate) async fn get_profile(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.profiles.get(&ProfileId::new(id)).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => map_application_error_to_response(e),
    }
}

/// POST /users with one profile draft or an array of drafts.
pub(crate) async fn create_profiles(
    State(state): State<AppState>,
    Json(payload): Json<OneOrMany<ProfileDraft>>,
) -> Response {
    let one = payload.is_one();
    let drafts = payload.into_vec();
    info!(count = drafts.len(), "Received request to create profiles");
    match state.profiles.create(drafts).await {
        Ok(created) => (StatusCode::CREATED, Json(OneOrMany::shaped(one, created))).into_response(),
        Err(e) => map_application_error_to_response(e),
    }
}

/// PUT /users/:id/personalInfo
pub(crate) async fn update_personal_info(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(info): Json<PersonalInfo>,
) -> Response {
    update_profile_group(state, id, GroupUpdate::PersonalInfo(info)).await
}

/// PUT /users/:id/address
pub(crate) async fn update_address(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(address): Json<Address>,
) -> Response {
    update_profile_group(state, id, GroupUpdate::Address(address)).await
}

/// PUT /users/:id/preferences
pub(crate) async fn update_preferences(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(preferences): Json<Preferences>,
) -> Response {
    update_profile_group(state, id, GroupUpdate::Preferences(preferences)).await
}

async fn update_profile_group(state: AppState, id: String, update: GroupUpdate) -> Response {
    let group = update.group();
    info!(profile_id = %id, group = %group, "Received request to update profile group");
    match state.profiles.update(&ProfileId::new(id), update).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => {
            warn!(group = %group, "Profile update failed: {}", e);
            map_application_error_to_response(e)
        }
    }
}

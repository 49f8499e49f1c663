use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};

use crate::accounts::{AccountError, Operation};
use crate::cache::CacheStats;
use crate::server::AppState;
use crate::templates;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
    cache: CacheHealth,
}

#[derive(Serialize)]
struct CacheHealth {
    #[serde(flatten)]
    stats: CacheStats,
    redis_available: bool,
}

/// Body of `/register` and `/signup`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Body of `/add` and `/delete`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HobbyForm {
    pub task: String,
    pub user: String,
}

/// Body of `/edit`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenameHobbyForm {
    pub user: String,
    pub oldtask: String,
    pub newtask: String,
}

pub async fn index() -> Html<String> {
    Html(templates::render_index())
}

pub async fn register_page() -> Html<String> {
    Html(templates::render_register())
}

pub async fn login_page() -> Html<String> {
    Html(templates::render_login())
}

pub async fn logout() -> Html<String> {
    Html(templates::render_index())
}

/// Liveness plus cache reachability. A configured but unreachable Redis
/// reports `degraded` with 503.
pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    let cache = state.accounts.cache();
    let stats = cache.stats();
    let redis_available = cache.is_redis_available().await;
    let degraded = stats.mode == "redis" && !redis_available;

    let (code, status) = if degraded {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    } else {
        (StatusCode::OK, "ok")
    };
    let body = HealthResponse {
        status,
        cache: CacheHealth {
            stats,
            redis_available,
        },
    };
    (code, Json(body))
}

pub async fn register(State(state): State<AppState>, Form(form): Form<CredentialsForm>) -> Response {
    match state.accounts.register(&form.username, &form.password).await {
        Ok(()) => Redirect::to("/login").into_response(),
        Err(e) => failure(Operation::Register, &form.username, e),
    }
}

pub async fn login(State(state): State<AppState>, Form(form): Form<CredentialsForm>) -> Response {
    match state.accounts.login(&form.username, &form.password).await {
        Ok(outcome) => home(&form.username, &outcome.hobbies),
        Err(e) => failure(Operation::Login, &form.username, e),
    }
}

pub async fn add_hobby(State(state): State<AppState>, Form(form): Form<HobbyForm>) -> Response {
    let result = state.accounts.add_hobby(&form.user, &form.task).await;
    hobbies_response(&form.user, result)
}

pub async fn delete_hobby(State(state): State<AppState>, Form(form): Form<HobbyForm>) -> Response {
    let result = state.accounts.remove_hobby(&form.user, &form.task).await;
    hobbies_response(&form.user, result)
}

pub async fn edit_hobby(
    State(state): State<AppState>,
    Form(form): Form<RenameHobbyForm>,
) -> Response {
    let result = state
        .accounts
        .rename_hobby(&form.user, &form.oldtask, &form.newtask)
        .await;
    hobbies_response(&form.user, result)
}

pub async fn clear_cache(State(state): State<AppState>) -> Response {
    match state.accounts.clear_cache().await {
        Ok(()) => "Cache cleared".into_response(),
        Err(e) => failure(Operation::ClearCache, "", e),
    }
}

fn hobbies_response(username: &str, result: Result<Vec<String>, AccountError>) -> Response {
    match result {
        Ok(hobbies) => home(username, &hobbies),
        Err(e) => failure(Operation::UpdateHobbies, username, e),
    }
}

fn home(username: &str, hobbies: &[String]) -> Response {
    Html(templates::render_home(username, hobbies)).into_response()
}

/// Logs the failure and answers with a plain-text message and status 200.
fn failure(operation: Operation, username: &str, err: AccountError) -> Response {
    if err.is_client_outcome() {
        tracing::info!(operation = operation.as_str(), username, error = %err, "request rejected");
    } else {
        tracing::error!(operation = operation.as_str(), username, error = %err, "request failed");
    }
    err.user_message(operation).into_response()
}

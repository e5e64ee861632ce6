//! REST server for the node fleet UI: an in-memory collection of nodes and
//! roles behind the legacy `/node/` and `/role/` API the browser controller
//! was built against.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::{
    domain::{DomainError, Node, Role},
    error::{ApiError, ErrorCode},
    protocol::{NodeDraft, NodeListResponse, RoleDraft, RoleListResponse},
};
use tracing::info;

mod config;
mod registry;

use config::load_settings;
use registry::{NodeRegistry, RoleRegistry};

#[derive(Clone, Default)]
struct AppState {
    nodes: NodeRegistry,
    roles: RoleRegistry,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let app = build_router(Arc::new(AppState::default()));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/node/", get(list_nodes).post(create_node))
        .route("/node/:name", get(get_node).put(update_node))
        .route("/role/", get(list_roles).post(create_role))
        .route("/role/:name", get(get_role).put(update_role))
        .with_state(state)
}

fn validation(err: DomainError) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::new(ErrorCode::Validation, err.to_string())),
    )
}

fn bad_request(message: &str) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::new(ErrorCode::Validation, message)),
    )
}

fn not_found(message: &str) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(ErrorCode::NotFound, message)),
    )
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_nodes(State(state): State<Arc<AppState>>) -> Json<NodeListResponse> {
    Json(NodeListResponse {
        nodes: state.nodes.all().await,
    })
}

async fn create_node(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<NodeDraft>,
) -> ApiResult<StatusCode> {
    let node = Node::new(draft.name, draft.role).map_err(validation)?;
    state.nodes.save(node).await;
    Ok(StatusCode::OK)
}

async fn get_node(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Node>> {
    match state.nodes.find(&name).await {
        Some(node) => Ok(Json(node)),
        None => Err(not_found("node not found")),
    }
}

async fn update_node(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(node): Json<Node>,
) -> ApiResult<StatusCode> {
    let node = Node::new(node.name, node.role).map_err(validation)?;
    if node.name != name {
        return Err(bad_request("inconsistent node names"));
    }
    if state.nodes.find(&name).await.is_none() {
        return Err(not_found("node not found"));
    }
    state.nodes.save(node).await;
    Ok(StatusCode::OK)
}

async fn list_roles(State(state): State<Arc<AppState>>) -> Json<RoleListResponse> {
    Json(RoleListResponse {
        roles: state.roles.all().await,
    })
}

async fn create_role(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<RoleDraft>,
) -> ApiResult<StatusCode> {
    let role = Role::new(draft.name).map_err(validation)?;
    state.roles.save(role).await;
    Ok(StatusCode::OK)
}

async fn get_role(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Role>> {
    match state.roles.find(&name).await {
        Some(role) => Ok(Json(role)),
        None => Err(not_found("role not found")),
    }
}

async fn update_role(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(role): Json<Role>,
) -> ApiResult<StatusCode> {
    let role = Role::new(role.name).map_err(validation)?;
    if role.name != name {
        return Err(bad_request("inconsistent role names"));
    }
    if state.roles.find(&name).await.is_none() {
        return Err(not_found("role not found"));
    }
    state.roles.save(role).await;
    Ok(StatusCode::OK)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;

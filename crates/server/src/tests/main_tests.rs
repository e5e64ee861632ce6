use super::*;
use axum::{body, body::Body, http::Request};
use tower::ServiceExt;

fn test_app() -> Router {
    build_router(Arc::new(AppState::default()))
}

fn json_post(path: &str, payload: serde_json::Value) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

fn json_put(path: &str, payload: serde_json::Value) -> Request<Body> {
    Request::put(path)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = test_app();
    let response = app
        .oneshot(Request::get("/healthz").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(bytes.as_ref(), b"ok");
}

#[tokio::test]
async fn create_then_list_nodes_preserves_order_and_wire_shape() {
    let app = test_app();

    for (name, role) in [("n1", "worker"), ("n2", "master")] {
        let response = app
            .clone()
            .oneshot(json_post(
                "/node/",
                serde_json::json!({"Name": name, "Role": role}),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(Request::get("/node/").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        serde_json::json!({"Nodes": [
            {"Name": "n1", "Role": "worker"},
            {"Name": "n2", "Role": "master"},
        ]})
    );
}

#[tokio::test]
async fn create_node_rejects_empty_fields_with_error_envelope() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_post(
            "/node/",
            serde_json::json!({"Name": "", "Role": "worker"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = read_json(response).await;
    assert_eq!(envelope["code"], "validation");
    assert_eq!(envelope["message"], "empty name");

    let response = app
        .oneshot(json_post(
            "/node/",
            serde_json::json!({"Name": "n1", "Role": ""}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["message"], "empty role");
}

#[tokio::test]
async fn get_node_by_name_or_404() {
    let app = test_app();
    app.clone()
        .oneshot(json_post(
            "/node/",
            serde_json::json!({"Name": "n1", "Role": "worker"}),
        ))
        .await
        .expect("response");

    let response = app
        .clone()
        .oneshot(Request::get("/node/n1").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        serde_json::json!({"Name": "n1", "Role": "worker"})
    );

    let response = app
        .oneshot(Request::get("/node/n42").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["code"], "not_found");
}

#[tokio::test]
async fn update_node_replaces_existing_entry() {
    let app = test_app();
    app.clone()
        .oneshot(json_post(
            "/node/",
            serde_json::json!({"Name": "n1", "Role": "worker"}),
        ))
        .await
        .expect("response");

    let response = app
        .clone()
        .oneshot(json_put(
            "/node/n1",
            serde_json::json!({"Name": "n1", "Role": "db"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::get("/node/n1").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(read_json(response).await["Role"], "db");
}

#[tokio::test]
async fn update_node_rejects_name_mismatch_and_unknown_node() {
    let app = test_app();
    app.clone()
        .oneshot(json_post(
            "/node/",
            serde_json::json!({"Name": "n1", "Role": "worker"}),
        ))
        .await
        .expect("response");

    let response = app
        .clone()
        .oneshot(json_put(
            "/node/n1",
            serde_json::json!({"Name": "n2", "Role": "worker"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["message"], "inconsistent node names");

    let response = app
        .oneshot(json_put(
            "/node/n9",
            serde_json::json!({"Name": "n9", "Role": "worker"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn role_routes_round_trip() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_post("/role/", serde_json::json!({"Name": "db"})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_post("/role/", serde_json::json!({"Name": ""})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(Request::get("/role/").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(
        read_json(response).await,
        serde_json::json!({"Roles": [{"Name": "db"}]})
    );

    let response = app
        .oneshot(Request::get("/role/db").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, serde_json::json!({"Name": "db"}));
}

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, CloudApp, DEMO_PASSWORD, DEMO_USERNAME};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- login ---

#[tokio::test]
async fn login_with_demo_credentials() {
    let body = format!(r#"{{"username":"{DEMO_USERNAME}","password":"{DEMO_PASSWORD}"}}"#);
    let resp = app()
        .oneshot(json_request("POST", "/api/user/login", &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let payload: Value = body_json(resp).await;
    assert_eq!(payload["code"], 0);
    assert_eq!(payload["data"]["username"], DEMO_USERNAME);
}

#[tokio::test]
async fn login_failure_is_reported_with_200() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/user/login",
            r#"{"username":"a","password":"b"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let payload: Value = body_json(resp).await;
    assert_eq!(payload["code"], 1);
    assert_eq!(payload["msg"], "bad credentials");
}

#[tokio::test]
async fn login_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/user/login", r#"{"user":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- model catalog ---

#[tokio::test]
async fn list_models_pages_with_limit_and_skip() {
    let resp = app()
        .oneshot(empty_request("GET", "/parse/classes/models?limit=2&skip=2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let payload: Value = body_json(resp).await;
    let results: Vec<CloudApp> = serde_json::from_value(payload["results"].clone()).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].object_id, "m3");
    assert_eq!(payload["current"], 2);
    assert_eq!(payload["size"], 2);
    assert_eq!(payload["total"], 5);
}

#[tokio::test]
async fn list_models_without_paging_returns_everything() {
    let resp = app()
        .oneshot(empty_request("GET", "/parse/classes/models"))
        .await
        .unwrap();

    let payload: Value = body_json(resp).await;
    assert_eq!(payload["results"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn update_unknown_model_returns_404_payload() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/parse/classes/models/nope",
            r#"{"name":"x"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let payload: Value = body_json(resp).await;
    assert_eq!(payload["code"], 404);
}

// --- echo and broken ---

#[tokio::test]
async fn echo_describes_the_request() {
    let resp = app()
        .oneshot(json_request("PATCH", "/echo/a/b?x=1&y=two", r#"{"k":true}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let payload: Value = body_json(resp).await;
    assert_eq!(payload["method"], "PATCH");
    assert_eq!(payload["path"], "/echo/a/b");
    assert_eq!(payload["query"], "x=1&y=two");
    assert_eq!(payload["content_type"], "application/json");
    assert_eq!(payload["body"]["k"], true);
    assert_eq!(payload["has_body"], true);
}

#[tokio::test]
async fn echo_without_body() {
    let resp = app().oneshot(empty_request("DELETE", "/echo")).await.unwrap();

    let payload: Value = body_json(resp).await;
    assert_eq!(payload["method"], "DELETE");
    assert_eq!(payload["has_body"], false);
    assert!(payload["query"].is_null());
    assert!(payload["content_type"].is_null());
}

#[tokio::test]
async fn broken_returns_non_json() {
    let resp = app().oneshot(empty_request("GET", "/broken")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert!(serde_json::from_slice::<Value>(&body).is_err());
}

// --- full catalog lifecycle ---

#[tokio::test]
async fn catalog_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/parse/classes/models",
            r#"{"name":"mistral-7b","tags":["llm"]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: CloudApp = body_json(resp).await;
    assert_eq!(created.name, "mistral-7b");
    let id = created.object_id.clone();

    // list contains it
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/parse/classes/models"))
        .await
        .unwrap();
    let payload: Value = body_json(resp).await;
    assert_eq!(payload["total"], 6);

    // update, partial: only description
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/parse/classes/models/{id}"),
            r#"{"description":"7B instruct"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: CloudApp = body_json(resp).await;
    assert_eq!(updated.name, "mistral-7b"); // unchanged
    assert_eq!(updated.description, "7B instruct");

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/parse/classes/models/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let payload: Value = body_json(resp).await;
    assert_eq!(payload, serde_json::json!({}));

    // delete again: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/parse/classes/models/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

//! Stand-in for the dashboard backends: the auth API, the Parse-style data
//! API, and an echo endpoint that describes the request it received.
//!
//! Every response body is JSON except `/broken`. Application failures are
//! reported the way the real backends do, as `{code, msg}` with HTTP 200.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, RawQuery, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    routing::{any, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEMO_USERNAME: &str = "admin";
pub const DEMO_PASSWORD: &str = "admin123";
pub const DEMO_TOKEN: &str = "1234567890";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CloudApp {
    #[serde(rename = "objectId")]
    pub object_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub modelscope_path: String,
    #[serde(default)]
    pub modelsize: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Deserialize)]
pub struct CreateCloudApp {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modelsize: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdateCloudApp {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub limit: Option<usize>,
    pub skip: Option<usize>,
}

pub type Catalog = Arc<RwLock<Vec<CloudApp>>>;

const SEEDED_AT: &str = "2024-05-01T00:00:00.000Z";

fn seed_app(object_id: &str, name: &str, modelsize: &str, tags: &[&str]) -> CloudApp {
    CloudApp {
        object_id: object_id.to_string(),
        name: name.to_string(),
        description: format!("{name} inference image"),
        icon: format!("/icons/{object_id}.png"),
        modelscope_path: format!("gridnet/{name}"),
        modelsize: modelsize.to_string(),
        path: format!("/models/{name}"),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        created_at: SEEDED_AT.to_string(),
        updated_at: SEEDED_AT.to_string(),
    }
}

/// The catalog every fresh server starts with.
pub fn seed_catalog() -> Vec<CloudApp> {
    vec![
        seed_app("m1", "qwen2-7b", "15GB", &["llm"]),
        seed_app("m2", "llama3-8b", "16GB", &["llm"]),
        seed_app("m3", "sdxl", "7GB", &["image"]),
        seed_app("m4", "whisper-large", "3GB", &["audio"]),
        seed_app("m5", "bge-m3", "2GB", &["embedding"]),
    ]
}

pub fn app() -> Router {
    let catalog: Catalog = Arc::new(RwLock::new(seed_catalog()));
    Router::new()
        .route("/api/user/login", post(login))
        .route("/parse/classes/models", get(list_apps).post(create_app))
        .route(
            "/parse/classes/models/{id}",
            put(update_app).delete(delete_app),
        )
        .route("/echo", any(echo))
        .route("/echo/{*rest}", any(echo))
        .route("/broken", get(broken))
        .with_state(catalog)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn demo_user() -> Value {
    json!({
        "DeletedAt": null,
        "access_token": DEMO_TOKEN,
        "display_name": "Administrator",
        "email": "admin@gridnet.local",
        "group": "default",
        "id": 1,
        "quota": 500000,
        "role": 100,
        "status": 1,
        "username": DEMO_USERNAME,
    })
}

async fn login(Json(input): Json<LoginRequest>) -> Json<Value> {
    if input.username == DEMO_USERNAME && input.password == DEMO_PASSWORD {
        Json(json!({ "code": 0, "msg": "ok", "data": demo_user() }))
    } else {
        Json(json!({ "code": 1, "msg": "bad credentials" }))
    }
}

async fn list_apps(State(catalog): State<Catalog>, Query(page): Query<PageQuery>) -> Json<Value> {
    let apps = catalog.read().await;
    let skip = page.skip.unwrap_or(0);
    let limit = page.limit.unwrap_or(apps.len());
    let results: Vec<&CloudApp> = apps.iter().skip(skip).take(limit).collect();
    let current = if limit == 0 { 1 } else { skip / limit + 1 };
    Json(json!({
        "results": results,
        "current": current,
        "size": results.len(),
        "total": apps.len(),
    }))
}

async fn create_app(
    State(catalog): State<Catalog>,
    Json(input): Json<CreateCloudApp>,
) -> (StatusCode, Json<CloudApp>) {
    let object_id = Uuid::new_v4().simple().to_string();
    let app = CloudApp {
        path: format!("/models/{}", input.name),
        modelscope_path: format!("gridnet/{}", input.name),
        icon: String::new(),
        object_id,
        name: input.name,
        description: input.description,
        modelsize: input.modelsize,
        tags: input.tags,
        created_at: SEEDED_AT.to_string(),
        updated_at: SEEDED_AT.to_string(),
    };
    catalog.write().await.push(app.clone());
    (StatusCode::CREATED, Json(app))
}

fn not_found(id: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "code": 404, "msg": format!("object {id} not found") })),
    )
}

async fn update_app(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCloudApp>,
) -> Result<Json<CloudApp>, (StatusCode, Json<Value>)> {
    let mut apps = catalog.write().await;
    let app = apps
        .iter_mut()
        .find(|a| a.object_id == id)
        .ok_or_else(|| not_found(&id))?;
    if let Some(name) = input.name {
        app.name = name;
    }
    if let Some(description) = input.description {
        app.description = description;
    }
    if let Some(tags) = input.tags {
        app.tags = tags;
    }
    Ok(Json(app.clone()))
}

async fn delete_app(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut apps = catalog.write().await;
    let before = apps.len();
    apps.retain(|a| a.object_id != id);
    if apps.len() == before {
        return Err(not_found(&id));
    }
    Ok(Json(json!({})))
}

/// Describe the received request: method, path, raw query, selected
/// headers and the body (parsed as JSON when possible).
async fn echo(
    method: Method,
    uri: Uri,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let has_body = !body.is_empty();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": query,
        "content_type": header_value(header::CONTENT_TYPE.as_str()),
        "app_id": header_value("x-parse-application-id"),
        "has_body": has_body,
        "body": body,
    }))
}

async fn broken() -> &'static str {
    "<html>upstream unavailable</html>"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloud_app_serializes_wire_names() {
        let app = seed_app("m9", "demo", "1GB", &["llm"]);
        let json = serde_json::to_value(&app).unwrap();
        assert_eq!(json["objectId"], "m9");
        assert_eq!(json["createdAt"], SEEDED_AT);
        assert_eq!(json["tags"][0], "llm");
    }

    #[test]
    fn seed_catalog_ids_are_unique() {
        let catalog = seed_catalog();
        let mut ids: Vec<_> = catalog.iter().map(|a| a.object_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn create_cloud_app_defaults_optional_fields() {
        let input: CreateCloudApp = serde_json::from_str(r#"{"name":"tiny"}"#).unwrap();
        assert_eq!(input.name, "tiny");
        assert!(input.tags.is_empty());
    }

    #[test]
    fn create_cloud_app_rejects_missing_name() {
        let result: Result<CreateCloudApp, _> = serde_json::from_str(r#"{"tags":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_cloud_app_all_fields_optional() {
        let input: UpdateCloudApp = serde_json::from_str("{}").unwrap();
        assert!(input.name.is_none());
        assert!(input.tags.is_none());
    }
}

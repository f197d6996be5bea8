#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{ACCEPT_LANGUAGE, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use b2b_dashboard::config::{AppConfig, AppState};
use b2b_dashboard::db::SnapshotRepository;
use b2b_dashboard::router::router;

/// Router completo com os snapshots embutidos e o limite padrão de visualizações.
pub async fn build_test_app() -> Router {
    build_test_app_with(AppConfig::default()).await
}

pub async fn build_test_app_with(config: AppConfig) -> Router {
    let repo = SnapshotRepository::load(None).await.expect("bundled snapshots load");
    router(AppState::with_repository(&config, repo))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_with_language(app: Router, uri: &str, language: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(language)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, None).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    language: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(language) = language {
        builder = builder.header(ACCEPT_LANGUAGE, language);
    }

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Procura um card pelo rótulo em qualquer nível da árvore.
pub fn find_card<'a>(node: &'a serde_json::Value, label: &str) -> Option<&'a serde_json::Value> {
    match node {
        serde_json::Value::Object(map) => {
            if map.get("kind").and_then(|k| k.as_str()) == Some("metricCard")
                && map.get("label").and_then(|l| l.as_str()) == Some(label)
            {
                return Some(node);
            }
            map.values().find_map(|child| find_card(child, label))
        }
        serde_json::Value::Array(items) => items.iter().find_map(|child| find_card(child, label)),
        _ => None,
    }
}

//! Integration tests for resolving npm packages to GitHub repositories using wiremock

use core::time::Duration;
use repo_score_lib::facts::{npm, resolve};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_package(server: &MockServer, url_path: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> npm::Client {
    npm::Client::new(&server.uri(), Duration::from_secs(10)).expect("client")
}

#[tokio::test]
async fn test_resolve_npm_package() {
    let server = MockServer::start().await;
    mock_package(
        &server,
        "/express",
        json!({ "name": "express", "repository": { "type": "git", "url": "git+https://github.com/expressjs/express.git" } }),
    )
    .await;

    let spec = resolve("https://www.npmjs.com/package/express", &client(&server)).await.unwrap();
    assert_eq!(spec.owner(), "expressjs");
    assert_eq!(spec.repo(), "express");
}

#[tokio::test]
async fn test_resolve_repository_shorthand() {
    let server = MockServer::start().await;
    mock_package(&server, "/react", json!({ "name": "react", "repository": "github:facebook/react" })).await;

    let spec = resolve("https://npmjs.com/package/react", &client(&server)).await.unwrap();
    assert_eq!(spec.to_string(), "facebook/react");
}

#[tokio::test]
async fn test_resolve_scoped_package() {
    let server = MockServer::start().await;
    mock_package(
        &server,
        "/@types%2Fnode",
        json!({ "name": "@types/node", "repository": { "url": "https://github.com/DefinitelyTyped/DefinitelyTyped.git" } }),
    )
    .await;

    let spec = resolve("https://www.npmjs.com/package/@types/node", &client(&server)).await.unwrap();
    assert_eq!(spec.owner(), "DefinitelyTyped");
    assert_eq!(spec.repo(), "DefinitelyTyped");
}

#[tokio::test]
async fn test_package_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Not found" })))
        .mount(&server)
        .await;

    let err = resolve("https://www.npmjs.com/package/no-such-package", &client(&server)).await.unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn test_package_without_repository() {
    let server = MockServer::start().await;
    mock_package(&server, "/lonely", json!({ "name": "lonely" })).await;

    let err = resolve("https://www.npmjs.com/package/lonely", &client(&server)).await.unwrap_err();
    assert!(err.to_string().contains("does not declare a repository"));
}

#[tokio::test]
async fn test_package_hosted_elsewhere() {
    let server = MockServer::start().await;
    mock_package(
        &server,
        "/elsewhere",
        json!({ "name": "elsewhere", "repository": { "url": "git+https://gitlab.com/some/project.git" } }),
    )
    .await;

    let err = resolve("https://www.npmjs.com/package/elsewhere", &client(&server)).await.unwrap_err();
    assert!(err.to_string().contains("not hosted on GitHub"));
}

//! End-to-end tests for the score command, with GitHub and npm served by wiremock

use camino::{Utf8Path, Utf8PathBuf};
use repo_score_lib::Host;
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test host that captures output to in-memory buffers.
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    const fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
            exit_code: None,
        }
    }

    fn output_lines(&self) -> Vec<Value> {
        String::from_utf8_lossy(&self.output_buf)
            .lines()
            .map(|line| serde_json::from_str(line).expect("each output line is JSON"))
            .collect()
    }

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

async fn mock_graphql(server: &MockServer, marker: &str, data: Value) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains(marker))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .mount(server)
        .await;
}

/// A GitHub where every repository is MIT licensed, well documented, has ten authors and no
/// open issues
async fn healthy_github() -> MockServer {
    let server = MockServer::start().await;

    mock_graphql(&server, "viewer", json!({ "viewer": { "login": "tester" } })).await;
    mock_graphql(&server, "licenseInfo", json!({ "repository": { "licenseInfo": { "spdxId": "MIT" } } })).await;

    let edges: Vec<_> = (0..10)
        .map(|i| json!({ "node": { "author": { "name": format!("dev{i}"), "email": null }, "committedDate": "2024-05-01T10:00:00Z" } }))
        .collect();
    mock_graphql(
        &server,
        "history(first: 100)",
        json!({ "repository": { "defaultBranchRef": { "target": { "history": { "edges": edges } } } } }),
    )
    .await;

    mock_graphql(
        &server,
        "HEAD:README.md",
        json!({ "repository": {
            "readme": { "text": "# Installation\n# Usage\n# API\n# Examples\n" },
            "readmeLower": null,
            "readmePlain": null
        } }),
    )
    .await;

    mock_graphql(&server, "issues(first: 100, states: OPEN)", json!({ "repository": { "issues": { "edges": [] } } })).await;

    server
}

/// Write a config that points at the mock servers and makes clones fail fast
fn write_config(dir: &Utf8Path, github: &MockServer, npm: &MockServer) -> Utf8PathBuf {
    let config_path = dir.join("repo-score.toml");
    let origin = url::Url::from_directory_path(dir.join("no-such-origin")).expect("file URL");

    let text = format!(
        r#"
metric_timeout = "20s"
request_timeout = "5s"
git_timeout = "20s"
github_api_url = "{}"
github_web_url = "{origin}"
npm_registry_url = "{}"
clone_dir = "{}"
lint_command = ["true"]
"#,
        github.uri(),
        npm.uri(),
        dir.join("clones"),
    );
    std::fs::write(&config_path, text).expect("write config");
    config_path
}

async fn run_with(host: &mut TestHost, config: &Utf8Path, urls: &Utf8Path) -> repo_score_lib::Result<()> {
    repo_score_lib::run(
        host,
        [
            "repo-score",
            "--github-token",
            "test-token",
            "--log-level",
            "none",
            "-c",
            config.as_str(),
            urls.as_str(),
        ],
    )
    .await
}

#[tokio::test]
async fn test_scores_github_and_npm_urls() {
    let github = healthy_github().await;
    let npm = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/express"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "express",
            "repository": { "type": "git", "url": "git+https://github.com/expressjs/express.git" }
        })))
        .mount(&npm)
        .await;

    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = Utf8Path::from_path(tmp.path()).expect("UTF-8 temp dir");
    let config = write_config(dir, &github, &npm);
    let urls = dir.join("urls.txt");
    std::fs::write(&urls, "https://github.com/lodash/lodash\n\nhttps://www.npmjs.com/package/express\n").expect("write urls");

    let mut host = TestHost::new();
    run_with(&mut host, &config, &urls).await.expect("scoring succeeds");

    let lines = host.output_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["URL"], "https://github.com/lodash/lodash");
    assert_eq!(lines[1]["URL"], "https://www.npmjs.com/package/express");

    for line in &lines {
        assert_eq!(line["License"], 1.0);
        assert_eq!(line["BusFactor"], 1.0);
        assert_eq!(line["RampUp"], 1.0);
        assert_eq!(line["ResponsiveMaintainer"], 1.0);

        // the clone origin does not exist
        assert_eq!(line["Correctness"], 0.0);
        assert_eq!(line["Correctness_Latency"], -1.0);

        assert_eq!(line["NetScore"], 0.875);
        assert!(line["License_Latency"].as_f64().unwrap() >= 0.0);
    }

    assert_eq!(host.exit_code, None);
}

#[tokio::test]
async fn test_unresolvable_url_fails_after_processing_all() {
    let github = healthy_github().await;
    let npm = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&npm)
        .await;

    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = Utf8Path::from_path(tmp.path()).expect("UTF-8 temp dir");
    let config = write_config(dir, &github, &npm);
    let urls = dir.join("urls.txt");
    std::fs::write(
        &urls,
        "https://www.npmjs.com/package/ghost\nhttps://github.com/lodash/lodash\nhttps://example.com/whatever\n",
    )
    .expect("write urls");

    let mut host = TestHost::new();
    let err = run_with(&mut host, &config, &urls).await.unwrap_err();
    assert!(err.to_string().contains("2 of 3"));
    assert_eq!(host.exit_code, Some(1));

    // the resolvable URL in the middle is still scored
    let lines = host.output_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["URL"], "https://github.com/lodash/lodash");

    let errors = host.error_str();
    assert!(errors.contains("https://www.npmjs.com/package/ghost"));
    assert!(errors.contains("https://example.com/whatever"));
}

#[tokio::test]
async fn test_failing_github_degrades_every_github_metric() {
    let github = MockServer::start().await;
    mock_graphql(&github, "viewer", json!({ "viewer": { "login": "tester" } })).await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&github)
        .await;
    let npm = MockServer::start().await;

    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = Utf8Path::from_path(tmp.path()).expect("UTF-8 temp dir");
    let config = write_config(dir, &github, &npm);
    let urls = dir.join("urls.txt");
    std::fs::write(&urls, "https://github.com/a/b\n").expect("write urls");

    let mut host = TestHost::new();
    run_with(&mut host, &config, &urls).await.expect("metric failures do not fail the command");

    let lines = host.output_lines();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert_eq!(line["NetScore"], 0.0);
    assert_eq!(line["NetScore_Latency"], -5.0);
    for key in ["RampUp", "Correctness", "BusFactor", "ResponsiveMaintainer", "License"] {
        assert_eq!(line[key], 0.0, "{key}");
        assert_eq!(line[format!("{key}_Latency")], -1.0, "{key}");
    }
}

#[test]
fn test_host_streams_append_across_writes() {
    use std::io::Write;

    let mut host = TestHost::new();
    writeln!(host.output(), "{{\"URL\":\"a\"}}").unwrap();
    writeln!(host.output(), "{{\"URL\":\"b\"}}").unwrap();
    writeln!(host.error(), "first").unwrap();
    writeln!(host.error(), "second").unwrap();

    assert_eq!(host.output_lines().len(), 2);
    assert_eq!(host.error_str(), "first\nsecond\n");
}

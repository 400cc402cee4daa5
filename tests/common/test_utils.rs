use farm_advisor::client::AdvisorClient;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Base URL with nothing listening behind it.
pub const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";

/// Start a fake backend whose `/ask` endpoint always responds with `template`.
pub async fn start_backend(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

pub fn answer_template(answer: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "answer": answer }))
}

pub fn json_template(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn client_for(server: &MockServer) -> AdvisorClient {
    AdvisorClient::new(server.uri())
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write a config YAML file into `dir` and return its path
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> String {
    let config_path = dir.path().join("config.yaml");
    tokio::fs::write(&config_path, content)
        .await
        .expect("Failed to write config file");
    config_path.to_string_lossy().to_string()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
backend:
  base_url: "http://advisor.internal:8000"

chat:
  language: "te"
  offline: true

speech:
  program: "/usr/bin/espeak-ng"

logs:
  level: "debug"
"#;

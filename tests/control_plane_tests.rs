mod support;

use std::sync::Arc;

use conductor::adapter::inbound::control::ControlPlaneServer;
use conductor::application::state::RuntimeStatus;
use conductor::domain::Phase;
use conductor::infrastructure::config::server::ServerConfig;
use conductor::testkit::venue::ScriptedVenue;
use serde_json::Value;

use support::{config_with_server, default_session};

fn server_config(addr: &str, debug: bool) -> ServerConfig {
    ServerConfig {
        addr: addr.to_string(),
        debug,
        startup_grace_ms: 50,
        ..ServerConfig::default()
    }
}

#[tokio::test]
async fn get_root_reports_liveness() {
    let alpha = Arc::new(ScriptedVenue::new("alpha").with_contexts(2));
    let mut s = default_session(config_with_server(&["alpha"]), &[alpha]);
    s.orchestrator.initialize().await.unwrap();
    let addr = s.orchestrator.control_plane_addr().unwrap();

    let response = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["phase"], "initialized");
    assert_eq!(body["venues"], 1);
    assert_eq!(body["streams"], 0);
    assert!(body["uptime_seconds"].is_u64());

    s.orchestrator.finalize().await;
}

#[tokio::test]
async fn status_follows_the_session() {
    let alpha = Arc::new(ScriptedVenue::new("alpha").with_contexts(3));
    let mut s = default_session(config_with_server(&["alpha"]), &[alpha]);
    s.orchestrator.initialize().await.unwrap();
    s.orchestrator.start().await.unwrap();
    let url = format!("http://{}/", s.orchestrator.control_plane_addr().unwrap());

    let body: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    assert_eq!(body["phase"], "running");
    assert_eq!(body["streams"], 3);

    s.orchestrator.stop().await;
    let body: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    assert_eq!(body["phase"], "stopping");
    assert_eq!(body["streams"], 0);

    s.orchestrator.finalize().await;
}

#[tokio::test]
async fn head_root_answers_without_body() {
    let status = Arc::new(RuntimeStatus::new());
    let mut server = ControlPlaneServer::new(server_config("127.0.0.1:0", true), status);
    server.start().await.unwrap();
    let addr = server.local_addr().unwrap();

    let response = reqwest::Client::new()
        .head(format!("http://{addr}/"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.bytes().await.unwrap().is_empty());
    server.stop().await;
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let mut server =
        ControlPlaneServer::new(server_config("127.0.0.1:0", false), Arc::new(RuntimeStatus::new()));
    server.start().await.unwrap();
    let addr = server.local_addr().unwrap();

    let response = reqwest::get(format!("http://{addr}/metrics")).await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    server.stop().await;
}

#[tokio::test]
async fn connections_are_refused_after_stop() {
    let status = Arc::new(RuntimeStatus::new());
    status.set_phase(Phase::Running);
    let mut server = ControlPlaneServer::new(server_config("127.0.0.1:0", false), status);
    server.start().await.unwrap();
    let addr = server.local_addr().unwrap();

    let body: Value = reqwest::get(format!("http://{addr}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["phase"], "running");

    server.stop().await;
    assert!(reqwest::get(format!("http://{addr}/")).await.is_err());
}

#[tokio::test]
async fn disabled_server_is_a_noop() {
    let mut server = ControlPlaneServer::new(server_config("", false), Arc::new(RuntimeStatus::new()));

    server.start().await.unwrap();
    assert!(!server.is_running());
    server.stop().await;
    assert!(server.local_addr().is_none());
}

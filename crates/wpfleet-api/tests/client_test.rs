// Integration tests for `FleetClient` using wiremock.
#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wpfleet_api::types::{PluginUpdateRequest, STATUS_ACCEPTED};
use wpfleet_api::{Error, FleetClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, FleetClient) {
    let server = MockServer::start().await;
    let client = FleetClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_sites_company_query() {
    let (server, client) = setup().await;

    let body = json!({
        "company": {
            "sites": [
                { "id": "site-a", "name": "alpha", "display_name": "Alpha Shop", "status": "live" },
                { "id": "site-b", "name": "beta", "display_name": "Beta Blog", "status": "live" },
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/sites"))
        .and(query_param("company", "acme-co"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let envelope = client.list_sites("acme-co").await.unwrap();

    assert_eq!(envelope.company.sites.len(), 2);
    assert_eq!(envelope.company.sites[0].id, "site-a");
    assert_eq!(envelope.company.sites[0].display_name, "Alpha Shop");
    assert_eq!(envelope.company.sites[1].name, "beta");
}

#[tokio::test]
async fn test_list_environments() {
    let (server, client) = setup().await;

    let body = json!({
        "site": {
            "environments": [
                { "id": "env-1", "name": "live", "display_name": "Live" },
                { "id": "env-2", "name": "staging", "display_name": "Staging" },
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/sites/site-a/environments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let envelope = client.list_environments("site-a").await.unwrap();

    assert_eq!(envelope.site.environments.len(), 2);
    assert_eq!(envelope.site.environments[0].id, "env-1");
    assert_eq!(envelope.site.environments[0].name.as_deref(), Some("live"));
}

#[tokio::test]
async fn test_list_plugins_nested_envelope() {
    let (server, client) = setup().await;

    let body = json!({
        "environment": {
            "container_info": {
                "wp_plugins": {
                    "data": [
                        {
                            "name": "akismet",
                            "version": "5.3",
                            "status": "active",
                            "update": "available",
                            "update_version": "5.3.1"
                        },
                        {
                            "name": "jetpack",
                            "version": "13.0",
                            "status": "inactive",
                            "update": "unavailable",
                            "update_version": null
                        },
                    ]
                }
            }
        }
    });

    Mock::given(method("GET"))
        .and(path("/sites/environments/env-1/plugins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let plugins = client.list_plugins("env-1").await.unwrap().into_plugins();

    assert_eq!(plugins.len(), 2);
    assert_eq!(plugins[0].name, "akismet");
    assert_eq!(plugins[0].update.as_deref(), Some("available"));
    assert_eq!(plugins[0].update_version.as_deref(), Some("5.3.1"));
    assert_eq!(plugins[1].update_version, None);
}

#[tokio::test]
async fn test_list_plugins_missing_wp_plugins_block() {
    let (server, client) = setup().await;

    // Environments without a WordPress install report container_info
    // without the wp_plugins block.
    let body = json!({ "environment": { "container_info": {} } });

    Mock::given(method("GET"))
        .and(path("/sites/environments/env-9/plugins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let plugins = client.list_plugins("env-9").await.unwrap().into_plugins();
    assert!(plugins.is_empty());
}

#[tokio::test]
async fn test_update_plugin_accepted() {
    let (server, client) = setup().await;

    let response = json!({
        "status": 202,
        "operation_id": "wp-plugin-update:env-1:abc123",
        "message": "Updating WordPress plugin in progress"
    });

    Mock::given(method("PUT"))
        .and(path("/sites/environments/env-1/plugins"))
        .and(body_json(json!({ "name": "akismet", "update_version": "5.3.1" })))
        .respond_with(ResponseTemplate::new(202).set_body_json(&response))
        .mount(&server)
        .await;

    let resp = client
        .update_plugin(
            "env-1",
            &PluginUpdateRequest {
                name: "akismet",
                update_version: "5.3.1",
            },
        )
        .await
        .unwrap();

    assert_eq!(resp.status, STATUS_ACCEPTED);
    assert!(resp.is_accepted());
    assert_eq!(
        resp.operation_id.as_deref(),
        Some("wp-plugin-update:env-1:abc123")
    );
}

#[tokio::test]
async fn test_operation_poll_states() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/operations/op-running"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 202,
            "message": "Operation in progress"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/operations/op-done"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "message": "Successfully finished"
        })))
        .mount(&server)
        .await;

    let running = client.get_operation("op-running").await.unwrap();
    assert!(!running.is_finished());

    let done = client.get_operation("op-done").await.unwrap();
    assert!(done.is_finished());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_401_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_sites("acme-co").await;

    assert!(
        matches!(result, Err(Error::InvalidApiKey)),
        "expected InvalidApiKey, got: {result:?}"
    );
}

#[tokio::test]
async fn test_error_with_vendor_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/sites/environments/env-x/plugins"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Environment not found" })),
        )
        .mount(&server)
        .await;

    let err = client.list_plugins("env-x").await.unwrap_err();

    assert!(err.is_not_found());
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Environment not found");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_garbage_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client.list_sites("acme-co").await.unwrap_err();

    match err {
        Error::Deserialization { body, .. } => assert!(body.contains("not json")),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_garbage_body_multibyte_at_preview_cut() {
    let (server, client) = setup().await;

    // 199 ASCII bytes followed by a two-byte character, so the preview
    // cut at byte 200 lands mid-character.
    let mut html = "x".repeat(199);
    html.push('é');
    html.push_str(" tail");

    Mock::given(method("GET"))
        .and(path("/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html.clone()))
        .mount(&server)
        .await;

    let err = client.list_sites("acme-co").await.unwrap_err();

    match err {
        Error::Deserialization { message, body } => {
            assert_eq!(body, html);
            // The preview stops before the straddling character.
            assert!(message.contains("body preview"));
            assert!(!message.contains('é'));
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

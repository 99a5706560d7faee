use crate::{client_for, test_key, TEST_KEY};

use chat_core::error::ChatClientError;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Public API tests for QbraidClient::list_models against a mock server
// ============================================================================

/// **VALUE**: Verifies the happy path: GET, api-key header, JSON array parsed.
///
/// **WHY THIS MATTERS**: This is the request that gates the whole UI - the
/// chat interface is only revealed after this call succeeds. The header
/// matcher also proves the credential travels where the server expects it.
///
/// **BUG THIS CATCHES**: Would catch a wrong endpoint path, a renamed header,
/// or the response array being parsed into the wrong shape.
#[tokio::test]
async fn given_200_array_when_listing_models_then_returns_identifiers_in_order() {
    // GIVEN: A server answering the models endpoint for our key
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/models"))
        .and(header("api-key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["model-a", "model-b"])))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Listing models
    let models = client_for(&server).list_models(&test_key()).await;

    // THEN: Both identifiers, server order preserved
    assert_eq!(models.unwrap(), vec!["model-a", "model-b"]);
}

/// **VALUE**: Verifies an empty model list is a success, not an error.
///
/// **BUG THIS CATCHES**: Would catch code treating zero models as a failure;
/// the UI handles the empty selector itself (no default selection).
#[tokio::test]
async fn given_200_empty_array_when_listing_models_then_returns_empty_vec() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let models = client_for(&server).list_models(&test_key()).await;

    assert_eq!(models.unwrap(), Vec::<String>::new());
}

/// **VALUE**: Verifies a 403 surfaces the raw response body text.
///
/// **WHY THIS MATTERS**: The contract is that the status line shows
/// exactly what the server said. Wrapping or discarding the body would hide
/// the reason the key was rejected.
///
/// **BUG THIS CATCHES**: Would catch the body being replaced by a generic
/// "request failed" message, or the status code being lost.
#[tokio::test]
async fn given_403_when_listing_models_then_server_error_carries_body() {
    // GIVEN: A server rejecting the key
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/models"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Invalid API key"))
        .mount(&server)
        .await;

    // WHEN: Listing models
    let error = client_for(&server)
        .list_models(&test_key())
        .await
        .unwrap_err();

    // THEN: Server error with the exact body and status
    assert_eq!(error.surface_text(), "Invalid API key");
    assert_eq!(error.status_code(), Some(403.into()));
}

/// **VALUE**: Verifies a non-array 200 body is a JSON error, not a panic.
///
/// **BUG THIS CATCHES**: Would catch an unwrap on the parse path - a
/// misbehaving server must degrade to status-line text, never crash the app.
#[tokio::test]
async fn given_200_non_array_body_when_listing_models_then_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .list_models(&test_key())
        .await
        .unwrap_err();

    assert!(matches!(error, ChatClientError::Json { .. }));
}

/// **VALUE**: Verifies a dead server becomes an HTTP error with text.
///
/// **BUG THIS CATCHES**: Would catch transport failures escaping as panics
/// instead of the Http variant the status line renders.
#[tokio::test]
async fn given_unreachable_server_when_listing_models_then_http_error() {
    // GIVEN: A server that has already shut down. A pooled server from
    // `MockServer::start` keeps listening after drop, so build a dedicated
    // one that actually releases its port.
    let server = MockServer::builder().start().await;
    let client = client_for(&server);
    drop(server);

    // WHEN: Listing models
    let error = client.list_models(&test_key()).await.unwrap_err();

    // THEN: Transport error variant
    assert!(matches!(error, ChatClientError::Http { .. }));
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

// Allow expect/unwrap in tests - they provide clear panic messages on failure
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Integration tests for Get Operation Status against a mock management
//! endpoint.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use storage_management_client::{
    Error, OperationStatus, StorageManagementClient, TokenCloudCredentials, WaitOptions,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUBSCRIPTION_ID: &str = "0f3c2b1a-aaaa-bbbb-cccc-111122223333";
const REQUEST_ID: &str = "8d5e21d4-5f7c-4e32-a2a5-6d7b0c4c9e10";
const OPERATION_PATH: &str =
    "/0f3c2b1a-aaaa-bbbb-cccc-111122223333/operations/8d5e21d4-5f7c-4e32-a2a5-6d7b0c4c9e10";

// ============================================================================
// Test Infrastructure
// ============================================================================

fn operation_xml(status: &str, extra: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<Operation xmlns="http://schemas.microsoft.com/windowsazure" xmlns:i="http://www.w3.org/2001/XMLSchema-instance">
  <ID>{REQUEST_ID}</ID>
  <Status>{status}</Status>
  {extra}
</Operation>"#
    )
}

fn ok_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("x-ms-request-id", "svc-request-7")
        .insert_header("content-type", "application/xml; charset=utf-8")
        .set_body_string(body)
}

fn client_for(base_uri: &str) -> StorageManagementClient {
    let credentials = TokenCloudCredentials::new(SUBSCRIPTION_ID, "test-token")
        .expect("token credentials");
    StorageManagementClient::builder(Arc::new(credentials))
        .base_uri(base_uri)
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client should build")
}

/// Serve one response whose body ends before its declared content length
async fn truncated_body_server(status_line: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let head = format!(
        "HTTP/1.1 {status_line}\r\n\
         x-ms-request-id: svc-request-cut\r\n\
         content-type: application/xml\r\n\
         content-length: 512\r\n\r\n\
         <Error><Code>Inter"
    );

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&chunk[..n]);
        }
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{addr}")
}

fn fast_wait(timeout_ms: u64) -> WaitOptions {
    WaitOptions {
        timeout: Duration::from_millis(timeout_ms),
        interval: Duration::from_millis(50),
    }
}

// ============================================================================
// Get Operation Status
// ============================================================================

#[tokio::test]
async fn succeeded_operation_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .and(header("x-ms-version", "2013-03-01"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ok_response(operation_xml(
            "Succeeded",
            "<HttpStatusCode>200</HttpStatusCode>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let status = client
        .get_operation_status(REQUEST_ID)
        .await
        .expect("status request should succeed");

    assert_eq!(status.id, REQUEST_ID);
    assert_eq!(status.status, OperationStatus::Succeeded);
    assert_eq!(status.http_status_code, Some(200));
    assert_eq!(status.error, None);
    assert_eq!(status.status_code, 200);
    assert_eq!(status.request_id.as_deref(), Some("svc-request-7"));
}

#[tokio::test]
async fn failed_operation_carries_error_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ok_response(operation_xml(
            "Failed",
            "<HttpStatusCode>409</HttpStatusCode>\
             <Error><Code>ConflictError</Code><Message>The storage account name is already taken.</Message></Error>",
        )))
        .mount(&server)
        .await;

    let status = client_for(&server.uri())
        .get_operation_status(REQUEST_ID)
        .await
        .expect("a Failed operation is still a successful status request");

    assert_eq!(status.status, OperationStatus::Failed);
    assert_eq!(status.http_status_code, Some(409));
    let error = status.error.expect("error details");
    assert_eq!(error.code, "ConflictError");
    assert_eq!(error.message, "The storage account name is already taken.");
}

#[tokio::test]
async fn trailing_slash_base_and_padded_ids_are_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ok_response(operation_xml("InProgress", "")))
        .expect(1)
        .mount(&server)
        .await;

    let credentials =
        TokenCloudCredentials::new(format!("  {SUBSCRIPTION_ID} "), "test-token").unwrap();
    let client = StorageManagementClient::builder(Arc::new(credentials))
        .base_uri(format!("{}/", server.uri()))
        .build()
        .unwrap();

    let status = client
        .get_operation_status(&format!(" {REQUEST_ID}\n"))
        .await
        .expect("status request should succeed");
    assert_eq!(status.status, OperationStatus::InProgress);
    assert_eq!(status.http_status_code, None);
}

#[tokio::test]
async fn missing_request_id_header_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(operation_xml("InProgress", "")))
        .mount(&server)
        .await;

    let status = client_for(&server.uri())
        .get_operation_status(REQUEST_ID)
        .await
        .unwrap();
    assert_eq!(status.request_id, None);
}

#[tokio::test]
async fn blank_request_id_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    for request_id in ["", "   "] {
        let err = client.get_operation_status(request_id).await.unwrap_err();
        assert!(
            matches!(err, Error::MissingArgument("request_id")),
            "unexpected error: {err:?}"
        );
    }
}

// ============================================================================
// Failure responses
// ============================================================================

#[tokio::test]
async fn not_found_fault_becomes_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-ms-request-id", "svc-request-404")
                .set_body_string(
                    r#"<Error xmlns="http://schemas.microsoft.com/windowsazure" xmlns:i="http://www.w3.org/2001/XMLSchema-instance"><Code>ResourceNotFound</Code><Message>The operation request ID was not found.</Message></Error>"#,
                ),
        )
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .get_operation_status(REQUEST_ID)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    let service = err.service_error().expect("service error");
    assert_eq!(service.status, StatusCode::NOT_FOUND);
    assert_eq!(service.code.as_deref(), Some("ResourceNotFound"));
    assert_eq!(service.message, "The operation request ID was not found.");
    assert_eq!(service.request_id.as_deref(), Some("svc-request-404"));
}

#[tokio::test]
async fn non_xml_failure_uses_reason_phrase() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .get_operation_status(REQUEST_ID)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    let service = err.service_error().expect("service error");
    assert_eq!(service.code, None);
    assert_eq!(service.message, "Service Unavailable");
}

#[tokio::test]
async fn accepted_is_not_treated_as_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(202).set_body_string(operation_xml("InProgress", "")))
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .get_operation_status(REQUEST_ID)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::ACCEPTED));
}

#[tokio::test]
async fn undecodable_success_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok_response(operation_xml("Paused", "")))
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .get_operation_status(REQUEST_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn unreachable_endpoint_is_http_error() {
    // Bind and drop a listener to get a port nobody answers on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = client_for(&format!("http://127.0.0.1:{port}"))
        .get_operation_status(REQUEST_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn truncated_failure_body_keeps_status() {
    let base_uri = truncated_body_server("500 Internal Server Error").await;

    let err = client_for(&base_uri)
        .get_operation_status(REQUEST_ID)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    let service = err.service_error().expect("service error");
    assert_eq!(service.code, None);
    assert_eq!(service.message, "Internal Server Error");
    assert_eq!(service.request_id.as_deref(), Some("svc-request-cut"));
}

#[tokio::test]
async fn truncated_success_body_is_http_error() {
    let base_uri = truncated_body_server("200 OK").await;

    let err = client_for(&base_uri)
        .get_operation_status(REQUEST_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http(_)), "unexpected error: {err:?}");
}

// ============================================================================
// Spawned variant
// ============================================================================

#[tokio::test]
async fn spawned_request_matches_direct_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ok_response(operation_xml(
            "Succeeded",
            "<HttpStatusCode>201</HttpStatusCode>",
        )))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let direct = client.get_operation_status(REQUEST_ID).await.unwrap();
    let spawned = client
        .spawn_get_operation_status(REQUEST_ID)
        .await
        .expect("task should not panic")
        .unwrap();

    assert_eq!(direct, spawned);
}

#[tokio::test]
async fn spawned_request_reports_missing_id() {
    let client = client_for("http://127.0.0.1:9");
    let result = client.spawn_get_operation_status("").await.unwrap();
    assert!(matches!(result, Err(Error::MissingArgument(_))));
}

// ============================================================================
// Waiting
// ============================================================================

#[tokio::test]
async fn wait_polls_until_succeeded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ok_response(operation_xml("InProgress", "")))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ok_response(operation_xml(
            "Succeeded",
            "<HttpStatusCode>200</HttpStatusCode>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let mut seen = Vec::new();
    let status = client
        .wait_for_operation_with_progress(REQUEST_ID, &fast_wait(5_000), |s| {
            seen.push(s.status)
        })
        .await
        .expect("operation should succeed");

    assert_eq!(status.status, OperationStatus::Succeeded);
    assert_eq!(
        seen,
        vec![
            OperationStatus::InProgress,
            OperationStatus::InProgress,
            OperationStatus::Succeeded
        ]
    );
}

#[tokio::test]
async fn wait_reports_failed_operation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok_response(operation_xml(
            "Failed",
            "<HttpStatusCode>400</HttpStatusCode>\
             <Error><Code>BadRequest</Code><Message>Invalid location.</Message></Error>",
        )))
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .wait_for_operation(REQUEST_ID, &fast_wait(5_000))
        .await
        .unwrap_err();

    match err {
        Error::OperationFailed {
            request_id,
            http_status_code,
            error,
        } => {
            assert_eq!(request_id, REQUEST_ID);
            assert_eq!(http_status_code, Some(400));
            assert_eq!(error.map(|e| e.code).as_deref(), Some("BadRequest"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn wait_with_zero_interval_does_not_spin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok_response(operation_xml("InProgress", "")))
        .mount(&server)
        .await;

    let options = WaitOptions {
        timeout: Duration::from_millis(300),
        interval: Duration::ZERO,
    };
    let err = client_for(&server.uri())
        .wait_for_operation(REQUEST_ID, &options)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout { .. }), "unexpected error: {err:?}");

    // 300 ms at one poll per MIN_POLL_INTERVAL, plus the first and last polls
    let polls = server.received_requests().await.unwrap().len();
    assert!(polls <= 8, "polled {polls} times");
}

#[tokio::test]
async fn wait_times_out_while_in_progress() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok_response(operation_xml("InProgress", "")))
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .wait_for_operation(REQUEST_ID, &fast_wait(100))
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            Error::Timeout {
                last_status: OperationStatus::InProgress,
                ..
            }
        ),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn wait_stops_on_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .wait_for_operation(REQUEST_ID, &fast_wait(5_000))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
}

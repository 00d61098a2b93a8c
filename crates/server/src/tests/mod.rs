// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router tests driven through `tower::ServiceExt::oneshot`.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use ncr_api::AccessPolicy;
use ncr_notify::{Notifier, Outbox};
use ncr_persistence::SqlitePersistence;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, build_router};

pub const TEST_PASSWORD: &str = "qualidade123";
const BOUNDARY: &str = "ncr-test-boundary";

/// A router over an in-memory store, with its notification outbox.
pub struct TestApp {
    pub router: Router,
    pub outbox: Outbox,
}

impl TestApp {
    pub fn new() -> Self {
        let persistence: SqlitePersistence =
            SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
        let (notifier, outbox) = Notifier::memory();
        let app_state = AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            notifier,
            policy: Arc::new(AccessPolicy::with_cost(TEST_PASSWORD, 4).unwrap()),
            base_url: Arc::from("http://ncr.example.test"),
        };
        Self {
            router: build_router(app_state),
            outbox,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Logs in and returns the bearer token.
    pub async fn login(&self) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/session",
                None,
                &serde_json::json!({ "password": TEST_PASSWORD }),
            ))
            .await;
        assert_eq!(response.status(), 200);
        let body: serde_json::Value = read_json(response).await;
        body["session_token"].as_str().unwrap().to_string()
    }

    /// Files a report with one photo and returns its id.
    pub async fn file_report(&self, token: &str, title: &str) -> i64 {
        let response = self
            .send(multipart_request(
                "/reports",
                Some(token),
                "report",
                &test_report_json(title),
                &[("opening.png", b"\x89PNG-not-really")],
            ))
            .await;
        assert_eq!(response.status(), 201);
        let body: serde_json::Value = read_json(response).await;
        body["report_id"].as_i64().unwrap()
    }
}

pub fn test_report_json(title: &str) -> serde_json::Value {
    serde_json::json!({
        "date": "2024-05-14",
        "issuer": "Ana Souza",
        "area": "Welding Bay 2",
        "cost_code": "PEP-1001",
        "title": title,
        "cause": ["Welding"],
        "severity": "High",
        "category": "Quality"
    })
}

fn with_token(
    builder: axum::http::request::Builder,
    token: Option<&str>,
) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    with_token(Request::builder().method(method).uri(uri), token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn bytes_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    content_type: &str,
    body: Vec<u8>,
) -> Request<Body> {
    with_token(Request::builder().method(method).uri(uri), token)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

/// Builds a multipart request with one JSON part and some `photo` parts.
pub fn multipart_request(
    uri: &str,
    token: Option<&str>,
    json_part: &str,
    json: &serde_json::Value,
    photos: &[(&str, &[u8])],
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{json_part}\"\r\n\r\n{json}\r\n"
        )
        .as_bytes(),
    );
    for (filename, content) in photos {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    bytes_request(
        "POST",
        uri,
        token,
        &format!("multipart/form-data; boundary={BOUNDARY}"),
        body,
    )
}

pub async fn read_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    serde_json::from_slice(&read_bytes(response).await).unwrap()
}

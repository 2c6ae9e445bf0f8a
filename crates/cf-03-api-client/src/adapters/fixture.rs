//! # Fixture Adapter
//!
//! A scripted [`CaseApi`]: responses are registered per route ahead of
//! time and every call is recorded. Backs the binary's `--demo` mode and
//! the workflow tests.
//!
//! Lookup order for a route: the next queued one-shot response, then the
//! sticky response, then a `404` failure.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use shared_types::{
    ApiFailure, ApiResponse, ApiResult, CasePatch, CaseQuery, NoteParams,
};
use tracing::debug;

use crate::domain::endpoints::{Endpoint, HttpMethod};
use crate::ports::outbound::CaseApi;

/// One call made against the fixture.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Scripted {
    result: ApiResult,
    delay: Option<Duration>,
}

/// Scripted in-memory backend.
#[derive(Debug, Default)]
pub struct FixtureCaseApi {
    sticky: Mutex<HashMap<String, Scripted>>,
    queued: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

fn route_key(method: HttpMethod, endpoint: Endpoint<'_>) -> String {
    format!("{method} {}", endpoint.path())
}

impl FixtureCaseApi {
    /// A fixture with no routes; every call fails with `404`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call to the route with `result`.
    pub fn respond(&self, method: HttpMethod, endpoint: Endpoint<'_>, result: ApiResult) {
        self.sticky.lock().insert(
            route_key(method, endpoint),
            Scripted {
                result,
                delay: None,
            },
        );
    }

    /// Answer the next call to the route with `result`.
    pub fn respond_once(&self, method: HttpMethod, endpoint: Endpoint<'_>, result: ApiResult) {
        self.enqueue(method, endpoint, result, None);
    }

    /// Answer the next call to the route with `result` after `delay`.
    pub fn respond_once_after(
        &self,
        method: HttpMethod,
        endpoint: Endpoint<'_>,
        delay: Duration,
        result: ApiResult,
    ) {
        self.enqueue(method, endpoint, result, Some(delay));
    }

    fn enqueue(
        &self,
        method: HttpMethod,
        endpoint: Endpoint<'_>,
        result: ApiResult,
        delay: Option<Duration>,
    ) {
        self.queued
            .lock()
            .entry(route_key(method, endpoint))
            .or_default()
            .push_back(Scripted { result, delay });
    }

    /// Every call made so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of calls made to one route.
    #[must_use]
    pub fn calls_to(&self, method: HttpMethod, endpoint: Endpoint<'_>) -> usize {
        let path = endpoint.path();
        self.calls
            .lock()
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    async fn call(
        &self,
        method: HttpMethod,
        endpoint: Endpoint<'_>,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> ApiResult {
        let path = endpoint.path();
        let key = format!("{method} {path}");
        debug!(route = %key, "[cf-03] Fixture call");

        self.calls.lock().push(RecordedCall {
            method,
            path,
            query,
            body,
        });

        let scripted = {
            let queued = self
                .queued
                .lock()
                .get_mut(&key)
                .and_then(VecDeque::pop_front);
            queued.or_else(|| self.sticky.lock().get(&key).cloned())
        };

        let Some(Scripted { result, delay }) = scripted else {
            return Err(ApiFailure::http(
                404,
                json!({ "message": format!("no fixture for {key}") }),
            ));
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }

    /// A small, self-consistent backend for demos.
    #[must_use]
    pub fn demo() -> Self {
        let api = Self::new();
        let cases = demo_cases();

        let list = ApiResponse::ok(Value::Array(cases.clone()))
            .with_header("x-page", "1")
            .with_header("x-per-page", "25")
            .with_header("x-total-count", &cases.len().to_string())
            .with_header("x-total-pages", "1");
        api.respond(HttpMethod::Get, Endpoint::Cases, Ok(list));

        for case in &cases {
            let Some(case_id) = case["id"].as_str() else {
                continue;
            };
            api.respond(
                HttpMethod::Get,
                Endpoint::Case { case_id },
                Ok(ApiResponse::ok(case.clone())),
            );
            api.respond(
                HttpMethod::Get,
                Endpoint::CaseFaults { case_id },
                Ok(ApiResponse::ok(json!([
                    { "id": format!("{case_id}-f2"), "code": "P0420", "reportedAt": "2024-03-02T09:15:00Z" },
                    { "id": format!("{case_id}-f1"), "code": "P0300", "reportedAt": "2024-03-01T17:40:00Z" },
                ]))),
            );
            api.respond(
                HttpMethod::Get,
                Endpoint::CaseNotes { case_id },
                Ok(ApiResponse::ok(json!([
                    { "id": format!("{case_id}-n2"), "message": "Parts ordered", "sentAt": "2024-03-03T08:00:00Z" },
                    { "id": format!("{case_id}-n1"), "message": "Vehicle checked in", "sentAt": "2024-03-02T10:30:00Z" },
                ]))),
            );
            api.respond(
                HttpMethod::Get,
                Endpoint::CaseRecipients { case_id },
                Ok(ApiResponse::ok(json!([
                    { "groupId": "fleet", "users": [{ "userId": "u1", "name": "Dispatch" }] },
                ]))),
            );
            api.respond(
                HttpMethod::Post,
                Endpoint::CaseNotes { case_id },
                Ok(ApiResponse::ok(json!({})).with_status(201)),
            );
            for suffix in ["n1", "n2"] {
                let note_id = format!("{case_id}-{suffix}");
                api.respond(
                    HttpMethod::Patch,
                    Endpoint::CaseNote {
                        case_id,
                        note_id: &note_id,
                    },
                    Ok(ApiResponse::ok(json!({}))),
                );
            }
            if let Some(version_id) = case["versionId"].as_str() {
                api.respond(
                    HttpMethod::Patch,
                    Endpoint::CaseVersion {
                        case_id,
                        version_id,
                    },
                    Ok(ApiResponse::ok(case.clone())),
                );
            }
        }
        api
    }
}

fn demo_cases() -> Vec<Value> {
    vec![
        json!({
            "id": "1001",
            "status": "open",
            "approvalStatus": "pending",
            "versionId": "3",
            "asset": { "id": "a-17", "unitNumber": "17", "vin": "1FUJGLDR9CLBP8834" },
            "serviceProvider": { "id": "sp-4", "name": "Northside Truck Repair" }
        }),
        json!({
            "id": "1002",
            "status": "open",
            "approvalStatus": "approved",
            "versionId": "1",
            "asset": { "id": "a-22", "unitNumber": "22", "vin": "3AKJHHDR5JSJV1234" },
            "serviceProvider": { "id": "sp-4", "name": "Northside Truck Repair" }
        }),
        json!({
            "id": "1003",
            "status": "closed",
            "approvalStatus": "approved",
            "versionId": "5",
            "asset": { "id": "a-17", "unitNumber": "17", "vin": "1FUJGLDR9CLBP8834" },
            "serviceProvider": { "id": "sp-9", "name": "Interstate Fleet Service" }
        }),
    ]
}

#[async_trait]
impl CaseApi for FixtureCaseApi {
    async fn fetch_case(&self, case_id: &str) -> ApiResult {
        self.call(HttpMethod::Get, Endpoint::Case { case_id }, Vec::new(), None)
            .await
    }

    async fn fetch_cases(&self, query: &CaseQuery) -> ApiResult {
        let query = query
            .pairs()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.call(HttpMethod::Get, Endpoint::Cases, query, None).await
    }

    async fn fetch_case_faults(&self, case_id: &str) -> ApiResult {
        self.call(HttpMethod::Get, Endpoint::CaseFaults { case_id }, Vec::new(), None)
            .await
    }

    async fn fetch_case_notes(&self, case_id: &str) -> ApiResult {
        self.call(HttpMethod::Get, Endpoint::CaseNotes { case_id }, Vec::new(), None)
            .await
    }

    async fn fetch_case_recipients(&self, case_id: &str) -> ApiResult {
        self.call(
            HttpMethod::Get,
            Endpoint::CaseRecipients { case_id },
            Vec::new(),
            None,
        )
        .await
    }

    async fn create_case_note(&self, case_id: &str, params: &NoteParams) -> ApiResult {
        let body = serde_json::to_value(params).ok();
        self.call(HttpMethod::Post, Endpoint::CaseNotes { case_id }, Vec::new(), body)
            .await
    }

    async fn update_case(&self, case_id: &str, version_id: &str, patch: &CasePatch) -> ApiResult {
        let body = serde_json::to_value(patch).ok();
        self.call(
            HttpMethod::Patch,
            Endpoint::CaseVersion {
                case_id,
                version_id,
            },
            Vec::new(),
            body,
        )
        .await
    }

    async fn update_case_note(&self, case_id: &str, note_id: &str, status: &str) -> ApiResult {
        self.call(
            HttpMethod::Patch,
            Endpoint::CaseNote { case_id, note_id },
            Vec::new(),
            Some(json!({ "status": status })),
        )
        .await
    }
}

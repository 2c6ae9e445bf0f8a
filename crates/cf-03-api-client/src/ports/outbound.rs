//! Outbound Ports (Driven Ports / SPI)
//!
//! What the workflows need from the backend.

use async_trait::async_trait;
use shared_types::{ApiResult, CasePatch, CaseQuery, NoteParams};

/// Case backend operations.
///
/// Implementations never panic on backend errors: transport problems and
/// non-2xx statuses come back as `Err(ApiFailure)`.
#[async_trait]
pub trait CaseApi: Send + Sync {
    /// `GET /cases/{id}`
    async fn fetch_case(&self, case_id: &str) -> ApiResult;

    /// `GET /cases?<query>`; paging metadata arrives in the headers.
    async fn fetch_cases(&self, query: &CaseQuery) -> ApiResult;

    async fn fetch_case_faults(&self, case_id: &str) -> ApiResult;

    async fn fetch_case_notes(&self, case_id: &str) -> ApiResult;

    async fn fetch_case_recipients(&self, case_id: &str) -> ApiResult;

    /// `POST /cases/{id}/notes` with `{recipients, message}`.
    async fn create_case_note(&self, case_id: &str, params: &NoteParams) -> ApiResult;

    /// `PATCH /cases/{id}/versions/{version_id}`
    async fn update_case(&self, case_id: &str, version_id: &str, patch: &CasePatch) -> ApiResult;

    /// `PATCH /cases/{id}/notes/{note_id}` with `{status}`.
    async fn update_case_note(&self, case_id: &str, note_id: &str, status: &str) -> ApiResult;
}

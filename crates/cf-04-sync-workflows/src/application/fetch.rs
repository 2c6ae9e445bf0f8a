//! # Fetch Executor
//!
//! Turns `FetchRequested` intents into the request lifecycle:
//! `RequestStarted`, the backend call, then `RequestSucceeded` or
//! `RequestFailed`. Every fetch runs to completion; none is cancelled by a
//! later one.

use shared_bus::{FetchRequest, StoreEvent};
use shared_types::ApiResult;
use tracing::{debug, warn};

use super::listener::WorkflowContext;
use crate::domain::errors::WorkflowError;

/// Execute one fetch.
pub(crate) async fn execute(request: FetchRequest, ctx: &WorkflowContext) -> Result<(), WorkflowError> {
    let resource = request.resource();
    ctx.dispatch(StoreEvent::RequestStarted(resource))?;

    let api = &ctx.api;
    let result: ApiResult = match &request {
        FetchRequest::Case { case_id } => api.fetch_case(case_id).await,
        FetchRequest::CaseFaults { case_id } => api.fetch_case_faults(case_id).await,
        FetchRequest::CaseNotes { case_id } => api.fetch_case_notes(case_id).await,
        FetchRequest::CaseRecipients { case_id } => api.fetch_case_recipients(case_id).await,
        FetchRequest::Cases { query } => api.fetch_cases(query).await,
    };

    match result {
        Ok(response) => {
            debug!(?resource, status = response.status, "[cf-04] Fetch succeeded");
            ctx.dispatch(StoreEvent::RequestSucceeded { resource, response })
        }
        Err(failure) => {
            warn!(?resource, error = %failure, "[cf-04] Fetch failed");
            ctx.dispatch(StoreEvent::RequestFailed { resource, failure })
        }
    }
}

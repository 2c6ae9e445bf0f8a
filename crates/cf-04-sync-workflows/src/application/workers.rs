//! # Workers
//!
//! One run of a workflow. A worker owns nothing but its trigger event and
//! a [`WorkflowContext`]; it may be aborted at any `.await`.

use cf_01_normalizer::{case_schema, cases_schema, normalize};
use serde_json::{json, Value};
use shared_bus::{FetchRequest, StoreEvent};
use shared_types::{ApiFailure, ApiResponse, NormalizedData, Pagination};
use tracing::{debug, info, warn};

use super::listener::WorkflowContext;
use crate::algorithms::ordering::{sort_by_timestamp, FAULT_TIMESTAMP, NOTE_TIMESTAMP};
use crate::domain::errors::WorkflowError;
use crate::domain::workflow::WorkflowKind;

/// Run `kind` for `event`. Events that do not carry the expected payload
/// are ignored.
pub(crate) async fn run(
    kind: WorkflowKind,
    event: StoreEvent,
    ctx: &WorkflowContext,
) -> Result<(), WorkflowError> {
    match (kind, event) {
        (WorkflowKind::CaseLoaded, StoreEvent::RequestSucceeded { response, .. }) => {
            case_loaded(ctx, &response.body).map(|_| ())
        }
        (WorkflowKind::CaseFaultsLoaded, StoreEvent::RequestSucceeded { response, .. }) => {
            let faults = sort_by_timestamp(list_body(response.body)?, FAULT_TIMESTAMP);
            ctx.dispatch(StoreEvent::SetCurrentCaseFaults(Some(faults)))
        }
        (WorkflowKind::CaseNotesLoaded, StoreEvent::RequestSucceeded { response, .. }) => {
            let notes = sort_by_timestamp(list_body(response.body)?, NOTE_TIMESTAMP);
            ctx.dispatch(StoreEvent::SetCurrentCaseNotes(Some(notes)))
        }
        (WorkflowKind::CasesLoaded, StoreEvent::RequestSucceeded { response, .. }) => {
            cases_loaded(ctx, &response)
        }
        (WorkflowKind::PostCaseNote, StoreEvent::PostCaseNote(payload)) => {
            ctx.api
                .create_case_note(&payload.case_id, &payload.params)
                .await?;
            info!(case_id = %payload.case_id, "[cf-04] Note posted, refreshing case");
            refresh_case(ctx, &payload.case_id)
        }
        (WorkflowKind::UpdateCaseNote, StoreEvent::UpdateCaseNote(payload)) => {
            ctx.api
                .update_case_note(&payload.case_id, &payload.note_id, &payload.status)
                .await?;
            info!(
                case_id = %payload.case_id,
                note_id = %payload.note_id,
                status = %payload.status,
                "[cf-04] Note updated, refreshing case"
            );
            refresh_case(ctx, &payload.case_id)
        }
        (WorkflowKind::UpdateCase, StoreEvent::UpdateCaseRequest(payload)) => {
            let result = ctx
                .api
                .update_case(&payload.case_id, &payload.version_id, &payload.patch)
                .await;
            match result {
                Ok(response) => update_case_succeeded(ctx, &response),
                Err(failure) => {
                    // Recorded before the run ends so no later event can
                    // overtake it.
                    ctx.dispatch(StoreEvent::UpdateCaseFailure(failure.clone()))?;
                    Err(failure.into())
                }
            }
        }
        (kind, event) => {
            debug!(?kind, event = ?event.kind(), "[cf-04] Event does not fit workflow, ignored");
            Ok(())
        }
    }
}

/// Normalize a single case and make it current. Shared by the case-loaded
/// and update-case workflows.
fn case_loaded(ctx: &WorkflowContext, body: &Value) -> Result<NormalizedData, WorkflowError> {
    let data = normalize(body, &case_schema())?;
    ctx.dispatch(StoreEvent::AddOrUpdateCurrentCase(data.clone()))?;
    Ok(data)
}

fn cases_loaded(ctx: &WorkflowContext, response: &ApiResponse) -> Result<(), WorkflowError> {
    let data = normalize(&response.body, &cases_schema())?;
    let count = data.result.ids().len();
    ctx.dispatch(StoreEvent::AddOrUpdateCases(data))?;

    let pagination = Pagination::from_headers(&response.headers);
    ctx.dispatch(StoreEvent::SetFavoritePagination(pagination))?;
    debug!(count, ?pagination, "[cf-04] Case list merged");
    Ok(())
}

fn update_case_succeeded(ctx: &WorkflowContext, response: &ApiResponse) -> Result<(), WorkflowError> {
    match case_loaded(ctx, &response.body) {
        Ok(data) => ctx.dispatch(StoreEvent::UpdateCaseSuccess(data)),
        Err(WorkflowError::Normalize(err)) => {
            // The request flag must not stay raised on a malformed reply.
            let failure = ApiFailure {
                status: Some(response.status),
                error: json!({ "message": err.to_string() }),
            };
            ctx.dispatch(StoreEvent::UpdateCaseFailure(failure))?;
            Err(err.into())
        }
        Err(err) => Err(err),
    }
}

fn refresh_case(ctx: &WorkflowContext, case_id: &str) -> Result<(), WorkflowError> {
    ctx.dispatch(StoreEvent::FetchRequested(FetchRequest::Case {
        case_id: case_id.to_string(),
    }))?;
    ctx.dispatch(StoreEvent::FetchRequested(FetchRequest::CaseNotes {
        case_id: case_id.to_string(),
    }))
}

fn list_body(body: Value) -> Result<Vec<Value>, WorkflowError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        _ => {
            warn!("[cf-04] Expected a JSON array body");
            Err(WorkflowError::UnexpectedBody { expected: "array" })
        }
    }
}

//! # Reducer
//!
//! `reduce(state, event) -> state`. No I/O, no clocks, no randomness: the
//! same inputs always give the same output.
//!
//! ## Entity merge rules
//!
//! - Records are merged field by field; incoming fields win.
//! - `response_ids` only grows by appending ids that are not already
//!   present, and only ids that have a record after the merge.
//! - Records leave `by_id` only on `ResetCases` or `Logout`.

use serde_json::Value;
use shared_bus::{Resource, StoreEvent};
use shared_types::{ApiFailure, ApiResponse, EntityKind, EntityTable, NormalizedData};

use super::state::{AppState, CaseRecipients, CasesSlice};

/// Apply one event to the state.
#[must_use]
pub fn reduce(mut state: AppState, event: &StoreEvent) -> AppState {
    match event {
        // Intents for the workflows; nothing to record.
        StoreEvent::FetchRequested(_)
        | StoreEvent::PostCaseNote(_)
        | StoreEvent::UpdateCaseNote(_) => {}

        StoreEvent::RequestStarted(resource) => request_started(&mut state.cases, *resource),
        StoreEvent::RequestSucceeded { resource, response } => {
            request_succeeded(&mut state.cases, *resource, response);
        }
        StoreEvent::RequestFailed { resource, failure } => {
            request_failed(&mut state.cases, *resource, failure);
        }

        StoreEvent::AddOrUpdateCases(data) => add_or_update_cases(&mut state, data),
        StoreEvent::AddOrUpdateCurrentCase(data) | StoreEvent::UpdateCaseSuccess(data) => {
            add_or_update_current_case(&mut state, data);
        }

        StoreEvent::SetCurrentCase(id) => {
            state.cases.current_case_id = id.clone().unwrap_or_default();
            state.cases.error = None;
        }
        StoreEvent::SetCurrentCaseFaults(faults) => {
            state.cases.current_case_faults = faults.clone().unwrap_or_default();
        }
        StoreEvent::SetCurrentCaseNotes(notes) => {
            state.cases.current_case_notes = notes.clone().unwrap_or_default();
        }
        StoreEvent::ClearCaseRecipients => {
            state.cases.case_recipients = CaseRecipients::default();
        }

        StoreEvent::ResetCases => reset_cases(&mut state.cases),
        StoreEvent::Logout => {
            reset_cases(&mut state.cases);
            state.assets.clear();
            state.service_providers.clear();
        }

        StoreEvent::UpdateCaseRequest(_) => state.cases.requesting = true,
        StoreEvent::UpdateCaseFailure(failure) => {
            state.cases.requesting = false;
            state.cases.error = Some(failure.to_value());
        }

        StoreEvent::SetFavoritePagination(pagination) => {
            state.app.favorite_pagination = *pagination;
        }
    }
    state
}

fn request_flag(cases: &mut CasesSlice, resource: Resource) -> Option<&mut bool> {
    match resource {
        Resource::Case => Some(&mut cases.case_requesting),
        Resource::CaseFaults => Some(&mut cases.case_faults_requesting),
        Resource::CaseNotes => Some(&mut cases.case_notes_requesting),
        Resource::Cases => Some(&mut cases.requesting),
        // Recipients keep their own record.
        Resource::CaseRecipients => None,
    }
}

fn request_started(cases: &mut CasesSlice, resource: Resource) {
    if let Some(flag) = request_flag(cases, resource) {
        *flag = true;
        cases.error = None;
    } else {
        cases.case_recipients = CaseRecipients {
            requesting: true,
            ..CaseRecipients::default()
        };
    }
}

fn request_succeeded(cases: &mut CasesSlice, resource: Resource, response: &ApiResponse) {
    if let Some(flag) = request_flag(cases, resource) {
        *flag = false;
        cases.error = None;
    } else {
        cases.case_recipients = CaseRecipients {
            requesting: false,
            error: None,
            data: response.body.clone(),
        };
    }
}

fn request_failed(cases: &mut CasesSlice, resource: Resource, failure: &ApiFailure) {
    if let Some(flag) = request_flag(cases, resource) {
        *flag = false;
        cases.error = Some(failure.error.clone());
    } else {
        cases.case_recipients = CaseRecipients {
            requesting: false,
            error: Some(failure.to_value()),
            data: Value::Array(Vec::new()),
        };
    }
}

/// Merge the foreign-key tables. Their `response_ids` are left alone.
fn merge_related(state: &mut AppState, data: &NormalizedData) {
    if let Some(assets) = data.entities_of(EntityKind::Asset) {
        state.assets.merge_all(assets);
    }
    if let Some(providers) = data.entities_of(EntityKind::ServiceProvider) {
        state.service_providers.merge_all(providers);
    }
}

fn append_known_ids(table: &mut EntityTable, ids: &[String]) {
    let known: Vec<&String> = ids.iter().filter(|id| table.by_id.contains_key(*id)).collect();
    table.append_response_ids(known);
}

fn add_or_update_cases(state: &mut AppState, data: &NormalizedData) {
    if data.is_empty() {
        return;
    }
    if let Some(cases) = data.entities_of(EntityKind::Case) {
        state.cases.table.merge_all(cases);
    }
    append_known_ids(&mut state.cases.table, &data.result.ids());
    merge_related(state, data);
}

fn add_or_update_current_case(state: &mut AppState, data: &NormalizedData) {
    state.cases.requesting = false;

    let Some(cases) = data.entities_of(EntityKind::Case) else {
        return;
    };
    // Prefer the result id; fall back to the first case record.
    let id = data
        .result
        .ids()
        .into_iter()
        .find(|id| cases.contains_key(id))
        .or_else(|| cases.keys().next().cloned());
    let Some(id) = id.filter(|id| !id.is_empty()) else {
        return;
    };

    if let Some(record) = cases.get(&id) {
        state.cases.table.merge(&id, record);
    }
    state.cases.table.append_response_ids([&id]);
    state.cases.current_case_id = id;
    merge_related(state, data);
}

fn reset_cases(cases: &mut CasesSlice) {
    cases.table.clear();
    cases.current_case_id.clear();
    cases.current_case_faults.clear();
    cases.current_case_notes.clear();
    cases.requesting = false;
}

//! # Selectors
//!
//! Read-only projections over [`AppState`]. Each selector is a plain
//! function of the state, so callers can compose them or wrap them in
//! [`Memoized`](memo::Memoized).

pub mod memo;

use serde_json::Value;
use shared_types::{id_from_value, EntityKind, EntityTable, Pagination, Record};

use crate::domain::state::{AppState, CaseRecipients};

/// Cases in list order. Ids without a record are skipped.
#[must_use]
pub fn cases(state: &AppState) -> Vec<&Record> {
    state.cases.table.records_in_response_order()
}

/// Id of the selected case, if any.
#[must_use]
pub fn current_case_id(state: &AppState) -> Option<&str> {
    let id = state.cases.current_case_id.as_str();
    (!id.is_empty()).then_some(id)
}

/// The selected case record.
#[must_use]
pub fn current_case(state: &AppState) -> Option<&Record> {
    current_case_id(state).and_then(|id| state.cases.table.get(id))
}

/// The selected case's asset. Empty when unresolvable.
#[must_use]
pub fn current_case_asset(state: &AppState) -> Record {
    resolve_foreign_key(state, EntityKind::Asset, &state.assets)
}

/// The selected case's service provider. Empty when unresolvable.
#[must_use]
pub fn current_case_service_provider(state: &AppState) -> Record {
    resolve_foreign_key(state, EntityKind::ServiceProvider, &state.service_providers)
}

fn resolve_foreign_key(state: &AppState, kind: EntityKind, table: &EntityTable) -> Record {
    current_case(state)
        .and_then(|case| case.get(kind.key()))
        .and_then(id_from_value)
        .and_then(|id| table.get(&id))
        .cloned()
        .unwrap_or_default()
}

#[must_use]
pub fn case_requesting(state: &AppState) -> bool {
    state.cases.case_requesting
}

#[must_use]
pub fn case_faults_requesting(state: &AppState) -> bool {
    state.cases.case_faults_requesting
}

#[must_use]
pub fn case_notes_requesting(state: &AppState) -> bool {
    state.cases.case_notes_requesting
}

/// List-level request flag.
#[must_use]
pub fn cases_requesting(state: &AppState) -> bool {
    state.cases.requesting
}

/// Last failure payload recorded on the cases slice.
#[must_use]
pub fn cases_error(state: &AppState) -> Option<&Value> {
    state.cases.error.as_ref()
}

#[must_use]
pub fn current_case_faults(state: &AppState) -> &[Value] {
    &state.cases.current_case_faults
}

#[must_use]
pub fn current_case_notes(state: &AppState) -> &[Value] {
    &state.cases.current_case_notes
}

#[must_use]
pub fn case_recipients(state: &AppState) -> &CaseRecipients {
    &state.cases.case_recipients
}

#[must_use]
pub fn favorite_pagination(state: &AppState) -> Pagination {
    state.app.favorite_pagination
}

//! # Command-Line Operations
//!
//! Each subcommand dispatches through [`CaseCommands`], waits on the bus
//! for the events that settle it, then reads the answer from the store
//! through the selectors.
//!
//! [`CaseCommands`]: cf_04_sync_workflows::CaseCommands

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{anyhow, Context};
use cf_02_entity_store::selectors;
use clap::Subcommand;
use serde_json::{json, Value};
use shared_bus::{EventFilter, EventKind, Resource, StoreEvent, Subscription};
use shared_types::{
    CasePatch, CaseQuery, NoteParams, NoteRecipient, PostCaseNotePayload,
    UpdateCaseNotePayload, UpdateCasePayload,
};
use tokio::time::Instant;
use tracing::debug;

use crate::wiring::CaseRuntime;

/// Subcommands of the `caseflow` binary.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a page of the case list
    List {
        /// Restrict the list to a scope
        #[arg(long)]
        scope: Option<String>,
        /// Page to fetch
        #[arg(long)]
        page: Option<u64>,
        /// Page size
        #[arg(long)]
        per_page: Option<u64>,
    },
    /// Open a case with its asset, service provider, faults, notes and recipients
    Show {
        case_id: String,
    },
    /// Post a note on a case
    PostNote {
        case_id: String,
        /// Note text
        #[arg(short, long)]
        message: String,
        /// Recipient as GROUP:USER, repeatable
        #[arg(short, long = "recipient", value_parser = parse_recipient)]
        recipients: Vec<NoteRecipient>,
    },
    /// Change the status of a note
    MarkNote {
        case_id: String,
        note_id: String,
        #[arg(long, default_value = "read")]
        status: String,
    },
    /// Patch a case version
    UpdateCase {
        case_id: String,
        version_id: String,
        #[arg(long)]
        approval_status: Option<String>,
        #[arg(long)]
        comments: Option<String>,
        #[arg(long)]
        po_number: Option<String>,
    },
}

/// Parse `GROUP:USER`.
///
/// # Errors
///
/// When either half is missing.
pub fn parse_recipient(raw: &str) -> Result<NoteRecipient, String> {
    match raw.split_once(':') {
        Some((group, user)) if !group.is_empty() && !user.is_empty() => Ok(NoteRecipient {
            group_id: group.to_string(),
            user_id: user.to_string(),
        }),
        _ => Err(format!("expected GROUP:USER, got {raw:?}")),
    }
}

/// Run one subcommand and return what should be printed.
///
/// # Errors
///
/// When the store has stopped, the backend reports a failure, or the
/// settling events do not arrive within `wait`.
pub async fn execute(runtime: &CaseRuntime, command: Command, wait: Duration) -> anyhow::Result<Value> {
    match command {
        Command::List {
            scope,
            page,
            per_page,
        } => list(runtime, build_query(scope, page, per_page), wait).await,
        Command::Show { case_id } => show(runtime, case_id, wait).await,
        Command::PostNote {
            case_id,
            message,
            recipients,
        } => {
            let payload = PostCaseNotePayload {
                case_id,
                params: NoteParams {
                    recipients,
                    message,
                },
            };
            let mut settled = runtime.subscribe(notes_refreshed());
            runtime.commands().post_case_note(payload)?;
            await_notes(runtime, &mut settled, wait).await
        }
        Command::MarkNote {
            case_id,
            note_id,
            status,
        } => {
            let payload = UpdateCaseNotePayload {
                case_id,
                note_id,
                status,
            };
            let mut settled = runtime.subscribe(notes_refreshed());
            runtime.commands().update_case_note(payload)?;
            await_notes(runtime, &mut settled, wait).await
        }
        Command::UpdateCase {
            case_id,
            version_id,
            approval_status,
            comments,
            po_number,
        } => {
            let payload = UpdateCasePayload {
                case_id,
                version_id,
                patch: CasePatch {
                    approval_status,
                    comments,
                    po_number,
                },
            };
            update_case(runtime, payload, wait).await
        }
    }
}

fn build_query(scope: Option<String>, page: Option<u64>, per_page: Option<u64>) -> CaseQuery {
    let mut query = CaseQuery::new();
    if let Some(scope) = scope {
        query = query.scope(scope);
    }
    if let Some(page) = page {
        query = query.page(page);
    }
    if let Some(per_page) = per_page {
        query = query.per_page(per_page);
    }
    query
}

async fn list(runtime: &CaseRuntime, query: CaseQuery, wait: Duration) -> anyhow::Result<Value> {
    let mut settled = runtime.subscribe(EventFilter::kinds(vec![
        EventKind::SetFavoritePagination,
        EventKind::RequestFailed(Resource::Cases),
    ]));
    runtime.commands().refresh_cases(query)?;

    match next(&mut settled, wait).await? {
        StoreEvent::RequestFailed { failure, .. } => Err(anyhow!(failure).context("case list fetch failed")),
        _ => Ok(runtime.read(|state| {
            json!({
                "cases": selectors::cases(state),
                "pagination": selectors::favorite_pagination(state),
            })
        })),
    }
}

async fn show(runtime: &CaseRuntime, case_id: String, wait: Duration) -> anyhow::Result<Value> {
    let mut settled = runtime.subscribe(EventFilter::kinds(vec![
        EventKind::AddOrUpdateCurrentCase,
        EventKind::SetCurrentCaseFaults,
        EventKind::SetCurrentCaseNotes,
        EventKind::RequestSucceeded(Resource::CaseRecipients),
        EventKind::RequestFailed(Resource::Case),
        EventKind::RequestFailed(Resource::CaseFaults),
        EventKind::RequestFailed(Resource::CaseNotes),
        EventKind::RequestFailed(Resource::CaseRecipients),
    ]));
    runtime.commands().open_case(case_id.clone())?;
    runtime.commands().load_case_recipients(case_id.clone())?;

    let deadline = Instant::now() + wait;
    let mut pending: HashSet<Resource> = [
        Resource::Case,
        Resource::CaseFaults,
        Resource::CaseNotes,
        Resource::CaseRecipients,
    ]
    .into_iter()
    .collect();

    while !pending.is_empty() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let event = next(&mut settled, remaining).await?;
        let resource = match &event {
            StoreEvent::AddOrUpdateCurrentCase(_) => Resource::Case,
            StoreEvent::SetCurrentCaseFaults(_) => Resource::CaseFaults,
            StoreEvent::SetCurrentCaseNotes(_) => Resource::CaseNotes,
            StoreEvent::RequestSucceeded { resource, .. } => *resource,
            StoreEvent::RequestFailed { resource, failure } => {
                if *resource == Resource::Case {
                    return Err(anyhow!(failure.clone()).context(format!("case {case_id} could not be loaded")));
                }
                debug!(?resource, "[runtime] Detail request failed");
                *resource
            }
            _ => continue,
        };
        pending.remove(&resource);
    }

    Ok(runtime.read(|state| {
        json!({
            "case": selectors::current_case(state),
            "asset": selectors::current_case_asset(state),
            "serviceProvider": selectors::current_case_service_provider(state),
            "faults": selectors::current_case_faults(state),
            "notes": selectors::current_case_notes(state),
            "recipients": selectors::case_recipients(state),
            "error": selectors::cases_error(state),
        })
    }))
}

fn notes_refreshed() -> EventFilter {
    EventFilter::kinds(vec![
        EventKind::SetCurrentCaseNotes,
        EventKind::RequestFailed(Resource::CaseNotes),
    ])
}

/// A rejected note mutation dispatches nothing, so a timeout here means
/// the backend refused it.
async fn await_notes(runtime: &CaseRuntime, settled: &mut Subscription, wait: Duration) -> anyhow::Result<Value> {
    let event = next(settled, wait)
        .await
        .context("note change was not confirmed, see logs for the backend reply")?;
    if let StoreEvent::RequestFailed { failure, .. } = event {
        return Err(anyhow!(failure).context("note refresh failed"));
    }
    Ok(runtime.read(|state| json!({ "notes": selectors::current_case_notes(state) })))
}

async fn update_case(runtime: &CaseRuntime, payload: UpdateCasePayload, wait: Duration) -> anyhow::Result<Value> {
    let mut settled = runtime.subscribe(EventFilter::kinds(vec![
        EventKind::UpdateCaseSuccess,
        EventKind::UpdateCaseFailure,
    ]));
    runtime.commands().update_case_request(payload)?;

    match next(&mut settled, wait).await? {
        StoreEvent::UpdateCaseFailure(failure) => Err(anyhow!(failure).context("case update rejected")),
        _ => Ok(runtime.read(|state| json!({ "case": selectors::current_case(state) }))),
    }
}

async fn next(subscription: &mut Subscription, wait: Duration) -> anyhow::Result<StoreEvent> {
    CaseRuntime::next_event(subscription, wait)
        .await
        .ok_or_else(|| anyhow!("no reply within {wait:?}"))
}

//! # Case Commands
//!
//! What UI code calls. Every command is a single dispatch (or a short,
//! ordered batch of them); nothing here waits for the backend.

use cf_02_entity_store::{Dispatcher, StoreError};
use serde_json::Value;
use shared_bus::{FetchRequest, StoreEvent};
use shared_types::{CaseQuery, EntityId, PostCaseNotePayload, UpdateCaseNotePayload, UpdateCasePayload};

/// UI-facing entry points into the store and workflows.
#[derive(Debug, Clone)]
pub struct CaseCommands {
    dispatcher: Dispatcher,
}

impl CaseCommands {
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    fn fetch(&self, request: FetchRequest) -> Result<(), StoreError> {
        self.dispatcher.dispatch(StoreEvent::FetchRequested(request))
    }

    /// Fetch one case; on success it becomes the current case.
    ///
    /// # Errors
    ///
    /// [`StoreError::Closed`] if the store has stopped. The same holds for
    /// every command below.
    pub fn load_case(&self, case_id: impl Into<EntityId>) -> Result<(), StoreError> {
        self.fetch(FetchRequest::Case {
            case_id: case_id.into(),
        })
    }

    pub fn load_case_faults(&self, case_id: impl Into<EntityId>) -> Result<(), StoreError> {
        self.fetch(FetchRequest::CaseFaults {
            case_id: case_id.into(),
        })
    }

    pub fn load_case_notes(&self, case_id: impl Into<EntityId>) -> Result<(), StoreError> {
        self.fetch(FetchRequest::CaseNotes {
            case_id: case_id.into(),
        })
    }

    pub fn load_case_recipients(&self, case_id: impl Into<EntityId>) -> Result<(), StoreError> {
        self.fetch(FetchRequest::CaseRecipients {
            case_id: case_id.into(),
        })
    }

    /// Fetch a page of the case list. Results are appended to the list.
    pub fn load_cases(&self, query: CaseQuery) -> Result<(), StoreError> {
        self.fetch(FetchRequest::Cases { query })
    }

    pub fn set_current_case(&self, case_id: Option<EntityId>) -> Result<(), StoreError> {
        self.dispatcher.dispatch(StoreEvent::SetCurrentCase(case_id))
    }

    pub fn set_current_case_faults(&self, faults: Option<Vec<Value>>) -> Result<(), StoreError> {
        self.dispatcher
            .dispatch(StoreEvent::SetCurrentCaseFaults(faults))
    }

    pub fn set_current_case_notes(&self, notes: Option<Vec<Value>>) -> Result<(), StoreError> {
        self.dispatcher.dispatch(StoreEvent::SetCurrentCaseNotes(notes))
    }

    pub fn post_case_note(&self, payload: PostCaseNotePayload) -> Result<(), StoreError> {
        self.dispatcher.dispatch(StoreEvent::PostCaseNote(payload))
    }

    pub fn update_case_request(&self, payload: UpdateCasePayload) -> Result<(), StoreError> {
        self.dispatcher.dispatch(StoreEvent::UpdateCaseRequest(payload))
    }

    pub fn update_case_note(&self, payload: UpdateCaseNotePayload) -> Result<(), StoreError> {
        self.dispatcher.dispatch(StoreEvent::UpdateCaseNote(payload))
    }

    pub fn clear_case_recipients(&self) -> Result<(), StoreError> {
        self.dispatcher.dispatch(StoreEvent::ClearCaseRecipients)
    }

    /// Drop the case list before a refresh.
    pub fn clear_cases(&self) -> Result<(), StoreError> {
        self.dispatcher.dispatch(StoreEvent::ResetCases)
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.dispatcher.dispatch(StoreEvent::Logout)
    }

    /// Enter a case detail view: select the case, then load it with its
    /// faults and notes.
    pub fn open_case(&self, case_id: impl Into<EntityId>) -> Result<(), StoreError> {
        let case_id = case_id.into();
        self.set_current_case(Some(case_id.clone()))?;
        self.load_case(case_id.clone())?;
        self.load_case_faults(case_id.clone())?;
        self.load_case_notes(case_id)
    }

    /// Leave a case detail view.
    pub fn close_case(&self) -> Result<(), StoreError> {
        self.set_current_case(None)?;
        self.set_current_case_faults(None)?;
        self.set_current_case_notes(None)
    }

    /// Reset the list and fetch it again.
    pub fn refresh_cases(&self, query: CaseQuery) -> Result<(), StoreError> {
        self.clear_cases()?;
        self.load_cases(query)
    }
}

//! # Store Events
//!
//! Defines every event that flows through the store and the shared bus.
//! The store reduces each event first and then re-publishes it here, so a
//! subscriber always observes state that already includes the event.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{
    ApiFailure, ApiResponse, CaseQuery, EntityId, NormalizedData, Pagination,
    PostCaseNotePayload, UpdateCaseNotePayload, UpdateCasePayload,
};

/// Backend resources with an independent request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// A single case.
    Case,
    /// Faults of the current case.
    CaseFaults,
    /// Notes of the current case.
    CaseNotes,
    /// Recipients a note on the current case can be sent to.
    CaseRecipients,
    /// The case list.
    Cases,
}

/// A request to fetch a resource from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FetchRequest {
    Case { case_id: EntityId },
    CaseFaults { case_id: EntityId },
    CaseNotes { case_id: EntityId },
    CaseRecipients { case_id: EntityId },
    Cases { query: CaseQuery },
}

impl FetchRequest {
    /// The resource whose request flags this fetch drives.
    #[must_use]
    pub fn resource(&self) -> Resource {
        match self {
            Self::Case { .. } => Resource::Case,
            Self::CaseFaults { .. } => Resource::CaseFaults,
            Self::CaseNotes { .. } => Resource::CaseNotes,
            Self::CaseRecipients { .. } => Resource::CaseRecipients,
            Self::Cases { .. } => Resource::Cases,
        }
    }
}

/// All events that can be dispatched to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    // =========================================================================
    // FETCH INTENTS (consumed by the fetch executor)
    // =========================================================================
    /// A resource should be fetched.
    FetchRequested(FetchRequest),

    // =========================================================================
    // REQUEST LIFECYCLE
    // =========================================================================
    /// A fetch started.
    RequestStarted(Resource),

    /// A fetch completed. Data is merged by the workflows, not by this event.
    RequestSucceeded {
        resource: Resource,
        response: ApiResponse,
    },

    /// A fetch failed.
    RequestFailed {
        resource: Resource,
        failure: ApiFailure,
    },

    // =========================================================================
    // ENTITY MERGES
    // =========================================================================
    /// Merge a normalized case list; appends `result` to `response_ids`.
    AddOrUpdateCases(NormalizedData),

    /// Merge one normalized case and make it current.
    AddOrUpdateCurrentCase(NormalizedData),

    // =========================================================================
    // CURRENT CASE VIEW
    // =========================================================================
    /// Select a case; `None` deselects.
    SetCurrentCase(Option<EntityId>),

    /// Replace the current case's faults; `None` clears them.
    SetCurrentCaseFaults(Option<Vec<Value>>),

    /// Replace the current case's notes; `None` clears them.
    SetCurrentCaseNotes(Option<Vec<Value>>),

    /// Reset the recipients request record.
    ClearCaseRecipients,

    // =========================================================================
    // SESSION
    // =========================================================================
    /// Reset the case list before a refresh.
    ResetCases,

    /// The user logged out.
    Logout,

    // =========================================================================
    // MUTATIONS
    // =========================================================================
    /// Create a note on a case.
    PostCaseNote(PostCaseNotePayload),

    /// Change a note's status.
    UpdateCaseNote(UpdateCaseNotePayload),

    /// Patch a case version.
    UpdateCaseRequest(UpdateCasePayload),

    /// The patched case, normalized.
    UpdateCaseSuccess(NormalizedData),

    /// The patch was rejected.
    UpdateCaseFailure(ApiFailure),

    // =========================================================================
    // APP SLICE
    // =========================================================================
    /// Paging metadata of the latest list fetch.
    SetFavoritePagination(Pagination),
}

/// Fine-grained event kind, one per reducer transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    FetchRequested(Resource),
    RequestStarted(Resource),
    RequestSucceeded(Resource),
    RequestFailed(Resource),
    AddOrUpdateCases,
    AddOrUpdateCurrentCase,
    SetCurrentCase,
    SetCurrentCaseFaults,
    SetCurrentCaseNotes,
    ClearCaseRecipients,
    ResetCases,
    Logout,
    PostCaseNote,
    UpdateCaseNote,
    UpdateCaseRequest,
    UpdateCaseSuccess,
    UpdateCaseFailure,
    SetFavoritePagination,
}

/// Event topics for coarse subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Fetch intents.
    Fetch,
    /// Request started/succeeded/failed.
    RequestStatus,
    /// Entity table merges.
    Entities,
    /// Current case selection, faults, notes, recipients.
    CurrentCase,
    /// Resets and logout.
    Session,
    /// Note and case mutations.
    Mutation,
    /// App slice updates.
    App,
    /// All events (no filtering).
    All,
}

impl StoreEvent {
    /// Get the fine-grained kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::FetchRequested(request) => EventKind::FetchRequested(request.resource()),
            Self::RequestStarted(resource) => EventKind::RequestStarted(*resource),
            Self::RequestSucceeded { resource, .. } => EventKind::RequestSucceeded(*resource),
            Self::RequestFailed { resource, .. } => EventKind::RequestFailed(*resource),
            Self::AddOrUpdateCases(_) => EventKind::AddOrUpdateCases,
            Self::AddOrUpdateCurrentCase(_) => EventKind::AddOrUpdateCurrentCase,
            Self::SetCurrentCase(_) => EventKind::SetCurrentCase,
            Self::SetCurrentCaseFaults(_) => EventKind::SetCurrentCaseFaults,
            Self::SetCurrentCaseNotes(_) => EventKind::SetCurrentCaseNotes,
            Self::ClearCaseRecipients => EventKind::ClearCaseRecipients,
            Self::ResetCases => EventKind::ResetCases,
            Self::Logout => EventKind::Logout,
            Self::PostCaseNote(_) => EventKind::PostCaseNote,
            Self::UpdateCaseNote(_) => EventKind::UpdateCaseNote,
            Self::UpdateCaseRequest(_) => EventKind::UpdateCaseRequest,
            Self::UpdateCaseSuccess(_) => EventKind::UpdateCaseSuccess,
            Self::UpdateCaseFailure(_) => EventKind::UpdateCaseFailure,
            Self::SetFavoritePagination(_) => EventKind::SetFavoritePagination,
        }
    }

    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::FetchRequested(_) => EventTopic::Fetch,
            Self::RequestStarted(_) | Self::RequestSucceeded { .. } | Self::RequestFailed { .. } => {
                EventTopic::RequestStatus
            }
            Self::AddOrUpdateCases(_) | Self::AddOrUpdateCurrentCase(_) => EventTopic::Entities,
            Self::SetCurrentCase(_)
            | Self::SetCurrentCaseFaults(_)
            | Self::SetCurrentCaseNotes(_)
            | Self::ClearCaseRecipients => EventTopic::CurrentCase,
            Self::ResetCases | Self::Logout => EventTopic::Session,
            Self::PostCaseNote(_)
            | Self::UpdateCaseNote(_)
            | Self::UpdateCaseRequest(_)
            | Self::UpdateCaseSuccess(_)
            | Self::UpdateCaseFailure(_) => EventTopic::Mutation,
            Self::SetFavoritePagination(_) => EventTopic::App,
        }
    }
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Exact kinds to include. Empty means all kinds.
    pub kinds: Vec<EventKind>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            kinds: Vec::new(),
        }
    }

    /// Create a filter for exact event kinds.
    #[must_use]
    pub fn kinds(kinds: Vec<EventKind>) -> Self {
        Self {
            topics: Vec::new(),
            kinds,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &StoreEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let kind_match = self.kinds.is_empty() || self.kinds.contains(&event.kind());

        topic_match && kind_match
    }
}

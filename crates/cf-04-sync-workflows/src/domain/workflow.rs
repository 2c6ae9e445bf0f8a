//! # Workflow Kinds
//!
//! One kind per listener. Each kind is triggered by exactly one event
//! kind. Kinds that await the backend cancel only their own previous run;
//! the load kinds never suspend and always complete.

use shared_bus::{EventKind, Resource, StoreEvent};

/// The workflows that keep the store in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowKind {
    /// Normalize a fetched case and make it current.
    CaseLoaded,
    /// Sort fetched faults by `reportedAt`.
    CaseFaultsLoaded,
    /// Sort fetched notes by `sentAt`.
    CaseNotesLoaded,
    /// Normalize a fetched list and record its paging.
    CasesLoaded,
    /// Create a note, then refresh the case and its notes.
    PostCaseNote,
    /// Change a note's status, then refresh the case and its notes.
    UpdateCaseNote,
    /// Patch a case version and merge the result.
    UpdateCase,
}

impl WorkflowKind {
    /// Every workflow, in listener start order.
    pub const ALL: [Self; 7] = [
        Self::CaseLoaded,
        Self::CaseFaultsLoaded,
        Self::CaseNotesLoaded,
        Self::CasesLoaded,
        Self::PostCaseNote,
        Self::UpdateCaseNote,
        Self::UpdateCase,
    ];

    /// The event kind that starts a run.
    #[must_use]
    pub const fn trigger(self) -> EventKind {
        match self {
            Self::CaseLoaded => EventKind::RequestSucceeded(Resource::Case),
            Self::CaseFaultsLoaded => EventKind::RequestSucceeded(Resource::CaseFaults),
            Self::CaseNotesLoaded => EventKind::RequestSucceeded(Resource::CaseNotes),
            Self::CasesLoaded => EventKind::RequestSucceeded(Resource::Cases),
            Self::PostCaseNote => EventKind::PostCaseNote,
            Self::UpdateCaseNote => EventKind::UpdateCaseNote,
            Self::UpdateCase => EventKind::UpdateCaseRequest,
        }
    }

    /// Whether a run awaits a backend call. Only these runs can be
    /// superseded; the rest finish before the next trigger is read.
    #[must_use]
    pub const fn suspends(self) -> bool {
        matches!(
            self,
            Self::PostCaseNote | Self::UpdateCaseNote | Self::UpdateCase
        )
    }

    /// The workflow an event triggers, if any.
    #[must_use]
    pub fn triggered_by(event: &StoreEvent) -> Option<Self> {
        let kind = event.kind();
        Self::ALL.into_iter().find(|w| w.trigger() == kind)
    }
}

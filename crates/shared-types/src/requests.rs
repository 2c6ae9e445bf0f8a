//! # Request Payloads
//!
//! Payloads carried by fetch and mutation events and handed to the API
//! client. Field names serialize in the backend's camelCase.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::EntityId;

/// Query parameters for the case list endpoint (scope, paging, filters).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseQuery {
    params: BTreeMap<String, String>,
}

impl CaseQuery {
    /// An empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// Restrict the list to a scope (e.g. a favorite).
    #[must_use]
    pub fn scope(self, scope: impl Into<String>) -> Self {
        self.param("scope", scope.into())
    }

    /// Request a page.
    #[must_use]
    pub fn page(self, page: u64) -> Self {
        self.param("page", page)
    }

    /// Set the page size.
    #[must_use]
    pub fn per_page(self, per_page: u64) -> Self {
        self.param("per_page", per_page)
    }

    /// Parameters as ordered name/value pairs.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

/// A note recipient: a user within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecipient {
    pub group_id: String,
    pub user_id: String,
}

/// Body of a new case note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteParams {
    pub recipients: Vec<NoteRecipient>,
    pub message: String,
}

/// Request to create a note on a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCaseNotePayload {
    pub case_id: EntityId,
    pub params: NoteParams,
}

/// Fields a case version patch may change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasePatch {
    pub approval_status: Option<String>,
    pub comments: Option<String>,
    pub po_number: Option<String>,
}

/// Request to patch a case version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCasePayload {
    pub case_id: EntityId,
    pub version_id: String,
    pub patch: CasePatch,
}

/// Request to change a note's status (e.g. mark it read).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaseNotePayload {
    pub case_id: EntityId,
    pub note_id: String,
    pub status: String,
}

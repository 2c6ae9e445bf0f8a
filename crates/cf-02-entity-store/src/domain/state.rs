//! # Store State
//!
//! Shape of the whole cache. Every slice is plain data; nothing here
//! mutates itself except through the reducer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{EntityId, EntityTable, Pagination};

/// Request record for the note-recipients lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecipients {
    pub requesting: bool,
    /// Whole failure payload of the last failed lookup.
    pub error: Option<Value>,
    /// Response body of the last successful lookup.
    pub data: Value,
}

impl Default for CaseRecipients {
    fn default() -> Self {
        Self {
            requesting: false,
            error: None,
            data: Value::Array(Vec::new()),
        }
    }
}

/// Case table plus the current-case view and request flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasesSlice {
    #[serde(flatten)]
    pub table: EntityTable,

    /// Empty when no case is selected.
    pub current_case_id: EntityId,
    /// Ascending by `reportedAt`.
    pub current_case_faults: Vec<Value>,
    /// Ascending by `sentAt`.
    pub current_case_notes: Vec<Value>,
    pub case_recipients: CaseRecipients,

    pub case_requesting: bool,
    pub case_faults_requesting: bool,
    pub case_notes_requesting: bool,
    /// List-level flag, also driven by case updates.
    pub requesting: bool,

    /// Last failure payload shared by every request flag above.
    pub error: Option<Value>,
}

/// App-wide state this layer writes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSlice {
    pub favorite_pagination: Pagination,
}

/// The whole store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub cases: CasesSlice,
    pub assets: EntityTable,
    pub service_providers: EntityTable,
    pub app: AppSlice,
}

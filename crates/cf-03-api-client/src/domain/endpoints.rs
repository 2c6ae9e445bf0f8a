//! # Endpoints
//!
//! Backend routes, relative to the configured base URL.
//!
//! | Operation            | Route                                   |
//! |----------------------|-----------------------------------------|
//! | fetch case           | `GET /cases/{id}`                       |
//! | fetch case list      | `GET /cases?<query>`                    |
//! | fetch faults         | `GET /cases/{id}/faults`                |
//! | fetch notes          | `GET /cases/{id}/notes`                 |
//! | fetch recipients     | `GET /cases/{id}/recipients`            |
//! | create note          | `POST /cases/{id}/notes`                |
//! | patch case version   | `PATCH /cases/{id}/versions/{version}`  |
//! | patch note           | `PATCH /cases/{id}/notes/{note}`        |

use std::fmt;

/// HTTP verbs the backend is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend resource path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Cases,
    Case { case_id: &'a str },
    CaseFaults { case_id: &'a str },
    CaseNotes { case_id: &'a str },
    CaseRecipients { case_id: &'a str },
    CaseVersion { case_id: &'a str, version_id: &'a str },
    CaseNote { case_id: &'a str, note_id: &'a str },
}

impl<'a> Endpoint<'a> {
    /// Raw (unescaped) path segments.
    #[must_use]
    pub fn segments(&self) -> Vec<&'a str> {
        match *self {
            Self::Cases => vec!["cases"],
            Self::Case { case_id } => vec!["cases", case_id],
            Self::CaseFaults { case_id } => vec!["cases", case_id, "faults"],
            Self::CaseNotes { case_id } => vec!["cases", case_id, "notes"],
            Self::CaseRecipients { case_id } => vec!["cases", case_id, "recipients"],
            Self::CaseVersion {
                case_id,
                version_id,
            } => vec!["cases", case_id, "versions", version_id],
            Self::CaseNote { case_id, note_id } => vec!["cases", case_id, "notes", note_id],
        }
    }

    /// Path relative to the base URL, e.g. `/cases/12/notes`.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments()
            .iter()
            .fold(String::new(), |mut path, segment| {
                path.push('/');
                path.push_str(segment);
                path
            })
    }
}

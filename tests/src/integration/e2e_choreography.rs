//! # End-to-End Choreography
//!
//! Behaviour that only shows up with several tasks in flight:
//!
//! - a newer trigger of the same workflow kind aborts the older run
//! - different kinds and plain fetches run side by side
//! - a rejected case update lowers the list flag with the failure
//! - list refresh and logout clear different parts of the cache

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use cf_02_entity_store::selectors;
    use cf_03_api_client::{Endpoint, HttpMethod};
    use shared_bus::{EventKind, Resource, StoreEvent};
    use shared_types::{
        ApiFailure, ApiResponse, CasePatch, CaseQuery, NoteParams, PostCaseNotePayload,
        UpdateCaseNotePayload, UpdateCasePayload,
    };

    use crate::integration::harness::{expect_event, expect_silence, Harness};

    fn note(case_id: &str) -> PostCaseNotePayload {
        PostCaseNotePayload {
            case_id: case_id.into(),
            params: NoteParams {
                recipients: vec![],
                message: format!("note on {case_id}"),
            },
        }
    }

    // =========================================================================
    // LATEST WINS
    // =========================================================================

    #[tokio::test]
    async fn test_superseded_note_post_never_refreshes() {
        let h = Harness::start();
        h.api.respond_once_after(
            HttpMethod::Post,
            Endpoint::CaseNotes { case_id: "old" },
            Duration::from_millis(300),
            Ok(ApiResponse::ok(json!({})).with_status(201)),
        );
        h.api.respond(
            HttpMethod::Post,
            Endpoint::CaseNotes { case_id: "new" },
            Ok(ApiResponse::ok(json!({})).with_status(201)),
        );
        let mut refresh = h.subscribe(vec![EventKind::FetchRequested(Resource::Case)]);

        h.runtime.commands().post_case_note(note("old")).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        h.runtime.commands().post_case_note(note("new")).unwrap();

        match expect_event(&mut refresh).await {
            StoreEvent::FetchRequested(request) => {
                assert_eq!(request, shared_bus::FetchRequest::Case { case_id: "new".into() });
            }
            other => panic!("unexpected event {other:?}"),
        }
        expect_silence(&mut refresh, Duration::from_millis(500)).await;
        assert_eq!(h.api.calls_to(HttpMethod::Get, Endpoint::Case { case_id: "old" }), 0);
        h.runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_fetches_are_never_superseded() {
        let h = Harness::start();
        for case_id in ["1", "2"] {
            h.api.respond_once_after(
                HttpMethod::Get,
                Endpoint::CaseFaults { case_id },
                Duration::from_millis(100),
                Ok(ApiResponse::ok(json!([{ "id": format!("{case_id}-f") }]))),
            );
        }
        let mut done = h.subscribe(vec![EventKind::RequestSucceeded(Resource::CaseFaults)]);

        h.runtime.commands().load_case_faults("1").unwrap();
        h.runtime.commands().load_case_faults("2").unwrap();

        expect_event(&mut done).await;
        expect_event(&mut done).await;
        h.runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_note_post_and_note_update_run_side_by_side() {
        let h = Harness::start();
        h.api.respond_once_after(
            HttpMethod::Post,
            Endpoint::CaseNotes { case_id: "1" },
            Duration::from_millis(100),
            Ok(ApiResponse::ok(json!({})).with_status(201)),
        );
        h.api.respond(
            HttpMethod::Patch,
            Endpoint::CaseNote {
                case_id: "1",
                note_id: "n1",
            },
            Ok(ApiResponse::ok(json!({}))),
        );
        let mut refresh = h.subscribe(vec![EventKind::FetchRequested(Resource::CaseNotes)]);

        h.runtime.commands().post_case_note(note("1")).unwrap();
        h.runtime
            .commands()
            .update_case_note(UpdateCaseNotePayload {
                case_id: "1".into(),
                note_id: "n1".into(),
                status: "read".into(),
            })
            .unwrap();

        expect_event(&mut refresh).await;
        expect_event(&mut refresh).await;
        h.runtime.shutdown().await;
    }

    // =========================================================================
    // CASE UPDATE
    // =========================================================================

    fn update(version_id: &str) -> UpdateCasePayload {
        UpdateCasePayload {
            case_id: "1".into(),
            version_id: version_id.into(),
            patch: CasePatch {
                approval_status: Some("approved".into()),
                comments: Some("ok".into()),
                po_number: Some("222".into()),
            },
        }
    }

    #[tokio::test]
    async fn test_rejected_update_lowers_flag_with_failure() {
        let h = Harness::start();
        h.api.respond(
            HttpMethod::Patch,
            Endpoint::CaseVersion {
                case_id: "1",
                version_id: "2",
            },
            Err(ApiFailure::http(409, json!({ "message": "stale version" }))),
        );
        let mut requested = h.subscribe(vec![EventKind::UpdateCaseRequest]);
        let mut failed = h.subscribe(vec![EventKind::UpdateCaseFailure]);

        h.runtime.commands().update_case_request(update("2")).unwrap();
        expect_event(&mut requested).await;

        match expect_event(&mut failed).await {
            StoreEvent::UpdateCaseFailure(failure) => assert_eq!(failure.status, Some(409)),
            other => panic!("unexpected event {other:?}"),
        }
        h.runtime.read(|state| {
            assert!(!selectors::cases_requesting(state));
            assert_eq!(
                selectors::cases_error(state),
                Some(&json!({ "status": 409, "error": { "message": "stale version" } }))
            );
        });
        h.runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_accepted_update_merges_then_succeeds() {
        let h = Harness::start();
        h.api.respond(
            HttpMethod::Patch,
            Endpoint::CaseVersion {
                case_id: "1",
                version_id: "2",
            },
            Ok(ApiResponse::ok(json!({
                "id": "1",
                "versionId": "3",
                "approvalStatus": "approved",
                "asset": { "id": "a1" }
            }))),
        );
        let mut settled = h.subscribe(vec![
            EventKind::AddOrUpdateCurrentCase,
            EventKind::UpdateCaseSuccess,
        ]);

        h.runtime.commands().update_case_request(update("2")).unwrap();
        assert_eq!(
            expect_event(&mut settled).await.kind(),
            EventKind::AddOrUpdateCurrentCase
        );
        assert_eq!(
            expect_event(&mut settled).await.kind(),
            EventKind::UpdateCaseSuccess
        );

        let patched = h.api.calls()[0].body.clone();
        assert_eq!(
            patched,
            Some(json!({ "approvalStatus": "approved", "comments": "ok", "poNumber": "222" }))
        );
        h.runtime.read(|state| {
            assert!(!selectors::cases_requesting(state));
            assert_eq!(selectors::current_case_id(state), Some("1"));
            assert_eq!(
                selectors::current_case(state).map(|c| c["versionId"].clone()),
                Some(json!("3"))
            );
            assert!(state.assets.get("a1").is_some());
        });
        h.runtime.shutdown().await;
    }

    // =========================================================================
    // SESSION
    // =========================================================================

    #[tokio::test]
    async fn test_refresh_keeps_related_tables_logout_drops_them() {
        let h = Harness::start();
        h.api.respond(
            HttpMethod::Get,
            Endpoint::Cases,
            Ok(ApiResponse::ok(json!([
                { "id": "1", "asset": { "id": "a1" }, "serviceProvider": { "id": "sp1" } }
            ]))),
        );
        let mut loaded = h.subscribe(vec![EventKind::SetFavoritePagination]);
        h.runtime.commands().load_cases(CaseQuery::new()).unwrap();
        expect_event(&mut loaded).await;

        let mut reset = h.subscribe(vec![EventKind::ResetCases]);
        h.runtime.commands().clear_cases().unwrap();
        expect_event(&mut reset).await;
        h.runtime.read(|state| {
            assert!(selectors::cases(state).is_empty());
            assert_eq!(state.assets.len(), 1);
            assert_eq!(state.service_providers.len(), 1);
        });

        let mut logout = h.subscribe(vec![EventKind::Logout]);
        h.runtime.commands().logout().unwrap();
        expect_event(&mut logout).await;
        h.runtime.read(|state| {
            assert!(state.assets.is_empty());
            assert!(state.service_providers.is_empty());
        });
        h.runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_recipients_lifecycle() {
        let h = Harness::start();
        h.api.respond(
            HttpMethod::Get,
            Endpoint::CaseRecipients { case_id: "1" },
            Err(ApiFailure::http(503, serde_json::Value::Null)),
        );
        let mut failed = h.subscribe(vec![EventKind::RequestFailed(Resource::CaseRecipients)]);
        h.runtime.commands().load_case_recipients("1").unwrap();
        expect_event(&mut failed).await;

        let recipients = h.runtime.read(|state| selectors::case_recipients(state).clone());
        assert!(!recipients.requesting);
        assert_eq!(
            recipients.error,
            Some(json!({ "status": 503, "error": { "code": 503 } }))
        );
        assert_eq!(recipients.data, json!([]));

        let mut cleared = h.subscribe(vec![EventKind::ClearCaseRecipients]);
        h.runtime.commands().clear_case_recipients().unwrap();
        expect_event(&mut cleared).await;
        let recipients = h.runtime.read(|state| selectors::case_recipients(state).clone());
        assert_eq!(recipients, cf_02_entity_store::CaseRecipients::default());
        h.runtime.shutdown().await;
    }
}

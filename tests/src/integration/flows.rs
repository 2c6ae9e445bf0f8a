//! # Integration Flows
//!
//! One user action each, from the command through the store, the bus,
//! the workflows and the scripted backend, to the settled state read
//! through the selectors.
//!
//! 1. **List load**: fetch, normalize, merge, pagination
//! 2. **Open case**: case, faults and notes in parallel, sorted
//! 3. **Post note**: mutation followed by a case and notes refresh
//! 4. **Failed fetch**: request flags and the recorded error

#[cfg(test)]
mod tests {
    use serde_json::json;

    use cf_02_entity_store::selectors;
    use cf_03_api_client::{Endpoint, HttpMethod};
    use shared_bus::{EventKind, Resource, StoreEvent};
    use shared_types::{
        ApiFailure, ApiResponse, CaseQuery, NoteParams, NoteRecipient, Pagination,
        PostCaseNotePayload,
    };

    use crate::integration::harness::{expect_event, Harness};

    // =========================================================================
    // FIXTURES
    // =========================================================================

    fn case_page_one() -> ApiResponse {
        ApiResponse::ok(json!([
            {
                "id": "10",
                "status": "open",
                "asset": { "id": 7, "unitNumber": "T-7" },
                "serviceProvider": { "id": "sp-1", "name": "Acme Repair" }
            },
            {
                "id": "11",
                "status": "open",
                "asset": { "id": 7, "unitNumber": "T-7", "vin": "VIN7" },
                "serviceProvider": "sp-1"
            }
        ]))
        .with_header("X-Page", "1")
        .with_header("X-Per-Page", "2")
        .with_header("X-Total-Count", "3")
        .with_header("X-Total-Pages", "2")
    }

    fn case_page_two() -> ApiResponse {
        ApiResponse::ok(json!([
            { "id": "12", "status": "closed", "asset": { "id": 8 } }
        ]))
        .with_header("X-Page", "2")
        .with_header("X-Per-Page", "2")
        .with_header("X-Total-Count", "3")
        .with_header("X-Total-Pages", "2")
    }

    // =========================================================================
    // LIST LOAD
    // =========================================================================

    #[tokio::test]
    async fn test_case_list_pages_accumulate() {
        let h = Harness::start();
        h.api.respond_once(HttpMethod::Get, Endpoint::Cases, Ok(case_page_one()));
        h.api.respond_once(HttpMethod::Get, Endpoint::Cases, Ok(case_page_two()));
        let mut settled = h.subscribe(vec![EventKind::SetFavoritePagination]);

        h.runtime
            .commands()
            .refresh_cases(CaseQuery::new().per_page(2))
            .unwrap();
        expect_event(&mut settled).await;

        h.runtime.read(|state| {
            let ids: Vec<_> = selectors::cases(state).iter().map(|c| c["id"].clone()).collect();
            assert_eq!(ids, vec![json!("10"), json!("11")]);
            // Both cases point at the same asset; its fields were merged.
            assert_eq!(state.assets.len(), 1);
            let asset = state.assets.get("7").unwrap();
            assert_eq!(asset["unitNumber"], json!("T-7"));
            assert_eq!(asset["vin"], json!("VIN7"));
            // Related tables never track response order.
            assert!(state.assets.response_ids.is_empty());
            assert!(!selectors::cases_requesting(state));
        });

        h.runtime
            .commands()
            .load_cases(CaseQuery::new().per_page(2).page(2))
            .unwrap();
        match expect_event(&mut settled).await {
            StoreEvent::SetFavoritePagination(pagination) => assert_eq!(
                pagination,
                Pagination {
                    latest_page: Some(2),
                    per_page: Some(2),
                    total_count: Some(3),
                    total_pages: Some(2),
                }
            ),
            other => panic!("unexpected event {other:?}"),
        }

        let count = h.runtime.read(|state| selectors::cases(state).len());
        assert_eq!(count, 3);
        h.runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_case_list_query_reaches_backend() {
        let h = Harness::start();
        h.api.respond(HttpMethod::Get, Endpoint::Cases, Ok(case_page_one()));
        let mut settled = h.subscribe(vec![EventKind::SetFavoritePagination]);

        h.runtime
            .commands()
            .load_cases(CaseQuery::new().scope("favorites").page(1))
            .unwrap();
        expect_event(&mut settled).await;

        let calls = h.api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "/cases");
        assert_eq!(
            calls[0].query,
            vec![
                ("page".to_string(), "1".to_string()),
                ("scope".to_string(), "favorites".to_string())
            ]
        );
        h.runtime.shutdown().await;
    }

    // =========================================================================
    // OPEN CASE
    // =========================================================================

    #[tokio::test]
    async fn test_open_case_resolves_relations_and_sorts_children() {
        let h = Harness::start();
        h.api.respond(
            HttpMethod::Get,
            Endpoint::Case { case_id: "10" },
            Ok(ApiResponse::ok(json!({
                "id": "10",
                "asset": { "id": 7, "unitNumber": "T-7" },
                "serviceProvider": { "id": "sp-1", "name": "Acme Repair" }
            }))),
        );
        h.api.respond(
            HttpMethod::Get,
            Endpoint::CaseFaults { case_id: "10" },
            Ok(ApiResponse::ok(json!([
                { "id": "f3", "reportedAt": "2024-01-03T00:00:00Z" },
                { "id": "f1", "reportedAt": "2024-01-01T00:00:00Z" },
                { "id": "f2", "reportedAt": "2024-01-02T00:00:00Z" }
            ]))),
        );
        h.api.respond(
            HttpMethod::Get,
            Endpoint::CaseNotes { case_id: "10" },
            Ok(ApiResponse::ok(json!([
                { "id": "n2", "sentAt": "2024-02-02T00:00:00Z" },
                { "id": "n1", "sentAt": "2024-02-01T00:00:00Z" }
            ]))),
        );

        let mut case = h.subscribe(vec![EventKind::AddOrUpdateCurrentCase]);
        let mut faults = h.subscribe(vec![EventKind::SetCurrentCaseFaults]);
        let mut notes = h.subscribe(vec![EventKind::SetCurrentCaseNotes]);

        h.runtime.commands().open_case("10").unwrap();
        expect_event(&mut case).await;
        expect_event(&mut faults).await;
        expect_event(&mut notes).await;

        h.runtime.read(|state| {
            assert_eq!(selectors::current_case_id(state), Some("10"));
            assert_eq!(selectors::current_case_asset(state)["unitNumber"], json!("T-7"));
            assert_eq!(
                selectors::current_case_service_provider(state)["name"],
                json!("Acme Repair")
            );

            let fault_ids: Vec<_> = selectors::current_case_faults(state)
                .iter()
                .map(|f| f["id"].clone())
                .collect();
            assert_eq!(fault_ids, vec![json!("f1"), json!("f2"), json!("f3")]);

            let note_ids: Vec<_> = selectors::current_case_notes(state)
                .iter()
                .map(|n| n["id"].clone())
                .collect();
            assert_eq!(note_ids, vec![json!("n1"), json!("n2")]);

            assert!(!selectors::case_requesting(state));
            assert!(!selectors::case_faults_requesting(state));
            assert!(!selectors::case_notes_requesting(state));
        });

        let mut cleared = h.subscribe(vec![EventKind::SetCurrentCaseNotes]);
        h.runtime.commands().close_case().unwrap();
        expect_event(&mut cleared).await;
        h.runtime.read(|state| {
            assert_eq!(selectors::current_case_id(state), None);
            assert!(selectors::current_case_faults(state).is_empty());
            // The case itself stays cached.
            assert!(state.cases.table.get("10").is_some());
        });
        h.runtime.shutdown().await;
    }

    // =========================================================================
    // POST NOTE
    // =========================================================================

    #[tokio::test]
    async fn test_post_note_refreshes_case_then_notes() {
        let h = Harness::start();
        h.api.respond(
            HttpMethod::Post,
            Endpoint::CaseNotes { case_id: "10" },
            Ok(ApiResponse::ok(json!({ "id": "n9" })).with_status(201)),
        );
        h.api.respond(
            HttpMethod::Get,
            Endpoint::Case { case_id: "10" },
            Ok(ApiResponse::ok(json!({ "id": "10", "noteCount": 1 }))),
        );
        h.api.respond(
            HttpMethod::Get,
            Endpoint::CaseNotes { case_id: "10" },
            Ok(ApiResponse::ok(json!([{ "id": "n9", "sentAt": "2024-05-01T00:00:00Z" }]))),
        );
        let mut fetches = h.subscribe(vec![
            EventKind::FetchRequested(Resource::Case),
            EventKind::FetchRequested(Resource::CaseNotes),
        ]);
        let mut notes = h.subscribe(vec![EventKind::SetCurrentCaseNotes]);

        h.runtime
            .commands()
            .post_case_note(PostCaseNotePayload {
                case_id: "10".into(),
                params: NoteParams {
                    recipients: vec![NoteRecipient {
                        group_id: "123".into(),
                        user_id: "234".into(),
                    }],
                    message: "message to test".into(),
                },
            })
            .unwrap();

        assert_eq!(
            expect_event(&mut fetches).await.kind(),
            EventKind::FetchRequested(Resource::Case)
        );
        assert_eq!(
            expect_event(&mut fetches).await.kind(),
            EventKind::FetchRequested(Resource::CaseNotes)
        );
        expect_event(&mut notes).await;

        let posted = &h.api.calls()[0];
        assert_eq!(posted.method, HttpMethod::Post);
        assert_eq!(
            posted.body,
            Some(json!({
                "recipients": [{ "groupId": "123", "userId": "234" }],
                "message": "message to test"
            }))
        );
        let notes = h.runtime.read(|state| selectors::current_case_notes(state).to_vec());
        assert_eq!(notes.len(), 1);
        h.runtime.shutdown().await;
    }

    // =========================================================================
    // FAILED FETCH
    // =========================================================================

    #[tokio::test]
    async fn test_failed_case_fetch_records_error() {
        let h = Harness::start();
        h.api.respond(
            HttpMethod::Get,
            Endpoint::Case { case_id: "404" },
            Err(ApiFailure::http(404, json!({ "message": "Case not found" }))),
        );
        let mut failed = h.subscribe(vec![EventKind::RequestFailed(Resource::Case)]);

        h.runtime.commands().load_case("404").unwrap();
        expect_event(&mut failed).await;

        h.runtime.read(|state| {
            assert!(!selectors::case_requesting(state));
            assert_eq!(
                selectors::cases_error(state),
                Some(&json!({ "message": "Case not found" }))
            );
        });

        // A later success clears the error.
        h.api.respond(
            HttpMethod::Get,
            Endpoint::Case { case_id: "404" },
            Ok(ApiResponse::ok(json!({ "id": "404" }))),
        );
        let mut merged = h.subscribe(vec![EventKind::AddOrUpdateCurrentCase]);
        h.runtime.commands().load_case("404").unwrap();
        expect_event(&mut merged).await;
        assert_eq!(h.runtime.read(|state| selectors::cases_error(state).cloned()), None);
        h.runtime.shutdown().await;
    }
}

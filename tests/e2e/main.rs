//! End-to-end tests for relo against a scripted backend
//!
//! These tests exercise the full client flows (session, aggregation, page
//! loads, downloads) over real HTTP against a wiremock server, without a
//! live Relocate Me backend.

mod fixtures;

use anyhow::Result;
use relo::api::{ApiClient, ApiError, DownloadOutcome};
use relo::model::ChromeExtension;
use relo::session::SessionStore;
use relo::timeline::{CategoryFilter, TimelineAggregator, TimelineView};
use relo::tui::Route;
use relo::tui::pages::{self, PageData};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::with_timeouts(server.uri(), Duration::from_secs(5), Duration::from_secs(5)).unwrap()
}

fn json_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/json")
}

async fn mount_timeline_v1(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/timeline/full"))
        .respond_with(json_response(fixtures::TIMELINE_FULL_V1))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/timeline/by-category"))
        .respond_with(json_response(fixtures::TIMELINE_BY_CATEGORY_V1))
        .mount(server)
        .await;
}

// ---- session ----

/// Valid demo credentials produce an authenticated session whose username
/// comes from the identity endpoint, with the token persisted on disk.
#[tokio::test]
async fn test_login_persists_token_and_identity() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(serde_json::json!({
            "username": "relocate_user",
            "password": "SecurePass2025!"
        })))
        .respond_with(json_response(
            r#"{"access_token": "tok-1", "token_type": "bearer"}"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(json_response(fixtures::IDENTITY))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir()?;
    let auth_path = dir.path().join("auth.json");
    let mut store = SessionStore::at(auth_path.clone());
    let mut api = client(&server);

    store
        .login(&mut api, "relocate_user", "SecurePass2025!")
        .await?;

    assert!(store.is_authenticated());
    assert_eq!(store.username(), Some("relocate_user"));
    assert!(api.has_token());
    assert!(auth_path.exists());
    Ok(())
}

/// A rejected login surfaces one undifferentiated error and leaves the
/// session unauthenticated with nothing persisted.
#[tokio::test]
async fn test_login_rejection_is_generic_and_unauthenticated() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_raw(r#"{"detail": "Incorrect username or password"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir()?;
    let auth_path = dir.path().join("auth.json");
    let mut store = SessionStore::at(auth_path.clone());
    let mut api = client(&server);

    let err = store
        .login(&mut api, "relocate_user", "wrong-password")
        .await
        .unwrap_err();

    // The error carries no field-level detail for the UI to leak
    assert!(matches!(err, ApiError::Unauthorized));
    assert!(!store.is_authenticated());
    assert!(!api.has_token());
    assert!(!auth_path.exists());
    Ok(())
}

/// Restore validates the persisted token once and succeeds.
#[tokio::test]
async fn test_restore_validates_persisted_token() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer saved-tok"))
        .respond_with(json_response(fixtures::IDENTITY))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir()?;
    let auth_path = dir.path().join("auth.json");
    relo::storage::write_json(&auth_path, &serde_json::json!({"token": "saved-tok"}))?;

    let mut store = SessionStore::at(auth_path);
    let mut api = client(&server);

    assert!(store.restore(&mut api).await);
    assert_eq!(store.username(), Some("relocate_user"));
    Ok(())
}

/// Restore fails closed: a rejected token is deleted and the session stays
/// unauthenticated. Single attempt, no retry.
#[tokio::test]
async fn test_restore_fail_closed_discards_token() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir()?;
    let auth_path = dir.path().join("auth.json");
    relo::storage::write_json(&auth_path, &serde_json::json!({"token": "stale-tok"}))?;

    let mut store = SessionStore::at(auth_path.clone());
    let mut api = client(&server);

    assert!(!store.restore(&mut api).await);
    assert!(!store.is_authenticated());
    assert!(!api.has_token());
    assert!(!auth_path.exists());
    Ok(())
}

/// The two-step reset flow: request a code, complete with it, and surface
/// the backend's detail when completion is rejected.
#[tokio::test]
async fn test_password_reset_flow() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/reset-password"))
        .and(body_json(serde_json::json!({"username": "relocate_user"})))
        .respond_with(json_response(r#"{"reset_code": "483921"}"#))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/complete-password-reset"))
        .and(body_json(serde_json::json!({
            "username": "relocate_user",
            "reset_code": "483921",
            "new_password": "NewPass2025!"
        })))
        .respond_with(json_response(r#"{"status": "ok"}"#))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/complete-password-reset"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_raw(r#"{"detail": "Invalid reset code"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let store = SessionStore::at(tempfile::tempdir()?.path().join("auth.json"));
    let api = client(&server);

    let code = store.request_password_reset(&api, "relocate_user").await?;
    assert_eq!(code, "483921");

    store
        .complete_password_reset(&api, "relocate_user", &code, "NewPass2025!")
        .await?;

    let err = store
        .complete_password_reset(&api, "relocate_user", "000000", "NewPass2025!")
        .await
        .unwrap_err();
    match err {
        ApiError::Status { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Invalid reset code");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    Ok(())
}

// ---- timeline aggregation ----

/// The merged snapshot is internally consistent: the aggregate percentage
/// matches the counts, per-category counts match the flagged steps, and
/// by-category subsets equal the matching full-timeline slices.
#[tokio::test]
async fn test_aggregator_merges_consistent_snapshot() -> Result<()> {
    let server = MockServer::start().await;
    mount_timeline_v1(&server).await;

    let api = client(&server);
    let mut agg = TimelineAggregator::new();
    agg.load(&api).await?;

    let view = agg.view().unwrap();
    let overview = &view.overview;

    // Aggregate consistency
    let flagged = overview.timeline.iter().filter(|s| s.is_completed).count();
    assert_eq!(overview.completed_steps as usize, flagged);
    let expected_pct = flagged as f64 / overview.total_steps() as f64 * 100.0;
    assert!((overview.completion_percentage - expected_pct).abs() < 0.5);

    // Category key order is exactly what the backend sent
    let categories: Vec<&str> = view.categories().collect();
    assert_eq!(categories, vec!["housing", "visa", "employment", "logistics"]);

    // Per-category counts and subset equality against the full timeline
    for (category, group) in view.by_category.iter() {
        assert!(group.completed_steps <= group.total_steps);
        assert_eq!(
            group.completed_steps as usize,
            group.steps.iter().filter(|s| s.is_completed).count()
        );

        let full_slice: Vec<&str> = overview
            .timeline
            .iter()
            .filter(|s| s.category == category)
            .map(|s| s.id.as_str())
            .collect();
        let group_slice: Vec<&str> = group.steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(group_slice, full_slice);
    }
    Ok(())
}

/// Category filtering is pure view state: all -> visa -> all hands back the
/// original full ordered sequence.
#[tokio::test]
async fn test_filter_round_trip_preserves_sequence() -> Result<()> {
    let server = MockServer::start().await;
    mount_timeline_v1(&server).await;

    let api = client(&server);
    let mut agg = TimelineAggregator::new();
    agg.load(&api).await?;

    let original: Vec<String> = agg.visible_steps().iter().map(|s| s.id.clone()).collect();

    agg.set_filter(CategoryFilter::Category("visa".to_string()));
    let visa_ids: Vec<&str> = agg.visible_steps().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(visa_ids, vec!["v1", "v2"]);

    agg.set_filter(CategoryFilter::All);
    let restored: Vec<String> = agg.visible_steps().iter().map(|s| s.id.clone()).collect();
    assert_eq!(restored, original);
    assert_eq!(restored, vec!["h1", "h2", "v1", "v2", "e1", "l1"]);
    Ok(())
}

/// If one of the two timeline fetches fails, the whole load fails and the
/// previously merged snapshot stays untouched.
#[tokio::test]
async fn test_partial_failure_is_total_failure() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/timeline/full"))
        .respond_with(json_response(fixtures::TIMELINE_FULL_V1))
        .mount(&server)
        .await;
    // First by-category call succeeds, every later one fails
    Mock::given(method("GET"))
        .and(path("/api/timeline/by-category"))
        .respond_with(json_response(fixtures::TIMELINE_BY_CATEGORY_V1))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/timeline/by-category"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = client(&server);
    let mut agg = TimelineAggregator::new();
    agg.load(&api).await?;
    let before = agg.view().unwrap().clone();

    let err = agg.load(&api).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));

    // No half-merged state: the old snapshot is fully intact
    assert_eq!(agg.view().unwrap(), &before);
    let categories: Vec<&str> = agg.view().unwrap().categories().collect();
    assert_eq!(categories, vec!["housing", "visa", "employment", "logistics"]);
    Ok(())
}

/// Toggling a step posts the mutation and reloads everything from the
/// backend: the step flips, its category's completed count moves by exactly
/// one, and no other category changes. Repeating the same toggle leaves the
/// counts where they were.
#[tokio::test]
async fn test_toggle_reloads_and_is_idempotent() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/timeline/update-progress"))
        .and(body_json(serde_json::json!({"step_id": "e1", "completed": true})))
        .respond_with(json_response(r#"{"status": "ok"}"#))
        .mount(&server)
        .await;
    // First load serves the V1 snapshot, every reload after the toggle V2
    Mock::given(method("GET"))
        .and(path("/api/timeline/full"))
        .respond_with(json_response(fixtures::TIMELINE_FULL_V1))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/timeline/by-category"))
        .respond_with(json_response(fixtures::TIMELINE_BY_CATEGORY_V1))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/timeline/full"))
        .respond_with(json_response(fixtures::TIMELINE_FULL_V2))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/timeline/by-category"))
        .respond_with(json_response(fixtures::TIMELINE_BY_CATEGORY_V2))
        .mount(&server)
        .await;

    let api = client(&server);
    let mut agg = TimelineAggregator::new();
    agg.load(&api).await?;

    let before = agg.view().unwrap().clone();
    let target = before
        .overview
        .timeline
        .iter()
        .find(|s| s.id == "e1")
        .unwrap();
    assert!(!target.is_completed);

    agg.toggle_step(&api, "e1", true).await?;

    let after = agg.view().unwrap();
    let step = after.overview.timeline.iter().find(|s| s.id == "e1").unwrap();
    assert!(step.is_completed);
    assert_eq!(
        after.overview.completed_steps,
        before.overview.completed_steps + 1
    );

    // Only the owning category moved
    for (category, group) in after.by_category.iter() {
        let old = before.by_category.get(category).unwrap();
        if category == "employment" {
            assert_eq!(group.completed_steps, old.completed_steps + 1);
        } else {
            assert_eq!(group.completed_steps, old.completed_steps);
        }
        assert_eq!(group.total_steps, old.total_steps);
    }

    // Same toggle again: backend state does not move, nor do our counts
    let counts_before = after.overview.completed_steps;
    agg.toggle_step(&api, "e1", true).await?;
    assert_eq!(agg.view().unwrap().overview.completed_steps, counts_before);
    Ok(())
}

/// A token that goes stale mid-session surfaces as `Unauthorized`, the
/// signal the app uses to force the session back to the login screen.
#[tokio::test]
async fn test_stale_token_surfaces_unauthorized() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/timeline/full"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/timeline/by-category"))
        .respond_with(json_response(fixtures::TIMELINE_BY_CATEGORY_V1))
        .mount(&server)
        .await;

    let mut api = client(&server);
    api.set_token("expired-tok");

    let err = TimelineView::fetch(&api).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    Ok(())
}

// ---- pages ----

/// The dashboard joins three endpoints in parallel and delivers one bundle.
#[tokio::test]
async fn test_dashboard_bundle_joins_three_fetches() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/overview"))
        .respond_with(json_response(fixtures::DASHBOARD_OVERVIEW))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/comparison/phoenix-to-peak-district"))
        .respond_with(json_response(fixtures::COMPARISON))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/chrome-extensions"))
        .respond_with(json_response(fixtures::EXTENSIONS))
        .mount(&server)
        .await;

    let api = client(&server);
    let data = pages::fetch_route(&api, Route::Dashboard).await?;
    match data {
        PageData::Dashboard(bundle) => {
            assert_eq!(bundle.overview.quick_stats.days_until_move, 120);
            assert_eq!(
                bundle.comparison.to_location.location_name,
                "Peak District, UK"
            );
            assert_eq!(bundle.extensions.len(), 2);
        }
        other => panic!("expected dashboard bundle, got {other:?}"),
    }
    Ok(())
}

/// One failing member fails the whole page join; nothing partial comes back.
#[tokio::test]
async fn test_page_join_is_all_or_nothing() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/overview"))
        .respond_with(json_response(fixtures::DASHBOARD_OVERVIEW))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/comparison/phoenix-to-peak-district"))
        .respond_with(json_response(fixtures::COMPARISON))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/chrome-extensions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = client(&server);
    let err = pages::fetch_route(&api, Route::Dashboard).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    Ok(())
}

/// Reads carry the bearer token; the scripted backend only answers when the
/// authorization header is present.
#[tokio::test]
async fn test_bearer_token_is_injected_per_request() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/overview"))
        .and(header("authorization", "Bearer tok-9"))
        .respond_with(json_response(fixtures::DASHBOARD_OVERVIEW))
        .mount(&server)
        .await;

    let mut api = client(&server);
    api.set_token("tok-9");
    let overview = api.dashboard_overview().await?;
    assert_eq!(overview.user.as_deref(), Some("relocate_user"));
    Ok(())
}

// ---- downloads ----

fn helper_extension() -> ChromeExtension {
    serde_json::from_str(
        r#"{
            "extension_name": "Relocate Me Helper",
            "download_url": "/api/download/relocate-helper.crx",
            "version": "1.0.0",
            "description": "Quick access to relocation data",
            "features": []
        }"#,
    )
    .unwrap()
}

/// A successful download lands the archive bytes in the target directory
/// under the slugged extension name.
#[tokio::test]
async fn test_extension_download_saves_archive() -> Result<()> {
    let server = MockServer::start().await;
    let archive: &[u8] = b"PK\x03\x04fake-zip-bytes";
    Mock::given(method("GET"))
        .and(path("/api/download/relocate-helper.crx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(archive))
        .mount(&server)
        .await;

    let api = client(&server);
    let dir = tempfile::tempdir()?;

    let outcome = api.download_extension(&helper_extension(), dir.path()).await?;
    match outcome {
        DownloadOutcome::Saved(path) => {
            assert_eq!(
                path.file_name().unwrap().to_str().unwrap(),
                "relocate-me-helper.zip"
            );
            assert_eq!(std::fs::read(&path)?, archive);
        }
        other => panic!("expected saved archive, got {other:?}"),
    }
    Ok(())
}

/// When the backend declines, the server's message is handed back for
/// display instead of an archive.
#[tokio::test]
async fn test_extension_download_unavailable_message() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/download/relocate-helper.crx"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_raw(r#"{"message": "Download not available yet"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let api = client(&server);
    let dir = tempfile::tempdir()?;

    let outcome = api.download_extension(&helper_extension(), dir.path()).await?;
    assert_eq!(
        outcome,
        DownloadOutcome::Unavailable("Download not available yet".to_string())
    );
    Ok(())
}

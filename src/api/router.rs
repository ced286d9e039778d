use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::api_keys;
use super::health;
use super::kudos;
use super::middleware::{logging_middleware, metrics_middleware};
use super::projects;
use super::state::AppState;

/// Probe-only router without state; `/ready` needs the full router
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .route("/projects", get(projects::list_projects))
        .route("/projects/{id}/similar", get(projects::similar_projects))
        .route(
            "/accounts/{account}/projects",
            get(projects::list_account_projects),
        )
        .route("/accounts/{account}/kudos", get(kudos::received_kudos))
        .route("/accounts/{account}/kudos/sent", get(kudos::sent_kudos))
        .route("/kudos", post(kudos::give_kudo))
        .route("/kudos/{id}", delete(kudos::rescind_kudo))
        .route("/api_keys/{id}/disable", post(api_keys::disable_api_key))
        .route("/api_keys/{id}/enable", post(api_keys::enable_api_key))
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::domain::account::{Account, AccountId};
    use crate::domain::api_key::{ApiKeyId, ApiKeyRepository, ApiKeyStatus};
    use crate::domain::kudo::{Kudo, KudoId, KudoRecipient};
    use crate::domain::project::{Manage, ProjectId, ProjectSummary, StackEntry, Tagging};
    use crate::infrastructure::seed::{ApiKeySeed, DirectorySeed, SeededRepositories};

    const PROJECT_COUNT: u64 = 30;

    fn key(id: &str, client_id: &str, daily_count: u64, daily_limit: u64) -> ApiKeySeed {
        ApiKeySeed {
            id: ApiKeyId::new(id).unwrap(),
            client_id: client_id.to_string(),
            account_id: AccountId::new(1),
            name: id.to_string(),
            description: None,
            status: ApiKeyStatus::Active,
            daily_count,
            daily_limit: Some(daily_limit),
        }
    }

    /// Projects 1..=30; every tenth is unrated, the rest rate id / 10
    fn project(id: u64) -> ProjectSummary {
        let project = ProjectSummary::new(
            ProjectId::new(id),
            format!("Project {:02}", id),
            format!("project-{}", id),
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::days(id as i64),
        );

        if id % 10 == 0 {
            project
        } else {
            project.with_rating_average(id as f64 / 10.0)
        }
    }

    fn kudo(id: u64, sender: u64, recipient: KudoRecipient, month: u32) -> Kudo {
        Kudo::new(KudoId::new(id), AccountId::new(sender), recipient)
            .with_created_at(Utc.with_ymd_and_hms(2021, month, 1, 0, 0, 0).unwrap())
    }

    fn seed() -> DirectorySeed {
        let mut revoked = Manage::new(AccountId::new(1), ProjectId::new(3));
        revoked.revoked_at = Some(Utc::now());

        DirectorySeed {
            accounts: vec![
                Account::new(AccountId::new(1), "robin").with_name("Robin Hood"),
                Account::new(AccountId::new(2), "marian"),
                Account::new(AccountId::new(3), "tuck"),
                Account::new(AccountId::new(4), "abbot").with_admin(true),
            ],
            api_keys: vec![
                key("robin-key", "client-robin", 0, 100),
                key("small-key", "client-small", 0, 2),
                key("spent-key", "client-spent", 5, 5),
                ApiKeySeed {
                    status: ApiKeyStatus::Disabled,
                    ..key("banned-key", "client-banned", 5, 5)
                },
            ],
            projects: (1..=PROJECT_COUNT).map(project).collect(),
            manages: vec![
                Manage::new(AccountId::new(1), ProjectId::new(1)),
                Manage::new(AccountId::new(1), ProjectId::new(2)),
                revoked,
            ],
            taggings: vec![
                Tagging {
                    project_id: ProjectId::new(1),
                    tag: "forest".to_string(),
                },
                Tagging {
                    project_id: ProjectId::new(2),
                    tag: "forest".to_string(),
                },
                Tagging {
                    project_id: ProjectId::new(2),
                    tag: "outlaw".to_string(),
                },
                Tagging {
                    project_id: ProjectId::new(3),
                    tag: "forest".to_string(),
                },
            ],
            stack_entries: vec![
                StackEntry {
                    stack_id: 100,
                    project_id: ProjectId::new(1),
                },
                StackEntry {
                    stack_id: 100,
                    project_id: ProjectId::new(4),
                },
            ],
            kudos: vec![
                kudo(
                    1,
                    2,
                    KudoRecipient::Account {
                        account_id: AccountId::new(1),
                    },
                    1,
                ),
                kudo(
                    2,
                    3,
                    KudoRecipient::Account {
                        account_id: AccountId::new(1),
                    },
                    2,
                ),
                kudo(
                    3,
                    1,
                    KudoRecipient::Contribution {
                        project_id: ProjectId::new(1),
                        name: "Will Scarlet".to_string(),
                    },
                    3,
                ),
            ],
        }
    }

    fn app() -> (Router, SeededRepositories) {
        let config = AppConfig::default();
        let repositories = seed().into_repositories(1000).unwrap();
        let state = crate::create_app_state(&repositories, &config).unwrap();
        (create_router_with_state(state), repositories)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
        send(app, Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = get(app, uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    fn ids(json: &Value) -> Vec<u64> {
        json["projects"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_u64().unwrap())
            .collect()
    }

    fn error_code(body: &str) -> String {
        let json: Value = serde_json::from_str(body).unwrap();
        json["error"]["code"].as_str().unwrap_or_default().to_string()
    }

    async fn daily_count(repositories: &SeededRepositories, client_id: &str) -> u64 {
        repositories
            .api_keys
            .get_by_client_id(client_id)
            .await
            .unwrap()
            .unwrap()
            .daily_count()
    }

    #[tokio::test]
    async fn test_stateless_router_serves_health() {
        let app = create_router();
        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("healthy"));

        let (status, _) = get(&app, "/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_check() {
        let (app, _) = app();
        let (status, json) = get_json(&app, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["checks"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_html_listing_is_public() {
        let (app, repositories) = app();
        let (status, json) = get_json(&app, "/projects?api_key=client-robin").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["items_returned"], 10);
        assert_eq!(json["items_available"], PROJECT_COUNT);
        assert_eq!(ids(&json), (1..=10).collect::<Vec<_>>());
        assert_eq!(daily_count(&repositories, "client-robin").await, 0);
    }

    #[tokio::test]
    async fn test_machine_formats_need_a_key() {
        let (app, _) = app();
        for uri in ["/projects?format=xml", "/projects?format=atom"] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(error_code(&body), "missing_key");
        }
    }

    #[tokio::test]
    async fn test_key_denials() {
        let (app, repositories) = app();
        let cases = [
            ("client-nobody", "invalid_key"),
            ("bad%20token", "invalid_key"),
            ("client-banned", "key_disabled"),
            ("client-spent", "quota_exceeded"),
        ];

        for (key, code) in cases {
            let (status, body) = get(&app, &format!("/projects?format=xml&api_key={}", key)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "key {}", key);
            assert_eq!(error_code(&body), code, "key {}", key);
        }

        assert_eq!(daily_count(&repositories, "client-spent").await, 5);
        assert_eq!(daily_count(&repositories, "client-banned").await, 5);
    }

    #[tokio::test]
    async fn test_valid_key_is_counted_once_per_request() {
        let (app, repositories) = app();

        let (status, body) = get(&app, "/projects?format=xml&api_key=client-robin").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<response>"));
        assert_eq!(daily_count(&repositories, "client-robin").await, 1);

        let (status, _) = get(&app, "/projects?format=atom&api_key=client-robin").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(daily_count(&repositories, "client-robin").await, 2);
    }

    #[tokio::test]
    async fn test_quota_runs_out() {
        let (app, _) = app();
        let uri = "/projects?format=xml&api_key=client-small";

        assert_eq!(get(&app, uri).await.0, StatusCode::OK);
        assert_eq!(get(&app, uri).await.0, StatusCode::OK);

        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(&body), "quota_exceeded");
    }

    #[tokio::test]
    async fn test_key_from_headers() {
        let (app, repositories) = app();

        let request = Request::get("/projects?format=atom")
            .header(header::AUTHORIZATION, "Bearer client-robin")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&app, request).await.0, StatusCode::OK);

        let request = Request::get("/projects?format=xml")
            .header("x-api-key", "client-robin")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&app, request).await.0, StatusCode::OK);

        assert_eq!(daily_count(&repositories, "client-robin").await, 2);
    }

    #[tokio::test]
    async fn test_session_satisfies_machine_format() {
        let (app, _) = app();
        let request = Request::get("/projects?format=xml")
            .header("x-session-account", "2")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<items_available>30</items_available>"));
    }

    #[tokio::test]
    async fn test_unresolvable_ids_are_not_found() {
        let (app, _) = app();
        let (status, body) = get(&app, "/projects?ids=111112222222").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_code(&body), "all_ids_unresolved");
    }

    #[tokio::test]
    async fn test_non_numeric_ids_are_empty() {
        let (app, _) = app();
        let (status, json) = get_json(&app, "/projects?ids=not_a_number").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["items_returned"], 0);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_dropped() {
        let (app, _) = app();
        let (status, json) = get_json(&app, "/projects?ids=2,%201,999,2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_per_page_is_capped() {
        let (app, _) = app();
        let (_, json) = get_json(&app, "/projects?per_page=50").await;

        assert_eq!(json["items_returned"], 25);
        assert_eq!(json["items_available"], PROJECT_COUNT);
    }

    #[tokio::test]
    async fn test_second_page() {
        let (app, _) = app();
        let (_, json) = get_json(&app, "/projects?page=2&per_page=5").await;

        assert_eq!(ids(&json), vec![6, 7, 8, 9, 10]);
        assert_eq!(json["first_item_position"], 5);
    }

    #[tokio::test]
    async fn test_malformed_paging_uses_defaults() {
        let (app, _) = app();
        let (status, json) = get_json(&app, "/projects?page=abc&per_page=-3").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_rating_order_in_every_format() {
        let (app, _) = app();
        let expected: Vec<u64> = vec![29, 28, 27, 26, 25, 24, 23, 22, 21, 19];

        let (_, json) = get_json(&app, "/projects?sort=rating").await;
        assert_eq!(ids(&json), expected);

        let (_, xml) = get(&app, "/projects?sort=rating&format=xml&api_key=client-robin").await;
        let positions: Vec<usize> = expected
            .iter()
            .map(|id| xml.find(&format!("<id>{}</id>", id)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let (_, atom) = get(&app, "/projects?sort=rating&format=atom&api_key=client-robin").await;
        let positions: Vec<usize> = expected
            .iter()
            .map(|id| atom.find(&format!("<title>Project {:02}</title>", id)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_unrated_projects_sort_last() {
        let (app, _) = app();
        let (_, json) = get_json(&app, "/projects?sort=rating&page=3").await;
        assert_eq!(ids(&json), vec![7, 6, 5, 4, 3, 2, 1, 10, 20, 30]);
    }

    #[tokio::test]
    async fn test_listing_is_idempotent() {
        let (app, _) = app();
        let uri = "/projects?sort=rating&page=2&per_page=7";

        let first = get(&app, uri).await;
        let second = get(&app, uri).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_query_search() {
        let (app, _) = app();
        let (_, json) = get_json(&app, "/projects?query=PROJECT%2003").await;
        assert_eq!(ids(&json), vec![3]);
    }

    #[tokio::test]
    async fn test_managed_projects() {
        let (app, _) = app();

        let (status, json) = get_json(&app, "/accounts/robin/projects").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), vec![1, 2]);

        let (_, json) = get_json(&app, "/projects?account_id=1").await;
        assert_eq!(ids(&json), vec![1, 2]);

        let (status, json) = get_json(&app, "/accounts/nobody/projects").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["items_returned"], 0);
    }

    #[tokio::test]
    async fn test_similar_projects() {
        let (app, _) = app();
        let (status, json) = get_json(&app, "/projects/1/similar").await;

        assert_eq!(status, StatusCode::OK);
        let by_tags: Vec<u64> = json["by_tags"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["project"]["id"].as_u64().unwrap())
            .collect();
        assert_eq!(by_tags, vec![2, 3]);
        assert_eq!(json["by_stacks"][0]["project"]["id"], 4);

        assert_eq!(get(&app, "/projects/999/similar").await.0, StatusCode::NOT_FOUND);
        assert_eq!(get(&app, "/projects/abc/similar").await.0, StatusCode::NOT_FOUND);
        assert_eq!(
            get(&app, "/projects/1/similar?format=xml").await.0,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_kudo_listings() {
        let (app, _) = app();

        let (status, json) = get_json(&app, "/accounts/robin/kudos").await;
        assert_eq!(status, StatusCode::OK);
        let received: Vec<u64> = json["kudos"]
            .as_array()
            .unwrap()
            .iter()
            .map(|k| k["id"].as_u64().unwrap())
            .collect();
        assert_eq!(received, vec![2, 1]);

        let (_, json) = get_json(&app, "/accounts/1/kudos/sent").await;
        assert_eq!(json["kudos"][0]["contributor_name"], "Will Scarlet");

        assert_eq!(get(&app, "/accounts/nobody/kudos").await.0, StatusCode::NOT_FOUND);
    }

    fn post_kudo(body: &str, session: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/kudos?api_key=client-robin")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(session) = session {
            builder = builder.header("x-session-account", session);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn delete_kudo(id: &str, session: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/kudos/{}", id));
        if let Some(session) = session {
            builder = builder.header("x-session-account", session);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_give_kudo() {
        let (app, repositories) = app();
        let body = r#"{"recipient": {"type": "account", "account_id": 3}, "message": " Thanks "}"#;

        let (status, response) = send(&app, post_kudo(body, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(&response), "session_required");
        assert_eq!(daily_count(&repositories, "client-robin").await, 0);

        let (status, response) = send(&app, post_kudo(body, Some("2"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let kudo: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(kudo["sender_id"], 2);
        assert_eq!(kudo["recipient_id"], 3);
        assert_eq!(kudo["message"], "Thanks");

        let (_, json) = get_json(&app, "/accounts/tuck/kudos").await;
        assert_eq!(json["items_returned"], 1);
    }

    #[tokio::test]
    async fn test_give_kudo_rejections() {
        let (app, _) = app();

        let to_self = r#"{"recipient": {"type": "account", "account_id": 2}}"#;
        assert_eq!(
            send(&app, post_kudo(to_self, Some("2"))).await.0,
            StatusCode::BAD_REQUEST
        );

        let unknown = r#"{"recipient": {"type": "contribution", "project_id": 999, "name": "Much"}}"#;
        assert_eq!(
            send(&app, post_kudo(unknown, Some("2"))).await.0,
            StatusCode::NOT_FOUND
        );

        let (status, body) = send(&app, post_kudo("{ nope", Some("2"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "json_parse_error");
    }

    #[tokio::test]
    async fn test_rescind_kudo() {
        let (app, _) = app();

        let (status, body) = send(&app, delete_kudo("1", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(&body), "session_required");

        assert_eq!(send(&app, delete_kudo("1", Some("3"))).await.0, StatusCode::FORBIDDEN);
        assert_eq!(send(&app, delete_kudo("1", Some("1"))).await.0, StatusCode::NO_CONTENT);
        assert_eq!(send(&app, delete_kudo("1", Some("1"))).await.0, StatusCode::NOT_FOUND);
        assert_eq!(send(&app, delete_kudo("abc", Some("1"))).await.0, StatusCode::NOT_FOUND);

        let (_, json) = get_json(&app, "/accounts/robin/kudos").await;
        assert_eq!(json["items_returned"], 1);
    }

    #[tokio::test]
    async fn test_admin_may_rescind_any_kudo() {
        let (app, _) = app();

        assert_eq!(send(&app, delete_kudo("2", Some("4"))).await.0, StatusCode::NO_CONTENT);

        let (_, json) = get_json(&app, "/accounts/robin/kudos").await;
        assert_eq!(json["items_returned"], 1);
    }

    fn key_action(id: &str, action: &str, session: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(format!("/api_keys/{}/{}", id, action));
        if let Some(session) = session {
            builder = builder.header("x-session-account", session);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_admin_disables_and_enables_key() {
        let (app, repositories) = app();
        let xml = "/projects?format=xml&api_key=client-robin";

        let (status, body) = send(&app, key_action("robin-key", "disable", Some("4"))).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "disabled");

        let (status, body) = get(&app, xml).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(&body), "key_disabled");

        let (status, body) = send(&app, key_action("robin-key", "enable", Some("4"))).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "active");

        assert_eq!(get(&app, xml).await.0, StatusCode::OK);
        assert_eq!(daily_count(&repositories, "client-robin").await, 1);
    }

    #[tokio::test]
    async fn test_key_administration_needs_an_admin() {
        let (app, repositories) = app();

        let (status, body) = send(&app, key_action("robin-key", "disable", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(&body), "session_required");

        for session in ["1", "99"] {
            let (status, body) =
                send(&app, key_action("robin-key", "disable", Some(session))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "session {}", session);
            assert_eq!(error_code(&body), "admin_required", "session {}", session);
        }

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api_keys/robin-key/disable?api_key=client-robin")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(&body), "session_required");
        assert_eq!(daily_count(&repositories, "client-robin").await, 0);

        let key = repositories
            .api_keys
            .get_by_client_id("client-robin")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(key.status(), ApiKeyStatus::Active);
    }

    #[tokio::test]
    async fn test_key_administration_unknown_key() {
        let (app, _) = app();

        for id in ["nobody-key", "not_a_key"] {
            let (status, _) = send(&app, key_action(id, "disable", Some("4"))).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "key {}", id);
        }
    }
}

//! Activity listing, signup and admin endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};

use signup_core::Activities;

use crate::routes::{AppError, MessageResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_activities))
        .route("/activities/reload", post(reload_activities))
        .route("/activities/{activity_name}/signup", post(signup))
        .route("/activities/{activity_name}/unregister", delete(unregister))
}

/// Query string for roster changes
#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// Response from a reload
#[derive(Serialize)]
pub struct ReloadResponse {
    pub message: String,
    pub count: usize,
}

/// GET /activities - List all activities
async fn list_activities(State(state): State<AppState>) -> Json<Activities> {
    Json(state.store().await.activities().clone())
}

/// POST /activities/:activity_name/signup - Sign up a student for an activity
async fn signup(
    State(state): State<AppState>,
    Path(activity_name): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Query(EmailQuery { email }) = query?;

    state.store().await.signup(&activity_name, &email)?;

    Ok(Json(MessageResponse {
        message: format!("Signed up {email} for {activity_name}"),
    }))
}

/// DELETE /activities/:activity_name/unregister - Unregister a student from an activity
async fn unregister(
    State(state): State<AppState>,
    Path(activity_name): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Query(EmailQuery { email }) = query?;

    state.store().await.unregister(&activity_name, &email)?;

    Ok(Json(MessageResponse {
        message: format!("Unregistered {email} from {activity_name}"),
    }))
}

/// POST /activities/reload - Re-read the activities file from disk
async fn reload_activities(State(state): State<AppState>) -> Json<ReloadResponse> {
    let count = state.store().await.reload();

    Json(ReloadResponse {
        message: "Activities reloaded".to_string(),
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        _dir: tempfile::TempDir,
        data_path: std::path::PathBuf,
    }

    fn test_app() -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("activities.json");
        let router = router().with_state(AppState::open(&data_path));
        TestApp {
            router,
            _dir: dir,
            data_path,
        }
    }

    async fn send(app: &TestApp, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn chess_participants(body: &Value) -> usize {
        body["Chess Club"]["participants"].as_array().unwrap().len()
    }

    #[tokio::test]
    async fn test_list_fresh_store() {
        let app = test_app();

        let (status, body) = send(&app, Method::GET, "/activities").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_object().unwrap().len(), 9);
        assert_eq!(chess_participants(&body), 2);
        assert_eq!(body["Chess Club"]["max_participants"], 12);
    }

    #[tokio::test]
    async fn test_list_keeps_seed_order() {
        let app = test_app();

        let (_, body) = send(&app, Method::GET, "/activities").await;

        let first = body.as_object().unwrap().keys().next().cloned();
        assert_eq!(first.as_deref(), Some("Chess Club"));
    }

    #[tokio::test]
    async fn test_signup_and_unregister_scenario() {
        let app = test_app();
        let signup_uri = "/activities/Chess%20Club/signup?email=new@mergington.edu";

        let (status, body) = send(&app, Method::POST, signup_uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Signed up new@mergington.edu for Chess Club");

        let (_, body) = send(&app, Method::GET, "/activities").await;
        assert_eq!(chess_participants(&body), 3);

        let (status, body) = send(&app, Method::POST, signup_uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Student is already signed up");

        let (status, body) = send(
            &app,
            Method::DELETE,
            "/activities/Chess%20Club/unregister?email=new@mergington.edu",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Unregistered new@mergington.edu from Chess Club");

        let (_, body) = send(&app, Method::GET, "/activities").await;
        assert_eq!(chess_participants(&body), 2);
    }

    #[tokio::test]
    async fn test_signup_unknown_activity() {
        let app = test_app();

        let (status, body) =
            send(&app, Method::POST, "/activities/Unknown/signup?email=x@y.edu").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Activity not found");
    }

    #[tokio::test]
    async fn test_unregister_not_signed_up() {
        let app = test_app();

        let (status, body) = send(
            &app,
            Method::DELETE,
            "/activities/Chess%20Club/unregister?email=nobody@mergington.edu",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Student is not signed up for this activity");

        let (_, body) = send(&app, Method::GET, "/activities").await;
        assert_eq!(chess_participants(&body), 2);
    }

    #[tokio::test]
    async fn test_unregister_unknown_activity() {
        let app = test_app();

        let (status, _) =
            send(&app, Method::DELETE, "/activities/Unknown/unregister?email=x@y.edu").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_email_is_unprocessable() {
        let app = test_app();

        let (status, body) = send(&app, Method::POST, "/activities/Chess%20Club/signup").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("email"));
    }

    #[tokio::test]
    async fn test_signup_is_persisted() {
        let app = test_app();

        send(
            &app,
            Method::POST,
            "/activities/Art%20Club/signup?email=new@mergington.edu",
        )
        .await;

        let on_disk = signup_core::store::load(&app.data_path);
        assert!(on_disk["Art Club"].has_participant("new@mergington.edu"));
    }

    #[tokio::test]
    async fn test_reload_reports_count_and_picks_up_edits() {
        let app = test_app();

        let (status, body) = send(&app, Method::POST, "/activities/reload").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Activities reloaded");
        assert_eq!(body["count"], 9);

        let mut edited = signup_core::store::load(&app.data_path);
        edited.shift_remove("Debate Team");
        signup_core::store::save(&app.data_path, &edited).unwrap();

        let (_, body) = send(&app, Method::POST, "/activities/reload").await;
        assert_eq!(body["count"], 8);

        let (_, body) = send(&app, Method::GET, "/activities").await;
        assert!(body.get("Debate Team").is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_signups_admit_one() {
        let app = test_app();
        let mut tasks = tokio::task::JoinSet::new();

        for _ in 0..8 {
            let router = app.router.clone();
            tasks.spawn(async move {
                let request = Request::builder()
                    .method(Method::POST)
                    .uri("/activities/Math%20Club/signup?email=race@mergington.edu")
                    .body(Body::empty())
                    .unwrap();
                router.oneshot(request).await.unwrap().status()
            });
        }

        let mut ok = 0;
        while let Some(status) = tasks.join_next().await {
            if status.unwrap() == StatusCode::OK {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);

        let (_, body) = send(&app, Method::GET, "/activities").await;
        let roster = body["Math Club"]["participants"].as_array().unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.iter().filter(|p| *p == "race@mergington.edu").count(), 1);
    }
}

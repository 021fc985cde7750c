use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ApiDoc;
use crate::features::{schedule, shows};
use crate::state::AppState;

/// Build the application router with every feature, Swagger UI and middleware
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let shows_api = schedule::routes::routes().merge(shows::routes::routes());
    let api = Router::new().nest("/shows", shows_api);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use storage::Database;
    use std::io;
    use std::sync::{Arc, Mutex};
    use storage::services::spacing::SpacingPolicy;
    use tower::ServiceExt;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    // Requests in these tests are rejected before any query, so the pool never connects
    fn app() -> Router {
        let db = Database::connect_lazy("postgres://scheduler@localhost/scheduler").unwrap();
        create_router(AppState::new(db, SpacingPolicy::default()))
    }

    fn confirm_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/shows/7/schedule/date/2025-06-01/confirmSchedule")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn submission(first_time: &str, second_time: &str, rider_name: &str) -> Value {
        json!({
            "rings": [{
                "name": "Main",
                "start_time": "08:00",
                "date": "2025-06-01",
                "ClassSchedule": [{
                    "id": 2,
                    "number": "2",
                    "name": "Training Level",
                    "duration_minute": 7,
                    "test": "Training(A)",
                    "riders": [
                        {
                            "id": 10,
                            "name": rider_name,
                            "time_start": first_time,
                            "rider_entry_number": 1,
                            "horse": { "id": 5, "name": "Apollo" }
                        },
                        {
                            "id": 10,
                            "name": rider_name,
                            "time_start": second_time,
                            "rider_entry_number": 2,
                            "horse": { "id": 6, "name": "Comet" }
                        }
                    ],
                    "judges": [{ "name": "Marie Tremblay", "position": "C" }]
                }]
            }]
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let document = body_json(response).await;
        assert!(document["paths"]["/api/shows/{show_id}/schedule"].is_object());
    }

    #[tokio::test]
    async fn test_confirm_rejects_rest_window_violation() {
        let body = submission("09:00", "09:30", "Jane Doe").to_string();

        let response = app().oneshot(confirm_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "The rider Jane Doe with the horse Apollo has less than 45 minutes between the time start"
        );
    }

    #[tokio::test]
    async fn test_confirm_rejects_invalid_fields() {
        let body = submission("9:00", "10:30", "Jane Doe").to_string();

        let response = app().oneshot(confirm_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Validation failed");
        assert!(
            body["details"][0]
                .as_str()
                .unwrap()
                .contains("[0].riders[0].time_start")
        );
    }

    #[tokio::test]
    async fn test_confirm_rejects_invalid_schedule_date() {
        let uri = format!(
            "/api/shows/7/schedule/date/{}/confirmSchedule",
            "2025-06-01".repeat(10)
        );
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(submission("09:00", "10:00", "Jane Doe").to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid schedule date");
    }

    #[tokio::test]
    async fn test_confirm_is_logged_on_arrival() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let body = submission("09:00", "09:30", "Jane Doe").to_string();
        app().oneshot(confirm_request(body)).await.unwrap();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Confirming schedule"));
        assert!(output.contains("Rejected schedule submission"));
    }

    #[tokio::test]
    async fn test_confirm_rejects_malformed_json() {
        let response = app()
            .oneshot(confirm_request("{\"rings\": [".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_confirm_requires_numeric_show_id() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/shows/abc/schedule/date/2025-06-01/confirmSchedule")
                    .header("content-type", "application/json")
                    .body(Body::from(submission("09:00", "10:00", "Jane Doe").to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

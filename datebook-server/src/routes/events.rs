//! Event endpoints

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use tracing::info;

use datebook_core::{DateRange, Event, NewEvent};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/events", get(list_events).post(create_event))
}

/// Request body for creating an event.
///
/// Fields are optional here so that a missing field is reported as a
/// validation failure rather than a deserialization failure.
#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

/// Query parameters for listing events
#[derive(Deserialize)]
pub struct ListEventsQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// POST /api/events - Create a new event
async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let Json(req) = payload?;

    let new_event = NewEvent::from_fields(req.title.as_deref(), req.date.as_deref())?
        .with_description(req.description);

    let event = state
        .store()
        .create(new_event)
        .map_err(|e| AppError::storage("Failed to add event", e))?;

    info!(id = %event.id, date = %event.date, "event added");
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/events?start=YYYY-MM-DD&end=YYYY-MM-DD - List events in an inclusive range
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    let range = DateRange::from_query(query.start.as_deref(), query.end.as_deref())?;

    let events = state
        .store()
        .list(&range)
        .map_err(|e| AppError::storage("Failed to fetch events", e))?;

    Ok(Json(events))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, Response, header},
    };
    use datebook_core::store::{DirStore, EventStore, MemoryStore};
    use datebook_core::{DatebookError, DatebookResult};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::app;
    use crate::routes::ErrorResponse;
    use crate::state::AppState;

    use super::*;

    /// A store whose backend is unreachable.
    struct UnavailableStore;

    impl EventStore for UnavailableStore {
        fn create(&self, _event: NewEvent) -> DatebookResult<Event> {
            Err(DatebookError::Storage("connection refused".into()))
        }

        fn list(&self, _range: &DateRange) -> DatebookResult<Vec<Event>> {
            Err(DatebookError::Storage("connection refused".into()))
        }
    }

    fn test_app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (app(AppState::new(store.clone())), store)
    }

    async fn post_json(app: &Router, body: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri("/api/events")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn get(app: &Router, uri: &str) -> Response<Body> {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: Response<Body>) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn everything() -> DateRange {
        DateRange::from_query(Some("0001-01-01"), Some("9999-12-31")).unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_201_with_stored_event() {
        let (app, _) = test_app();

        let response = post_json(&app, r#"{"title": "Meeting", "date": "2024-03-15"}"#).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: Value = json_body(response).await;
        assert_eq!(body["title"], "Meeting");
        assert_eq!(body["date"], "2024-03-15");
        assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(body.get("description").is_none());
    }

    #[tokio::test]
    async fn test_create_with_missing_fields_is_400_and_persists_nothing() {
        let (app, store) = test_app();

        for body in [
            r#"{"title": "", "date": "2024-03-15"}"#,
            r#"{"title": "Meeting", "date": ""}"#,
            r#"{"title": "Meeting"}"#,
            r#"{"date": "2024-03-15"}"#,
            r#"{}"#,
        ] {
            let response = post_json(&app, body).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");

            let err: ErrorResponse = json_body(response).await;
            assert_eq!(err.msg, "Date and title are required");
        }

        assert!(store.list(&everything()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_malformed_input_is_400() {
        let (app, store) = test_app();

        let response = post_json(&app, r#"{"title": "Meeting", "date": "15/03/2024"}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = post_json(&app, "not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let request = Request::builder()
            .method("POST")
            .uri("/api/events")
            .body(Body::from(r#"{"title": "Meeting", "date": "2024-03-15"}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert!(store.list(&everything()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_created_event_is_listed_once_in_its_month() {
        let (app, _) = test_app();

        let created: Event =
            json_body(post_json(&app, r#"{"title": "Meeting", "date": "2024-03-15"}"#).await).await;

        let response = get(&app, "/api/events?start=2024-03-01&end=2024-03-31").await;
        assert_eq!(response.status(), StatusCode::OK);

        let events: Vec<Event> = json_body(response).await;
        assert_eq!(events.iter().filter(|e| e.id == created.id).count(), 1);
        assert_eq!(events, vec![created]);
    }

    #[tokio::test]
    async fn test_other_month_is_empty() {
        let (app, _) = test_app();
        post_json(&app, r#"{"title": "Meeting", "date": "2024-03-15"}"#).await;

        let response = get(&app, "/api/events?start=2024-04-01&end=2024-04-30").await;
        assert_eq!(response.status(), StatusCode::OK);

        let events: Value = json_body(response).await;
        assert_eq!(events, json!([]));
    }

    #[tokio::test]
    async fn test_list_is_inclusive_at_both_bounds() {
        let (app, _) = test_app();
        for date in ["2024-02-29", "2024-03-01", "2024-03-31", "2024-04-01"] {
            let body = json!({"title": "Edge", "date": date}).to_string();
            post_json(&app, &body).await;
        }

        let events: Vec<Event> =
            json_body(get(&app, "/api/events?start=2024-03-01&end=2024-03-31").await).await;
        let dates: Vec<String> = events.iter().map(|e| e.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-31"]);
    }

    #[tokio::test]
    async fn test_list_without_bounds_is_400() {
        let (app, _) = test_app();

        for uri in [
            "/api/events",
            "/api/events?start=2024-03-01",
            "/api/events?end=2024-03-31",
            "/api/events?start=&end=2024-03-31",
        ] {
            let response = get(&app, uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {uri}");

            let err: ErrorResponse = json_body(response).await;
            assert_eq!(err.msg, "Start and end dates are required");
        }

        let response = get(&app, "/api/events?start=2024-03-01&end=soon").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reversed_range_is_empty() {
        let (app, _) = test_app();
        post_json(&app, r#"{"title": "Meeting", "date": "2024-03-15"}"#).await;

        let response = get(&app, "/api/events?start=2024-03-31&end=2024-03-01").await;
        assert_eq!(response.status(), StatusCode::OK);
        let events: Vec<Event> = json_body(response).await;
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_description_round_trips() {
        let (app, _) = test_app();
        let body = r#"{"title": "Dentist", "date": "2024-03-02", "description": "Bring card"}"#;
        let created: Event = json_body(post_json(&app, body).await).await;
        assert_eq!(created.description.as_deref(), Some("Bring card"));

        let events: Vec<Event> =
            json_body(get(&app, "/api/events?start=2024-03-02&end=2024-03-02").await).await;
        assert_eq!(events, vec![created]);
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let app = app(AppState::new(Arc::new(UnavailableStore)));

        let response = post_json(&app, r#"{"title": "Meeting", "date": "2024-03-15"}"#).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err: ErrorResponse = json_body(response).await;
        assert_eq!(err.msg, "Failed to add event");

        let response = get(&app, "/api/events?start=2024-03-01&end=2024-03-31").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err: ErrorResponse = json_body(response).await;
        assert_eq!(err.msg, "Failed to fetch events");
    }

    #[tokio::test]
    async fn test_validation_wins_over_storage_failure() {
        let app = app(AppState::new(Arc::new(UnavailableStore)));

        let response = post_json(&app, r#"{"title": "", "date": "2024-03-15"}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get(&app, "/api/events").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dir_store_backed_api() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Arc::new(DirStore::open(tmp.path()).unwrap());
        let app = app(AppState::new(store));

        let created: Event =
            json_body(post_json(&app, r#"{"title": "Meeting", "date": "2024-03-15"}"#).await).await;

        let events: Vec<Event> =
            json_body(get(&app, "/api/events?start=2024-03-01&end=2024-03-31").await).await;
        assert_eq!(events, vec![created]);
        assert!(tmp.path().join("2024-03-15__meeting.ics").exists());
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app();
        let response = get(&app, "/api/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_body(response).await;
        assert_eq!(body, json!({"status": "ok"}));
    }
}

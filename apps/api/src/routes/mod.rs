pub mod health;

use axum::{routing::get, Router};

use crate::jobs::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/jobs/pro-jobs", get(handlers::handle_pro_jobs))
        .route("/api/jobs/com-jobs", get(handlers::handle_com_jobs))
        .route("/api/jobs/jobs", get(handlers::handle_jobs))
        .route("/api/jobs/jobs/:id", get(handlers::handle_job_by_id))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::airtable::memory::{record, InMemoryStore};
    use crate::jobs::service::{GeneralJobsPolicy, JobsService, JOBS_TABLE};

    fn app(store: InMemoryStore) -> Router {
        app_with_policy(store, GeneralJobsPolicy::ApprovedOnly)
    }

    fn app_with_policy(store: InMemoryStore, policy: GeneralJobsPolicy) -> Router {
        let state = AppState {
            jobs: JobsService::new(Arc::new(store), policy),
        };
        build_router(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn postings(n: usize) -> Vec<crate::airtable::Record> {
        (0..n)
            .map(|i| {
                record(
                    &format!("rec{i:02}"),
                    json!({ "Company Name": format!("Company {i}"), "Status": "Approved" }),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app(InMemoryStore::new()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_pro_jobs_empty_store() {
        let (status, body) =
            get_json(app(InMemoryStore::new()), "/api/jobs/pro-jobs?page=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "jobs": [],
                "hasNextPage": false,
                "totalPages": 0,
                "currentPage": 1
            })
        );
    }

    #[tokio::test]
    async fn test_com_jobs_second_page() {
        let store = InMemoryStore::new().with_table(JOBS_TABLE, postings(25));
        let (status, body) = get_json(
            app(store),
            "/api/jobs/com-jobs?page=2&keyword=acme&workTypes=Remote,Hybrid",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hasNextPage"], true);
        assert_eq!(body["totalPages"], 3);
        assert_eq!(body["currentPage"], 2);
        let jobs = body["jobs"].as_array().unwrap();
        assert_eq!(jobs.len(), 10);
        assert_eq!(jobs[0]["id"], "rec10");
        assert_eq!(jobs[0]["companyName"], "Company 10");
        assert_eq!(jobs[0]["companyLogo"], Value::Null);
        assert!(jobs[0].get("jobTitle").is_none());
    }

    #[tokio::test]
    async fn test_invalid_page_falls_back_to_first() {
        let store = InMemoryStore::new().with_table(JOBS_TABLE, postings(3));
        let (status, body) = get_json(app(store), "/api/jobs/jobs?page=-2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["currentPage"], 1);
        assert_eq!(body["jobs"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_store_failure_is_generic_500() {
        let (status, body) =
            get_json(app(InMemoryStore::failing()), "/api/jobs/pro-jobs").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Error fetching jobs data" }));
    }

    #[tokio::test]
    async fn test_candidate_lookup_miss_is_generic_500() {
        let app = app_with_policy(InMemoryStore::new(), GeneralJobsPolicy::CandidateType);
        let (status, body) = get_json(app, "/api/jobs/jobs?user=ghost%40example.com").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Error fetching jobs data" }));
    }

    #[tokio::test]
    async fn test_job_by_id() {
        let store = InMemoryStore::new().with_table(JOBS_TABLE, postings(2));
        let (status, body) = get_json(app(store), "/api/jobs/jobs/rec01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "rec01");
        assert_eq!(body["companyName"], "Company 1");
    }

    #[tokio::test]
    async fn test_job_by_id_missing_is_500() {
        let (status, body) =
            get_json(app(InMemoryStore::new()), "/api/jobs/jobs/recNope").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Error fetching job data" }));
    }
}

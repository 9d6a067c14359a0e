//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::models::{JobFilters, JobPosting, JobsPage};
use crate::jobs::pagination::{has_next_page, parse_page, total_pages, PAGE_SIZE};
use crate::jobs::service::Listing;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Raw listing query string. Everything arrives as text and is coerced here,
/// so a malformed value never rejects the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsQuery {
    pub page: Option<String>,
    pub keyword: Option<String>,
    pub work_types: Option<String>,
    pub payment_types: Option<String>,
    pub job_types: Option<String>,
    pub user: Option<String>,
}

impl JobsQuery {
    pub fn page(&self) -> u32 {
        parse_page(self.page.as_deref())
    }

    pub fn filters(&self) -> JobFilters {
        JobFilters {
            keyword: self.keyword.clone().filter(|k| !k.is_empty()),
            work_types: split_list(self.work_types.as_deref()),
            payment_types: split_list(self.payment_types.as_deref()),
            job_types: split_list(self.job_types.as_deref()),
            user: non_empty(self.user.as_deref()),
        }
    }
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty()).map(str::to_string)
}

/// Comma-separated list; empty segments are dropped.
fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobsListResponse {
    pub jobs: Vec<JobPosting>,
    pub has_next_page: bool,
    pub total_pages: usize,
    pub current_page: u32,
}

impl JobsListResponse {
    pub fn new(page: JobsPage, current_page: u32, page_size: usize) -> Self {
        Self {
            has_next_page: has_next_page(current_page, page_size, page.total_count),
            total_pages: total_pages(page.total_count, page_size),
            current_page,
            jobs: page.jobs,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/jobs/pro-jobs
pub async fn handle_pro_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> Result<Json<JobsListResponse>, AppError> {
    list_jobs(&state, Listing::Professional, &query).await
}

/// GET /api/jobs/com-jobs
pub async fn handle_com_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> Result<Json<JobsListResponse>, AppError> {
    list_jobs(&state, Listing::Company, &query).await
}

/// GET /api/jobs/jobs
pub async fn handle_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> Result<Json<JobsListResponse>, AppError> {
    list_jobs(&state, Listing::General, &query).await
}

/// GET /api/jobs/jobs/:id
pub async fn handle_job_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobPosting>, AppError> {
    let job = state
        .jobs
        .get_job(&id)
        .await
        .map_err(|source| AppError::JobFetch { id, source })?;
    Ok(Json(job))
}

async fn list_jobs(
    state: &AppState,
    listing: Listing,
    query: &JobsQuery,
) -> Result<Json<JobsListResponse>, AppError> {
    let current_page = query.page();
    let filters = query.filters();

    let page = state
        .jobs
        .list_jobs(listing, &filters, current_page, PAGE_SIZE)
        .await
        .map_err(|source| AppError::JobsFetch { listing, source })?;

    Ok(Json(JobsListResponse::new(page, current_page, PAGE_SIZE)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = JobsQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.filters(), JobFilters::default());
    }

    #[test]
    fn test_query_list_splitting() {
        let query = JobsQuery {
            work_types: Some("Remote,Hybrid".to_string()),
            payment_types: Some("".to_string()),
            job_types: Some("MBAs,,Graduates,".to_string()),
            keyword: Some("".to_string()),
            ..Default::default()
        };
        let filters = query.filters();
        assert_eq!(filters.work_types, vec!["Remote", "Hybrid"]);
        assert!(filters.payment_types.is_empty());
        assert_eq!(filters.job_types, vec!["MBAs", "Graduates"]);
        assert!(filters.keyword.is_none());
    }

    #[test]
    fn test_query_keyword_kept_unless_literally_empty() {
        let padded = JobsQuery {
            keyword: Some(" acme ".to_string()),
            ..Default::default()
        };
        assert_eq!(padded.filters().keyword.as_deref(), Some(" acme "));

        let blank = JobsQuery {
            keyword: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.filters().keyword.as_deref(), Some("   "));
    }

    #[test]
    fn test_list_response_shape() {
        let page = JobsPage {
            jobs: Vec::new(),
            total_count: 25,
        };
        let response = JobsListResponse::new(page, 3, PAGE_SIZE);
        assert!(!response.has_next_page);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.current_page, 3);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["hasNextPage"], false);
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["currentPage"], 3);
    }
}

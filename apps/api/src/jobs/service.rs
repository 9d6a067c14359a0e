//! Listing queries against the `Job Postings` table.
//!
//! Every listing fetches the full matching set, then slices one page out of it
//! locally. The store is reached only through `RecordStore`.

use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::airtable::{RecordStore, SelectQuery, SortDirection, StoreError};
use crate::jobs::formula::{build_filter_formula, Formula};
use crate::jobs::mapper::map_job_posting;
use crate::jobs::models::{fields, JobFilters, JobPosting, JobsPage};
use crate::jobs::pagination::paginate;

pub const JOBS_TABLE: &str = "Job Postings";
const JOBS_VIEW: &str = "Grid view";

pub const CANDIDATES_TABLE: &str = "SFF Candidate Database";
const CANDIDATES_VIEW: &str = "All Applications";
// Column name as spelled in the candidate base.
const CANDIDATE_TYPE_FIELD: &str = "Canidate Type";
const EXPERIENCED_CANDIDATE: &str = "Experienced Professional";

const LISTING_FIELDS: &[&str] = &[
    fields::JOB_POSTING_ID,
    fields::COMPANY_NAME,
    fields::JOB_TITLE,
    fields::IDEAL_START_DATE,
    fields::ANTICIPATED_END_DATE,
    fields::REMOTE_IN_PERSON,
    fields::LOCATION,
    fields::HOURS_PER_WEEK,
    fields::PAID_UNPAID,
    fields::JOB_POSTING_URL,
    fields::COMPANY_LOGO,
    fields::COMPANY_TYPE,
    fields::COMPANY_DESCRIPTION,
    fields::ATS,
    fields::EXTERNAL_LINK,
    fields::STATUS,
    fields::JOB_TYPE,
];

/// General listings also carry the description and creation time.
const GENERAL_LISTING_FIELDS: &[&str] = &[
    fields::JOB_POSTING_ID,
    fields::COMPANY_NAME,
    fields::JOB_TITLE,
    fields::JOB_DESCRIPTION,
    fields::IDEAL_START_DATE,
    fields::ANTICIPATED_END_DATE,
    fields::REMOTE_IN_PERSON,
    fields::LOCATION,
    fields::HOURS_PER_WEEK,
    fields::PAID_UNPAID,
    fields::JOB_POSTING_URL,
    fields::COMPANY_LOGO,
    fields::COMPANY_TYPE,
    fields::COMPANY_DESCRIPTION,
    fields::ATS,
    fields::EXTERNAL_LINK,
    fields::STATUS,
    fields::JOB_TYPE,
    fields::CREATED_AT,
];

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("record store error: {0}")]
    Store(#[from] StoreError),

    #[error("candidate type not found for {0}")]
    CandidateNotFound(String),
}

/// Which listing a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Professional,
    Company,
    General,
}

impl Listing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Listing::Professional => "professional",
            Listing::Company => "company",
            Listing::General => "general",
        }
    }

    fn fields(&self) -> &'static [&'static str] {
        match self {
            Listing::General => GENERAL_LISTING_FIELDS,
            Listing::Professional | Listing::Company => LISTING_FIELDS,
        }
    }
}

/// Values of the `Job Type` column that partition postings by audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCategory {
    Mbas,
    Graduates,
}

impl JobCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobCategory::Mbas => "MBAs",
            JobCategory::Graduates => "Graduates",
        }
    }

    pub fn for_candidate_type(candidate_type: &str) -> Self {
        if candidate_type.trim() == EXPERIENCED_CANDIDATE {
            JobCategory::Mbas
        } else {
            JobCategory::Graduates
        }
    }
}

/// How the general listing picks its base predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneralJobsPolicy {
    /// Every approved posting.
    #[default]
    ApprovedOnly,
    /// Approved postings in the category matching the requester's candidate
    /// type. Requests without a `user` fall back to `ApprovedOnly`.
    CandidateType,
}

impl GeneralJobsPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneralJobsPolicy::ApprovedOnly => "approved",
            GeneralJobsPolicy::CandidateType => "candidate-type",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown general jobs policy '{0}'")]
pub struct ParsePolicyError(String);

impl FromStr for GeneralJobsPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approved" => Ok(GeneralJobsPolicy::ApprovedOnly),
            "candidate-type" | "candidate_type" => Ok(GeneralJobsPolicy::CandidateType),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

fn category_predicate(category: JobCategory) -> Formula {
    Formula::and(vec![
        Formula::field(fields::JOB_TYPE).equals(Formula::text(category.as_str())),
        Formula::not(
            Formula::field(fields::STATUS).equals(Formula::text("Not approved")),
        ),
    ])
}

fn approved_predicate() -> Formula {
    Formula::and(vec![Formula::field(fields::STATUS).equals(Formula::text("Approved"))])
}

fn approved_in_category_predicate(category: JobCategory) -> Formula {
    Formula::and(vec![
        Formula::field(fields::JOB_TYPE).equals(Formula::text(category.as_str())),
        Formula::field(fields::STATUS).equals(Formula::text("Approved")),
    ])
}

#[derive(Clone)]
pub struct JobsService {
    store: Arc<dyn RecordStore>,
    general_policy: GeneralJobsPolicy,
}

impl JobsService {
    pub fn new(store: Arc<dyn RecordStore>, general_policy: GeneralJobsPolicy) -> Self {
        Self {
            store,
            general_policy,
        }
    }

    /// Fetches every posting matching `listing` + `filters` and returns the
    /// requested 1-based page along with the total match count.
    pub async fn list_jobs(
        &self,
        listing: Listing,
        filters: &JobFilters,
        page: u32,
        page_size: usize,
    ) -> Result<JobsPage, ServiceError> {
        let base = self.base_predicate(listing, filters).await?;
        let formula = build_filter_formula(base, filters).to_string();
        debug!("{} listing formula: {}", listing.as_str(), formula);

        let mut query = SelectQuery::new()
            .view(JOBS_VIEW)
            .filter_by_formula(formula)
            .fields(listing.fields());
        if listing == Listing::General {
            query = query.sort(fields::CREATED_AT, SortDirection::Desc);
        }

        let records = self.store.select_all(JOBS_TABLE, &query).await?;
        let total_count = records.len();
        let jobs = paginate(records, page, page_size)
            .iter()
            .map(map_job_posting)
            .collect();

        Ok(JobsPage { jobs, total_count })
    }

    pub async fn get_job(&self, id: &str) -> Result<JobPosting, ServiceError> {
        let record = self.store.find(JOBS_TABLE, id).await?;
        Ok(map_job_posting(&record))
    }

    async fn base_predicate(
        &self,
        listing: Listing,
        filters: &JobFilters,
    ) -> Result<Formula, ServiceError> {
        match listing {
            Listing::Professional => Ok(category_predicate(JobCategory::Mbas)),
            Listing::Company => Ok(category_predicate(JobCategory::Graduates)),
            Listing::General => match (self.general_policy, filters.user.as_deref()) {
                (GeneralJobsPolicy::CandidateType, Some(email)) => {
                    let category = self.lookup_candidate_category(email).await?;
                    Ok(approved_in_category_predicate(category))
                }
                _ => Ok(approved_predicate()),
            },
        }
    }

    async fn lookup_candidate_category(&self, email: &str) -> Result<JobCategory, ServiceError> {
        let formula = Formula::field(fields::EMAIL).equals(Formula::text(email));
        let query = SelectQuery::new()
            .view(CANDIDATES_VIEW)
            .filter_by_formula(formula.to_string())
            .fields(&[CANDIDATE_TYPE_FIELD]);

        let rows = self.store.select_all(CANDIDATES_TABLE, &query).await?;
        let row = rows
            .first()
            .ok_or_else(|| ServiceError::CandidateNotFound(email.to_string()))?;

        let candidate_type = row
            .get(CANDIDATE_TYPE_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default();
        debug!("Candidate {} has type '{}'", email, candidate_type);

        Ok(JobCategory::for_candidate_type(candidate_type))
    }
}

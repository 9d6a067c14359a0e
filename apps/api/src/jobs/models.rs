use serde::{Deserialize, Serialize};

/// Column names in the `Job Postings` table.
pub mod fields {
    pub const JOB_POSTING_ID: &str = "Job Posting Id";
    pub const COMPANY_NAME: &str = "Company Name";
    pub const JOB_TITLE: &str = "Job Title";
    pub const JOB_DESCRIPTION: &str = "Job Description";
    pub const IDEAL_START_DATE: &str = "Ideal Start Date";
    pub const ANTICIPATED_END_DATE: &str = "Anticipated end date";
    pub const REMOTE_IN_PERSON: &str = "Remote/In person";
    pub const LOCATION: &str = "Location";
    pub const HOURS_PER_WEEK: &str = "Hours Per Week";
    pub const PAID_UNPAID: &str = "Paid/Unpaid";
    pub const JOB_POSTING_URL: &str = "Job Posting URL";
    pub const COMPANY_LOGO: &str = "Company Logo";
    pub const COMPANY_TYPE: &str = "Company Type";
    pub const COMPANY_DESCRIPTION: &str = "Company Description";
    pub const ATS: &str = "ATS";
    pub const EXTERNAL_LINK: &str = "External Link";
    pub const STATUS: &str = "Status";
    pub const JOB_TYPE: &str = "Job Type";
    pub const CREATED_AT: &str = "Created_at";
    pub const EMAIL: &str = "Email";
    pub const COMPANY_WEBSITE: &str = "Company Website";
    pub const APPLICATION_PAGE_URL: &str = "Application Page URL";
}

/// User-supplied listing filters, built per request from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilters {
    pub keyword: Option<String>,
    pub work_types: Vec<String>,
    pub payment_types: Vec<String>,
    pub job_types: Vec<String>,
    /// Requester email; only read by the candidate-type listing policy.
    pub user: Option<String>,
}

/// A job listing as served to clients. Every store-sourced field is optional
/// and left out of the JSON when the row has no value for it.
///
/// Text fields are always JSON strings. Multi-select and lookup cells (for
/// example `Job Type` holding `["MBAs", "Graduates"]`) are flattened into one
/// comma-separated string (`"MBAs, Graduates"`) instead of being passed through
/// as arrays.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_posting_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideal_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anticipated_end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_in_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_per_week: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_unpaid: Option<String>,
    #[serde(rename = "jobPostingURL", skip_serializing_if = "Option::is_none")]
    pub job_posting_url: Option<String>,
    /// Serialized as `null` rather than omitted when there is no logo.
    pub company_logo: Option<Vec<AttachmentField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ats: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Comma-joined when the cell holds several options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(rename = "created_At", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_link: Option<String>,
}

/// An Airtable attachment cell entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttachmentField {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default)]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thumbnails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<Thumbnail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// One page of listings plus the size of the full matching set.
#[derive(Debug, Clone, PartialEq)]
pub struct JobsPage {
    pub jobs: Vec<JobPosting>,
    pub total_count: usize,
}

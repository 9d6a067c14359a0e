use serde_json::Value;

use crate::airtable::Record;
use crate::jobs::models::{fields, AttachmentField, JobPosting};

/// Maps a store row onto a `JobPosting`. Total: a field that is missing or
/// has an unexpected shape becomes `None`.
pub fn map_job_posting(record: &Record) -> JobPosting {
    JobPosting {
        id: record.id.clone(),
        job_posting_id: text(record, fields::JOB_POSTING_ID),
        company_name: text(record, fields::COMPANY_NAME),
        job_title: text(record, fields::JOB_TITLE),
        ideal_start_date: text(record, fields::IDEAL_START_DATE),
        anticipated_end_date: text(record, fields::ANTICIPATED_END_DATE),
        remote_in_person: text(record, fields::REMOTE_IN_PERSON),
        location: text(record, fields::LOCATION),
        hours_per_week: number(record, fields::HOURS_PER_WEEK),
        paid_unpaid: text(record, fields::PAID_UNPAID),
        job_posting_url: text(record, fields::JOB_POSTING_URL),
        company_logo: attachments(record, fields::COMPANY_LOGO),
        company_type: text(record, fields::COMPANY_TYPE),
        company_description: text(record, fields::COMPANY_DESCRIPTION),
        ats: text(record, fields::ATS),
        external_link: text(record, fields::EXTERNAL_LINK),
        status: text(record, fields::STATUS),
        job_type: text(record, fields::JOB_TYPE),
        created_at: text(record, fields::CREATED_AT),
        job_description: text(record, fields::JOB_DESCRIPTION),
        email: text(record, fields::EMAIL),
        website: text(record, fields::COMPANY_WEBSITE),
        application_link: text(record, fields::APPLICATION_PAGE_URL),
    }
}

fn text(record: &Record, field: &str) -> Option<String> {
    record.get(field).and_then(value_to_text)
}

/// Multi-select and lookup cells arrive as arrays; they are joined.
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let parts = items
                .iter()
                .map(scalar_to_text)
                .collect::<Option<Vec<_>>>()?;
            Some(parts.join(", "))
        }
        other => scalar_to_text(other),
    }
}

fn scalar_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn number(record: &Record, field: &str) -> Option<f64> {
    match record.get(field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn attachments(record: &Record, field: &str) -> Option<Vec<AttachmentField>> {
    record
        .get(field)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

use anyhow::{Context, Result};

use crate::jobs::service::GeneralJobsPolicy;

const DEFAULT_AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://jobslist.searchfundfellows.com",
    "http://localhost:3000",
];

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub airtable_api_url: String,
    pub airtable_timeout_secs: u64,
    /// Auxiliary auth store. Recognised but not used by any request path.
    pub supabase: Option<SupabaseConfig>,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub general_jobs_policy: GeneralJobsPolicy,
    pub rust_log: String,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_role_key: Option<String>,
    pub anon_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            airtable_api_key: require_env("AIRTABLE_API_KEY")?,
            airtable_base_id: require_env("AIRTABLE_BASE_ID")?,
            airtable_api_url: optional_env("AIRTABLE_API_URL")
                .unwrap_or_else(|| DEFAULT_AIRTABLE_API_URL.to_string()),
            airtable_timeout_secs: optional_env("AIRTABLE_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse::<u64>()
                .context("AIRTABLE_TIMEOUT_SECS must be a whole number of seconds")?,
            supabase: optional_env("SUPABASE_URL").map(|url| SupabaseConfig {
                url,
                service_role_key: optional_env("SUPABASE_SERVICE_ROLE_KEY"),
                anon_key: optional_env("SUPABASE_ANON_KEY"),
            }),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            allowed_origins: optional_env("ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_else(|| {
                    DEFAULT_ALLOWED_ORIGINS
                        .iter()
                        .map(|o| o.to_string())
                        .collect()
                }),
            general_jobs_policy: optional_env("GENERAL_JOBS_POLICY")
                .map(|raw| raw.parse::<GeneralJobsPolicy>())
                .transpose()
                .context("GENERAL_JOBS_POLICY must be 'approved' or 'candidate-type'")?
                .unwrap_or_default(),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_blanks() {
        let origins = parse_origins(" https://a.example , ,http://localhost:3000,");
        assert_eq!(origins, vec!["https://a.example", "http://localhost:3000"]);
    }
}

pub mod api;
pub mod date;
pub mod db;
pub mod logging;
pub mod matching;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// Commonly used data models for the matching functions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateProfile {
    pub skills: Vec<String>,
    pub work_history: Vec<WorkExperience>,
    pub declared_experience_years: Option<String>,
    pub recent_job_title: Option<String>,
    pub current_role: Option<String>,
    pub headline: Option<String>,
}

/// One work-history entry. Dates are free text as entered by the candidate
/// (`YYYY-MM-DD`, `YYYY/MM/DD`, or a bare year); a missing end date means
/// the position is ongoing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobRequirements {
    pub title: String,
    pub skills: Vec<String>,
    /// Free-text minimum experience requirement ("2", "3+ years"). Parsed
    /// to whole years inside the scorer; unparseable defaults to 0.
    pub experience: Option<String>,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewing,
    Shortlisted,
    Interview,
    Rejected,
    Accepted,
    Withdrawn,
}

/// A stored job application together with the applicant fields the employer
/// listing needs. Only `applicant_is_premium`, `match_score`, and
/// `submitted_at` participate in ranking; everything else passes through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub applicant_id: i64,
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
    pub applicant_is_premium: bool,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
    pub answers: Option<serde_json::Value>,
    pub status: ApplicationStatus,
    pub match_score: Option<i32>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<i64>,
    pub notes: Option<String>,
}
